#![warn(clippy::pedantic)]

//! Record-level decoding engine for the legacy binary presentation format.
//!
//! A presentation stream is a forest of self-describing records. Every
//! record starts with an 8-byte [`RecordHeader`]; atoms carry fields,
//! containers carry child records. This crate provides the byte
//! [`Cursor`], the packed [`BitFieldReader`], header checks, and the
//! [`RecordReader`] slot engine that catalog records are decoded with.
//! Every violation of the format is a single error kind, [`Corrupted`].

pub mod bits;
pub mod cursor;
pub mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;
pub mod header;
pub mod record;
pub mod validate;

pub use bits::BitFieldReader;
pub use cursor::{Cursor, Mark, TextEncoding};
pub use error::{Cause, Corrupted};
pub use header::{CONTAINER_VERSION, HEADER_SIZE, HeaderSpec, Instances, Length, RecordHeader};
pub use record::{
    DEFAULT_MAX_DEPTH, DecodeFn, Depth, Limits, Match, Record, RecordReader, Variant, decode_any,
    decode_at, decode_record, decode_variant, decode_variant_at,
};
