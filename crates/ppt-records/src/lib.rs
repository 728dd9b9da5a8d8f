#![warn(clippy::pedantic)]

//! Catalog of presentation records.
//!
//! Each record type is a plain struct implementing [`ppt_wire::Record`]:
//! its `HEADER` constants plus a body decoder written against the slot
//! engine. Records the decoder doesn't interpret are kept as
//! [`Opaque`] bytes under their own type code.

pub mod record_type;
pub mod enums;
pub mod geometry;
pub mod opaque;
pub mod document;
pub mod environment;
pub mod text;
pub mod slide_list;
pub mod headers_footers;
pub mod slide;
pub mod prog_tags;
pub mod timing;
pub mod persist;

pub use document::{DocumentAtom, DocumentContainer, EndDocumentAtom};
pub use enums::{
  ElementReference, HeaderToken, SlideLayout, SlideListKind, SlideSize, TextType, TimeNodeFill,
  TimeNodeType, TriggerObject, VisualElementType,
};
pub use environment::{DocumentTextInfo, FontCollection, FontEntityAtom};
pub use geometry::{Color, Point, Ratio};
pub use headers_footers::{HeadersFooters, HeadersFootersAtom};
pub use opaque::Opaque;
pub use persist::{CurrentUserAtom, PersistDirectoryAtom, PersistDirectoryEntry, UserEditAtom};
pub use prog_tags::{ProgTag, SlideProgTags};
pub use record_type::name_of;
pub use slide::{NotesAtom, NotesContainer, SlideAtom, SlideContainer};
pub use slide_list::{SlideListEntry, SlideListWithText, SlidePersistAtom};
pub use text::{Text, TextGroup, TextHeaderAtom, TextInteractive};
pub use timing::ExtTimeNode;
