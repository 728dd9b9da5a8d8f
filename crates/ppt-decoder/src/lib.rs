#![warn(clippy::pedantic)]

//! Whole-presentation decoding on top of the record catalog.
//!
//! A presentation is two streams: `Current User`, which points at the
//! newest user edit, and `PowerPoint Document`, which holds every record.
//! Records are not reached by walking the stream front to back; the
//! decoder follows the user edit chain, merges its persist directories,
//! and decodes each persist object at its resolved offset.
//!
//! ```text
//!   Current User ──▶ CurrentUserAtom.offsetToCurrentEdit
//!                          │
//!   PowerPoint Document    ▼
//!   ┌─────────────────────────────────────────────────────┐
//!   │ UserEditAtom ──offsetLastEdit──▶ UserEditAtom ─▶ 0  │
//!   │      │                                 │            │
//!   │      ▼                                 ▼            │
//!   │ PersistDirectoryAtom         PersistDirectoryAtom   │
//!   │      └──────── merged, newest wins ────┘            │
//!   │                     │                               │
//!   │   persist id ──▶ offset ──▶ DocumentContainer,      │
//!   │                            masters, slides, notes   │
//!   └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod edit_chain;
pub mod presentation;
pub mod stream;
pub mod tree;

pub use config::DecoderConfig;
pub use edit_chain::{EditChain, UserEdit};
pub use presentation::{Master, PersistObject, Presentation, PresentationDecoder, SlideOutline};
pub use stream::{CURRENT_USER_STREAM, DOCUMENT_STREAM, MemoryStreams, StreamSource};
pub use tree::{RecordNode, walk_records, walk_stream};
