use std::collections::BTreeMap;

use ppt_wire::{Cause, Corrupted};

/// Stream holding the `CurrentUserAtom`.
pub const CURRENT_USER_STREAM: &str = "Current User";

/// Stream holding every other record.
pub const DOCUMENT_STREAM: &str = "PowerPoint Document";

/// Named byte streams of a compound file.
///
/// The decoder never reads the compound file container itself; it only
/// asks for streams by name.
pub trait StreamSource {
    /// Bytes of the stream called `name`, or `None` if there is none.
    fn open_stream(&self, name: &str) -> Option<&[u8]>;
}

/// A [`StreamSource`] over streams already in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStreams {
    streams: BTreeMap<String, Vec<u8>>,
}

impl MemoryStreams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The two streams every presentation has.
    #[must_use]
    pub fn presentation(current_user: Vec<u8>, document: Vec<u8>) -> Self {
        Self::new()
            .with_stream(CURRENT_USER_STREAM, current_user)
            .with_stream(DOCUMENT_STREAM, document)
    }

    #[must_use]
    pub fn with_stream(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(name, bytes);
        self
    }

    /// Add or replace a stream.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.streams.insert(name.into(), bytes);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.streams.keys().map(String::as_str)
    }
}

impl StreamSource for MemoryStreams {
    fn open_stream(&self, name: &str) -> Option<&[u8]> {
        self.streams.get(name).map(Vec::as_slice)
    }
}

/// Open a stream the format requires.
///
/// # Errors
///
/// Returns [`Cause::MissingStream`] if `source` has no such stream.
pub fn require<'s>(
    source: &'s dyn StreamSource,
    name: &'static str,
) -> Result<&'s [u8], Corrupted> {
    source
        .open_stream(name)
        .ok_or_else(|| Corrupted::new(0, Cause::MissingStream { name }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presentation_has_both_streams() {
        let streams = MemoryStreams::presentation(vec![1], vec![2, 3]);
        assert_eq!(streams.open_stream(CURRENT_USER_STREAM), Some(&[1u8][..]));
        assert_eq!(streams.open_stream(DOCUMENT_STREAM), Some(&[2u8, 3][..]));
        assert_eq!(
            streams.names().collect::<Vec<_>>(),
            vec![CURRENT_USER_STREAM, DOCUMENT_STREAM]
        );
    }

    #[test]
    fn missing_stream_is_corrupted() {
        let streams = MemoryStreams::new().with_stream(CURRENT_USER_STREAM, vec![]);
        let err = require(&streams, DOCUMENT_STREAM).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MissingStream {
                name: DOCUMENT_STREAM
            }
        );
    }
}
