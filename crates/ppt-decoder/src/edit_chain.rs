use std::collections::{BTreeMap, HashSet};

use ppt_records::{PersistDirectoryAtom, UserEditAtom};
use ppt_wire::{Cause, Corrupted, Limits, Record, decode_at};
use tracing::{debug, trace};

use crate::config::DecoderConfig;

/// One save of the document: its `UserEditAtom` and the persist
/// directory that save wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserEdit {
    /// Stream offset of the `UserEditAtom`.
    pub offset: u32,
    pub atom: UserEditAtom,
    pub directory: PersistDirectoryAtom,
}

/// The user edit chain of a document stream and the persist id map it
/// describes.
///
/// Edits are kept newest first. Directories are merged oldest first, so
/// an id written by a later save shadows the same id from an earlier
/// one.
///
/// ```text
///   edit 2 (newest)   { 2 → 0x0480 }
///   edit 1            { 1 → 0x0010, 2 → 0x0200 }
///   ─────────────────────────────────────────────
///   merged            { 1 → 0x0010, 2 → 0x0480 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditChain {
    /// Never empty.
    edits: Vec<UserEdit>,
    persist: BTreeMap<u32, u32>,
    stream_len: usize,
}

impl EditChain {
    /// Follow the chain from `current_edit` back to the oldest edit
    /// (`offsetLastEdit == 0`).
    ///
    /// # Errors
    ///
    /// - [`Cause::EditCycle`] if an edit offset repeats.
    /// - [`Cause::TooManyEdits`] past `config.max_edits`.
    /// - Any [`Corrupted`] from a `UserEditAtom` or `PersistDirectoryAtom`,
    ///   including offsets outside `document`.
    pub fn load(
        document: &[u8],
        current_edit: u32,
        config: &DecoderConfig,
    ) -> Result<Self, Corrupted> {
        let mut edits = Vec::new();
        let mut visited = HashSet::new();
        let mut offset = current_edit;
        loop {
            if !visited.insert(offset) {
                return Err(Corrupted::new(
                    offset as usize,
                    Cause::EditCycle { target: offset },
                ));
            }
            if edits.len() == config.max_edits {
                return Err(Corrupted::new(
                    offset as usize,
                    Cause::TooManyEdits {
                        limit: config.max_edits,
                    },
                ));
            }

            let atom: UserEditAtom = decode_at(document, offset as usize, config.limits)?;
            let directory: PersistDirectoryAtom = decode_at(
                document,
                atom.offset_persist_directory as usize,
                config.limits,
            )?;
            debug!(
                offset,
                last_edit = atom.offset_last_edit,
                directory = atom.offset_persist_directory,
                entries = directory.entries.len(),
                "user edit"
            );

            let previous = atom.offset_last_edit;
            edits.push(UserEdit {
                offset,
                atom,
                directory,
            });
            if previous == 0 {
                break;
            }
            offset = previous;
        }

        let mut persist = BTreeMap::new();
        for edit in edits.iter().rev() {
            let mut written = 0usize;
            for (persist_id, object_offset) in edit.directory.iter() {
                persist.insert(persist_id, object_offset);
                written += 1;
            }
            debug!(
                edit = edit.offset,
                written,
                total = persist.len(),
                "merged persist directory"
            );
        }

        Ok(Self {
            edits,
            persist,
            stream_len: document.len(),
        })
    }

    /// The newest edit, the one the current user points at.
    #[must_use]
    pub fn current(&self) -> &UserEdit {
        &self.edits[0]
    }

    /// Every edit, newest first.
    #[must_use]
    pub fn edits(&self) -> &[UserEdit] {
        &self.edits
    }

    /// The merged `(persist id, stream offset)` map in id order.
    pub fn persist_entries(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.persist.iter().map(|(&id, &offset)| (id, offset))
    }

    /// Stream offset of `persist_id`.
    ///
    /// # Errors
    ///
    /// - [`Cause::UnresolvedPersistId`] if no edit wrote the id.
    /// - [`Cause::OffsetOutOfBounds`] if the offset lies past the stream.
    pub fn resolve(&self, persist_id: u32) -> Result<usize, Corrupted> {
        let directory = self.current().atom.offset_persist_directory as usize;
        let offset = *self.persist.get(&persist_id).ok_or_else(|| {
            Corrupted::new(directory, Cause::UnresolvedPersistId { persist_id })
        })?;
        if offset as usize >= self.stream_len {
            return Err(Corrupted::new(
                directory,
                Cause::OffsetOutOfBounds {
                    target: u64::from(offset),
                    len: self.stream_len,
                },
            ));
        }
        trace!(persist_id, offset, "resolved persist id");
        Ok(offset as usize)
    }

    /// Resolve `persist_id` and decode the `R` found there.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), plus anything the record raises.
    pub fn decode_object<R: Record>(
        &self,
        document: &[u8],
        persist_id: u32,
        limits: Limits,
    ) -> Result<R, Corrupted> {
        let offset = self.resolve(persist_id)?;
        debug!(persist_id, offset, record = R::HEADER.name, "decoding persist object");
        decode_at(document, offset, limits)
    }
}
