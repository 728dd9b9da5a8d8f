use ppt_wire::Limits;

/// Default ceiling on the number of user edits followed.
pub const DEFAULT_MAX_EDITS: usize = 4096;

/// Configuration for [`PresentationDecoder`](crate::PresentationDecoder).
///
/// ```text
/// ┌──────────────┬─────────┬──────────────────────────────────────────┐
/// │ Field        │ Default │ Effect                                   │
/// ├──────────────┼─────────┼──────────────────────────────────────────┤
/// │ limits       │ 64 deep │ record nesting ceiling per object        │
/// │ max_edits    │ 4096    │ user edits followed before giving up     │
/// │ decode_notes │ true    │ decode the notes pages of the notes list │
/// └──────────────┴─────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub limits: Limits,

    /// Longest user edit chain accepted. A chain that is still going
    /// after this many edits is treated as corrupt.
    pub max_edits: usize,

    /// When false, notes pages are left undecoded and
    /// [`Presentation::notes`](crate::Presentation::notes) is empty.
    pub decode_notes: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            max_edits: DEFAULT_MAX_EDITS,
            decode_notes: true,
        }
    }
}
