use ppt_wire::{Corrupted, HeaderSpec, Instances, Length, Record, RecordReader};

use crate::enums::SlideListKind;
use crate::record_type::code;
use crate::text::TextGroup;

/// Locates one slide, master or notes slide in the persist directory.
///
/// ```text
/// ┌────────┬──────┬──────────────────────────────────────────────┐
/// │ Offset │ Size │ Field                                        │
/// ├────────┼──────┼──────────────────────────────────────────────┤
/// │ 0x00   │ 4    │ persistIdRef                                 │
/// │ 0x04   │ 4    │ bit 0 reserved, bit 1 fShouldCollapse,       │
/// │        │      │ bit 2 fNonOutlineData, bits 3..32 reserved   │
/// │ 0x08   │ 4    │ cTexts (i32)                                 │
/// │ 0x0C   │ 4    │ slideId                                      │
/// │ 0x10   │ 4    │ reserved                                     │
/// └────────┴──────┴──────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlidePersistAtom {
    pub persist_id: u32,
    pub should_collapse: bool,
    pub non_outline_data: bool,
    /// Number of placeholder text bodies on the slide.
    pub text_count: i32,
    pub slide_id: u32,
}

impl Record for SlidePersistAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("SlidePersistAtom", code::SLIDE_PERSIST_ATOM, Length::Exact(0x14));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let persist_id = body.read_u32()?;

        let mut flags = body.read_bits_u32()?;
        let _reserved = flags.read_bit();
        let should_collapse = flags.read_bit();
        let non_outline_data = flags.read_bit();
        let _reserved = flags.read_remaining_bits();

        let text_count = body.read_i32()?;
        let slide_id = body.read_u32()?;
        body.skip(4)?;
        Ok(Self {
            persist_id,
            should_collapse,
            non_outline_data,
            text_count,
            slide_id,
        })
    }
}

/// A slide and the outline text stored with it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideListEntry {
    pub persist: SlidePersistAtom,
    pub texts: Vec<TextGroup>,
}

/// The ordered list of slides, masters or notes, by instance.
///
/// ```text
///   SlideListWithTextContainer (0x0FF0, instance 0 / 1 / 2)
///   ├── SlidePersistAtom
///   │   └── TextGroup*        (slides list only, in practice)
///   ├── SlidePersistAtom
///   └── ...
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideListWithText {
    pub kind: SlideListKind,
    pub entries: Vec<SlideListEntry>,
}

impl SlideListWithText {
    /// Persist ids of the listed slides, in list order.
    pub fn persist_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.persist.persist_id)
    }
}

impl Record for SlideListWithText {
    const HEADER: HeaderSpec =
        HeaderSpec::container("SlideListWithTextContainer", code::SLIDE_LIST_WITH_TEXT)
            .with_instances(Instances::OneOf(&[0, 1, 2]));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let kind = body.check(SlideListKind::from_wire(body.header().instance))?;
        let mut entries = Vec::new();
        while let Some(persist) = body.optional::<SlidePersistAtom>()? {
            let texts = TextGroup::decode_run(body)?;
            entries.push(SlideListEntry { persist, texts });
        }
        Ok(Self { kind, entries })
    }
}
