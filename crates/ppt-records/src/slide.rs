use ppt_wire::{Corrupted, HeaderSpec, Length, Match, Record, RecordReader};

use crate::enums::SlideLayout;
use crate::geometry::Color;
use crate::headers_footers::HeadersFooters;
use crate::opaque::Opaque;
use crate::prog_tags::SlideProgTags;
use crate::record_type::code;
use crate::text::CString;

/// `CString` instance of a slide name.
pub const SLIDE_NAME_INSTANCE: u16 = 3;

pub type SlideShowSlideInfoAtom = Opaque<{ code::SLIDE_SHOW_SLIDE_INFO_ATOM }>;
pub type SlideSyncInfo = Opaque<{ code::ROUND_TRIP_SLIDE_SYNC_INFO_12 }>;
pub type Drawing = Opaque<{ code::DRAWING }>;

/// Which parts of the master a slide inherits. Three flags in the low
/// bits of a `u16`; the rest is reserved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideFlags {
    pub master_objects: bool,
    pub master_scheme: bool,
    pub master_background: bool,
}

impl SlideFlags {
    fn read(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let mut bits = body.read_bits_u16()?;
        let flags = Self {
            master_objects: bits.read_bit(),
            master_scheme: bits.read_bit(),
            master_background: bits.read_bit(),
        };
        let _reserved = bits.read_remaining_bits();
        Ok(flags)
    }
}

/// Layout and master references of a slide.
///
/// ```text
/// ┌────────┬──────┬───────────────────────────────┐
/// │ Offset │ Size │ Field                         │
/// ├────────┼──────┼───────────────────────────────┤
/// │ 0x00   │ 4    │ geom (SlideLayout)            │
/// │ 0x04   │ 8    │ rgPlaceholderTypes            │
/// │ 0x0C   │ 4    │ masterIdRef                   │
/// │ 0x10   │ 4    │ notesIdRef                    │
/// │ 0x14   │ 2    │ slideFlags                    │
/// │ 0x16   │ 2    │ unused                        │
/// └────────┴──────┴───────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlideAtom {
    pub layout: SlideLayout,
    pub placeholder_types: [u8; 8],
    /// Slide id of the master, 0 for a master itself.
    pub master_id: u32,
    /// Slide id of the notes slide, 0 when there is none.
    pub notes_id: u32,
    pub flags: SlideFlags,
}

impl Record for SlideAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("SlideAtom", code::SLIDE_ATOM, Length::Exact(0x18)).with_version(2);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let layout = body.read_u32()?;
        let layout = body.check(SlideLayout::from_wire(layout))?;
        let mut placeholder_types = [0u8; 8];
        placeholder_types.copy_from_slice(body.read_bytes(8)?);
        let master_id = body.read_u32()?;
        let notes_id = body.read_u32()?;
        let flags = SlideFlags::read(body)?;
        body.skip(2)?;
        Ok(Self {
            layout,
            placeholder_types,
            master_id,
            notes_id,
            flags,
        })
    }
}

/// The eight colors of a slide's color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSchemeAtom {
    pub background: Color,
    pub text_and_lines: Color,
    pub shadow: Color,
    pub title_text: Color,
    pub fill: Color,
    pub accent1: Color,
    pub accent2: Color,
    pub accent3: Color,
}

impl Record for ColorSchemeAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("ColorSchemeAtom", code::COLOR_SCHEME_ATOM, Length::Exact(0x20))
            .with_instances(ppt_wire::Instances::Only(1));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            background: Color::read(body)?,
            text_and_lines: Color::read(body)?,
            shadow: Color::read(body)?,
            title_text: Color::read(body)?,
            fill: Color::read(body)?,
            accent1: Color::read(body)?,
            accent2: Color::read(body)?,
            accent3: Color::read(body)?,
        })
    }
}

fn slide_name(body: &mut RecordReader<'_, '_>) -> Result<Option<String>, Corrupted> {
    let slot = Match::of::<CString>().instance(SLIDE_NAME_INSTANCE);
    Ok(body.optional_matching::<CString>(slot)?.map(|s| s.text))
}

/// A presentation slide, or a title master.
///
/// Round-trip records that newer writers append after the known slots
/// are skipped and counted.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideContainer {
    pub slide_atom: SlideAtom,
    pub show_info: Option<SlideShowSlideInfoAtom>,
    pub headers_footers: Option<HeadersFooters>,
    pub sync_info: Option<SlideSyncInfo>,
    pub drawing: Drawing,
    pub color_scheme: ColorSchemeAtom,
    pub name: Option<String>,
    pub prog_tags: Option<SlideProgTags>,
    pub skipped_records: usize,
}

impl Record for SlideContainer {
    const HEADER: HeaderSpec = HeaderSpec::container("SlideContainer", code::SLIDE);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            slide_atom: body.mandatory()?,
            show_info: body.optional()?,
            headers_footers: body.optional_matching(Match::of::<HeadersFooters>().instance(3))?,
            sync_info: body.optional()?,
            drawing: body.mandatory()?,
            color_scheme: body.mandatory()?,
            name: slide_name(body)?,
            prog_tags: body.optional()?,
            skipped_records: body.skip_unknown(|_| false)?,
        })
    }
}

/// Which slide a notes page belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotesAtom {
    /// Slide id of the slide, 0 for the notes master.
    pub slide_id: u32,
    pub flags: SlideFlags,
}

impl Record for NotesAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("NotesAtom", code::NOTES_ATOM, Length::Exact(8)).with_version(1);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let slide_id = body.read_u32()?;
        let flags = SlideFlags::read(body)?;
        body.skip(2)?;
        Ok(Self { slide_id, flags })
    }
}

/// A notes page, or the notes master.
#[derive(Clone, Debug, PartialEq)]
pub struct NotesContainer {
    pub notes_atom: NotesAtom,
    pub drawing: Drawing,
    pub color_scheme: ColorSchemeAtom,
    pub name: Option<String>,
    pub prog_tags: Option<SlideProgTags>,
    pub skipped_records: usize,
}

impl Record for NotesContainer {
    const HEADER: HeaderSpec = HeaderSpec::container("NotesContainer", code::NOTES);

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            notes_atom: body.mandatory()?,
            drawing: body.mandatory()?,
            color_scheme: body.mandatory()?,
            name: slide_name(body)?,
            prog_tags: body.optional()?,
            skipped_records: body.skip_unknown(|_| false)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppt_wire::fixture::{Body, atom, container};
    use ppt_wire::{Cause, Limits, decode_at};

    fn slide_atom(layout: u32, flags: u16) -> Vec<u8> {
        let body = Body::new()
            .u32(layout)
            .bytes(&[0x0D, 0x0E, 0, 0, 0, 0, 0, 0])
            .u32(0x8000_0000)
            .u32(0)
            .u16(flags)
            .u16(0)
            .build();
        atom(2, 0, code::SLIDE_ATOM, &body)
    }

    fn color_scheme() -> Vec<u8> {
        let mut body = Body::new();
        for i in 0..8u8 {
            body = body.u8(i).u8(i).u8(i).u8(0);
        }
        atom(0, 1, code::COLOR_SCHEME_ATOM, &body.build())
    }

    fn drawing() -> Vec<u8> {
        container(code::DRAWING, 0, &[atom(0, 0, 0xF008, &[0; 8])])
    }

    #[test]
    fn slide_with_name_and_trailing_round_trip_records() {
        let name = atom(0, 3, code::CSTRING, &Body::new().utf16("Intro").build());
        let round_trip = atom(0, 0, code::ROUND_TRIP_SHAPE_ID_12_ATOM, &[1, 0, 0, 0]);
        let buf = container(
            code::SLIDE,
            0,
            &[slide_atom(1, 0b101), drawing(), color_scheme(), name, round_trip.clone(), round_trip],
        );
        let slide: SlideContainer = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(slide.slide_atom.layout, SlideLayout::TitleBody);
        assert_eq!(slide.slide_atom.master_id, 0x8000_0000);
        assert!(slide.slide_atom.flags.master_objects);
        assert!(!slide.slide_atom.flags.master_scheme);
        assert!(slide.slide_atom.flags.master_background);
        assert_eq!(slide.color_scheme.accent3, Color { red: 7, green: 7, blue: 7 });
        assert_eq!(slide.name.as_deref(), Some("Intro"));
        assert!(slide.prog_tags.is_none());
        assert_eq!(slide.skipped_records, 2);
    }

    #[test]
    fn missing_drawing() {
        let buf = container(code::SLIDE, 0, &[slide_atom(0, 0)]);
        let err = decode_at::<SlideContainer>(&buf, 0, Limits::default()).unwrap_err();
        assert_eq!(err.cause, Cause::MissingRecord { record: "Drawing" });
    }

    #[test]
    fn color_scheme_requires_instance_one() {
        let mut scheme = color_scheme();
        // Rewrite the instance to 6 (a master's extra schemes).
        scheme[0..2].copy_from_slice(&(6u16 << 4).to_le_bytes());
        let err = decode_at::<ColorSchemeAtom>(&scheme, 0, Limits::default()).unwrap_err();
        assert!(matches!(err.cause, Cause::HeaderMismatch { field: "recInstance", .. }));
    }

    #[test]
    fn notes_page() {
        let notes_atom = atom(1, 0, code::NOTES_ATOM, &Body::new().u32(256).u16(0b011).u16(0).build());
        let buf = container(code::NOTES, 0, &[notes_atom, drawing(), color_scheme()]);
        let notes: NotesContainer = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(notes.notes_atom.slide_id, 256);
        assert!(notes.notes_atom.flags.master_scheme);
        assert_eq!(notes.skipped_records, 0);
    }
}
