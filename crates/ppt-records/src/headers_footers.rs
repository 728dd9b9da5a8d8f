use ppt_wire::{Corrupted, HeaderSpec, Instances, Length, Match, Record, RecordReader, validate};

use crate::record_type::code;
use crate::text::CString;

/// `CString` instances inside a headers/footers container.
pub mod instance {
    pub const USER_DATE: u16 = 0;
    pub const HEADER: u16 = 1;
    pub const FOOTER: u16 = 2;
}

/// Which header and footer placeholders are shown.
///
/// `format_id` selects one of the built-in date formats, 0..=12. The
/// flags word holds six flags in its low bits; the rest is reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct HeadersFootersAtom {
    pub format_id: i16,
    pub has_date: bool,
    pub has_today_date: bool,
    pub has_user_date: bool,
    pub has_slide_number: bool,
    pub has_header: bool,
    pub has_footer: bool,
}

impl Record for HeadersFootersAtom {
    const HEADER: HeaderSpec =
        HeaderSpec::atom("HeadersFootersAtom", code::HEADERS_FOOTERS_ATOM, Length::Exact(4));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let format_id = body.read_i16()?;
        let format_id = body.check(validate::in_range("formatId", format_id, 0..=12))?;

        let mut flags = body.read_bits_u16()?;
        let has_date = flags.read_bit();
        let has_today_date = flags.read_bit();
        let has_user_date = flags.read_bit();
        let has_slide_number = flags.read_bit();
        let has_header = flags.read_bit();
        let has_footer = flags.read_bit();
        let _reserved = flags.read_remaining_bits();

        Ok(Self {
            format_id,
            has_date,
            has_today_date,
            has_user_date,
            has_slide_number,
            has_header,
            has_footer,
        })
    }
}

/// Header and footer settings for slides (instance 3) or notes and
/// handouts (instance 4).
///
/// The three strings share a record type and are told apart by instance:
/// 0 user date, 1 header, 2 footer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadersFooters {
    pub instance: u16,
    pub atom: HeadersFootersAtom,
    pub user_date: Option<String>,
    pub header: Option<String>,
    pub footer: Option<String>,
}

fn string(body: &mut RecordReader<'_, '_>, instance: u16) -> Result<Option<String>, Corrupted> {
    let slot = Match::of::<CString>().instance(instance);
    Ok(body.optional_matching::<CString>(slot)?.map(|s| s.text))
}

impl Record for HeadersFooters {
    const HEADER: HeaderSpec =
        HeaderSpec::container("HeadersFootersContainer", code::HEADERS_FOOTERS)
            .with_instances(Instances::OneOf(&[3, 4]));

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            instance: body.header().instance,
            atom: body.mandatory()?,
            user_date: string(body, instance::USER_DATE)?,
            header: string(body, instance::HEADER)?,
            footer: string(body, instance::FOOTER)?,
        })
    }
}
