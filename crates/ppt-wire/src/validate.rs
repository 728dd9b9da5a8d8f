use std::ops::RangeInclusive;

use crate::error::{Cause, Corrupted};
use crate::header::RecordHeader;

/// Check that a record body consumed exactly its declared length.
///
/// `start` is the position right after the record's header, `position`
/// where decoding of the body stopped. This is the terminal check of
/// every record, atom or container, at every nesting level.
///
/// # Errors
///
/// Returns [`Cause::LengthMismatch`] on any shortfall or overrun.
pub fn body_length(header: &RecordHeader, start: usize, position: usize) -> Result<(), Corrupted> {
    let consumed = position.saturating_sub(start);
    if consumed as u64 != u64::from(header.length) {
        return Err(Corrupted::new(
            position,
            Cause::LengthMismatch {
                declared: header.length,
                consumed,
            },
        ));
    }
    Ok(())
}

/// Check that at most one slot of a one-of group is present.
///
/// Each entry is `(slot name, present)`. The first two present slots are
/// named in the error.
///
/// # Errors
///
/// Returns [`Cause::MutuallyExclusive`] if two or more slots are present.
pub fn exclusive(offset: usize, slots: &[(&'static str, bool)]) -> Result<(), Corrupted> {
    let mut present = slots
        .iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| *name);
    if let (Some(first), Some(second)) = (present.next(), present.next()) {
        return Err(Corrupted::new(
            offset,
            Cause::MutuallyExclusive { first, second },
        ));
    }
    Ok(())
}

/// Check `value` against an inclusive range.
///
/// # Errors
///
/// Returns [`Cause::OutOfRange`] when `value` lies outside `range`.
pub fn in_range<T>(field: &'static str, value: T, range: RangeInclusive<T>) -> Result<T, Cause>
where
    T: Copy + PartialOrd + Into<i64>,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Cause::OutOfRange {
            field,
            value: value.into(),
        })
    }
}

/// Check a field the format pins to one constant.
///
/// # Errors
///
/// Returns [`Cause::OutOfRange`] when `value != expected`.
pub fn expect_value<T>(field: &'static str, value: T, expected: T) -> Result<T, Cause>
where
    T: Copy + PartialEq + Into<i64>,
{
    if value == expected {
        Ok(value)
    } else {
        Err(Cause::OutOfRange {
            field,
            value: value.into(),
        })
    }
}

/// Interpret a one-byte boolean, which must be exactly 0 or 1.
///
/// # Errors
///
/// Returns [`Cause::OutOfRange`] for any other byte.
pub fn bool8(field: &'static str, value: u8) -> Result<bool, Cause> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(Cause::OutOfRange {
            field,
            value: other.into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(length: u32) -> RecordHeader {
        RecordHeader {
            version: 0,
            instance: 0,
            record_type: 0x0FA0,
            length,
        }
    }

    #[test]
    fn body_length_exact() {
        assert!(body_length(&header(4), 8, 12).is_ok());
    }

    #[test]
    fn body_length_short_by_one() {
        let err = body_length(&header(4), 8, 11).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::LengthMismatch {
                declared: 4,
                consumed: 3
            }
        );
        assert_eq!(err.offset, 11);
    }

    #[test]
    fn body_length_overrun() {
        assert!(body_length(&header(4), 8, 13).is_err());
    }

    #[test]
    fn exclusive_allows_zero_or_one() {
        assert!(exclusive(0, &[("a", false), ("b", false)]).is_ok());
        assert!(exclusive(0, &[("a", true), ("b", false)]).is_ok());
    }

    #[test]
    fn exclusive_names_the_first_two_present() {
        let err = exclusive(3, &[("a", false), ("b", true), ("c", true), ("d", true)]).unwrap_err();
        assert_eq!(
            err.cause,
            Cause::MutuallyExclusive {
                first: "b",
                second: "c"
            }
        );
    }

    #[test]
    fn range_and_constant_checks() {
        assert_eq!(in_range("firstSlideNumber", 9999u16, 0..=9999), Ok(9999));
        assert!(in_range("firstSlideNumber", 10_000u16, 0..=9999).is_err());
        assert_eq!(expect_value("majorVersion", 3u8, 3), Ok(3));
        assert_eq!(
            expect_value("majorVersion", 2u8, 3),
            Err(Cause::OutOfRange {
                field: "majorVersion",
                value: 2
            })
        );
    }

    #[test]
    fn bool8_is_strict() {
        assert_eq!(bool8("fSaveWithFonts", 0), Ok(false));
        assert_eq!(bool8("fSaveWithFonts", 1), Ok(true));
        assert!(bool8("fSaveWithFonts", 2).is_err());
    }
}
