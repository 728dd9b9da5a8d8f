use ppt_wire::{Corrupted, HeaderSpec, Instances, Length, Record, RecordHeader, RecordReader};

use crate::record_type::name_of;

/// A record kept as raw bytes.
///
/// Used for slots whose layout this catalog doesn't model: drawings,
/// style runs, round-trip data. The record type is fixed by `TYPE`; any
/// version, instance and length are accepted, and the body still has to
/// fit its parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opaque<const TYPE: u16> {
    pub header: RecordHeader,
    pub body: Vec<u8>,
}

impl<const TYPE: u16> Record for Opaque<TYPE> {
    const HEADER: HeaderSpec = HeaderSpec {
        name: name_of(TYPE),
        record_type: TYPE,
        version: None,
        instance: Instances::Any,
        length: Length::Any,
    };

    fn decode_body(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            header: body.header(),
            body: body.read_remaining()?.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_type::code;
    use ppt_wire::fixture::{atom, container};
    use ppt_wire::{Cause, Limits, decode_at};

    type Drawing = Opaque<{ code::DRAWING }>;

    #[test]
    fn keeps_header_and_body() {
        let inner = atom(0, 0, 0xF008, &[1, 2, 3, 4]);
        let buf = container(code::DRAWING, 0, &[inner.clone()]);
        let drawing: Drawing = decode_at(&buf, 0, Limits::default()).unwrap();
        assert_eq!(drawing.header.record_type, code::DRAWING);
        assert!(drawing.header.is_container());
        assert_eq!(drawing.body, inner);
    }

    #[test]
    fn record_type_is_still_checked() {
        let buf = atom(0, 0, code::DRAWING_GROUP, &[]);
        let err = decode_at::<Drawing>(&buf, 0, Limits::default()).unwrap_err();
        assert!(matches!(
            err.cause,
            Cause::HeaderMismatch {
                record: "Drawing",
                field: "recType",
                ..
            }
        ));
    }
}
