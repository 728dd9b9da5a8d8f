use ppt_wire::{Corrupted, RecordReader, validate};

/// A point or size in master units (576 per inch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub(crate) fn read(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        Ok(Self {
            x: body.read_i32()?,
            y: body.read_i32()?,
        })
    }
}

/// A scale factor, `numer / denom`. Both parts are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ratio {
    pub numer: i32,
    pub denom: i32,
}

impl Ratio {
    pub(crate) fn read(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let numer = body.read_i32()?;
        let numer = body.check(validate::in_range("numer", numer, 1..=i32::MAX))?;
        let denom = body.read_i32()?;
        let denom = body.check(validate::in_range("denom", denom, 1..=i32::MAX))?;
        Ok(Self { numer, denom })
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.numer) / f64::from(self.denom)
    }
}

/// An RGB color. The fourth byte on the wire is unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub(crate) fn read(body: &mut RecordReader<'_, '_>) -> Result<Self, Corrupted> {
        let red = body.read_u8()?;
        let green = body.read_u8()?;
        let blue = body.read_u8()?;
        body.skip(1)?;
        Ok(Self { red, green, blue })
    }
}
