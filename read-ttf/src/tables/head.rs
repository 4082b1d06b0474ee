//! The [head (Font Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::types::{BoundingBox, Tag};

/// 'head'
pub const TAG: Tag = Tag::new(b"head");

const HEAD_VERSION: u32 = 0x00010000;

/// Width of the offsets stored in the `loca` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocaFormat {
    /// 16-bit offsets, stored divided by two.
    Short,
    /// 32-bit offsets, stored verbatim.
    Long,
}

/// Global font header values.
///
/// The fields we never consult (font revision, timestamps, mac style, ...)
/// are skipped during the read rather than stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Head {
    pub units_per_em: u16,
    /// Union of the bounding boxes of all glyphs, in font units.
    pub bounds: BoundingBox<i16>,
    pub loca_format: LocaFormat,
}

impl FontRead<'_> for Head {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u32 = cursor.read()?;
        if version != HEAD_VERSION {
            return Err(ReadError::UnsupportedLocaTableVersion);
        }
        // fontRevision, checkSumAdjustment, magicNumber, flags
        cursor.advance::<u32>();
        cursor.advance::<u32>();
        cursor.advance::<u32>();
        cursor.advance::<u16>();
        let units_per_em: u16 = cursor.read()?;
        // created and modified timestamps
        cursor.advance::<i64>();
        cursor.advance::<i64>();
        let x_min: i16 = cursor.read()?;
        let y_min: i16 = cursor.read()?;
        let x_max: i16 = cursor.read()?;
        let y_max: i16 = cursor.read()?;
        // macStyle, lowestRecPPEM, fontDirectionHint
        cursor.advance::<u16>();
        cursor.advance::<u16>();
        cursor.advance::<i16>();
        let loca_format = match cursor.read::<i16>()? {
            0 => LocaFormat::Short,
            1 => LocaFormat::Long,
            _ => return Err(ReadError::UnsupportedLocaTableIndex),
        };
        Ok(Head {
            units_per_em,
            bounds: BoundingBox::new(x_min, y_min, x_max, y_max),
            loca_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::bebuffer::BeBuffer;

    fn head_bytes(version: u32, loca_format: i16) -> BeBuffer {
        BeBuffer::new()
            .push(version)
            .push(0u32) // fontRevision
            .push(0u32) // checkSumAdjustment
            .push(0x5F0F3CF5u32) // magicNumber
            .push(0u16) // flags
            .push(1024u16) // unitsPerEm
            .push(0i64) // created
            .push(0i64) // modified
            .push(-10i16) // xMin
            .push(-200i16) // yMin
            .push(1000i16) // xMax
            .push(900i16) // yMax
            .push(0u16) // macStyle
            .push(8u16) // lowestRecPPEM
            .push(2i16) // fontDirectionHint
            .push(loca_format) // indexToLocFormat
            .push(0i16) // glyphDataFormat
    }

    #[test]
    fn parse_head() {
        let buf = head_bytes(HEAD_VERSION, 1);
        let head = Head::read(FontData::new(&buf)).unwrap();
        assert_eq!(head.units_per_em, 1024);
        assert_eq!(head.bounds, BoundingBox::new(-10, -200, 1000, 900));
        assert_eq!(head.loca_format, LocaFormat::Long);
    }

    #[test]
    fn rejects_unknown_version() {
        let buf = head_bytes(0x00020000, 0);
        assert_eq!(
            Head::read(FontData::new(&buf)),
            Err(ReadError::UnsupportedLocaTableVersion)
        );
    }

    #[test]
    fn rejects_unknown_loca_format() {
        let buf = head_bytes(HEAD_VERSION, 2);
        assert_eq!(
            Head::read(FontData::new(&buf)),
            Err(ReadError::UnsupportedLocaTableIndex)
        );
    }

    #[test]
    fn truncated_table() {
        let buf = head_bytes(HEAD_VERSION, 0);
        let data = FontData::new(&buf.as_slice()[..20]);
        assert_eq!(Head::read(data), Err(ReadError::OutOfBounds));
    }
}
