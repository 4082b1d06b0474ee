//! The [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::types::Tag;

/// 'hhea'
pub const TAG: Tag = Tag::new(b"hhea");

const HHEA_VERSION: u32 = 0x00010000;

/// Horizontal layout metrics that apply to the whole font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hhea {
    /// Distance from baseline to highest ascender, in font units.
    pub ascender: i16,
    /// Distance from baseline to lowest descender; typically negative.
    pub descender: i16,
    /// Additional spacing between lines.
    pub line_gap: i16,
    pub advance_width_max: u16,
    /// Number of entries in the `hmtx` long metrics array.
    pub number_of_long_metrics: u16,
}

impl FontRead<'_> for Hhea {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u32 = cursor.read()?;
        if version != HHEA_VERSION {
            return Err(ReadError::UnsupportedHheaTableVersion);
        }
        let ascender: i16 = cursor.read()?;
        let descender: i16 = cursor.read()?;
        let line_gap: i16 = cursor.read()?;
        let advance_width_max: u16 = cursor.read()?;
        // minLeftSideBearing, minRightSideBearing, xMaxExtent,
        // caretSlopeRise, caretSlopeRun, caretOffset, 4 reserved words,
        // metricDataFormat
        cursor.advance_by(12 * 2);
        let number_of_long_metrics: u16 = cursor.read()?;
        Ok(Hhea {
            ascender,
            descender,
            line_gap,
            advance_width_max,
            number_of_long_metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::bebuffer::BeBuffer;

    fn hhea_bytes(version: u32) -> BeBuffer {
        let buf = BeBuffer::new()
            .push(version)
            .push(800i16) // ascender
            .push(-200i16) // descender
            .push(90i16) // lineGap
            .push(1100u16) // advanceWidthMax
            .push(0i16) // minLeftSideBearing
            .push(0i16) // minRightSideBearing
            .push(1000i16); // xMaxExtent
        let buf = buf
            .push(1i16) // caretSlopeRise
            .push(0i16) // caretSlopeRun
            .push(0i16) // caretOffset
            .extend([0i16; 4]) // reserved
            .push(0i16); // metricDataFormat
        buf.push(4u16) // numberOfHMetrics
    }

    #[test]
    fn parse_hhea() {
        let hhea = Hhea::read(FontData::new(&hhea_bytes(HHEA_VERSION))).unwrap();
        assert_eq!(hhea.ascender, 800);
        assert_eq!(hhea.descender, -200);
        assert_eq!(hhea.line_gap, 90);
        assert_eq!(hhea.advance_width_max, 1100);
        assert_eq!(hhea.number_of_long_metrics, 4);
    }

    #[test]
    fn rejects_unknown_version() {
        assert_eq!(
            Hhea::read(FontData::new(&hhea_bytes(0x00010001))),
            Err(ReadError::UnsupportedHheaTableVersion)
        );
    }
}
