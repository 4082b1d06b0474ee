//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use crate::font_data::FontData;
use crate::types::{GlyphId, Tag};

/// 'hmtx'
pub const TAG: Tag = Tag::new(b"hmtx");

/// Per-glyph horizontal metrics.
///
/// The table is `number_of_long_metrics` (advance, side bearing) pairs
/// followed by bare side bearings for the remaining glyphs; a monospaced
/// tail repeats the last stored advance.
#[derive(Clone)]
pub struct Hmtx<'a> {
    data: FontData<'a>,
    number_of_long_metrics: u16,
}

impl<'a> Hmtx<'a> {
    pub fn read(data: FontData<'a>, number_of_long_metrics: u16) -> Self {
        Hmtx {
            data,
            number_of_long_metrics,
        }
    }

    /// The advance width of a glyph, in font units.
    pub fn advance(&self, gid: GlyphId) -> Option<u16> {
        let idx = (gid.to_u16()).min(self.number_of_long_metrics.checked_sub(1)?) as usize;
        self.data.read_at::<u16>(idx * 4).ok()
    }

    /// The left side bearing of a glyph, in font units.
    pub fn side_bearing(&self, gid: GlyphId) -> Option<i16> {
        let gid = gid.to_u16();
        let offset = if gid < self.number_of_long_metrics {
            gid as usize * 4 + 2
        } else {
            // trailing run of bare side bearings
            self.number_of_long_metrics as usize * 4
                + (gid - self.number_of_long_metrics) as usize * 2
        };
        self.data.read_at::<i16>(offset).ok()
    }
}
