//! The [loca (Index to Location)](https://docs.microsoft.com/en-us/typography/opentype/spec/loca) table

use crate::font_data::FontData;
use crate::read::ReadError;
use crate::tables::head::LocaFormat;
use crate::types::{GlyphId, Tag};

/// 'loca'
pub const TAG: Tag = Tag::new(b"loca");

/// The glyph-index to `glyf`-offset map.
///
/// Offsets come in two widths, selected by `head.indexToLocFormat`: short
/// entries are 16 bits stored divided by two, long entries are 32 bits
/// stored verbatim.
#[derive(Clone)]
pub enum Loca<'a> {
    Short(FontData<'a>),
    Long(FontData<'a>),
}

impl<'a> Loca<'a> {
    pub fn read(data: FontData<'a>, format: LocaFormat) -> Self {
        match format {
            LocaFormat::Short => Loca::Short(data),
            LocaFormat::Long => Loca::Long(data),
        }
    }

    /// The number of glyphs covered: one less than the entry count, since
    /// each glyph needs its end offset from the following entry.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => (data.len() / 2).saturating_sub(1),
            Loca::Long(data) => (data.len() / 4).saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte offset into `glyf` for the entry at `idx`.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.read_at::<u16>(idx * 2).ok().map(|off| off as u32 * 2),
            Loca::Long(data) => data.read_at::<u32>(idx * 4).ok(),
        }
    }

    /// The byte range of a glyph within `glyf`, or `None` for an empty glyph.
    ///
    /// Two coinciding entries mean the glyph has no record at all (a blank
    /// such as space); that case is detected here, before anyone tries to
    /// read a glyph header from the shared offset.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Option<std::ops::Range<usize>>, ReadError> {
        let idx = gid.to_u16() as usize;
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)?;
        if start >= end {
            return Ok(None);
        }
        Ok(Some(start as usize..end as usize))
    }
}
