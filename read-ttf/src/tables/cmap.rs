//! The [cmap (Character to Glyph Index Mapping)](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::types::{GlyphId, Tag};

/// 'cmap'
pub const TAG: Tag = Tag::new(b"cmap");

pub const PLATFORM_ID_UNICODE: u16 = 0;
pub const PLATFORM_ID_MICROSOFT: u16 = 3;

pub const ENCODING_ID_MS_UCS2: u16 = 1;
pub const ENCODING_ID_MS_UCS4: u16 = 10;

/// The character to glyph index mapping table.
#[derive(Clone)]
pub struct Cmap<'a> {
    data: FontData<'a>,
}

/// A subtable format supported for codepoint lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmapFormat {
    Format4,
    Format6,
    Format12,
}

/// A pointer to one encoding subtable within `cmap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Byte offset of the subtable from the beginning of the `cmap` table.
    pub subtable_offset: u32,
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: u16 = data.read_at(0)?;
        if version != 0 {
            return Err(ReadError::UnsupportedCharEncoding);
        }
        // validate that the record array is present
        let num_tables: u16 = data.read_at(2)?;
        data.check_in_bounds(4 + num_tables as usize * 8)?;
        Ok(Cmap { data })
    }
}

impl<'a> Cmap<'a> {
    pub fn encoding_records(&self) -> impl Iterator<Item = EncodingRecord> + 'a {
        let data = self.data;
        let num_tables: u16 = data.read_at(2).unwrap_or(0);
        (0..num_tables as usize).filter_map(move |i| {
            let base = 4 + i * 8;
            Some(EncodingRecord {
                platform_id: data.read_at(base).ok()?,
                encoding_id: data.read_at(base + 2).ok()?,
                subtable_offset: data.read_at(base + 4).ok()?,
            })
        })
    }

    /// Selects the subtable used for Unicode codepoint lookup.
    ///
    /// The first Unicode-platform subtable wins; failing that, the last
    /// Microsoft subtable with a UCS-2 or UCS-4 encoding.
    pub fn unicode_subtable_offset(&self) -> Result<u32, ReadError> {
        let mut microsoft = None;
        for record in self.encoding_records() {
            match record.platform_id {
                PLATFORM_ID_UNICODE => return Ok(record.subtable_offset),
                PLATFORM_ID_MICROSOFT
                    if matches!(
                        record.encoding_id,
                        ENCODING_ID_MS_UCS2 | ENCODING_ID_MS_UCS4
                    ) =>
                {
                    microsoft = Some(record.subtable_offset)
                }
                _ => {}
            }
        }
        microsoft.ok_or(ReadError::UnsupportedCharEncoding)
    }

    /// Resolves the subtable at the given offset, dispatching on its format tag.
    pub fn subtable(&self, offset: u32) -> Result<CmapSubtable<'a>, ReadError> {
        let data = self
            .data
            .split_off(offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        match data.read_at::<u16>(0)? {
            4 => Ok(CmapSubtable::Format4(Cmap4 { data })),
            6 => Ok(CmapSubtable::Format6(Cmap6 { data })),
            12 => Ok(CmapSubtable::Format12(Cmap12 { data })),
            _ => Err(ReadError::UnsupportedFormat),
        }
    }
}

/// A resolved encoding subtable in one of the supported formats.
#[derive(Clone)]
pub enum CmapSubtable<'a> {
    Format4(Cmap4<'a>),
    Format6(Cmap6<'a>),
    Format12(Cmap12<'a>),
}

impl<'a> CmapSubtable<'a> {
    pub fn format(&self) -> CmapFormat {
        match self {
            Self::Format4(_) => CmapFormat::Format4,
            Self::Format6(_) => CmapFormat::Format6,
            Self::Format12(_) => CmapFormat::Format12,
        }
    }

    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// Returns `None` if the subtable does not map the codepoint (glyph 0).
    pub fn map(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        match self {
            Self::Format4(subtable) => subtable.map_codepoint(codepoint),
            Self::Format6(subtable) => subtable.map_codepoint(codepoint),
            Self::Format12(subtable) => subtable.map_codepoint(codepoint),
        }
    }
}

/// [Format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values):
/// segment mapping to delta values, for the Basic Multilingual Plane.
#[derive(Clone)]
pub struct Cmap4<'a> {
    data: FontData<'a>,
}

impl<'a> Cmap4<'a> {
    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// The binary search is driven by the search hints embedded in the
    /// subtable header, locating the first segment whose end code is not
    /// less than the codepoint. Malformed hints run out of bounds and read
    /// as "no mapping" rather than faulting.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        if codepoint > 0xFFFF {
            return None;
        }
        let cp = codepoint as u16;
        let data = &self.data;
        let seg_count_x2 = data.read_at::<u16>(6).ok()? as usize;
        let mut search_range = data.read_at::<u16>(8).ok()? as usize;
        let mut entry_selector: u16 = data.read_at(10).ok()?;
        let range_shift = data.read_at::<u16>(12).ok()? as usize;

        const END_CODES: usize = 14;
        let mut search = END_CODES;
        if cp >= data.read_at::<u16>(search + range_shift).ok()? {
            search += range_shift;
        }
        search -= 2;
        while entry_selector > 0 {
            search_range >>= 1;
            let end: u16 = data.read_at(search + search_range).ok()?;
            if cp > end {
                search += search_range;
            }
            entry_selector -= 1;
        }
        search += 2;
        let seg = (search - END_CODES) / 2;

        let end: u16 = data.read_at(END_CODES + seg * 2).ok()?;
        let starts = END_CODES + seg_count_x2 + 2;
        let start: u16 = data.read_at(starts + seg * 2).ok()?;
        if cp < start || cp > end {
            return None;
        }
        let delta: i16 = data.read_at(starts + seg_count_x2 + seg * 2).ok()?;
        let range_offset_pos = starts + seg_count_x2 * 2 + seg * 2;
        let range_offset: u16 = data.read_at(range_offset_pos).ok()?;
        let glyph_id = if range_offset == 0 {
            (cp as i32 + delta as i32) as u16
        } else {
            // the stored offset is relative to its own idRangeOffset slot
            let slot = range_offset_pos + range_offset as usize + (cp - start) as usize * 2;
            match data.read_at::<u16>(slot).ok()? {
                0 => 0,
                glyph_id => (glyph_id as i32 + delta as i32) as u16,
            }
        };
        (glyph_id != 0).then(|| GlyphId::new(glyph_id))
    }
}

/// [Format 6](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-6-trimmed-table-mapping):
/// a dense array of glyph ids for a contiguous codepoint range.
#[derive(Clone)]
pub struct Cmap6<'a> {
    data: FontData<'a>,
}

impl<'a> Cmap6<'a> {
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        let first = self.data.read_at::<u16>(6).ok()? as u32;
        let count = self.data.read_at::<u16>(8).ok()? as u32;
        if codepoint < first || codepoint >= first + count {
            return None;
        }
        let glyph_id: u16 = self
            .data
            .read_at(10 + (codepoint - first) as usize * 2)
            .ok()?;
        (glyph_id != 0).then(|| GlyphId::new(glyph_id))
    }
}

/// [Format 12](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage):
/// segmented coverage of the full Unicode repertoire.
#[derive(Clone)]
pub struct Cmap12<'a> {
    data: FontData<'a>,
}

impl<'a> Cmap12<'a> {
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        const GROUPS: usize = 16;
        let num_groups = self.data.read_at::<u32>(12).ok()? as usize;
        let mut lo = 0usize;
        let mut hi = num_groups;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let group = GROUPS + mid * 12;
            let start: u32 = self.data.read_at(group).ok()?;
            let end: u32 = self.data.read_at(group + 4).ok()?;
            if codepoint < start {
                hi = mid;
            } else if codepoint > end {
                lo = mid + 1;
            } else {
                let start_glyph_id: u32 = self.data.read_at(group + 8).ok()?;
                let glyph_id = start_glyph_id.checked_add(codepoint - start)?;
                return (glyph_id != 0 && glyph_id <= u16::MAX as u32)
                    .then(|| GlyphId::new(glyph_id as u16));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::cmap as test_data;

    fn subtable(buf: &ttf_test_data::bebuffer::BeBuffer) -> CmapSubtable {
        let cmap_data = FontData::new(buf.as_slice());
        match cmap_data.read_at::<u16>(0).unwrap() {
            4 => CmapSubtable::Format4(Cmap4 { data: cmap_data }),
            6 => CmapSubtable::Format6(Cmap6 { data: cmap_data }),
            12 => CmapSubtable::Format12(Cmap12 { data: cmap_data }),
            other => panic!("unexpected subtable format {other}"),
        }
    }

    #[test]
    fn format4_delta_segment() {
        // one segment covering latin capitals, delta chosen so 'A' maps to 1
        let buf = test_data::format4(&[test_data::Segment4 {
            start: 0x41,
            end: 0x5A,
            delta: -0x40,
            range_offset: 0,
        }]);
        let table = subtable(&buf);
        assert_eq!(table.map(0x41u32), Some(GlyphId::new(1)));
        assert_eq!(table.map(0x5Au32), Some(GlyphId::new(26)));
        assert_eq!(table.map(0x40u32), None);
        assert_eq!(table.map(0x5Bu32), None);
        assert_eq!(table.map(0x10041u32), None);
    }

    #[test]
    fn format4_multiple_segments() {
        let buf = test_data::format4(&[
            test_data::Segment4 {
                start: 0x20,
                end: 0x2F,
                delta: 10,
                range_offset: 0,
            },
            test_data::Segment4 {
                start: 0x61,
                end: 0x7A,
                delta: -0x60,
                range_offset: 0,
            },
            test_data::Segment4 {
                start: 0x400,
                end: 0x44F,
                delta: 0x100,
                range_offset: 0,
            },
        ]);
        let table = subtable(&buf);
        assert_eq!(table.map(0x20u32), Some(GlyphId::new(0x2A)));
        assert_eq!(table.map(0x61u32), Some(GlyphId::new(1)));
        assert_eq!(table.map(0x7Au32), Some(GlyphId::new(26)));
        assert_eq!(table.map(0x430u32), Some(GlyphId::new(0x530)));
        // gaps between segments are unmapped
        assert_eq!(table.map(0x30u32), None);
        assert_eq!(table.map(0x100u32), None);
    }

    #[test]
    fn format4_range_offset_indirection() {
        // one segment resolved through the trailing glyph id array
        let buf = test_data::format4_with_glyph_array(0x30, &[7, 0, 9]);
        let table = subtable(&buf);
        assert_eq!(table.map(0x30u32), Some(GlyphId::new(7)));
        // a zero entry in the glyph array means unmapped
        assert_eq!(table.map(0x31u32), None);
        assert_eq!(table.map(0x32u32), Some(GlyphId::new(9)));
    }

    #[test]
    fn format6_bounds() {
        let buf = test_data::format6(0x100, &[5, 6, 0, 8]);
        let table = subtable(&buf);
        assert_eq!(table.map(0xFFu32), None);
        assert_eq!(table.map(0x100u32), Some(GlyphId::new(5)));
        assert_eq!(table.map(0x102u32), None);
        assert_eq!(table.map(0x103u32), Some(GlyphId::new(8)));
        assert_eq!(table.map(0x104u32), None);
    }

    #[test]
    fn format12_groups() {
        let buf = test_data::format12(&[(0x41, 0x5A, 17), (0x10000, 0x1FFFF, 500)]);
        let table = subtable(&buf);
        assert_eq!(table.map(0x41u32), Some(GlyphId::new(17)));
        assert_eq!(table.map(0x10000u32), Some(GlyphId::new(500)));
        assert_eq!(table.map(0x10001u32), Some(GlyphId::new(501)));
        assert_eq!(table.map(0x20000u32), None);
        assert_eq!(table.map(0x40u32), None);
        assert_eq!(table.map(0x5Bu32), None);
    }

    #[test]
    fn prefers_unicode_platform_then_last_microsoft() {
        let fmt4 = test_data::format4(&[test_data::Segment4 {
            start: 0x41,
            end: 0x41,
            delta: 0,
            range_offset: 0,
        }]);
        let fmt12 = test_data::format12(&[(0x41, 0x41, 3)]);
        // microsoft-then-unicode: the unicode record wins even when later
        let buf = test_data::cmap_with(&[
            (PLATFORM_ID_MICROSOFT, ENCODING_ID_MS_UCS2, fmt4.as_slice()),
            (PLATFORM_ID_UNICODE, 3, fmt12.as_slice()),
        ]);
        let cmap = Cmap::read(FontData::new(buf.as_slice())).unwrap();
        let offset = cmap.unicode_subtable_offset().unwrap();
        let table = cmap.subtable(offset).unwrap();
        assert_eq!(table.format(), CmapFormat::Format12);

        // no unicode platform: the last suitable microsoft record wins
        let buf = test_data::cmap_with(&[
            (PLATFORM_ID_MICROSOFT, ENCODING_ID_MS_UCS2, fmt4.as_slice()),
            (PLATFORM_ID_MICROSOFT, ENCODING_ID_MS_UCS4, fmt12.as_slice()),
        ]);
        let cmap = Cmap::read(FontData::new(buf.as_slice())).unwrap();
        let offset = cmap.unicode_subtable_offset().unwrap();
        assert_eq!(cmap.subtable(offset).unwrap().format(), CmapFormat::Format12);
    }

    #[test]
    fn no_usable_encoding() {
        let fmt4 = test_data::format4(&[]);
        let buf = test_data::cmap_with(&[(1, 0, fmt4.as_slice())]);
        let cmap = Cmap::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(
            cmap.unicode_subtable_offset(),
            Err(ReadError::UnsupportedCharEncoding)
        );
    }

    #[test]
    fn unknown_subtable_format() {
        let bogus = ttf_test_data::bebuffer::BeBuffer::new().push(2u16).push(0u16);
        let buf = test_data::cmap_with(&[(PLATFORM_ID_UNICODE, 3, bogus.as_slice())]);
        let cmap = Cmap::read(FontData::new(buf.as_slice())).unwrap();
        let offset = cmap.unicode_subtable_offset().unwrap();
        assert!(matches!(
            cmap.subtable(offset),
            Err(ReadError::UnsupportedFormat)
        ));
    }
}
