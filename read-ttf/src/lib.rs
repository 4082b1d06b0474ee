//! Reading TrueType fonts
//!
//! This crate provides memory safe zero-allocation parsing of a TrueType
//! (or OpenType-with-TrueType-outlines) font container: locating tables,
//! mapping codepoints to glyph identifiers, and decoding glyph contours
//! into quadratic Bézier and line segments.
//!
//! It is intended for use by other parts of a font stack; for turning an
//! outline into pixels, see the companion `sverta` crate.
//!
//! A [`FontRef`] borrows the caller's bytes and owns nothing else. All
//! multi-byte values in a font are big-endian; every read is byte-swapped
//! into host order and bounds-checked, so a truncated or malformed font
//! produces a [`ReadError`] rather than a wild read.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use read_ttf::FontRef;
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! println!(
//!     "{} units per em, {} glyphs",
//!     font.units_per_em(),
//!     font.num_glyphs()
//! );
//! let outline = font.outline_for('g');
//! ```

// the `bytemuck` feature adds the unsafe marker impls that make the value
// types castable to and from raw bytes; everything else stays safe code
#![cfg_attr(not(feature = "bytemuck"), forbid(unsafe_code))]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod outline;
mod read;
pub mod tables;
pub mod types;

pub use font_data::FontData;
pub use outline::{GlyphOutline, OutlineSegment};
pub use read::{FontRead, ReadError};
pub use types::{BoundingBox, GlyphId, Point, Tag};

use tables::cmap::{Cmap, CmapFormat, CmapSubtable};
use tables::glyf::Glyf;
use tables::head::Head;
use tables::hhea::Hhea;
use tables::hmtx::Hmtx;
use tables::loca::Loca;
use tables::maxp::Maxp;
use tables::name::Name;
use tables::{cmap, glyf, head, hhea, hmtx, loca, maxp, name};

/// OpenType with TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// Apple TrueType (the ascii tag `true`).
pub const TRUE_SFNT_VERSION: u32 = u32::from_be_bytes(*b"true");
/// OpenType with CFF outlines (the ascii tag `OTTO`).
pub const CFF_SFNT_VERSION: u32 = u32::from_be_bytes(*b"OTTO");
/// Old PostScript-in-sfnt (the ascii tag `typ1`).
pub const TYP1_SFNT_VERSION: u32 = u32::from_be_bytes(*b"typ1");

/// 'CFF '
pub const CFF_TAG: Tag = Tag::new(b"CFF ");
/// 'kern'
pub const KERN_TAG: Tag = Tag::new(b"kern");

/// The byte range of a table within a font.
///
/// A zero offset means the table is absent; a real table can never live at
/// offset zero, which is where the offset table itself sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub offset: u32,
    pub length: u32,
}

impl Location {
    pub fn is_present(&self) -> bool {
        self.offset != 0
    }
}

/// One entry of the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    fn location(&self) -> Location {
        Location {
            offset: self.offset,
            length: self.length,
        }
    }
}

/// The table directory at the start of a font.
#[derive(Clone)]
pub struct TableDirectory<'a> {
    data: FontData<'a>,
    sfnt_version: u32,
    num_tables: u16,
}

impl<'a> TableDirectory<'a> {
    pub fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let sfnt_version: u32 = data.read_at(0)?;
        let num_tables: u16 = data.read_at(4)?;
        // searchRange, entrySelector and rangeShift are hints we never use
        data.check_in_bounds(12 + num_tables as usize * 16)?;
        Ok(TableDirectory {
            data,
            sfnt_version,
            num_tables,
        })
    }

    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    pub fn table_records(&self) -> impl Iterator<Item = TableRecord> + 'a {
        let data = self.data;
        (0..self.num_tables as usize).filter_map(move |i| {
            let base = 12 + i * 16;
            Some(TableRecord {
                tag: data.read_at(base).ok()?,
                checksum: data.read_at(base + 4).ok()?,
                offset: data.read_at(base + 8).ok()?,
                length: data.read_at(base + 12).ok()?,
            })
        })
    }

    /// Linear scan of the directory, comparing raw 4-byte tags.
    pub fn find_table(&self, tag: Tag) -> Option<TableRecord> {
        self.table_records().find(|record| record.tag == tag)
    }
}

/// A view over an in-memory TrueType font.
///
/// Construction either fully validates the container (directory, required
/// tables, global metrics, character map selection) or fails; a `FontRef`
/// that exists can answer every query without re-validating. Multiple
/// readers may share one view freely, as every query is read-only.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    table_directory: TableDirectory<'a>,
    head: Head,
    hhea: Hhea,
    maxp: Maxp,
    charmap: CmapSubtable<'a>,
    loca: Loca<'a>,
    glyf: Glyf<'a>,
    hmtx: Hmtx<'a>,
    name: Name<'a>,
}

impl<'a> FontRef<'a> {
    /// Creates a new view of the font contained in `bytes`.
    ///
    /// The first four bytes select the container flavor: fonts with
    /// TrueType outlines (version 1.0 or the Apple `true` tag) are
    /// accepted; `OTTO` (CFF outlines) and `typ1` containers are
    /// recognized but unsupported; anything else is rejected outright.
    pub fn new(bytes: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(bytes);
        match data.read_at::<u32>(0)? {
            TT_SFNT_VERSION | TRUE_SFNT_VERSION => {
                Self::with_truetype_outlines(data, TableDirectory::read(data)?)
            }
            CFF_SFNT_VERSION => {
                let directory = TableDirectory::read(data)?;
                if directory.find_table(CFF_TAG).is_some() {
                    // the container is fine, but CFF outlines are out of scope
                    Err(ReadError::UnsupportedFormat)
                } else {
                    Err(ReadError::NoCffTable)
                }
            }
            _ => Err(ReadError::UnsupportedFormat),
        }
    }

    fn with_truetype_outlines(
        data: FontData<'a>,
        table_directory: TableDirectory<'a>,
    ) -> Result<Self, ReadError> {
        let table = |tag: Tag, missing: ReadError| -> Result<FontData<'a>, ReadError> {
            let location = table_directory
                .find_table(tag)
                .map(|record| record.location())
                .ok_or(missing)?;
            let start = location.offset as usize;
            let end = start
                .checked_add(location.length as usize)
                .ok_or(ReadError::OutOfBounds)?;
            data.slice(start..end).ok_or(ReadError::OutOfBounds)
        };

        let cmap_data = table(cmap::TAG, ReadError::NoCmapTable)?;
        let name_data = table(name::TAG, ReadError::NoNameTable)?;
        let maxp_data = table(maxp::TAG, ReadError::NoMaxpTable)?;
        let hhea_data = table(hhea::TAG, ReadError::NoHheaTable)?;
        let head_data = table(head::TAG, ReadError::NoHeadTable)?;
        let hmtx_data = table(hmtx::TAG, ReadError::NoHmtxTable)?;
        let loca_data = table(loca::TAG, ReadError::NoLocaTable)?;
        let glyf_data = table(glyf::TAG, ReadError::NoGlyfTable)?;

        let head = Head::read(head_data)?;
        let hhea = Hhea::read(hhea_data)?;
        let maxp = Maxp::read(maxp_data)?;

        let cmap = Cmap::read(cmap_data)?;
        let subtable_offset = cmap.unicode_subtable_offset()?;
        let charmap = cmap.subtable(subtable_offset)?;

        Ok(FontRef {
            data,
            table_directory,
            head,
            hhea,
            maxp,
            charmap,
            loca: Loca::read(loca_data, head.loca_format),
            glyf: Glyf::new(glyf_data),
            hmtx: Hmtx::read(hmtx_data, hhea.number_of_long_metrics),
            name: Name::read(name_data)?,
        })
    }

    /// The location of a table, or `{0, 0}` if it is absent.
    pub fn find_table(&self, tag: Tag) -> Location {
        self.table_directory
            .find_table(tag)
            .map(|record| record.location())
            .unwrap_or_default()
    }

    /// The raw bytes of a table, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let location = self.find_table(tag);
        if !location.is_present() {
            return None;
        }
        let start = location.offset as usize;
        let end = start.checked_add(location.length as usize)?;
        self.data.slice(start..end)
    }

    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    /// The union of all glyph bounding boxes, in font units.
    pub fn bounds(&self) -> BoundingBox<i16> {
        self.head.bounds
    }

    pub fn ascent(&self) -> i16 {
        self.hhea.ascender
    }

    pub fn descent(&self) -> i16 {
        self.hhea.descender
    }

    pub fn line_gap(&self) -> i16 {
        self.hhea.line_gap
    }

    pub fn advance_width_max(&self) -> u16 {
        self.hhea.advance_width_max
    }

    pub fn num_glyphs(&self) -> u16 {
        self.maxp.num_glyphs
    }

    /// The character-map subtable selected at load time.
    pub fn charmap(&self) -> &CmapSubtable<'a> {
        &self.charmap
    }

    /// The format of the selected character-map subtable.
    pub fn charmap_format(&self) -> CmapFormat {
        self.charmap.format()
    }

    /// Maps a codepoint to a glyph identifier, if the font maps it.
    pub fn glyph_id_for(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.charmap.map(codepoint)
    }

    /// Maps a codepoint to a raw glyph index; 0 means "missing glyph".
    pub fn char_index(&self, codepoint: impl Into<u32>) -> u32 {
        self.glyph_id_for(codepoint)
            .map(|gid| gid.to_u16() as u32)
            .unwrap_or(0)
    }

    /// Decodes the outline of a glyph, in font units.
    ///
    /// Empty glyphs (coinciding `loca` entries) and compound glyphs decode
    /// to an outline with no segments.
    pub fn outline(&self, glyph_id: GlyphId) -> Result<GlyphOutline, ReadError> {
        if glyph_id.to_u16() >= self.maxp.num_glyphs {
            return Err(ReadError::OutOfBounds);
        }
        match self.loca.glyph_range(glyph_id)? {
            Some(range) => self.glyf.outline(range),
            None => Ok(GlyphOutline::empty()),
        }
    }

    /// The outline for a codepoint.
    ///
    /// Unmapped codepoints fall back to the missing glyph, and decode
    /// failures degrade to an empty outline; this never fails.
    pub fn outline_for(&self, codepoint: impl Into<u32>) -> GlyphOutline {
        let glyph_id = self.glyph_id_for(codepoint).unwrap_or(GlyphId::NOTDEF);
        self.outline(glyph_id).unwrap_or_else(|_| GlyphOutline::empty())
    }

    /// The advance width of a glyph, in font units.
    pub fn advance_width(&self, glyph_id: GlyphId) -> Option<u16> {
        self.hmtx.advance(glyph_id)
    }

    /// The left side bearing of a glyph, in font units.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        self.hmtx.side_bearing(glyph_id)
    }

    /// The naming table.
    pub fn name(&self) -> &Name<'a> {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_query_metrics() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.units_per_em(), 1024);
        assert_eq!(font.ascent(), 800);
        assert_eq!(font.descent(), -200);
        assert_eq!(font.line_gap(), 90);
        assert_eq!(font.num_glyphs(), 5);
        assert_eq!(font.charmap_format(), CmapFormat::Format4);
        assert!(font.find_table(KERN_TAG).offset == 0);
        assert!(font.find_table(head::TAG).is_present());
    }

    #[test]
    fn char_index_through_format4_delta() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        // segment [0x41, 0x5A] with delta -0x40
        assert_eq!(font.char_index('A'), 1);
        assert_eq!(font.char_index('B'), 2);
        assert_eq!(font.char_index(0x5Au32), 26);
        assert_eq!(font.char_index(' '), 0);
        assert_eq!(font.char_index(0x2603u32), 0);
        // the subtable surface agrees with the raw-index wrapper
        assert_eq!(font.charmap().map('A'), Some(GlyphId::new(1)));
        assert_eq!(font.charmap().map(' '), None);
    }

    #[test]
    fn triangle_outline() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        let outline = font.outline_for('A');
        assert_eq!(outline.bounds, BoundingBox::new(0, 0, 1000, 1000));
        assert_eq!(
            outline.segments,
            vec![
                OutlineSegment::Line {
                    start: Point::new(0, 0),
                    end: Point::new(1000, 0),
                },
                OutlineSegment::Line {
                    start: Point::new(1000, 0),
                    end: Point::new(500, 1000),
                },
                OutlineSegment::Line {
                    start: Point::new(500, 1000),
                    end: Point::new(0, 0),
                },
            ]
        );
    }

    #[test]
    fn quad_contour_outline() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        let outline = font.outline_for('B');
        assert!(outline
            .segments
            .iter()
            .all(|segment| matches!(segment, OutlineSegment::Quad { .. })));
        // contours close
        assert_eq!(
            outline.segments.first().unwrap().start(),
            outline.segments.last().unwrap().end()
        );
    }

    #[test]
    fn empty_glyph_has_empty_outline() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        // 'D' maps to the glyph whose loca entries coincide
        let gid = font.glyph_id_for('D').unwrap();
        let outline = font.outline(gid).unwrap();
        assert!(outline.is_empty());
    }

    #[test]
    fn missing_glyph_falls_back_to_notdef() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        let outline = font.outline_for(' ');
        assert_eq!(outline, font.outline(GlyphId::NOTDEF).unwrap());
    }

    #[test]
    fn advance_widths() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.advance_width(GlyphId::new(1)), Some(600));
        assert_eq!(font.side_bearing(GlyphId::new(1)), Some(50));
    }

    #[test]
    fn family_name() {
        let bytes = ttf_test_data::sample_ttf();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(
            font.name().english_name(name::name_id::FAMILY_NAME),
            Some("Sverta Test".to_string())
        );
    }

    #[test]
    fn format12_lookup() {
        let bytes = ttf_test_data::cmap12_ttf();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.charmap_format(), CmapFormat::Format12);
        assert_eq!(font.char_index('A'), 1);
        assert_eq!(font.char_index(0x10000u32), 500);
        assert_eq!(font.char_index(0x10001u32), 501);
        assert_eq!(font.char_index(0x20000u32), 0);
    }

    #[test]
    fn format6_lookup() {
        let bytes = ttf_test_data::cmap6_ttf();
        let font = FontRef::new(&bytes).unwrap();
        assert_eq!(font.charmap_format(), CmapFormat::Format6);
        assert_eq!(font.char_index(0x100u32), 1);
        assert_eq!(font.char_index(0x101u32), 2);
        // outside [firstCode, firstCode + entryCount)
        assert_eq!(font.char_index(0xFFu32), 0);
        assert_eq!(font.char_index(0x104u32), 0);
    }

    #[test]
    fn unknown_sfnt_version() {
        let bytes = [0xDEu8, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            FontRef::new(&bytes).err(),
            Some(ReadError::UnsupportedFormat)
        );
        assert_eq!(
            FontRef::new(b"typ1\0\0\0\0").err(),
            Some(ReadError::UnsupportedFormat)
        );
    }

    #[test]
    fn cff_flavors() {
        let bytes = ttf_test_data::otto_ttf(true);
        assert_eq!(
            FontRef::new(&bytes).err(),
            Some(ReadError::UnsupportedFormat)
        );
        let bytes = ttf_test_data::otto_ttf(false);
        assert_eq!(FontRef::new(&bytes).err(), Some(ReadError::NoCffTable));
    }

    #[test]
    fn bad_head_version() {
        let bytes = ttf_test_data::bad_head_version_ttf();
        assert_eq!(
            FontRef::new(&bytes).err(),
            Some(ReadError::UnsupportedLocaTableVersion)
        );
    }

    #[test]
    fn each_missing_required_table_is_reported() {
        for (tag, expected) in [
            (cmap::TAG, ReadError::NoCmapTable),
            (name::TAG, ReadError::NoNameTable),
            (maxp::TAG, ReadError::NoMaxpTable),
            (hhea::TAG, ReadError::NoHheaTable),
            (head::TAG, ReadError::NoHeadTable),
            (hmtx::TAG, ReadError::NoHmtxTable),
            (loca::TAG, ReadError::NoLocaTable),
            (glyf::TAG, ReadError::NoGlyfTable),
        ] {
            let bytes = ttf_test_data::sample_ttf_without(tag.to_be_bytes());
            assert_eq!(FontRef::new(&bytes).err(), Some(expected), "dropping {tag}");
        }
    }

    #[test]
    fn truncated_font_never_reads_out_of_bounds() {
        let bytes = ttf_test_data::sample_ttf();
        for len in 0..bytes.len() {
            // any truncation must fail cleanly
            assert!(FontRef::new(&bytes[..len]).is_err(), "prefix of {len} bytes");
        }
    }
}
