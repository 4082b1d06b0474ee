//! whole-font assembly

use read_ttf::types::Tag;

use crate::bebuffer::BeBuffer;
use crate::{cmap, glyf};

const TT_SFNT_VERSION: u32 = 0x00010000;
const CFF_SFNT_VERSION: u32 = u32::from_be_bytes(*b"OTTO");

/// A configurable minimal TrueType font.
///
/// The defaults produce a well-formed font with five glyphs (a notdef box,
/// a triangle, an on/off quad contour, an all-off-curve ring, and an empty
/// glyph) mapped from `A` through `D` by a format 4 cmap with a bare delta
/// segment.
#[derive(Clone, Debug)]
pub struct TestFont {
    pub head_version: u32,
    pub units_per_em: u16,
    /// 0 for short loca entries, 1 for long.
    pub index_to_loc_format: i16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
    /// Raw glyph records; an empty record produces coinciding loca entries.
    pub glyphs: Vec<Vec<u8>>,
    /// The complete cmap table.
    pub cmap: Vec<u8>,
    /// Drop this table from the directory, to provoke loader errors.
    pub omit: Option<Tag>,
}

impl Default for TestFont {
    fn default() -> Self {
        TestFont {
            head_version: 0x00010000,
            units_per_em: 1024,
            index_to_loc_format: 0,
            ascender: 800,
            descender: -200,
            line_gap: 90,
            glyphs: standard_glyphs(),
            cmap: cmap::cmap_with(&[(
                0, // unicode platform
                3,
                cmap::format4(&[cmap::Segment4 {
                    start: 0x41,
                    end: 0x5A,
                    delta: -0x40,
                    range_offset: 0,
                }])
                .as_slice(),
            )])
            .into_vec(),
            omit: None,
        }
    }
}

impl TestFont {
    pub fn build(&self) -> Vec<u8> {
        let num_glyphs = self.glyphs.len() as u16;

        // glyph records padded to even lengths so short loca offsets work
        let mut glyf = Vec::new();
        let mut offsets = vec![0u32];
        for glyph in &self.glyphs {
            glyf.extend_from_slice(glyph);
            if glyf.len() % 2 != 0 {
                glyf.push(0);
            }
            offsets.push(glyf.len() as u32);
        }
        let loca = if self.index_to_loc_format == 1 {
            BeBuffer::new().extend(offsets.iter().copied())
        } else {
            BeBuffer::new().extend(offsets.iter().map(|offset| (offset / 2) as u16))
        };

        let head = BeBuffer::new()
            .push(self.head_version)
            .push(0u32) // fontRevision
            .push(0u32) // checkSumAdjustment
            .push(0x5F0F3CF5u32) // magicNumber
            .push(0u16) // flags
            .push(self.units_per_em)
            .push(0i64) // created
            .push(0i64) // modified
            .extend([0i16, self.descender, 1000, 1000]) // font bounding box
            .push(0u16) // macStyle
            .push(8u16) // lowestRecPPEM
            .push(2i16) // fontDirectionHint
            .push(self.index_to_loc_format)
            .push(0i16); // glyphDataFormat

        let hhea = BeBuffer::new()
            .push(0x00010000u32)
            .push(self.ascender)
            .push(self.descender)
            .push(self.line_gap)
            .push(600u16) // advanceWidthMax
            .extend([0i16, 0, 1000]) // min bearings, xMaxExtent
            .extend([1i16, 0, 0]) // caret slope and offset
            .extend([0i16; 4]) // reserved
            .push(0i16) // metricDataFormat
            .push(num_glyphs); // numberOfHMetrics

        let maxp = BeBuffer::new()
            .push(0x00010000u32)
            .push(num_glyphs)
            .extend([0u16; 13]); // remaining version 1.0 maxima

        let mut hmtx = BeBuffer::new();
        for _ in 0..num_glyphs {
            hmtx = hmtx.push(600u16).push(50i16);
        }

        let family = "Sverta Test";
        let family_utf16: Vec<u8> = family
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        let name = BeBuffer::new()
            .push(0u16) // version
            .push(1u16) // count
            .push(18u16) // storageOffset
            .extend([0u16, 3, 0, 1]) // unicode BMP, family name
            .push(family_utf16.len() as u16)
            .push(0u16) // stringOffset
            .extend_bytes(&family_utf16);

        let tables: Vec<(Tag, Vec<u8>)> = [
            (Tag::new(b"head"), head.into_vec()),
            (Tag::new(b"hhea"), hhea.into_vec()),
            (Tag::new(b"maxp"), maxp.into_vec()),
            (Tag::new(b"hmtx"), hmtx.into_vec()),
            (Tag::new(b"cmap"), self.cmap.clone()),
            (Tag::new(b"loca"), loca.into_vec()),
            (Tag::new(b"glyf"), glyf),
            (Tag::new(b"name"), name.into_vec()),
        ]
        .into_iter()
        .filter(|(tag, _)| Some(*tag) != self.omit)
        .collect();

        build_sfnt(TT_SFNT_VERSION, tables)
    }
}

/// Lays out a table directory and body for the given tables.
pub fn build_sfnt(sfnt_version: u32, mut tables: Vec<(Tag, Vec<u8>)>) -> Vec<u8> {
    tables.sort_by_key(|(tag, _)| *tag);
    let num_tables = tables.len() as u16;
    let entry_selector = if num_tables == 0 {
        0
    } else {
        (num_tables as f32).log2().floor() as u16
    };
    let search_range = if num_tables == 0 {
        0
    } else {
        16 * (1 << entry_selector)
    };
    let range_shift = num_tables * 16 - search_range;

    let base = 12 + num_tables as u32 * 16;
    let mut directory = BeBuffer::new()
        .push(sfnt_version)
        .push(num_tables)
        .push(search_range)
        .push(entry_selector)
        .push(range_shift);
    let mut body: Vec<u8> = Vec::new();
    for (tag, bytes) in &tables {
        while body.len() % 4 != 0 {
            body.push(0);
        }
        directory = directory
            .push(*tag)
            .push(0u32) // checksum, never verified
            .push(base + body.len() as u32)
            .push(bytes.len() as u32);
        body.extend_from_slice(bytes);
    }
    let mut font = directory.into_vec();
    font.extend_from_slice(&body);
    font
}

fn standard_glyphs() -> Vec<Vec<u8>> {
    vec![
        // notdef: a plain box
        glyf::simple_glyph(
            (50, 0, 550, 700),
            &[&[(50, 0, true), (550, 0, true), (550, 700, true), (50, 700, true)]],
        )
        .into_vec(),
        // 'A': a triangle of three lines
        glyf::simple_glyph(
            (0, 0, 1000, 1000),
            &[&[(0, 0, true), (1000, 0, true), (500, 1000, true)]],
        )
        .into_vec(),
        // 'B': alternating on/off vertices
        glyf::simple_glyph(
            (0, 0, 1000, 1000),
            &[&[
                (0, 0, true),
                (1000, 0, false),
                (1000, 1000, true),
                (0, 1000, false),
            ]],
        )
        .into_vec(),
        // 'C': nothing but off-curve controls
        glyf::simple_glyph(
            (0, 0, 100, 100),
            &[&[
                (0, 0, false),
                (100, 0, false),
                (100, 100, false),
                (0, 100, false),
            ]],
        )
        .into_vec(),
        // 'D': an empty glyph (coinciding loca entries)
        Vec::new(),
    ]
}

/// The default five-glyph font with a format 4 character map.
pub fn sample_ttf() -> Vec<u8> {
    TestFont::default().build()
}

/// The default font with one required table dropped from the directory.
pub fn sample_ttf_without(tag: [u8; 4]) -> Vec<u8> {
    TestFont {
        omit: Some(Tag::from_be_bytes(tag)),
        ..Default::default()
    }
    .build()
}

/// The default glyphs behind a format 12 character map and long loca
/// offsets. Maps `A`..`Z` to glyphs 1.. and a supplementary-plane block to
/// glyph ids beyond the glyph count.
pub fn cmap12_ttf() -> Vec<u8> {
    TestFont {
        index_to_loc_format: 1,
        cmap: cmap::cmap_with(&[(
            0,
            4,
            cmap::format12(&[(0x41, 0x5A, 1), (0x10000, 0x1FFFF, 500)]).as_slice(),
        )])
        .into_vec(),
        ..Default::default()
    }
    .build()
}

/// The default glyphs behind a format 6 character map starting at U+0100.
pub fn cmap6_ttf() -> Vec<u8> {
    TestFont {
        cmap: cmap::cmap_with(&[(0, 3, cmap::format6(0x100, &[1, 2, 0, 3]).as_slice())])
            .into_vec(),
        ..Default::default()
    }
    .build()
}

/// A font whose `head` version is 2.0, which no reader supports.
pub fn bad_head_version_ttf() -> Vec<u8> {
    TestFont {
        head_version: 0x00020000,
        ..Default::default()
    }
    .build()
}

/// An `OTTO` container, with or without its `CFF ` table.
pub fn otto_ttf(with_cff: bool) -> Vec<u8> {
    let mut tables = vec![(Tag::new(b"name"), vec![0u8; 6])];
    if with_cff {
        tables.push((Tag::new(b"CFF "), vec![1, 0, 4, 4]));
    }
    build_sfnt(CFF_SFNT_VERSION, tables)
}
