//! cmap subtables for scenarios not worth authoring real fonts for

use crate::bebuffer::BeBuffer;

/// One segment of a format 4 subtable.
#[derive(Clone, Copy, Debug)]
pub struct Segment4 {
    pub start: u16,
    pub end: u16,
    pub delta: i16,
    pub range_offset: u16,
}

/// Builds a format 4 subtable from the given segments.
///
/// The mandatory `0xFFFF` terminator segment and the binary-search hints
/// are filled in automatically.
pub fn format4(segments: &[Segment4]) -> BeBuffer {
    format4_impl(segments, &[])
}

/// Builds a format 4 subtable with one segment resolved through the
/// trailing glyph id array rather than a delta.
pub fn format4_with_glyph_array(start: u16, glyph_ids: &[u16]) -> BeBuffer {
    let seg_count = 2u16; // the segment plus the terminator
    let segment = Segment4 {
        start,
        end: start + glyph_ids.len() as u16 - 1,
        delta: 0,
        // distance from this idRangeOffset slot to the glyph id array
        range_offset: seg_count * 2,
    };
    format4_impl(&[segment], glyph_ids)
}

fn format4_impl(segments: &[Segment4], glyph_ids: &[u16]) -> BeBuffer {
    let terminator = Segment4 {
        start: 0xFFFF,
        end: 0xFFFF,
        delta: 1,
        range_offset: 0,
    };
    let all: Vec<Segment4> = segments.iter().copied().chain([terminator]).collect();
    let seg_count = all.len() as u16;
    let entry_selector = (seg_count as f32).log2().floor() as u16;
    let search_range = 2 * (1 << entry_selector);
    let range_shift = seg_count * 2 - search_range;
    let length = 16 + seg_count * 8 + glyph_ids.len() as u16 * 2;

    let buf = BeBuffer::new()
        .push(4u16) // format
        .push(length)
        .push(0u16) // language
        .push(seg_count * 2)
        .push(search_range)
        .push(entry_selector)
        .push(range_shift)
        .extend(all.iter().map(|segment| segment.end))
        .push(0u16) // reservedPad
        .extend(all.iter().map(|segment| segment.start))
        .extend(all.iter().map(|segment| segment.delta))
        .extend(all.iter().map(|segment| segment.range_offset));
    buf.extend(glyph_ids.iter().copied())
}

/// Builds a format 6 subtable: a dense glyph array starting at `first_code`.
pub fn format6(first_code: u16, glyph_ids: &[u16]) -> BeBuffer {
    let length = 10 + glyph_ids.len() as u16 * 2;
    BeBuffer::new()
        .push(6u16) // format
        .push(length)
        .push(0u16) // language
        .push(first_code)
        .push(glyph_ids.len() as u16)
        .extend(glyph_ids.iter().copied())
}

/// Builds a format 12 subtable from `(start, end, start_glyph_id)` groups.
pub fn format12(groups: &[(u32, u32, u32)]) -> BeBuffer {
    let length = 16 + groups.len() as u32 * 12;
    let mut buf = BeBuffer::new()
        .push(12u16) // format
        .push(0u16) // reserved
        .push(length)
        .push(0u32) // language
        .push(groups.len() as u32);
    for (start, end, start_glyph_id) in groups {
        buf = buf.push(*start).push(*end).push(*start_glyph_id);
    }
    buf
}

/// Assembles a whole `cmap` table from `(platform, encoding, subtable)`
/// records.
pub fn cmap_with(records: &[(u16, u16, &[u8])]) -> BeBuffer {
    let mut buf = BeBuffer::new().push(0u16).push(records.len() as u16);
    let mut offset = 4 + records.len() as u32 * 8;
    for (platform_id, encoding_id, subtable) in records {
        buf = buf.push(*platform_id).push(*encoding_id).push(offset);
        offset += subtable.len() as u32;
    }
    for (_, _, subtable) in records {
        buf = buf.extend_bytes(subtable);
    }
    buf
}
