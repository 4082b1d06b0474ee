//! The [maxp (Maximum Profile)](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::types::Tag;

/// 'maxp'
pub const TAG: Tag = Tag::new(b"maxp");

/// The maximum profile table. Only the glyph count is of interest here;
/// it bounds every glyph-indexed lookup in the font.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Maxp {
    pub num_glyphs: u16,
}

impl FontRead<'_> for Maxp {
    fn read(data: FontData) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // version 0.5 (CFF) and 1.0 (TrueType) share the leading fields
        cursor.advance::<u32>();
        let num_glyphs: u16 = cursor.read()?;
        Ok(Maxp { num_glyphs })
    }
}
