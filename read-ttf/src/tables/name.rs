//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::types::Tag;

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

/// Well known name identifiers.
pub mod name_id {
    pub const FAMILY_NAME: u16 = 1;
    pub const SUBFAMILY_NAME: u16 = 2;
    pub const FULL_NAME: u16 = 4;
    pub const POSTSCRIPT_NAME: u16 = 6;
}

/// The naming table.
#[derive(Clone)]
pub struct Name<'a> {
    data: FontData<'a>,
    count: u16,
    storage_offset: u16,
}

/// One entry in the naming table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub length: u16,
    pub string_offset: u16,
}

impl<'a> FontRead<'a> for Name<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        // version 0 and 1 share the fields we use
        cursor.advance::<u16>();
        let count: u16 = cursor.read()?;
        let storage_offset: u16 = cursor.read()?;
        data.check_in_bounds(6 + count as usize * 12)?;
        Ok(Name {
            data,
            count,
            storage_offset,
        })
    }
}

impl<'a> Name<'a> {
    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn records(&self) -> impl Iterator<Item = NameRecord> + 'a {
        let data = self.data;
        (0..self.count as usize).filter_map(move |i| {
            let base = 6 + i * 12;
            Some(NameRecord {
                platform_id: data.read_at(base).ok()?,
                encoding_id: data.read_at(base + 2).ok()?,
                language_id: data.read_at(base + 4).ok()?,
                name_id: data.read_at(base + 6).ok()?,
                length: data.read_at(base + 8).ok()?,
                string_offset: data.read_at(base + 10).ok()?,
            })
        })
    }

    /// The raw string storage for a record, if it is in bounds.
    pub fn string_data(&self, record: &NameRecord) -> Option<&'a [u8]> {
        let start = self.storage_offset as usize + record.string_offset as usize;
        self.data
            .slice(start..start + record.length as usize)
            .map(|data| data.as_bytes())
    }

    /// Best-effort lookup of an English name, preferring Unicode encodings.
    ///
    /// Unicode and Microsoft platform strings are UTF-16BE; Macintosh
    /// strings are decoded as ascii, which covers the Roman names real
    /// fonts carry there.
    pub fn english_name(&self, name_id: u16) -> Option<String> {
        let mut mac = None;
        for record in self.records().filter(|record| record.name_id == name_id) {
            match record.platform_id {
                0 | 3 => {
                    if let Some(bytes) = self.string_data(&record) {
                        return Some(decode_utf16_be(bytes));
                    }
                }
                1 if record.language_id == 0 => mac = Some(record),
                _ => {}
            }
        }
        let bytes = self.string_data(&mac?)?;
        Some(bytes.iter().map(|byte| *byte as char).collect())
    }
}

fn decode_utf16_be(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|result| result.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_test_data::bebuffer::BeBuffer;

    fn sample_name_table() -> BeBuffer {
        // two records: a unicode family name and a mac fallback
        let family = "Test Sans";
        let unicode: Vec<u8> = family
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        let mut buf = BeBuffer::new()
            .push(0u16) // version
            .push(2u16) // count
            .push(30u16) // storageOffset
            // record 0: macintosh roman english
            .extend([1u16, 0, 0, name_id::FAMILY_NAME, family.len() as u16])
            .push(unicode.len() as u16) // stringOffset
            // record 1: unicode BMP
            .extend([0u16, 3, 0, name_id::FAMILY_NAME])
            .push(unicode.len() as u16)
            .push(0u16); // stringOffset
        for byte in unicode {
            buf = buf.push(byte);
        }
        for byte in family.bytes() {
            buf = buf.push(byte);
        }
        buf
    }

    #[test]
    fn prefers_unicode_string() {
        let buf = sample_name_table();
        let name = Name::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(name.count(), 2);
        assert_eq!(
            name.english_name(name_id::FAMILY_NAME),
            Some("Test Sans".to_string())
        );
        assert_eq!(name.english_name(name_id::POSTSCRIPT_NAME), None);
    }

    #[test]
    fn record_out_of_storage_bounds() {
        let buf = BeBuffer::new()
            .push(0u16)
            .push(1u16)
            .push(18u16)
            .extend([0u16, 3, 0, name_id::FULL_NAME, 200, 0]);
        let name = Name::read(FontData::new(buf.as_slice())).unwrap();
        assert_eq!(name.english_name(name_id::FULL_NAME), None);
    }

    #[test]
    fn truncated_record_array() {
        let buf = BeBuffer::new().push(0u16).push(4u16).push(6u16);
        assert!(matches!(
            Name::read(FontData::new(buf.as_slice())),
            Err(ReadError::OutOfBounds)
        ));
    }
}
