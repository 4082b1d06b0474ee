use std::fmt::{Debug, Display, Formatter};

/// A table tag: four bytes of printable ascii.
///
/// Tags are compared as the raw on-disk byte sequence, never as integers in
/// some host convention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "bytemuck",
    derive(bytemuck::AnyBitPattern, bytemuck::NoUninit)
)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a tag from a byte string literal, e.g. `Tag::new(b"glyf")`.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Construct a tag from raw big-endian bytes.
    ///
    /// This does not check that the bytes are printable ascii; it is intended
    /// for use during parsing, where arbitrary input is accepted and simply
    /// fails lookup.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl crate::types::Scalar for Tag {
    type Raw = [u8; 4];

    fn to_raw(self) -> Self::Raw {
        self.0
    }

    fn from_raw(raw: Self::Raw) -> Self {
        Self(raw)
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // non-ascii bytes can show up in malformed fonts; print a placeholder
        let mut bytes = [b'-'; 4];
        for (out, b) in bytes.iter_mut().zip(self.0.iter()) {
            if b.is_ascii() && !b.is_ascii_control() {
                *out = *b;
            }
        }
        Display::fmt(std::str::from_utf8(&bytes).unwrap_or("????"), f)
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Tag::new(b"glyf").to_string(), "glyf");
        assert_eq!(Tag::from_be_bytes([0x00, 0x61, 0xFF, 0x62]).to_string(), "-a-b");
    }

    #[test]
    fn ordering_matches_byte_order() {
        assert!(Tag::new(b"cmap") < Tag::new(b"loca"));
    }
}
