//! Traits and errors for interpreting font data.

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// Implementations are responsible for validating their own header: version
/// fields are checked here, and any array length is checked against the
/// underlying byte region before it is used.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when loading or reading font data.
///
/// This is one flat sum covering the whole loader; the rasterizer has no
/// failure modes of its own. `Ok(_)` plays the role of a success code, and
/// failures to read a file from disk belong to the caller, who owns all I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// A read would have crossed the end of the font data.
    OutOfBounds,
    /// The container flavor or a character-map subtable format is not supported.
    UnsupportedFormat,
    /// The font advertises CFF outlines but carries no `CFF ` table.
    NoCffTable,
    NoGlyfTable,
    NoNameTable,
    NoLocaTable,
    NoMaxpTable,
    NoCmapTable,
    NoHheaTable,
    NoHeadTable,
    NoHmtxTable,
    /// No character-map subtable with a usable Unicode encoding was found.
    UnsupportedCharEncoding,
    /// The `head` table version (which gates the loca index format) is unknown.
    UnsupportedLocaTableVersion,
    /// The `hhea` table version is unknown.
    UnsupportedHheaTableVersion,
    /// `head.indexToLocFormat` is neither short (0) nor long (1).
    UnsupportedLocaTableIndex,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::UnsupportedFormat => write!(f, "Unsupported font or subtable format"),
            ReadError::NoCffTable => write!(f, "the CFF table is missing"),
            ReadError::NoGlyfTable => write!(f, "the glyf table is missing"),
            ReadError::NoNameTable => write!(f, "the name table is missing"),
            ReadError::NoLocaTable => write!(f, "the loca table is missing"),
            ReadError::NoMaxpTable => write!(f, "the maxp table is missing"),
            ReadError::NoCmapTable => write!(f, "the cmap table is missing"),
            ReadError::NoHheaTable => write!(f, "the hhea table is missing"),
            ReadError::NoHeadTable => write!(f, "the head table is missing"),
            ReadError::NoHmtxTable => write!(f, "the hmtx table is missing"),
            ReadError::UnsupportedCharEncoding => {
                write!(f, "No character-map subtable with a supported encoding")
            }
            ReadError::UnsupportedLocaTableVersion => {
                write!(f, "Unsupported head table version")
            }
            ReadError::UnsupportedHheaTableVersion => {
                write!(f, "Unsupported hhea table version")
            }
            ReadError::UnsupportedLocaTableIndex => {
                write!(f, "Unsupported loca index format")
            }
        }
    }
}

impl std::error::Error for ReadError {}
