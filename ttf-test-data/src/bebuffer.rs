//! small utilities used in tests

use read_ttf::types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer.
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes verbatim.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// be_buffer_add!(buffer, value) - Add an item to a [`BeBuffer`].
///
/// Values can be one of two types:
/// 1. Single scalar value, ie: `10u16`
/// 2. Array of scalar values, ie: `[1u8, 2, 3]`
#[macro_export]
macro_rules! be_buffer_add {
    ($b:ident, [$($v:literal),+]) => {
        let $b = $b.extend([$($v),*]);
    };
    ($b:ident, $v:tt) => {
        let $b = $b.push($v);
    };
}

/// be_buffer!(val1, ..., valn) - Constructs a [`BeBuffer`] from the
/// provided list of values.
///
/// Values can be one of two types:
/// 1. Single scalar value, ie: `10u16`
/// 2. Array of scalar values, ie: `[1u8, 2, 3]`
#[macro_export]
macro_rules! be_buffer {
    ( $( $x:tt ),+ $(,)? ) => {
        {
            let builder = $crate::bebuffer::BeBuffer::new();
            $(
                $crate::be_buffer_add!(builder, $x);
            )*
            builder
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_written_big_endian() {
        let buf = BeBuffer::new().push(1u8).push(2u16).push(3u32);
        assert_eq!(buf.as_slice(), &[1, 0, 2, 0, 0, 0, 3]);
    }

    #[test]
    fn extend_writes_each_item() {
        let buf = BeBuffer::new().extend([1u16, 2, 3]);
        assert_eq!(buf.as_slice(), &[0, 1, 0, 2, 0, 3]);
    }

    #[test]
    fn be_buffer_macro() {
        let buf = be_buffer! {
            1u8,
            2u16,
            3u32
        };
        assert_eq!(buf.as_slice(), &[1, 0, 2, 0, 0, 0, 3]);
    }

    #[test]
    fn be_buffer_macro_array() {
        let buf = be_buffer! {
            1u8,
            [2u8, 3, 4, 5, 6]
        };
        assert_eq!(buf.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }
}
