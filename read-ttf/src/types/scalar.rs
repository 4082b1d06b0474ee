//! Encoding and decoding of big-endian font scalars.

/// A fixed-size value with a big-endian wire representation.
///
/// Everything read out of a font file passes through this trait, so the
/// conversion between disk order and host order lives in exactly one place.
/// The raw representation is always a plain byte array; fields are read one
/// at a time rather than by reinterpreting packed structs, which keeps the
/// crate free of alignment and endianness assumptions about the host.
pub trait Scalar: Sized + Copy {
    /// The big-endian byte representation of this type.
    type Raw: Copy + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// The size of the raw representation in bytes.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Encode this value as big-endian bytes.
    fn to_raw(self) -> Self::Raw;

    /// Decode a value from big-endian bytes.
    fn from_raw(raw: Self::Raw) -> Self;

    /// Read a value from the front of `bytes`, if enough bytes are present.
    fn read(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..Self::RAW_BYTE_LEN)
            .and_then(|bytes| Self::Raw::try_from(bytes).ok())
            .map(Self::from_raw)
    }
}

macro_rules! int_scalar {
    ($ty:ty, $len:literal) => {
        impl Scalar for $ty {
            type Raw = [u8; $len];

            fn to_raw(self) -> Self::Raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: Self::Raw) -> Self {
                Self::from_be_bytes(raw)
            }
        }
    };
}

int_scalar!(u8, 1);
int_scalar!(i8, 1);
int_scalar!(u16, 2);
int_scalar!(i16, 2);
int_scalar!(u32, 4);
int_scalar!(i32, 4);
int_scalar!(i64, 8);

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip<T: Scalar + PartialEq + std::fmt::Debug>(value: T) {
        assert_eq!(T::from_raw(value.to_raw()), value);
        assert_eq!(T::read(value.to_raw().as_ref()), Some(value));
    }

    #[test]
    fn big_endian_round_trips() {
        round_trip(0u8);
        round_trip(-1i8);
        round_trip(0xABCDu16);
        round_trip(-0x40i16);
        round_trip(0x00010000u32);
        round_trip(i32::MIN);
    }

    #[test]
    fn wire_order_is_big_endian() {
        assert_eq!(0x0102u16.to_raw(), [1, 2]);
        assert_eq!(0x01020304u32.to_raw(), [1, 2, 3, 4]);
    }

    #[test]
    fn short_input() {
        assert_eq!(u32::read(&[0, 0, 1]), None);
        assert_eq!(u16::read(&[]), None);
    }
}
