use std::{borrow::Cow, error::Error, fmt, rc::Rc, sync::Arc};

/// Any type implementing `AsKeyByte` can be used to address a single child of
/// a [`crate::ChildMap`].
///
/// A key is valid only if it normalizes to exactly one byte. Integers are
/// accepted when their value lies in `0..=255`, byte and text sequences when
/// their (UTF-8 for text) encoding is exactly one byte long.
pub trait AsKeyByte {
    /// Normalize the current value into the single byte that labels a child.
    fn key_byte(&self) -> Result<u8, InvalidKeyError>;
}

/// The error type returned when a key cannot be normalized to a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidKeyError(Rejected);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejected {
    Integer { negative: bool, magnitude: u128 },
    Length(usize),
}

impl InvalidKeyError {
    fn unsigned(value: u128) -> Self {
        InvalidKeyError(Rejected::Integer {
            negative: false,
            magnitude: value,
        })
    }

    fn signed(value: i128) -> Self {
        InvalidKeyError(Rejected::Integer {
            negative: value < 0,
            magnitude: value.unsigned_abs(),
        })
    }

    fn length(len: usize) -> Self {
        InvalidKeyError(Rejected::Length(len))
    }

    /// Return the byte length of the rejected key, if it was a byte or text
    /// sequence.
    pub fn rejected_len(&self) -> Option<usize> {
        match self.0 {
            Rejected::Length(len) => Some(len),
            Rejected::Integer { .. } => None,
        }
    }

    /// Return true if the rejected key was an integer outside `0..=255`.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.0, Rejected::Integer { .. })
    }
}

impl fmt::Display for InvalidKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Rejected::Integer {
                negative,
                magnitude,
            } => write!(
                f,
                "Integer key [{}{}] is outside of the allowed byte range [0, 255].",
                if negative { "-" } else { "" },
                magnitude
            ),
            Rejected::Length(len) => write!(
                f,
                "Key has a byte length of [{len}], a child key must be exactly 1 byte long."
            ),
        }
    }
}

impl Error for InvalidKeyError {}

/// Return the only byte of `bytes`, or an error carrying its length.
#[inline]
fn single_byte(bytes: &[u8]) -> Result<u8, InvalidKeyError> {
    match bytes {
        [byte] => Ok(*byte),
        _ => Err(InvalidKeyError::length(bytes.len())),
    }
}

macro_rules! key_byte_for_unsigned_integers {
    ($($type:ty),*) => {
        $(
            impl AsKeyByte for $type {
                #[inline]
                fn key_byte(&self) -> Result<u8, InvalidKeyError> {
                    u8::try_from(*self).map_err(|_| InvalidKeyError::unsigned(*self as u128))
                }
            }
        )*
    };
}

key_byte_for_unsigned_integers!(u8, u16, u32, u64, u128, usize);

macro_rules! key_byte_for_signed_integers {
    ($($type:ty),*) => {
        $(
            impl AsKeyByte for $type {
                #[inline]
                fn key_byte(&self) -> Result<u8, InvalidKeyError> {
                    u8::try_from(*self).map_err(|_| InvalidKeyError::signed(*self as i128))
                }
            }
        )*
    };
}

key_byte_for_signed_integers!(i8, i16, i32, i64, i128, isize);

impl AsKeyByte for [u8] {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(self)
    }
}

impl<const N: usize> AsKeyByte for [u8; N] {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(self.as_slice())
    }
}

impl AsKeyByte for [i8] {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(bytemuck::cast_slice(self))
    }
}

impl<const N: usize> AsKeyByte for [i8; N] {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(bytemuck::cast_slice(self.as_slice()))
    }
}

impl AsKeyByte for Vec<u8> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(self)
    }
}

impl AsKeyByte for str {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(str::as_bytes(self))
    }
}

impl AsKeyByte for String {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(str::as_bytes(self))
    }
}

impl AsKeyByte for char {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        let mut buf = [0u8; 4];
        single_byte(self.encode_utf8(&mut buf).as_bytes())
    }
}

impl AsKeyByte for Cow<'_, [u8]> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(self.as_ref())
    }
}

impl AsKeyByte for Cow<'_, str> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        single_byte(str::as_bytes(self.as_ref()))
    }
}

impl<T: AsKeyByte + ?Sized> AsKeyByte for &T {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        T::key_byte(*self)
    }
}

impl<T: AsKeyByte + ?Sized> AsKeyByte for &mut T {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        T::key_byte(*self)
    }
}

impl<T: AsKeyByte + ?Sized> AsKeyByte for Box<T> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        T::key_byte(self.as_ref())
    }
}

impl<T: AsKeyByte + ?Sized> AsKeyByte for Rc<T> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        T::key_byte(self.as_ref())
    }
}

impl<T: AsKeyByte + ?Sized> AsKeyByte for Arc<T> {
    fn key_byte(&self) -> Result<u8, InvalidKeyError> {
        T::key_byte(self.as_ref())
    }
}

#[cfg(test)]
mod tests;
