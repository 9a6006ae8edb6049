use std::fmt::Debug;

use byteorder::{ByteOrder, LittleEndian};

use crate::error::ErrorKind;
use crate::format::{Vec3d, Vec4f};
use crate::{Error, Result};

/// A bounds-checked, forward-only cursor over a borrowed byte buffer.
///
/// All primitives are little-endian and naturally sized, with no padding
/// between successive reads. [`SliceReader::read_bytes`] hands out borrows of
/// the underlying buffer, which is how the parser produces zero-copy array,
/// index, and image payloads.
pub struct SliceReader<'de> {
    data: &'de [u8],
    offset: usize,
}

impl<'de> Debug for SliceReader<'de> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let upcoming = &self.data[self.offset..];
        f.debug_struct("SliceReader")
            .field("offset", &self.offset)
            .field(
                "preview",
                &format!("{:0x?}", &upcoming[..8.min(upcoming.len())]),
            )
            .finish()
    }
}

impl<'de> From<&'de [u8]> for SliceReader<'de> {
    fn from(data: &'de [u8]) -> Self {
        Self { data, offset: 0 }
    }
}

macro_rules! read_primitive {
    ($name:ident, $type:ty, $decode:expr) => {
        /// Reads a little-endian value, advancing the cursor.
        #[inline]
        pub fn $name(&mut self) -> Result<$type> {
            let bytes = self.read_bytes(std::mem::size_of::<$type>())?;
            Ok($decode(bytes))
        }
    };
}

impl<'de> SliceReader<'de> {
    /// The current byte offset from the start of the buffer.
    #[must_use]
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the cursor has consumed the buffer exactly.
    #[must_use]
    #[inline]
    pub const fn is_at_end(&self) -> bool {
        self.offset == self.data.len()
    }

    /// The number of unread bytes.
    #[must_use]
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn eof(&self) -> Error {
        Error::new(self.offset, ErrorKind::UnexpectedEof)
    }

    /// Borrows the next `length` bytes out of the buffer and advances past
    /// them. The returned slice lives as long as the buffer, not the reader.
    #[inline]
    pub fn read_bytes(&mut self, length: usize) -> Result<&'de [u8]> {
        if self.remaining() < length {
            Err(self.eof())
        } else {
            let start = &self.data[self.offset..self.offset + length];
            self.offset += length;
            Ok(start)
        }
    }

    /// Advances the cursor without inspecting the skipped bytes.
    #[inline]
    pub fn skip(&mut self, length: usize) -> Result<()> {
        self.read_bytes(length).map(|_| ())
    }

    read_primitive!(read_u8, u8, |b: &[u8]| b[0]);
    read_primitive!(read_i8, i8, |b: &[u8]| b[0] as i8);
    read_primitive!(read_u16, u16, LittleEndian::read_u16);
    read_primitive!(read_i16, i16, LittleEndian::read_i16);
    read_primitive!(read_u32, u32, LittleEndian::read_u32);
    read_primitive!(read_i32, i32, LittleEndian::read_i32);
    read_primitive!(read_u64, u64, LittleEndian::read_u64);
    read_primitive!(read_i64, i64, LittleEndian::read_i64);
    read_primitive!(read_f32, f32, LittleEndian::read_f32);
    read_primitive!(read_f64, f64, LittleEndian::read_f64);

    /// Reads a one-byte boolean. Only 0 and 1 are valid encodings; anything
    /// else fails at the offset of the offending byte.
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        if self.remaining() < 1 {
            return Err(self.eof());
        }
        match self.data[self.offset] {
            value @ (0 | 1) => {
                self.offset += 1;
                Ok(value == 1)
            }
            other => Err(Error::new(self.offset, ErrorKind::InvalidBool(other))),
        }
    }

    /// Reads an i32-length-prefixed byte string.
    ///
    /// The format is encoding-agnostic, so the body is interpreted as UTF-8
    /// on a best-effort basis. A negative length fails with
    /// [`ErrorKind::InvalidStringLength`].
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_i32()?;
        if length < 0 {
            return Err(Error::new(self.offset, ErrorKind::InvalidStringLength(length)));
        }
        let bytes = self.read_bytes(length as usize)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Reads four packed f32s.
    pub fn read_vec4f(&mut self) -> Result<Vec4f> {
        Ok(Vec4f {
            x: self.read_f32()?,
            y: self.read_f32()?,
            z: self.read_f32()?,
            w: self.read_f32()?,
        })
    }

    /// Reads three packed f64s.
    pub fn read_vec3d(&mut self) -> Result<Vec3d> {
        Ok(Vec3d {
            x: self.read_f64()?,
            y: self.read_f64()?,
            z: self.read_f64()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_primitives() {
        let data = [
            0x01, 0xFF, 0x02, 0x01, 0x04, 0x03, 0x02, 0x01, 0x00, 0x00, 0x80, 0x3F,
        ];
        let mut reader = SliceReader::from(&data[..]);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert_eq!(reader.read_i8().unwrap(), -1);
        assert_eq!(reader.read_u16().unwrap(), 0x0102);
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert!(reader.is_at_end());
        assert_eq!(reader.offset(), data.len());
    }

    #[test]
    fn eof_reports_current_offset() {
        let data = [0_u8; 3];
        let mut reader = SliceReader::from(&data[..]);
        reader.read_u8().unwrap();
        let error = reader.read_u32().unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::UnexpectedEof);
        assert_eq!(error.offset(), 1);
        // A failed read must not advance the cursor.
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn bool_validation() {
        let data = [0, 1, 2];
        let mut reader = SliceReader::from(&data[..]);
        assert!(!reader.read_bool().unwrap());
        assert!(reader.read_bool().unwrap());
        let error = reader.read_bool().unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::InvalidBool(2));
        assert_eq!(error.offset(), 2);
    }

    #[test]
    fn strings() {
        let data = [5, 0, 0, 0, b'h', b'e', b'l', b'l', b'o'];
        let mut reader = SliceReader::from(&data[..]);
        assert_eq!(reader.read_string().unwrap(), "hello");
        assert!(reader.is_at_end());

        let data = [0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = SliceReader::from(&data[..]);
        let error = reader.read_string().unwrap_err();
        assert_eq!(error.kind(), &ErrorKind::InvalidStringLength(-1));
        assert_eq!(error.offset(), 4);
    }

    #[test]
    fn non_utf8_strings_are_lossy() {
        let data = [2, 0, 0, 0, 0xC3, 0x28];
        let mut reader = SliceReader::from(&data[..]);
        assert_eq!(reader.read_string().unwrap(), "\u{FFFD}(");
    }

    #[test]
    fn zero_copy_bytes_outlive_reader() {
        let data = vec![1_u8, 2, 3, 4];
        let bytes = {
            let mut reader = SliceReader::from(data.as_slice());
            reader.skip(1).unwrap();
            reader.read_bytes(2).unwrap()
        };
        assert_eq!(bytes, &[2, 3]);
    }

    #[test]
    fn skip_is_bounds_checked() {
        let data = [0_u8; 4];
        let mut reader = SliceReader::from(&data[..]);
        reader.skip(4).unwrap();
        assert!(reader.is_at_end());
        assert_eq!(reader.skip(1).unwrap_err().kind(), &ErrorKind::UnexpectedEof);
    }
}
