//! Little-endian cursor over an in-memory ELU/ANI buffer.
//!
//! Every read checks the remaining length first so a short buffer surfaces as
//! [`Error::TruncatedInput`] with the offending offset, never as zero-filled
//! data.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::half::half_to_f32;
use crate::error::{Error, Result};

/// Sequential reader over a fixed byte buffer.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    /// Current read offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    /// Bytes left between the read offset and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.get_ref().len().saturating_sub(self.position())
    }

    /// Move the read offset to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read reports truncation.
    pub fn seek(&mut self, offset: usize) {
        self.inner.set_position(offset as u64);
    }

    /// Advance the read offset by `len` bytes without decoding them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(len)?;
        self.seek(self.position() + len);
        Ok(())
    }

    fn ensure(&self, requested: usize) -> Result<()> {
        let available = self.remaining();
        if requested > available {
            return Err(Error::TruncatedInput {
                offset: self.position(),
                requested,
                available,
            });
        }
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.inner.read_i32::<LittleEndian>()?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        Ok(self.inner.read_u32::<LittleEndian>()?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.ensure(2)?;
        Ok(self.inner.read_i16::<LittleEndian>()?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.ensure(2)?;
        Ok(self.inner.read_u16::<LittleEndian>()?)
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        self.ensure(4)?;
        Ok(self.inner.read_f32::<LittleEndian>()?)
    }

    /// Read `N` consecutive i32 values.
    pub fn read_i32s<const N: usize>(&mut self) -> Result<[i32; N]> {
        self.ensure(N * 4)?;
        let mut out = [0i32; N];
        self.inner.read_i32_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `N` consecutive u32 values.
    pub fn read_u32s<const N: usize>(&mut self) -> Result<[u32; N]> {
        self.ensure(N * 4)?;
        let mut out = [0u32; N];
        self.inner.read_u32_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `N` consecutive i16 values.
    pub fn read_i16s<const N: usize>(&mut self) -> Result<[i16; N]> {
        self.ensure(N * 2)?;
        let mut out = [0i16; N];
        self.inner.read_i16_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `N` consecutive u16 values.
    pub fn read_u16s<const N: usize>(&mut self) -> Result<[u16; N]> {
        self.ensure(N * 2)?;
        let mut out = [0u16; N];
        self.inner.read_u16_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `N` consecutive f32 values.
    pub fn read_f32s<const N: usize>(&mut self) -> Result<[f32; N]> {
        self.ensure(N * 4)?;
        let mut out = [0f32; N];
        self.inner.read_f32_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `N` packed half floats, promoted to f32.
    pub fn read_f16s<const N: usize>(&mut self) -> Result<[f32; N]> {
        Ok(self.read_u16s::<N>()?.map(half_to_f32))
    }

    /// Read `count` fixed-width f32 tuples, checking the whole span up front.
    pub fn read_f32_arrays<const N: usize>(&mut self, count: usize) -> Result<Vec<[f32; N]>> {
        self.ensure_span(count, N * 4)?;
        (0..count).map(|_| self.read_f32s::<N>()).collect()
    }

    /// Read `count` u16 values, checking the whole span up front.
    pub fn read_u16_vec(&mut self, count: usize) -> Result<Vec<u16>> {
        self.ensure_span(count, 2)?;
        let mut out = vec![0u16; count];
        self.inner.read_u16_into::<LittleEndian>(&mut out)?;
        Ok(out)
    }

    /// Read `count` records of at least `width` bytes each.
    ///
    /// The minimum span is checked before anything is allocated, so a corrupt
    /// count fails as truncation instead of reserving a huge buffer.
    pub fn read_records<T>(
        &mut self,
        count: usize,
        width: usize,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.ensure_span(count, width)?;
        (0..count).map(|_| read(self)).collect()
    }

    fn ensure_span(&self, count: usize, width: usize) -> Result<()> {
        let requested = count.checked_mul(width).unwrap_or(usize::MAX);
        self.ensure(requested)
    }

    /// Read an i32 element count, rejecting negative values.
    pub fn read_count(&mut self) -> Result<usize> {
        let value = self.read_i32()?;
        usize::try_from(value).map_err(|_| Error::NegativeLength {
            offset: self.position(),
            value,
        })
    }

    /// Read a length-prefixed ASCII string.
    ///
    /// NUL bytes inside the slot are dropped rather than ending the string,
    /// matching the padded fixed-size names the exporter writes.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_count()?;
        self.ensure(len)?;
        let start = self.position();
        let bytes = &self.inner.get_ref()[start..start + len];
        let text = bytes
            .iter()
            .filter(|&&b| b != 0)
            .map(|&b| char::from(b))
            .collect();
        self.seek(start + len);
        Ok(text)
    }
}
