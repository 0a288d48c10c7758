//! Sequential big-endian cursors for record marshalling.
//!
//! This module provides:
//! - [`WireWriter`] trait for appending primitives in wire byte order
//! - [`WireReader`] trait for consuming primitives in wire byte order
//! - [`SliceWriter`] / [`SliceReader`] for fixed, borrowed buffers
//! - [`StreamWriter`] / [`StreamReader`] for `std::io` streams
//!
//! `Vec<u8>`, [`BytesMut`] and [`Bytes`] implement the traits directly.
//!
//! All multi-byte values use network (big-endian) byte order. Both traits are
//! object safe; the record codec takes `&mut dyn WireWriter` and
//! `&mut dyn WireReader`.

use crate::error::{CodecError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{ErrorKind, Read, Write};

/// Trait for sequential writes in wire byte order.
///
/// Implementors only provide [`WireWriter::write_bytes`]; every typed write
/// is built on top of it.
pub trait WireWriter {
    /// Appends raw bytes.
    ///
    /// # Errors
    /// Fails if the destination is full or the underlying stream faults.
    fn write_bytes(&mut self, src: &[u8]) -> Result<()>;

    /// Writes a u8.
    #[inline(always)]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Writes an i8.
    #[inline(always)]
    fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a u16 in big-endian.
    #[inline(always)]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes an i16 in big-endian.
    #[inline(always)]
    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a u32 in big-endian.
    #[inline(always)]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes an i32 in big-endian.
    #[inline(always)]
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes a u64 in big-endian.
    #[inline(always)]
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes an i64 in big-endian.
    #[inline(always)]
    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Writes an f32 in big-endian.
    #[inline(always)]
    fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_u32(value.to_bits())
    }

    /// Writes an f64 in big-endian.
    #[inline(always)]
    fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_u64(value.to_bits())
    }

    /// Writes `count` zero bytes.
    fn write_zeros(&mut self, count: usize) -> Result<()> {
        const ZEROS: [u8; 64] = [0u8; 64];
        let mut left = count;
        while left > 0 {
            let chunk = left.min(ZEROS.len());
            self.write_bytes(&ZEROS[..chunk])?;
            left -= chunk;
        }
        Ok(())
    }
}

/// Trait for sequential reads in wire byte order.
///
/// Implementors only provide [`WireReader::read_bytes_into`]; every typed
/// read is built on top of it.
pub trait WireReader {
    /// Fills `dst` with the next `dst.len()` bytes.
    ///
    /// # Errors
    /// Returns [`CodecError::InsufficientData`] if fewer bytes remain, or
    /// [`CodecError::Io`] if the underlying stream faults.
    fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Reads a u8.
    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8> {
        take::<1, _>(self).map(|b| b[0])
    }

    /// Reads an i8.
    #[inline(always)]
    fn read_i8(&mut self) -> Result<i8> {
        take::<1, _>(self).map(i8::from_be_bytes)
    }

    /// Reads a u16 in big-endian.
    #[inline(always)]
    fn read_u16(&mut self) -> Result<u16> {
        take::<2, _>(self).map(u16::from_be_bytes)
    }

    /// Reads an i16 in big-endian.
    #[inline(always)]
    fn read_i16(&mut self) -> Result<i16> {
        take::<2, _>(self).map(i16::from_be_bytes)
    }

    /// Reads a u32 in big-endian.
    #[inline(always)]
    fn read_u32(&mut self) -> Result<u32> {
        take::<4, _>(self).map(u32::from_be_bytes)
    }

    /// Reads an i32 in big-endian.
    #[inline(always)]
    fn read_i32(&mut self) -> Result<i32> {
        take::<4, _>(self).map(i32::from_be_bytes)
    }

    /// Reads a u64 in big-endian.
    #[inline(always)]
    fn read_u64(&mut self) -> Result<u64> {
        take::<8, _>(self).map(u64::from_be_bytes)
    }

    /// Reads an i64 in big-endian.
    #[inline(always)]
    fn read_i64(&mut self) -> Result<i64> {
        take::<8, _>(self).map(i64::from_be_bytes)
    }

    /// Reads an f32 in big-endian.
    #[inline(always)]
    fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Reads an f64 in big-endian.
    #[inline(always)]
    fn read_f64(&mut self) -> Result<f64> {
        self.read_u64().map(f64::from_bits)
    }
}

#[inline(always)]
fn take<const N: usize, R: WireReader + ?Sized>(reader: &mut R) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_bytes_into(&mut bytes)?;
    Ok(bytes)
}

impl WireWriter for Vec<u8> {
    #[inline(always)]
    fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.extend_from_slice(src);
        Ok(())
    }
}

impl WireWriter for BytesMut {
    #[inline(always)]
    fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.extend_from_slice(src);
        Ok(())
    }

    #[inline(always)]
    fn write_u16(&mut self, value: u16) -> Result<()> {
        self.put_u16(value);
        Ok(())
    }

    #[inline(always)]
    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put_u32(value);
        Ok(())
    }

    #[inline(always)]
    fn write_u64(&mut self, value: u64) -> Result<()> {
        self.put_u64(value);
        Ok(())
    }

    fn write_zeros(&mut self, count: usize) -> Result<()> {
        self.put_bytes(0, count);
        Ok(())
    }
}

/// Implements [`WireReader`] for a [`Buf`] type, consuming from the front.
macro_rules! impl_buf_reader {
    ($ty:ty) => {
        impl WireReader for $ty {
            #[inline(always)]
            fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<()> {
                ensure_remaining(self.remaining(), dst.len())?;
                self.copy_to_slice(dst);
                Ok(())
            }

            #[inline(always)]
            fn read_u16(&mut self) -> Result<u16> {
                ensure_remaining(self.remaining(), 2)?;
                Ok(self.get_u16())
            }

            #[inline(always)]
            fn read_u32(&mut self) -> Result<u32> {
                ensure_remaining(self.remaining(), 4)?;
                Ok(self.get_u32())
            }

            #[inline(always)]
            fn read_u64(&mut self) -> Result<u64> {
                ensure_remaining(self.remaining(), 8)?;
                Ok(self.get_u64())
            }
        }
    };
}

impl_buf_reader!(Bytes);
impl_buf_reader!(BytesMut);

#[inline(always)]
fn ensure_remaining(available: usize, required: usize) -> Result<()> {
    if available < required {
        return Err(CodecError::insufficient_data(required, available));
    }
    Ok(())
}

/// Writer over a fixed, borrowed byte slice.
///
/// Tracks the current write position starting from an initial offset.
#[derive(Debug)]
pub struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    offset: usize,
    position: usize,
}

impl<'a> SliceWriter<'a> {
    /// Creates a writer starting at the beginning of `buffer`.
    #[must_use]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self::with_offset(buffer, 0)
    }

    /// Creates a writer starting at `offset`.
    ///
    /// # Arguments
    /// * `buffer` - Mutable byte buffer to write to
    /// * `offset` - Starting offset in the buffer
    #[must_use]
    pub fn with_offset(buffer: &'a mut [u8], offset: usize) -> Self {
        let offset = offset.min(buffer.len());
        Self {
            buffer,
            offset,
            position: offset,
        }
    }

    /// Returns the current write position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes written since the starting offset.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.position - self.offset
    }

    /// Returns the remaining capacity.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buffer[self.offset..self.position]
    }
}

impl WireWriter for SliceWriter<'_> {
    #[inline(always)]
    fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        let available = self.remaining();
        if src.len() > available {
            return Err(CodecError::capacity_exceeded(src.len(), available));
        }
        self.buffer[self.position..self.position + src.len()].copy_from_slice(src);
        self.position += src.len();
        Ok(())
    }
}

/// Reader over a borrowed byte slice.
#[derive(Debug, Clone, Copy)]
pub struct SliceReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> SliceReader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the unread bytes.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }
}

impl WireReader for SliceReader<'_> {
    #[inline(always)]
    fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<()> {
        ensure_remaining(self.remaining(), dst.len())?;
        dst.copy_from_slice(&self.buffer[self.position..self.position + dst.len()]);
        self.position += dst.len();
        Ok(())
    }
}

/// Writer over any [`std::io::Write`] destination.
#[derive(Debug)]
pub struct StreamWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> StreamWriter<W> {
    /// Wraps a stream destination.
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Returns the number of bytes handed to the stream.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.written
    }

    /// Returns a reference to the wrapped stream.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flushes the wrapped stream.
    ///
    /// # Errors
    /// Returns [`CodecError::Io`] if the stream fails to flush.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> WireWriter for StreamWriter<W> {
    fn write_bytes(&mut self, src: &[u8]) -> Result<()> {
        self.inner.write_all(src)?;
        self.written += src.len();
        Ok(())
    }
}

/// Reader over any [`std::io::Read`] source.
///
/// A source that ends early yields [`CodecError::InsufficientData`] carrying
/// the number of bytes it did deliver for the failed read.
#[derive(Debug)]
pub struct StreamReader<R> {
    inner: R,
    read: usize,
}

impl<R: Read> StreamReader<R> {
    /// Wraps a stream source.
    pub fn new(inner: R) -> Self {
        Self { inner, read: 0 }
    }

    /// Returns the number of bytes consumed from the stream.
    #[must_use]
    pub const fn bytes_read(&self) -> usize {
        self.read
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> WireReader for StreamReader<R> {
    fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < dst.len() {
            match self.inner.read(&mut dst[filled..]) {
                Ok(0) => {
                    self.read += filled;
                    return Err(CodecError::insufficient_data(dst.len(), filled));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.read += filled;
                    return Err(e.into());
                }
            }
        }
        self.read += filled;
        Ok(())
    }
}
