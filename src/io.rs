
//! Bit-level input and output over byte streams.
//! Bits are packed most significant bit first.
//! Uses the error handling for this crate.

pub use ::std::io::{Read, Write};
use bit_field::BitField;
use lebe::prelude::*;
use crate::error::{Result, UnitResult, IoResult};


/// Peek a single byte without consuming it.
#[derive(Debug)]
pub struct PeekRead<T> {

    /// Cannot be exposed as it will not contain peeked values anymore.
    inner: T,

    peeked: Option<IoResult<u8>>,
}

impl<T: Read> PeekRead<T> {

    #[inline]
    pub fn new(inner: T) -> Self {
        Self { inner, peeked: None }
    }

    /// Read a single byte and return that without consuming it.
    /// The next `read` call will include that byte.
    #[inline]
    pub fn peek_u8(&mut self) -> &IoResult<u8> {
        let inner = &mut self.inner;
        self.peeked.get_or_insert_with(|| u8::read_from_big_endian(inner))
    }
}

impl<T: Read> Read for PeekRead<T> {
    fn read(&mut self, target_buffer: &mut [u8]) -> IoResult<usize> {
        if target_buffer.is_empty() {
            return Ok(0)
        }

        match self.peeked.take() {
            None => self.inner.read(target_buffer),
            Some(peeked) => {
                target_buffer[0] = peeked?;

                // indexing [1..] is safe because an empty buffer already returned ok
                Ok(1 + self.inner.read(&mut target_buffer[1..])?)
            }
        }
    }
}


/// Appends single bits to a byte stream.
/// The final partial byte is zero padded when the writer is closed.
#[derive(Debug)]
pub struct BitWriter<W> {
    inner: W,

    /// The byte that is currently being filled.
    current: u8,

    /// Number of bits already occupied in `current`.
    filled: usize,

    bit_count: u64,
}

impl<W: Write> BitWriter<W> {

    pub fn new(inner: W) -> Self {
        BitWriter { inner, current: 0, filled: 0, bit_count: 0 }
    }

    /// Total number of bits written so far, excluding padding.
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Append one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> UnitResult {
        self.current.set_bit(7 - self.filled, bit);
        self.filled += 1;
        self.bit_count += 1;

        if self.filled == 8 {
            self.inner.write_as_big_endian(&self.current)?;
            self.current = 0;
            self.filled = 0;
        }

        Ok(())
    }

    /// Append the lowest `count` bits of `value`, most significant first.
    pub fn write_bits(&mut self, value: u32, count: usize) -> UnitResult {
        debug_assert!(count <= 32, "bit count too large");

        for index in (0 .. count).rev() {
            self.write_bit(value.get_bit(index))?;
        }

        Ok(())
    }

    /// Append all eight bits of a symbol.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> UnitResult {
        self.write_bits(u32::from(value), 8)
    }

    /// Append a 32-bit integer, most significant bit first.
    pub fn write_u32(&mut self, value: u32) -> UnitResult {
        if self.filled == 0 {
            self.inner.write_as_big_endian(&value)?;
            self.bit_count += 32;
            Ok(())
        }
        else {
            self.write_bits(value, 32)
        }
    }

    /// Pad the last partial byte with zeroes, flush,
    /// and return the underlying writer.
    pub fn close(mut self) -> Result<W> {
        if self.filled > 0 {
            self.inner.write_as_big_endian(&self.current)?;
        }

        self.inner.flush()?;
        Ok(self.inner)
    }
}


/// Consumes single bits from a byte stream.
/// Reading past the end of the stream returns `Error::Invalid`.
#[derive(Debug)]
pub struct BitReader<R> {
    inner: PeekRead<R>,

    /// The byte that is currently being consumed.
    current: u8,

    /// Number of bits in `current` not yet consumed.
    remaining: usize,

    bits_read: u64,
}

impl<R: Read> BitReader<R> {

    pub fn new(inner: R) -> Self {
        BitReader { inner: PeekRead::new(inner), current: 0, remaining: 0, bits_read: 0 }
    }

    /// Total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Consume one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            self.current = u8::read_from_big_endian(&mut self.inner)?;
            self.remaining = 8;
        }

        self.remaining -= 1;
        self.bits_read += 1;
        Ok(self.current.get_bit(self.remaining))
    }

    /// Consume `count` bits and return them as the lowest bits of an integer.
    pub fn read_bits(&mut self, count: usize) -> Result<u32> {
        debug_assert!(count <= 32, "bit count too large");

        let mut value = 0_u32;
        for _ in 0 .. count {
            value = (value << 1) | u32::from(self.read_bit()?);
        }

        Ok(value)
    }

    /// Consume the eight bits of a symbol.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Consume a 32-bit integer, most significant bit first.
    pub fn read_u32(&mut self) -> Result<u32> {
        if self.remaining == 0 {
            let value = u32::read_from_big_endian(&mut self.inner)?;
            self.bits_read += 32;
            Ok(value)
        }
        else {
            self.read_bits(32)
        }
    }

    /// Discard the unconsumed bits of the current byte,
    /// such that the next read starts at a byte boundary.
    /// Returns the number of discarded bits.
    pub fn skip_padding(&mut self) -> usize {
        let skipped = self.remaining;
        self.remaining = 0;
        skipped
    }

    /// Whether all bits of the underlying stream have been consumed.
    /// Padding bits of the current byte count as unconsumed,
    /// call `skip_padding` first to ignore them.
    pub fn is_exhausted(&mut self) -> bool {
        self.remaining == 0 && self.inner.peek_u8().is_err()
    }

    /// Number of bits left in the current partially consumed byte.
    pub fn pending_bits(&self) -> usize {
        self.remaining
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn peek(){
        let buffer: &[u8] = &[0,1,2,3];
        let mut peek = PeekRead::new(buffer);

        assert_eq!(peek.peek_u8().as_ref().unwrap(), &0);
        assert_eq!(peek.peek_u8().as_ref().unwrap(), &0);
        assert_eq!(u8::read_from_big_endian(&mut peek).unwrap(), 0_u8);

        assert_eq!(peek.read(&mut [0,0]).unwrap(), 2);

        assert_eq!(peek.peek_u8().as_ref().unwrap(), &3);
        assert_eq!(u8::read_from_big_endian(&mut peek).unwrap(), 3_u8);

        assert!(peek.peek_u8().is_err());
        assert!(u8::read_from_big_endian(&mut peek).is_err());
    }

    #[test]
    fn bits_are_packed_msb_first_and_zero_padded(){
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_bit(false).unwrap();
        writer.write_bit(true).unwrap();
        assert_eq!(writer.bit_count(), 3);

        let bytes = writer.close().unwrap();
        assert_eq!(bytes, vec![ 0b1010_0000 ]);
    }

    #[test]
    fn unaligned_integers(){
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bit(true).unwrap();
        writer.write_u8(0xAB).unwrap();
        writer.write_u32(0xDEAD_BEEF).unwrap();
        writer.write_bits(0b101, 3).unwrap();
        assert_eq!(writer.bit_count(), 1 + 8 + 32 + 3);

        let bytes = writer.close().unwrap();
        assert_eq!(bytes.len(), 6);

        let mut reader = BitReader::new(bytes.as_slice());
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_u8().unwrap(), 0xAB);
        assert_eq!(reader.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.bits_read(), 44);
        assert_eq!(reader.pending_bits(), 4);
    }

    #[test]
    fn aligned_integer_is_big_endian(){
        let mut writer = BitWriter::new(Vec::new());
        writer.write_u32(0x0102_0304).unwrap();

        let bytes = writer.close().unwrap();
        assert_eq!(bytes, vec![ 1, 2, 3, 4 ]);

        let mut reader = BitReader::new(bytes.as_slice());
        assert_eq!(reader.read_u32().unwrap(), 0x0102_0304);
        assert!(reader.is_exhausted());
    }

    #[test]
    fn reading_past_the_end(){
        let bytes: &[u8] = &[ 0xFF ];
        let mut reader = BitReader::new(bytes);

        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
        assert!(reader.is_exhausted());
        assert!(matches!(reader.read_bit(), Err(Error::Invalid(_))));
        assert!(matches!(BitReader::new(&[1_u8, 2][..]).read_u32(), Err(Error::Invalid(_))));
    }

    #[test]
    fn padding_is_not_trailing_data(){
        let bytes: &[u8] = &[ 0b1010_0000 ];
        let mut reader = BitReader::new(bytes);

        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert!(!reader.is_exhausted());

        assert_eq!(reader.skip_padding(), 5);
        assert_eq!(reader.skip_padding(), 0);
        assert!(reader.is_exhausted());
        assert_eq!(reader.bits_read(), 3);

        let bytes: &[u8] = &[ 0b1010_0000, 7 ];
        let mut reader = BitReader::new(bytes);
        reader.read_bits(3).unwrap();
        reader.skip_padding();
        assert!(!reader.is_exhausted());
        assert_eq!(reader.read_u8().unwrap(), 7);
    }
}
