use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::result::Result;

/// Iterates the bits of a byte slice, most significant bit of each byte first.
///
/// ```rust
/// use pixveil_core::BitIterator;
///
/// let bits: Vec<bool> = BitIterator::new(&[0b1000_0001]).collect();
/// assert_eq!(bits, [true, false, false, false, false, false, false, true]);
/// ```
pub struct BitIterator<'a> {
    reader: BitReader<&'a [u8], BigEndian>,
    remaining: u64,
}

impl<'a> BitIterator<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: BitReader::endian(bytes, BigEndian),
            remaining: bytes.len() as u64 * 8,
        }
    }
}

impl Iterator for BitIterator<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.reader.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

/// packs bits into bytes, most significant bit first
pub(crate) struct BytePacker {
    writer: BitWriter<Vec<u8>, BigEndian>,
    bits: u64,
}

impl BytePacker {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            writer: BitWriter::endian(Vec::with_capacity(bytes), BigEndian),
            bits: 0,
        }
    }

    pub fn push(&mut self, bit: bool) -> Result<()> {
        self.writer.write_bit(bit)?;
        self.bits += 1;
        Ok(())
    }

    pub fn complete_bytes(&self) -> u64 {
        self.bits / 8
    }

    /// all complete bytes, a trailing partial byte is dropped
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_writer()
    }
}
