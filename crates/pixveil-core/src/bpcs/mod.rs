//! Bit-plane complexity segmentation on the red channel.
//!
//! Every bit plane of the Gray coded red channel is cut into 8x8 tiles. Tiles
//! that already look like noise (complexity above the threshold) are replaced
//! by message bits. A message block that is too regular is conjugated first,
//! so it passes as noise too, and the flag cell tells the decoder to undo that.

mod block;

pub use block::{
    binary_to_gray, gray_to_binary, BitPlaneBlock, BLOCK_SIZE, DATA_BITS_PER_BLOCK,
    MAX_TRANSITIONS,
};

use log::{debug, trace};

use crate::bits::{BitIterator, BytePacker};
use crate::engine::Concealer;
use crate::error::SteganoError;
use crate::media::PixelBuffer;
use crate::result::Result;

pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// A conjugated block keeps a complexity of at least `1 - t - 2/112`, which
/// only stays above `t` while `t` is below this bound.
pub const MAX_THRESHOLD: f64 = 0.49;

/// number of bit planes of an 8 bit sample
pub const PLANES: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpcsEngine {
    threshold: f64,
}

impl Default for BpcsEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// origins of all complete tiles, row-major, partial tiles at the edges are left out
fn tiles(width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    (0..height / BLOCK_SIZE).flat_map(move |ty| {
        (0..width / BLOCK_SIZE).map(move |tx| (tx * BLOCK_SIZE, ty * BLOCK_SIZE))
    })
}

/// every (plane, tile) pair in the order both encoding and decoding walk them
fn plane_tiles(width: u32, height: u32) -> impl Iterator<Item = (u8, u32, u32)> {
    (0..PLANES).flat_map(move |plane| tiles(width, height).map(move |(x, y)| (plane, x, y)))
}

impl BpcsEngine {
    /// Complexity blocks must exceed to carry data, encoder and decoder have
    /// to agree on it. It has to lie inside `(0, MAX_THRESHOLD)`.
    pub fn with_threshold(threshold: f64) -> Result<Self> {
        if !(threshold > 0.0 && threshold < MAX_THRESHOLD) {
            return Err(SteganoError::InvalidParameters(
                "BPCS threshold must lie between 0 and 0.49",
            ));
        }

        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    fn is_informative(&self, block: &BitPlaneBlock) -> bool {
        block.complexity() > self.threshold
    }

    /// number of bits all informative blocks of `buffer` can carry
    pub fn capacity(&self, buffer: &PixelBuffer) -> u64 {
        let (width, height) = buffer.dimensions();
        let blocks = plane_tiles(width, height)
            .filter(|(plane, x, y)| {
                self.is_informative(&BitPlaneBlock::extract(buffer, *x, *y, *plane))
            })
            .count() as u64;

        blocks * DATA_BITS_PER_BLOCK as u64
    }

    /// hides `data` in a copy of `cover`, stops at the first tile after the last bit
    pub fn encode(&self, cover: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        let needed = data.len() as u64 * 8;
        let available = self.capacity(cover);
        debug!("BPCS encode of {needed} bits into {available} available bits");
        if needed > available {
            return Err(SteganoError::CapacityExceeded { needed, available });
        }

        let mut stego = cover.clone();
        let (width, height) = stego.dimensions();
        let mut bits = BitIterator::new(data).peekable();

        for (plane, x, y) in plane_tiles(width, height) {
            if bits.peek().is_none() {
                break;
            }
            if !self.is_informative(&BitPlaneBlock::extract(&stego, x, y, plane)) {
                continue;
            }

            let mut block = BitPlaneBlock::from_data_bits(&mut bits);
            if self.is_informative(&block) {
                block.set_conjugated(false);
            } else {
                block.conjugate();
                block.set_conjugated(true);
            }
            trace!(
                "plane {plane} tile ({x}, {y}) carries data, conjugated: {}",
                block.is_conjugated()
            );
            block.write_into(&mut stego, x, y, plane);
        }

        Ok(stego)
    }

    /// reads `byte_count` bytes out of the informative blocks
    pub fn decode(&self, stego: &PixelBuffer, byte_count: usize) -> Result<Vec<u8>> {
        let needed = byte_count as u64 * 8;
        let available = self.capacity(stego);
        if needed > available {
            debug!("BPCS decode of {needed} bits exceeds {available} available bits");
            return Err(SteganoError::NoSecretData);
        }

        let mut packer = BytePacker::with_capacity(byte_count);
        let mut remaining = needed;
        let (width, height) = stego.dimensions();

        for (plane, x, y) in plane_tiles(width, height) {
            if remaining == 0 {
                break;
            }
            let mut block = BitPlaneBlock::extract(stego, x, y, plane);
            if !self.is_informative(&block) {
                continue;
            }
            if block.is_conjugated() {
                block.conjugate();
            }
            for bit in block.data_bits().take(remaining.min(DATA_BITS_PER_BLOCK as u64) as usize) {
                packer.push(bit)?;
                remaining -= 1;
            }
        }

        if packer.complete_bytes() < byte_count as u64 {
            return Err(SteganoError::NoSecretData);
        }

        Ok(packer.into_bytes())
    }
}

impl Concealer for BpcsEngine {
    fn capacity(&self, carrier: &PixelBuffer) -> u64 {
        BpcsEngine::capacity(self, carrier)
    }

    fn conceal(&self, cover: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        self.encode(cover, data)
    }

    fn unveil(&self, stego: &PixelBuffer, byte_count: usize) -> Result<Vec<u8>> {
        self.decode(stego, byte_count)
    }
}
