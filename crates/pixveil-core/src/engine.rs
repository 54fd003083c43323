use enum_dispatch::enum_dispatch;

use crate::bpcs::BpcsEngine;
use crate::key::Key;
use crate::lsb::LsbEngine;
use crate::media::PixelBuffer;
use crate::result::Result;

/// generic concealment algorithm, hides raw bytes in and unveils raw bytes from pixels
#[enum_dispatch]
pub trait Concealer {
    /// bits that fit into `carrier`
    fn capacity(&self, carrier: &PixelBuffer) -> u64;

    /// returns a new buffer holding `data`, `cover` is never modified
    fn conceal(&self, cover: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer>;

    /// reads exactly `byte_count` bytes
    fn unveil(&self, stego: &PixelBuffer, byte_count: usize) -> Result<Vec<u8>>;
}

/// the available concealment algorithms
#[enum_dispatch(Concealer)]
#[derive(Debug, Clone, PartialEq)]
pub enum Engine {
    Lsb(LsbEngine),
    Bpcs(BpcsEngine),
}

impl Engine {
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Lsb(_) => "LSB",
            Engine::Bpcs(_) => "BPCS",
        }
    }
}

impl Default for Engine {
    /// LSB over every pixel's red channel
    fn default() -> Self {
        Engine::Lsb(LsbEngine::new(Key::default()))
    }
}
