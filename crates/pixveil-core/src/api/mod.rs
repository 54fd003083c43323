//! Entry points combining framing, an engine and the image codecs.
//!
//! [`encode`] and [`decode`] work on pixel buffers. The `*_lsb` / `*_bpcs`
//! functions take and return encoded image bytes, as a host application
//! would hand them over. [`hide`] and [`unveil`] do the same for files.

pub mod hide;
pub mod unveil;

use log::debug;

use crate::bpcs::BpcsEngine;
use crate::engine::{Concealer, Engine};
use crate::error::SteganoError;
use crate::framing;
use crate::key::Key;
use crate::lsb::LsbEngine;
use crate::media::{image_io, PixelBuffer};
use crate::result::Result;

/// per call encoding options
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct EncodeOptions {
    /// paints the LSB carrier pixels, see [`LsbEngine::with_visual_debug`]
    pub visual_debug: bool,
}

impl EncodeOptions {
    pub fn with_visual_debug(mut self, visual_debug: bool) -> Self {
        self.visual_debug = visual_debug;
        self
    }
}

/// frames `message` and hides it in a copy of `cover`
pub fn encode(cover: &PixelBuffer, message: &[u8], engine: &Engine) -> Result<PixelBuffer> {
    let framed = framing::frame(message)?;
    debug!(
        "{} encode of {} framed bytes into {}x{} pixels",
        engine.name(),
        framed.len(),
        cover.width(),
        cover.height()
    );

    engine.conceal(cover, &framed)
}

/// reads the length header first, then the framed message, and returns the payload
pub fn decode(stego: &PixelBuffer, engine: &Engine) -> Result<Vec<u8>> {
    let header = engine.unveil(stego, framing::HEADER_LEN)?;
    let payload_len = framing::payload_len(&header)?;
    debug!("{} decode found a payload of {payload_len} bytes", engine.name());

    let framed = engine.unveil(stego, framing::framed_len(payload_len)?)?;

    Ok(framing::strip_header(framed))
}

pub fn parse_key(key: &str) -> Result<Key> {
    Ok(Key::parse(key)?)
}

fn require_image_type(image_type: &str) -> Result<()> {
    if image_type.trim().is_empty() {
        return Err(SteganoError::InvalidParameters("image type must not be empty"));
    }
    Ok(())
}

/// checks `image_type` once the engine is built, key errors come first
fn encode_bytes(image: &[u8], image_type: &str, message: &[u8], engine: &Engine) -> Result<Vec<u8>> {
    require_image_type(image_type)?;
    let cover = image_io::decode(image, image_type)?;
    let stego = encode(&cover, message, engine)?;

    image_io::encode(&stego, image_type)
}

fn decode_bytes(image: &[u8], image_type: &str, engine: &Engine) -> Result<Vec<u8>> {
    require_image_type(image_type)?;
    let stego = image_io::decode(image, image_type)?;

    decode(&stego, engine)
}

/// Hides `message` along the traversal of `key`, returns the encoded stego image.
///
/// The image is written as `image_type`, except JPEG which becomes PNG.
pub fn encode_lsb(
    image: &[u8],
    image_type: &str,
    message: &[u8],
    key: &str,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    let engine = LsbEngine::new(parse_key(key)?)
        .with_visual_debug(options.visual_debug)
        .into();

    encode_bytes(image, image_type, message, &engine)
}

pub fn decode_lsb(image: &[u8], image_type: &str, key: &str) -> Result<Vec<u8>> {
    let engine = LsbEngine::new(parse_key(key)?).into();

    decode_bytes(image, image_type, &engine)
}

pub fn encode_bpcs(image: &[u8], image_type: &str, message: &[u8]) -> Result<Vec<u8>> {
    encode_bytes(image, image_type, message, &BpcsEngine::default().into())
}

pub fn decode_bpcs(image: &[u8], image_type: &str) -> Result<Vec<u8>> {
    decode_bytes(image, image_type, &BpcsEngine::default().into())
}
