//! Length framing shared by all engines.
//!
//! ```text
//! [4 bytes] payload length (little-endian u32)
//! [N bytes] payload
//! ```
//!
//! Unveiling is done in two phases: the header is read first to learn the
//! payload length, then header and payload are read in one go.

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::error::SteganoError;
use crate::result::Result;

pub const HEADER_LEN: usize = 4;

/// prepends the length header to `message`
pub fn frame(message: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(message.len()).map_err(|_| SteganoError::MessageTooLong(message.len()))?;

    let mut framed = Vec::with_capacity(HEADER_LEN + message.len());
    framed.write_u32::<LittleEndian>(len)?;
    framed.extend_from_slice(message);

    Ok(framed)
}

/// payload length announced by a header
pub fn payload_len(header: &[u8]) -> Result<usize> {
    if header.len() < HEADER_LEN {
        return Err(SteganoError::NoSecretData);
    }

    Ok(LittleEndian::read_u32(&header[..HEADER_LEN]) as usize)
}

/// total number of bytes to unveil for a payload of `payload_len` bytes
pub fn framed_len(payload_len: usize) -> Result<usize> {
    payload_len
        .checked_add(HEADER_LEN)
        .ok_or(SteganoError::NoSecretData)
}

pub fn strip_header(mut framed: Vec<u8>) -> Vec<u8> {
    framed.drain(..HEADER_LEN.min(framed.len()));
    framed
}
