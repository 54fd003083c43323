//! # Pixveil Core API
//!
//! Hides arbitrary bytes inside the pixels of PNG and BMP images with one of two [`Engine`]s
//! - [`LsbEngine`] writes one bit into the least significant bit of the samples a [`Key`] selects
//! - [`BpcsEngine`] replaces noise-like 8x8 bit-plane blocks of the red channel
//!
//! Every message is prefixed by its length as 4 little endian bytes, so decoding needs
//! nothing but the image and the engine settings used for hiding.
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message in pixels
//!
//! ```rust
//! use pixveil_core::{decode, encode, Engine, Key, LsbEngine, PixelBuffer};
//!
//! let cover = PixelBuffer::from_fn(16, 16, |x, y| [(x * 16) as u8, (y * 16) as u8, 7, 255]);
//! let engine: Engine = LsbEngine::new(Key::parse("S1T1P2CRG").unwrap()).into();
//!
//! let stego = encode(&cover, b"Hello", &engine).expect("Failed to hide message");
//!
//! assert_eq!(decode(&stego, &engine).unwrap(), b"Hello");
//! ```
//!
//! ## Hide data inside an image file
//!
//! ```rust,no_run
//! pixveil_core::api::hide::prepare()
//!     .with_message("Hello, World!")
//!     .with_image("carrier-image.png")
//!     .using_key("S10T5H2V2P2CRGB")
//!     .with_output("image-with-secret.png")
//!     .execute()
//!     .expect("Failed to hide message in image");
//! ```

#![warn(
    // clippy::unwrap_used,
    // clippy::expect_used,
    clippy::redundant_else,
)]

pub mod bits;
pub use bits::BitIterator;

pub mod api;
pub mod bpcs;
pub mod engine;
pub mod error;
pub mod framing;
pub mod key;
pub mod lsb;
pub mod media;
pub mod result;

pub use crate::api::{decode, encode, EncodeOptions};
pub use crate::bpcs::BpcsEngine;
pub use crate::engine::{Concealer, Engine};
pub use crate::error::{KeyParseError, SteganoError};
pub use crate::key::Key;
pub use crate::lsb::LsbEngine;
pub use crate::media::{Channel, PixelBuffer};
pub use crate::result::Result;

#[cfg(test)]
mod test_utils {
    use std::path::{Path, PathBuf};

    use crate::media::image_io::{self, MIME_PNG};
    use crate::PixelBuffer;

    /// pixel (x, y) holds the samples `i, i + 1, i + 2, i + 3` with `i = 4x + 20y`
    pub fn prepare_5x5_image() -> PixelBuffer {
        PixelBuffer::from_fn(5, 5, |x, y| {
            let i = (4 * x + 20 * y) as u8;
            [i, i + 1, i + 2, i + 3]
        })
    }

    pub fn prepare_black_image(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |_, _| [0, 0, 0, 255])
    }

    /// deterministic noise in all colour channels, alpha stays opaque
    pub fn prepare_noise_image(width: u32, height: u32) -> PixelBuffer {
        let mut state: u32 = 0x9E37_79B9;
        PixelBuffer::from_fn(width, height, move |_, _| {
            let mut next = || {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state >> 24) as u8
            };
            [next(), next(), next(), 255]
        })
    }

    pub fn write_png(dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
        let path = dir.join(name);
        let bytes = image_io::encode(buffer, MIME_PNG).expect("Cannot encode test image");
        std::fs::write(&path, bytes).expect("Cannot write test image");
        path
    }
}
