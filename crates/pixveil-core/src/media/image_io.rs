//! Boundary to the container codecs of the `image` crate.
//!
//! Images come in as bytes plus a mime type and leave as bytes of the
//! resolved output type. JPEG is accepted as input but never produced,
//! its lossy compression would wipe out the hidden bits.

use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use log::{error, warn};

use crate::error::SteganoError;
use crate::media::PixelBuffer;
use crate::result::Result;

pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_BMP: &str = "image/bmp";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImageType {
    Png,
    Jpeg,
    Bmp,
}

impl ImageType {
    /// strict lookup, used for decoding input images
    pub fn from_mime(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            MIME_PNG => Ok(Self::Png),
            MIME_JPEG | "image/jpg" => Ok(Self::Jpeg),
            MIME_BMP => Ok(Self::Bmp),
            _ => Err(SteganoError::UnsupportedFormat(mime.to_string())),
        }
    }

    /// container type announced by the magic bytes of `bytes`
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match image::guess_format(bytes).ok()? {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Type of an image file. The content decides, the extension is only
    /// consulted when the magic bytes are unknown.
    pub fn detect(bytes: &[u8], path: &Path) -> Result<Self> {
        match Self::sniff(bytes) {
            Some(image_type) => Ok(image_type),
            None => Self::from_path(path),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| SteganoError::UnsupportedFormat(path.display().to_string()))?;

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            _ => Err(SteganoError::UnsupportedFormat(ext)),
        }
    }

    /// Lossless type a stego image of the requested type is written as.
    /// Anything that is not BMP ends up as PNG.
    pub fn output_for(mime: &str) -> Self {
        match Self::from_mime(mime) {
            Ok(Self::Bmp) => Self::Bmp,
            Ok(Self::Png) => Self::Png,
            Ok(Self::Jpeg) => {
                warn!("JPEG output would destroy hidden data, writing PNG instead");
                Self::Png
            }
            Err(_) => Self::Png,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => MIME_PNG,
            Self::Jpeg => MIME_JPEG,
            Self::Bmp => MIME_BMP,
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// decodes image bytes of the given mime type into RGBA pixels
pub fn decode(bytes: &[u8], mime: &str) -> Result<PixelBuffer> {
    let image_type = ImageType::from_mime(mime)?;
    decode_as(bytes, image_type)
}

pub fn decode_as(bytes: &[u8], image_type: ImageType) -> Result<PixelBuffer> {
    let image = image::load_from_memory_with_format(bytes, image_type.format()).map_err(|e| {
        error!("Error decoding {} image: {e}", image_type.mime());
        SteganoError::InvalidImageMedia
    })?;

    Ok(PixelBuffer::from_rgba(image.to_rgba8()))
}

/// encodes pixels into the lossless output type resolved for `mime`
pub fn encode(buffer: &PixelBuffer, mime: &str) -> Result<Vec<u8>> {
    encode_as(buffer, ImageType::output_for(mime))
}

pub fn encode_as(buffer: &PixelBuffer, image_type: ImageType) -> Result<Vec<u8>> {
    let image_type = match image_type {
        ImageType::Jpeg => ImageType::Png,
        other => other,
    };
    let mut out = Cursor::new(Vec::new());
    buffer
        .as_rgba()
        .write_to(&mut out, image_type.format())
        .map_err(|e| {
            error!("Error encoding {} image: {e}", image_type.mime());
            SteganoError::ImageEncodingError
        })?;

    Ok(out.into_inner())
}
