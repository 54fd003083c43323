pub mod image_io;
mod pixel_buffer;

pub use image_io::ImageType;
pub use pixel_buffer::*;
