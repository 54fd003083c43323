use image::{ImageBuffer, Rgba, RgbaImage};

/// a color channel that can carry hidden bits, alpha never does
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// position of the channel inside an RGBA pixel
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    /// letter used for this channel inside a key string
    pub fn letter(self) -> char {
        match self {
            Channel::Red => 'R',
            Channel::Green => 'G',
            Channel::Blue => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'R' => Some(Channel::Red),
            'G' => Some(Channel::Green),
            'B' => Some(Channel::Blue),
            _ => None,
        }
    }
}

/// Owned RGBA pixels of a carrier, row-major, backed by `RgbaImage` of the `image` crate.
///
/// Engines only ever read from a cover buffer, an encoding works on a clone and
/// hands that clone back to the caller.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// a fully transparent black buffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: ImageBuffer::new(width, height),
        }
    }

    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 4],
    {
        Self {
            image: ImageBuffer::from_fn(width, height, |x, y| Rgba(f(x, y))),
        }
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// RGBA samples of the pixel at (x, y)
    ///
    /// # Panics
    /// if (x, y) lies outside of the buffer
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [u8; 4] {
        &mut self.image.get_pixel_mut(x, y).0
    }

    pub fn sample(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.pixel(x, y)[channel.index()]
    }

    pub fn sample_mut(&mut self, x: u32, y: u32, channel: Channel) -> &mut u8 {
        &mut self.pixel_mut(x, y)[channel.index()]
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::from_rgba(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_5x5_image;

    #[test]
    fn should_address_pixels_row_major() {
        let buffer = prepare_5x5_image();

        assert_eq!(buffer.pixel(0, 0), [0, 1, 2, 3]);
        assert_eq!(buffer.pixel(1, 0), [4, 5, 6, 7]);
        assert_eq!(buffer.pixel(0, 1), [20, 21, 22, 23]);
        assert_eq!(buffer.sample(1, 1, Channel::Blue), 26);
    }

    #[test]
    fn should_only_mutate_the_addressed_sample() {
        let original = prepare_5x5_image();
        let mut buffer = original.clone();

        *buffer.sample_mut(2, 3, Channel::Green) = 0xff;

        assert_eq!(buffer.sample(2, 3, Channel::Green), 0xff);
        assert_eq!(buffer.sample(2, 3, Channel::Red), original.sample(2, 3, Channel::Red));
        assert_ne!(buffer, original, "clone must not share pixels");
    }

    #[test]
    fn channel_letters_should_map_both_ways() {
        for channel in Channel::ALL {
            assert_eq!(Channel::from_letter(channel.letter()), Some(channel));
        }
        assert_eq!(Channel::from_letter('A'), None);
        assert_eq!(Channel::from_letter('r'), None);
    }
}
