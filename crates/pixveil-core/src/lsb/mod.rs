//! Keyed least significant bit concealment.
//!
//! The key decides which pixels are visited, how many channels of each pixel
//! carry a bit and in which channel order. Bits are taken most significant
//! first from every byte.

mod traversal;

use log::debug;

use crate::bits::{BitIterator, BytePacker};
use crate::engine::Concealer;
use crate::error::SteganoError;
use crate::key::Key;
use crate::media::{Channel, PixelBuffer};
use crate::result::Result;

use traversal::{Slot, Slots};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LsbEngine {
    key: Key,
    /// Makes the touched pixels visible: carrier channels become 0 or 255,
    /// unused channels become 0. The hidden bits survive, the image does not.
    visual_debug: bool,
}

impl LsbEngine {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            visual_debug: false,
        }
    }

    pub fn with_visual_debug(mut self, visual_debug: bool) -> Self {
        self.visual_debug = visual_debug;
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn visual_debug(&self) -> bool {
        self.visual_debug
    }

    /// number of bits this engine can hide in an image of `buffer`'s size
    pub fn capacity(&self, buffer: &PixelBuffer) -> u64 {
        traversal::capacity(&self.key, buffer.width(), buffer.height())
    }

    /// hides `data` in a copy of `cover`, the cover itself stays untouched
    pub fn encode(&self, cover: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        let needed = data.len() as u64 * 8;
        let available = self.capacity(cover);
        debug!("LSB encode of {needed} bits into {available} available bits, key {}", self.key);
        if needed > available {
            return Err(SteganoError::CapacityExceeded { needed, available });
        }

        let mut stego = cover.clone();
        let (width, height) = stego.dimensions();
        for (slot, bit) in Slots::new(&self.key, width, height).zip(BitIterator::new(data)) {
            let sample = stego.sample_mut(slot.x, slot.y, slot.channel);
            if (*sample & 1 == 1) != bit {
                *sample ^= 1;
            }
            if self.visual_debug {
                self.highlight(&mut stego, slot, bit);
            }
        }

        Ok(stego)
    }

    /// reads `byte_count` bytes along the key's traversal
    pub fn decode(&self, stego: &PixelBuffer, byte_count: usize) -> Result<Vec<u8>> {
        let needed = byte_count as u64 * 8;
        let available = self.capacity(stego);
        if needed > available {
            debug!("LSB decode of {needed} bits exceeds {available} available bits");
            return Err(SteganoError::NoSecretData);
        }

        let mut packer = BytePacker::with_capacity(byte_count);
        let (width, height) = stego.dimensions();
        for slot in Slots::new(&self.key, width, height).take(byte_count * 8) {
            packer.push(stego.sample(slot.x, slot.y, slot.channel) & 1 == 1)?;
        }

        if packer.complete_bytes() < byte_count as u64 {
            return Err(SteganoError::NoSecretData);
        }

        Ok(packer.into_bytes())
    }

    fn highlight(&self, stego: &mut PixelBuffer, slot: Slot, bit: bool) {
        let pixel = stego.pixel_mut(slot.x, slot.y);
        for channel in Channel::ALL {
            let unused = if self.key.channels_per_pixel == 1 {
                channel != slot.channel
            } else {
                !self.key.channels.contains(&channel)
            };
            if unused {
                pixel[channel.index()] = 0;
            }
        }
        pixel[slot.channel.index()] = if bit { u8::MAX } else { 0 };
    }
}

impl Concealer for LsbEngine {
    fn capacity(&self, carrier: &PixelBuffer) -> u64 {
        LsbEngine::capacity(self, carrier)
    }

    fn conceal(&self, cover: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer> {
        self.encode(cover, data)
    }

    fn unveil(&self, stego: &PixelBuffer, byte_count: usize) -> Result<Vec<u8>> {
        self.decode(stego, byte_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_5x5_image, prepare_black_image, prepare_noise_image};

    fn engine(key: &str) -> LsbEngine {
        LsbEngine::new(Key::parse(key).expect("Cannot parse key"))
    }

    #[test]
    fn should_encode_and_decode_with_a_full_key() {
        let cover = prepare_black_image(10, 10);
        let lsb = engine("S0T0E10N10H0V0P1CR");

        let stego = lsb.encode(&cover, b"Hi").expect("Cannot encode");
        let decoded = lsb.decode(&stego, 2).expect("Cannot decode");

        assert_eq!(decoded, b"Hi");
    }

    #[test]
    fn should_write_bits_msb_first_into_the_red_channel() {
        let cover = prepare_black_image(8, 1);
        let stego = engine("CR").encode(&cover, &[0b1010_0001]).unwrap();

        let reds: Vec<u8> = (0..8).map(|x| stego.sample(x, 0, Channel::Red)).collect();
        assert_eq!(reds, [1, 0, 1, 0, 0, 0, 0, 1]);
        for x in 0..8 {
            assert_eq!(stego.sample(x, 0, Channel::Green), 0);
            assert_eq!(stego.sample(x, 0, Channel::Blue), 0);
        }
    }

    #[test]
    fn should_only_flip_differing_bits() {
        let cover = prepare_5x5_image();
        let stego = engine("P3CRGB").encode(&cover, b"ok").unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let (before, after) = (cover.pixel(x, y), stego.pixel(x, y));
                for c in 0..4 {
                    assert!(
                        before[c] ^ after[c] <= 1,
                        "pixel ({x}, {y}) changed more than the lowest bit"
                    );
                }
                assert_eq!(before[3], after[3], "alpha must never change");
            }
        }
    }

    #[test]
    fn should_roundtrip_with_gaps_offsets_and_channel_cycling() {
        let cover = prepare_noise_image(64, 48);
        let message = b"The quick brown fox jumps over the lazy dog";

        for key in ["S3T2E60N40H1V2P2CRGB", "H4V0P1CBGR", "S63T0P1CGGB", "P2CRGB"] {
            let lsb = engine(key);
            let stego = lsb.encode(&cover, message).expect("Cannot encode");
            assert_eq!(
                lsb.decode(&stego, message.len()).expect("Cannot decode"),
                message,
                "roundtrip failed for key {key}"
            );
        }
    }

    #[test]
    fn should_roundtrip_when_a_pixel_would_repeat_a_channel() {
        let cover = prepare_black_image(10, 10);

        for key in ["P2CR", "P3CRG", "P2CRR", "P7CRGB"] {
            let lsb = engine(key);
            let stego = lsb.encode(&cover, b"Hi").expect("Cannot encode");
            assert_eq!(
                lsb.decode(&stego, 2).expect("Cannot decode"),
                b"Hi",
                "roundtrip failed for key {key}"
            );
        }
        assert_eq!(engine("P2CR").capacity(&cover), 100);
    }

    #[test]
    fn should_fail_on_capacity_without_touching_the_cover() {
        let cover = prepare_noise_image(4, 4);
        let snapshot = cover.clone();
        let lsb = engine("P1CR");

        let result = lsb.encode(&cover, b"Hello World");

        assert!(matches!(
            result,
            Err(SteganoError::CapacityExceeded {
                needed: 88,
                available: 16
            })
        ));
        assert_eq!(cover, snapshot);
    }

    #[test]
    fn should_refuse_to_read_beyond_capacity() {
        let lsb = engine("P1CR");

        assert!(matches!(
            lsb.decode(&prepare_black_image(4, 4), 3),
            Err(SteganoError::NoSecretData)
        ));
    }

    #[test]
    fn visual_debug_should_keep_the_hidden_bits() {
        let cover = prepare_noise_image(32, 32);
        let message = b"visible";

        for key in ["P1CRGB", "H1P2CRG"] {
            let lsb = engine(key).with_visual_debug(true);
            let stego = lsb.encode(&cover, message).unwrap();

            assert_eq!(lsb.decode(&stego, message.len()).unwrap(), message);
        }
    }

    #[test]
    fn visual_debug_should_paint_carriers_and_blank_the_rest() {
        let cover = PixelBuffer::from_fn(8, 1, |_, _| [100, 100, 100, 255]);
        let stego = engine("P1CG")
            .with_visual_debug(true)
            .encode(&cover, &[0b1000_0000])
            .unwrap();

        assert_eq!(stego.pixel(0, 0), [0, 255, 0, 255]);
        assert_eq!(stego.pixel(1, 0), [0, 0, 0, 255]);

        let stego = engine("P2CRG")
            .with_visual_debug(true)
            .encode(&cover, &[0b1000_0000])
            .unwrap();
        assert_eq!(stego.pixel(0, 0), [255, 0, 0, 255]);
    }
}
