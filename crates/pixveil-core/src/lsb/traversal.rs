//! The one and only walk over an image that a key describes.
//!
//! Encoding, decoding and capacity all iterate [`Slots`], so they can never
//! disagree on which channel carries which bit.

use crate::key::Key;
use crate::media::Channel;

/// the part of the image a key addresses, clamped to the image size
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Region {
    pub start_x: u64,
    pub start_y: u64,
    pub end_x: u64,
    pub end_y: u64,
    pub width: u64,
}

impl Region {
    pub fn clamp(key: &Key, width: u32, height: u32) -> Self {
        let clamp_end = |end: u32, extent: u32| {
            if end == 0 || end > extent {
                extent
            } else {
                end
            }
        };

        Self {
            start_x: key.start_x as u64,
            start_y: key.start_y as u64,
            end_x: clamp_end(key.end_x, width) as u64,
            end_y: clamp_end(key.end_y, height) as u64,
            width: width as u64,
        }
    }
}

/// Visits pixel positions like a text selection: the first row from `start_x`,
/// all following rows from the left edge, full width except the last row that
/// ends at `end_x`.
#[derive(Debug, Clone)]
pub(crate) struct PixelWalk {
    region: Region,
    step_x: u64,
    step_y: u64,
    x: u64,
    y: u64,
    row_end: u64,
}

impl PixelWalk {
    pub fn new(region: Region, gap_x: u32, gap_y: u32) -> Self {
        let mut walk = Self {
            region,
            step_x: 1 + gap_x as u64,
            step_y: 1 + gap_y as u64,
            x: region.start_x,
            y: region.start_y,
            row_end: 0,
        };
        walk.row_end = walk.row_end_of(walk.y);
        walk
    }

    fn row_end_of(&self, y: u64) -> u64 {
        if y + self.step_y >= self.region.end_y {
            self.region.end_x
        } else {
            self.region.width
        }
    }
}

impl Iterator for PixelWalk {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.y >= self.region.end_y {
                return None;
            }
            if self.x < self.row_end {
                let pos = (self.x as u32, self.y as u32);
                self.x += self.step_x;
                return Some(pos);
            }
            self.y += self.step_y;
            self.x = 0;
            self.row_end = self.row_end_of(self.y);
        }
    }
}

/// one bit carrying channel of one visited pixel
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Slot {
    pub x: u32,
    pub y: u32,
    pub channel: Channel,
}

/// Expands every visited pixel into up to `channels_per_pixel` slots, the
/// channel cursor keeps cycling through the key's channels across pixels.
///
/// A pixel advances the cursor `channels_per_pixel` times, but a channel that
/// already carries a bit of this pixel yields no second slot.
pub(crate) struct Slots<'k> {
    walk: PixelWalk,
    channels: &'k [Channel],
    distinct: usize,
    per_pixel: u64,
    cursor: usize,
    pixel: Option<(u32, u32)>,
    advanced: u64,
    used: [bool; 3],
    used_count: usize,
}

impl<'k> Slots<'k> {
    pub fn new(key: &'k Key, width: u32, height: u32) -> Self {
        let distinct = Channel::ALL
            .into_iter()
            .filter(|c| key.channels.contains(c))
            .count();

        Self {
            walk: PixelWalk::new(Region::clamp(key, width, height), key.gap_x, key.gap_y),
            channels: &key.channels,
            distinct,
            per_pixel: key.channels_per_pixel as u64,
            cursor: 0,
            pixel: None,
            advanced: 0,
            used: [false; 3],
            used_count: 0,
        }
    }

    fn advance_cursor(&mut self, steps: u64) {
        let len = self.channels.len() as u64;
        self.cursor = ((self.cursor as u64 + steps % len) % len) as usize;
        self.advanced += steps;
    }

    fn next_pixel(&mut self) -> Option<(u32, u32)> {
        // the cursor moves by the full per pixel count, used channels or not
        if self.pixel.is_some() {
            self.advance_cursor(self.per_pixel - self.advanced);
        }
        self.pixel = Some(self.walk.next()?);
        self.advanced = 0;
        self.used = [false; 3];
        self.used_count = 0;
        self.pixel
    }
}

impl Iterator for Slots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.channels.is_empty() || self.per_pixel == 0 {
            return None;
        }
        loop {
            if self.pixel.is_none()
                || self.advanced == self.per_pixel
                || self.used_count == self.distinct
            {
                self.next_pixel()?;
            }
            let (x, y) = self.pixel?;
            let channel = self.channels[self.cursor];
            self.advance_cursor(1);

            if self.used[channel.index()] {
                continue;
            }
            self.used[channel.index()] = true;
            self.used_count += 1;

            return Some(Slot { x, y, channel });
        }
    }
}

/// number of bits a key can carry within an image of the given size
pub(crate) fn capacity(key: &Key, width: u32, height: u32) -> u64 {
    Slots::new(key, width, height).count() as u64
}
