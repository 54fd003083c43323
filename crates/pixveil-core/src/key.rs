//! Compact key strings that parameterize the LSB traversal.
//!
//! A key is a sequence of single letter tags, each followed by its value:
//!
//! | tag | field                | value                         |
//! |-----|----------------------|-------------------------------|
//! | `S` | `start_x`            | integer                       |
//! | `T` | `start_y`            | integer                       |
//! | `E` | `end_x`              | integer, `0` means image width  |
//! | `N` | `end_y`              | integer, `0` means image height |
//! | `H` | `gap_x`              | integer                       |
//! | `V` | `gap_y`              | integer                       |
//! | `P` | `channels_per_pixel` | integer, at least `1`         |
//! | `C` | `channels`           | letters out of `R`, `G`, `B`  |
//!
//! ```rust
//! use pixveil_core::key::Key;
//! use pixveil_core::Channel;
//!
//! let key: Key = "S0T0E10N10H1V1P2CRG".parse().expect("valid key");
//! assert_eq!(key.gap_x, 1);
//! assert_eq!(key.channels, vec![Channel::Red, Channel::Green]);
//! assert_eq!(key.to_string(), "S0T0E10N10H1V1P2CRG");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::media::Channel;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum KeyParseError {
    #[error("key does not contain any field tag")]
    NoFieldTag,

    #[error("tag `{0}` has no value")]
    EmptyValue(char),

    #[error("tag `{tag}` expects a non-negative integer, got `{value}`")]
    InvalidNumber { tag: char, value: String },

    #[error("unknown channel `{0}`, expected one of R, G, B")]
    UnknownChannel(char),

    #[error("channels per pixel must be at least 1")]
    ZeroChannelsPerPixel,

    #[error("key does not name any channel")]
    MissingChannels,
}

/// LSB traversal parameters, immutable once parsed
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Key {
    pub start_x: u32,
    pub start_y: u32,
    pub end_x: u32,
    pub end_y: u32,
    pub gap_x: u32,
    pub gap_y: u32,
    pub channels_per_pixel: u32,
    /// Cycled across pixels. A channel carries at most one bit per pixel,
    /// the cursor still moves on when a repeated channel comes up.
    pub channels: Vec<Channel>,
}

impl Default for Key {
    /// the whole image, every pixel, one red bit each
    fn default() -> Self {
        Self {
            start_x: 0,
            start_y: 0,
            end_x: 0,
            end_y: 0,
            gap_x: 0,
            gap_y: 0,
            channels_per_pixel: 1,
            channels: vec![Channel::Red],
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Field {
    StartX,
    StartY,
    EndX,
    EndY,
    GapX,
    GapY,
    ChannelsPerPixel,
    Channels,
}

impl Field {
    fn from_tag(c: char) -> Option<Self> {
        match c {
            'S' => Some(Self::StartX),
            'T' => Some(Self::StartY),
            'E' => Some(Self::EndX),
            'N' => Some(Self::EndY),
            'H' => Some(Self::GapX),
            'V' => Some(Self::GapY),
            'P' => Some(Self::ChannelsPerPixel),
            'C' => Some(Self::Channels),
            _ => None,
        }
    }

    fn tag(self) -> char {
        match self {
            Self::StartX => 'S',
            Self::StartY => 'T',
            Self::EndX => 'E',
            Self::EndY => 'N',
            Self::GapX => 'H',
            Self::GapY => 'V',
            Self::ChannelsPerPixel => 'P',
            Self::Channels => 'C',
        }
    }
}

/// collects flushed tokens, validated into a `Key` once the input ends
struct KeyBuilder {
    key: Key,
    channels: Vec<Channel>,
}

impl KeyBuilder {
    fn new() -> Self {
        Self {
            key: Key::default(),
            channels: Vec::new(),
        }
    }

    fn flush(&mut self, field: Field, token: &str) -> Result<(), KeyParseError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(KeyParseError::EmptyValue(field.tag()));
        }

        if field == Field::Channels {
            for c in token.chars() {
                let channel = Channel::from_letter(c).ok_or(KeyParseError::UnknownChannel(c))?;
                self.channels.push(channel);
            }
            return Ok(());
        }

        let value: u32 = token.parse().map_err(|_| KeyParseError::InvalidNumber {
            tag: field.tag(),
            value: token.to_string(),
        })?;

        match field {
            Field::StartX => self.key.start_x = value,
            Field::StartY => self.key.start_y = value,
            Field::EndX => self.key.end_x = value,
            Field::EndY => self.key.end_y = value,
            Field::GapX => self.key.gap_x = value,
            Field::GapY => self.key.gap_y = value,
            Field::ChannelsPerPixel => {
                if value == 0 {
                    return Err(KeyParseError::ZeroChannelsPerPixel);
                }
                self.key.channels_per_pixel = value
            }
            Field::Channels => unreachable!("channels are flushed above"),
        }

        Ok(())
    }

    fn build(mut self) -> Result<Key, KeyParseError> {
        if self.channels.is_empty() {
            return Err(KeyParseError::MissingChannels);
        }
        self.key.channels = self.channels;

        Ok(self.key)
    }
}

impl Key {
    /// Parses a key string.
    ///
    /// Every tag flushes the text collected since the previous tag into the
    /// previous field. Text in front of the first tag has no field and is dropped.
    pub fn parse(input: &str) -> Result<Self, KeyParseError> {
        let mut builder = KeyBuilder::new();
        let mut active: Option<Field> = None;
        let mut buffer = String::new();

        for c in input.chars() {
            match Field::from_tag(c) {
                Some(field) => {
                    if let Some(previous) = active {
                        builder.flush(previous, &buffer)?;
                    }
                    active = Some(field);
                    buffer.clear();
                }
                None => buffer.push(c),
            }
        }

        match active {
            Some(field) => builder.flush(field, &buffer)?,
            None => return Err(KeyParseError::NoFieldTag),
        }

        builder.build()
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    /// canonical key string, parses back into an equal key
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{}T{}E{}N{}H{}V{}P{}C",
            self.start_x,
            self.start_y,
            self.end_x,
            self.end_y,
            self.gap_x,
            self.gap_y,
            self.channels_per_pixel
        )?;
        for channel in &self.channels {
            write!(f, "{}", channel.letter())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Channel::*;

    #[test]
    fn should_parse_all_fields() {
        let key = Key::parse("S0T0E10N10H1V1P2CRG").expect("Cannot parse key");

        assert_eq!(
            key,
            Key {
                start_x: 0,
                start_y: 0,
                end_x: 10,
                end_y: 10,
                gap_x: 1,
                gap_y: 1,
                channels_per_pixel: 2,
                channels: vec![Red, Green],
            }
        );
    }

    #[test]
    fn should_default_missing_fields() {
        let key = Key::parse("P1CR").expect("Cannot parse key");

        assert_eq!(key, Key::default());
    }

    #[test]
    fn should_append_channels_of_repeated_channel_tags() {
        let key = Key::parse("CRCGCBR").expect("Cannot parse key");

        assert_eq!(key.channels, vec![Red, Green, Blue, Red]);
    }

    #[test]
    fn should_let_the_last_numeric_value_win() {
        let key = Key::parse("S1S7CB").expect("Cannot parse key");

        assert_eq!(key.start_x, 7);
    }

    #[test]
    fn should_discard_text_before_the_first_tag() {
        let key = Key::parse("12xyS3CR").expect("Cannot parse key");

        assert_eq!(key.start_x, 3);
    }

    #[test]
    fn should_tolerate_blanks_around_values() {
        let key = Key::parse("S 4 T5 CR").expect("Cannot parse key");

        assert_eq!((key.start_x, key.start_y), (4, 5));
    }

    #[test]
    fn should_fail_without_any_tag() {
        assert_eq!(Key::parse(""), Err(KeyParseError::NoFieldTag));
        assert_eq!(Key::parse("123rgb"), Err(KeyParseError::NoFieldTag));
    }

    #[test]
    fn should_fail_on_empty_values() {
        assert_eq!(Key::parse("SE10CR"), Err(KeyParseError::EmptyValue('S')));
        assert_eq!(Key::parse("S1C"), Err(KeyParseError::EmptyValue('C')));
    }

    #[test]
    fn should_fail_on_non_numeric_values() {
        assert_eq!(
            Key::parse("S1xCR"),
            Err(KeyParseError::InvalidNumber {
                tag: 'S',
                value: "1x".to_string()
            })
        );
        assert!(matches!(
            Key::parse("H-1CR"),
            Err(KeyParseError::InvalidNumber { tag: 'H', .. })
        ));
    }

    #[test]
    fn should_fail_on_unknown_channels() {
        assert_eq!(Key::parse("CRX"), Err(KeyParseError::UnknownChannel('X')));
        assert_eq!(Key::parse("C1"), Err(KeyParseError::UnknownChannel('1')));
    }

    #[test]
    fn should_fail_on_zero_channels_per_pixel() {
        assert_eq!(Key::parse("P0CR"), Err(KeyParseError::ZeroChannelsPerPixel));
    }

    #[test]
    fn should_fail_without_channels() {
        assert_eq!(Key::parse("S0T0"), Err(KeyParseError::MissingChannels));
    }

    #[test]
    fn should_render_a_key_that_parses_back() {
        for input in ["S0T0E10N10H1V1P2CRG", "S3T9E0N0H0V4P3CBBG", "CR"] {
            let key = Key::parse(input).expect("Cannot parse key");
            let rendered = key.to_string();

            assert_eq!(Key::parse(&rendered), Ok(key), "{input} -> {rendered}");
        }
        assert_eq!(
            Key::parse("S0T0E10N10H1V1P2CRG").unwrap().to_string(),
            "S0T0E10N10H1V1P2CRG"
        );
    }
}
