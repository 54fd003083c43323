use thiserror::Error;

pub use crate::key::KeyParseError;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents an image type that cannot be handled, for example `image/gif` or an empty type
    #[error("Image format is not supported: {0}")]
    UnsupportedFormat(String),

    /// Represents an invalid carrier image. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    #[error(
        "Capacity Error: The message needs {needed} bits but the carrier only offers {available} bits"
    )]
    CapacityExceeded { needed: u64, available: u64 },

    /// Represents a malformed key string
    #[error("Invalid key: {0}")]
    KeyParse(#[from] KeyParseError),

    /// Represents missing or empty call parameters, for example an empty image type
    #[error("Invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// Represents a message that does not fit the 4 byte length header
    #[error("Message of {0} bytes is too long to be framed")]
    MessageTooLong(usize),

    /// Represents an unveil of no secret data. For example when the length header
    /// announces more data than the carrier can hold
    #[error("No secret data found")]
    NoSecretData,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}
