use crate::error::SteganoError;

pub type Result<T> = std::result::Result<T, SteganoError>;
