//! Error module for the DPI parameters library.
use std::error::Error;
use std::fmt;

use crate::units::Dimension;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum ParamError {
    /// The key is not part of the parameter schema.
    UnknownKey(String),
    /// A key of the schema is absent from the parameter set.
    MissingKey(String),
    /// The same key was provided twice.
    DuplicateKey(String),
    /// The unit of a value does not measure the quantity expected for its key.
    DimensionMismatch {
        key: String,
        expected: Dimension,
        found: Dimension,
    },
    /// Error for a quantity that cannot be parsed, e.g., "abc pF".
    InvalidQuantity(String),
    /// Error for an unrecognized unit symbol.
    InvalidUnit(String),
    /// Error for I/O operations.
    IOError(String),
    /// Error while (de)serializing a parameter set.
    SerializationError(String),
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamError::UnknownKey(key) => write!(f, "Unknown parameter: {}", key),
            ParamError::MissingKey(key) => write!(f, "Missing parameter: {}", key),
            ParamError::DuplicateKey(key) => write!(f, "Duplicate parameter: {}", key),
            ParamError::DimensionMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "Dimension mismatch for {}: expected {}, found {}",
                key, expected, found
            ),
            ParamError::InvalidQuantity(e) => write!(f, "Invalid quantity: {}", e),
            ParamError::InvalidUnit(e) => write!(f, "Invalid unit: {}", e),
            ParamError::IOError(e) => write!(f, "I/O error: {}", e),
            ParamError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl Error for ParamError {}
