//! Model name validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for model and project names
pub const MAX_MODEL_NAME_LENGTH: usize = 26;

/// Slug pattern shared by model names and the `name` of extensions documents
pub const MODEL_NAME_PATTERN: &str = "^[a-z]([-a-z0-9]{0,24}[a-z0-9])?$";

static MODEL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(MODEL_NAME_PATTERN).unwrap());

/// Model name validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelNameError {
    /// Name is empty
    Empty,
    /// Name exceeds maximum length
    TooLong { length: usize, max: usize },
    /// Name contains invalid characters
    InvalidFormat { name: String },
}

impl fmt::Display for ModelNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Name too long: {} characters (max {})", length, max)
            }
            Self::InvalidFormat { name } => {
                write!(
                    f,
                    "Invalid name '{}': must match {}",
                    name, MODEL_NAME_PATTERN
                )
            }
        }
    }
}

impl std::error::Error for ModelNameError {}

/// Validate a model or project name
pub fn validate_model_name(name: &str) -> Result<(), ModelNameError> {
    if name.is_empty() {
        return Err(ModelNameError::Empty);
    }

    let length = name.chars().count();

    if length > MAX_MODEL_NAME_LENGTH {
        return Err(ModelNameError::TooLong {
            length,
            max: MAX_MODEL_NAME_LENGTH,
        });
    }

    if !MODEL_NAME_REGEX.is_match(name) {
        return Err(ModelNameError::InvalidFormat {
            name: name.to_string(),
        });
    }

    Ok(())
}
