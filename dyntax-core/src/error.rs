//! Error types for the DynTax core library

use thiserror::Error;

/// Core error type for DynTax operations
#[derive(Error, Debug)]
pub enum DtrError {
    /// A required configuration key is absent
    #[error("missing configuration key `{0}`")]
    MissingKey(String),

    /// A configuration key is present but its value is unusable
    #[error("invalid configuration key `{key}`: {reason}")]
    InvalidKey {
        /// Dotted path of the offending key
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// The configuration file could not be parsed
    #[error("configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DtrError {
    /// Build an [`DtrError::InvalidKey`] for a dotted configuration path
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Dotted configuration key this error refers to, if any
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MissingKey(key) | Self::InvalidKey { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// Result type alias for DynTax operations
pub type Result<T> = std::result::Result<T, DtrError>;
