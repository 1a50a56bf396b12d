//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Variants cover invalid configuration, unregistered or exhausted pools, configuration parsing,
//! IO, and generic errors.
//!
//! An empty weighted selection is not an error; selectors return `None` for it.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no pool registered for resource '{key}'")]
    NotFound { key: String },

    #[error("pool '{key}' is empty")]
    EmptyPool { key: String },

    #[error("instance {slot} of pool '{key}' is still in use")]
    InUse { key: String, slot: usize },

    #[error("failed to parse definitions: {0}")]
    Parse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
