//! The public error type.
//!
//! Internally the crate builds context chains with `anyhow`. At the boundary of a public operation
//! those chains are classified with an `ErrorType` by calling `pub_result`, so that callers can
//! tell a bad form entry apart from a broken data file.

use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

/// The category of a failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A required field was missing.
    Validation,
    /// Text that should have been a number or a date could not be parsed.
    Parse,
    /// The data file could not be read or written.
    Persistence,
    /// The configuration file could not be read, parsed or created.
    Config,
    /// Reading user input or writing output failed.
    Io,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error returned from a public operation.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {error:#}")]
pub struct Error {
    kind: ErrorType,
    error: anyhow::Error,
}

impl Error {
    pub fn new(kind: ErrorType, error: impl Into<anyhow::Error>) -> Self {
        Self {
            kind,
            error: error.into(),
        }
    }

    /// Creates an `ErrorType::Validation` error from a message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, anyhow::anyhow!(message.into()))
    }

    /// Creates an `ErrorType::Parse` error from a message.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Parse, anyhow::anyhow!(message.into()))
    }

    pub fn kind(&self) -> ErrorType {
        self.kind
    }

    /// The underlying context chain.
    pub fn inner(&self) -> &anyhow::Error {
        &self.error
    }
}

/// Classifies an internal result into a public `Result`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, kind: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, kind: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(kind, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_display_includes_kind_and_chain() {
        let res: anyhow::Result<()> = Err(anyhow::anyhow!("disk full")).context("Unable to save");
        let err = res.pub_result(ErrorType::Persistence).unwrap_err();
        assert_eq!(err.kind(), ErrorType::Persistence);
        assert_eq!(
            err.to_string(),
            "persistence error: Unable to save: disk full"
        );
    }

    #[test]
    fn test_validation_constructor() {
        let err = Error::validation("Budget is required");
        assert_eq!(err.kind(), ErrorType::Validation);
        assert_eq!(err.to_string(), "validation error: Budget is required");
    }

    #[test]
    fn test_error_type_from_str() {
        let kind: ErrorType = "parse".parse().unwrap();
        assert_eq!(kind, ErrorType::Parse);
        assert_eq!(ErrorType::Config.to_string(), "config");
    }
}
