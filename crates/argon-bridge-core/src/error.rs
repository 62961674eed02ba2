//! Error types for hashing operations.
//!
//! Every failure the core can produce maps to a stable [`ErrorCode`]. The
//! codes are what a calling bridge forwards across the language boundary;
//! the `Display` text is for humans and may change.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for hashing operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Core error type for hashing operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Password or salt was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Hex input failed the pattern or even-length check
    #[error("Invalid hex encoding for {field}: {reason}")]
    InvalidHexEncoding { field: &'static str, reason: String },

    /// Version outside {0x10, 0x13}, as the caller wrote it
    #[error("Invalid Argon2 version {0}. Use 0x10 or 0x13")]
    InvalidVersion(String),

    /// The key-derivation engine refused the parameters or failed
    #[error("Argon2 engine rejected the request: {0}")]
    EngineRejected(String),

    /// Key-value input could not be read as a configuration at all
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BridgeError {
    /// Stable identifier for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::MissingField(_) => ErrorCode::MissingField,
            BridgeError::InvalidHexEncoding { .. } => ErrorCode::InvalidHexEncoding,
            BridgeError::InvalidVersion(_) => ErrorCode::InvalidVersion,
            BridgeError::EngineRejected(_) => ErrorCode::EngineRejected,
            BridgeError::InvalidConfig(_) => ErrorCode::InvalidConfig,
        }
    }

    pub(crate) fn invalid_hex(field: &'static str, reason: impl Into<String>) -> Self {
        BridgeError::InvalidHexEncoding {
            field,
            reason: reason.into(),
        }
    }
}

impl From<argon2::Error> for BridgeError {
    fn from(err: argon2::Error) -> Self {
        BridgeError::EngineRejected(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::InvalidConfig(err.to_string())
    }
}

/// Stable error identifiers surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    MissingField,
    InvalidHexEncoding,
    InvalidVersion,
    EngineRejected,
    InvalidConfig,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingField => "MissingField",
            ErrorCode::InvalidHexEncoding => "InvalidHexEncoding",
            ErrorCode::InvalidVersion => "InvalidVersion",
            ErrorCode::EngineRejected => "EngineRejected",
            ErrorCode::InvalidConfig => "InvalidConfig",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
