//! Key-value entry point for a calling bridge.
//!
//! A bridge hands over one JSON-compatible map holding password, salt and
//! options, and gets back either
//!
//! ```json
//! { "rawHash": "...", "encodedHash": "$argon2id$..." }
//! ```
//!
//! or
//!
//! ```json
//! { "error": { "code": "InvalidVersion", "message": "..." } }
//! ```
//!
//! There is exactly one request shape; password and salt always travel
//! inside the map.

use serde::{Deserialize, Serialize};

use crate::config::HashingConfig;
use crate::encoder::HashResult;
use crate::engine::{Argon2Engine, KdfEngine};
use crate::error::{BridgeError, ErrorCode, Result};
use crate::hasher::hash_with;

/// Error as seen across the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&BridgeError> for ErrorPayload {
    fn from(err: &BridgeError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Response for one bridge call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BridgeResponse {
    Success(HashResult),
    Failure { error: ErrorPayload },
}

impl BridgeResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, BridgeResponse::Success(_))
    }

    /// The error code, if the call failed.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            BridgeResponse::Success(_) => None,
            BridgeResponse::Failure { error } => Some(error.code),
        }
    }

    /// Serialize to a `serde_json::Value` map.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|e| {
            serde_json::json!({
                "error": { "code": ErrorCode::InvalidConfig, "message": e.to_string() }
            })
        })
    }
}

impl From<Result<HashResult>> for BridgeResponse {
    fn from(result: Result<HashResult>) -> Self {
        match result {
            Ok(hash) => BridgeResponse::Success(hash),
            Err(err) => {
                tracing::debug!(code = %err.code(), "bridge call failed");
                BridgeResponse::Failure {
                    error: ErrorPayload::from(&err),
                }
            }
        }
    }
}

/// Hash a key-value configuration with the default engine.
pub fn call(request: serde_json::Value) -> BridgeResponse {
    call_with(&Argon2Engine, request)
}

/// Hash a key-value configuration with a caller-supplied engine.
pub fn call_with<E: KdfEngine + ?Sized>(engine: &E, request: serde_json::Value) -> BridgeResponse {
    HashingConfig::from_value(request)
        .and_then(|config| hash_with(engine, &config))
        .into()
}

/// Hash a configuration given as JSON text.
pub fn call_json(request: &str) -> BridgeResponse {
    HashingConfig::from_json_str(request)
        .and_then(|config| hash_with(&Argon2Engine, &config))
        .into()
}
