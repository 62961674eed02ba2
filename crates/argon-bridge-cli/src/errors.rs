//! CLI error types for structured error handling.
//!
//! Hashing errors keep their stable code and map to a dedicated exit code,
//! so scripts can tell a bad salt from a bad version without parsing text.

use std::fmt;

use argon_bridge_core::{BridgeError, ErrorCode};

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// A hashing, parsing or verification call failed
    Bridge(BridgeError),

    /// Password did not match the encoded hash
    Mismatch,

    /// The failure was already written to stdout as JSON
    Reported(ErrorCode),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Bridge(err) => write!(f, "{} ({})", err, err.code()),
            CliError::Mismatch => write!(f, "Password does not match"),
            CliError::Reported(code) => write!(f, "Request failed with {}", code),
        }
    }
}

impl std::error::Error for CliError {}

impl From<BridgeError> for CliError {
    fn from(err: BridgeError) -> Self {
        CliError::Bridge(err)
    }
}

impl CliError {
    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Bridge(err) => exit_code_for(err.code()),
            CliError::Mismatch => exit_codes::VERIFY_MISMATCH,
            CliError::Reported(code) => exit_code_for(*code),
        }
    }

    /// Hint shown under the error message, if there is a useful one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Bridge(err) => match err.code() {
                ErrorCode::MissingField => {
                    Some("Hint: Pass --salt, and --password or ARGON_BRIDGE_PASSWORD.")
                }
                ErrorCode::InvalidHexEncoding => Some(
                    "Hint: --hex expects an even number of 0-9a-f digits for both password and salt.",
                ),
                ErrorCode::InvalidVersion => Some("Hint: Use --argon-version 16 (0x10) or 19 (0x13)."),
                ErrorCode::EngineRejected => Some(
                    "Hint: Salt needs at least 8 bytes, memory at least 8 KiB per lane, and length at least 4.",
                ),
                ErrorCode::InvalidConfig => None,
            },
            CliError::Mismatch | CliError::Reported(_) => None,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        if let CliError::Reported(_) = self {
            std::process::exit(self.exit_code())
        }
        eprintln!("Error: {}", self);
        if let Some(hint) = self.hint() {
            eprintln!("{}", hint);
        }
        std::process::exit(self.exit_code())
    }
}

/// Exit code for a stable hashing error code.
pub fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::MissingField => exit_codes::MISSING_FIELD,
        ErrorCode::InvalidHexEncoding => exit_codes::INVALID_HEX,
        ErrorCode::InvalidVersion => exit_codes::INVALID_VERSION,
        ErrorCode::EngineRejected => exit_codes::ENGINE_REJECTED,
        ErrorCode::InvalidConfig => exit_codes::INVALID_CONFIG,
    }
}
