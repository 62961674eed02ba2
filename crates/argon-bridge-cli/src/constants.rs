//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (clap usage errors)
/// - 3+: One code per hashing error, then verification mismatch
pub mod exit_codes {
    /// Password or salt missing.
    pub const MISSING_FIELD: i32 = 3;

    /// Hex input failed validation.
    pub const INVALID_HEX: i32 = 4;

    /// Argon2 version not 0x10 or 0x13.
    pub const INVALID_VERSION: i32 = 5;

    /// The Argon2 engine rejected the parameters.
    pub const ENGINE_REJECTED: i32 = 6;

    /// Input could not be read as a configuration or encoded hash.
    pub const INVALID_CONFIG: i32 = 7;

    /// `verify` ran successfully but the password did not match.
    pub const VERIFY_MISMATCH: i32 = 8;
}

/// Environment variable holding the password for non-interactive use.
pub const PASSWORD_ENV: &str = "ARGON_BRIDGE_PASSWORD";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "ARGON_BRIDGE_CONFIG";

/// Directory name under the XDG config home.
pub const APP_DIR: &str = "argon-bridge";
