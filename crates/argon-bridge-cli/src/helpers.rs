//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use dialoguer::Password;
use secrecy::SecretString;

use crate::constants::PASSWORD_ENV;

/// Password from the flag, else ARGON_BRIDGE_PASSWORD, else a hidden prompt.
///
/// An empty flag value is a real (empty) password. An empty env var is
/// treated as unset.
pub fn resolve_password(flag: Option<String>) -> anyhow::Result<SecretString> {
    if let Some(value) = flag {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var(PASSWORD_ENV) {
        if !value.is_empty() {
            tracing::debug!("password taken from {}", PASSWORD_ENV);
            return Ok(SecretString::from(value));
        }
    }
    if !io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No password provided and no TTY available. Pass --password or set {}.",
            PASSWORD_ENV
        ));
    }
    let value = Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
    Ok(SecretString::from(value))
}

/// Read a whole file, or stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e)),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
            Ok(buffer)
        }
    }
}
