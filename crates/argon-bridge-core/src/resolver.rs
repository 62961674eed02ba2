//! Normalization of a [`HashingConfig`] into a fully specified request.
//!
//! Resolution order is fixed so that the same bad input always produces the
//! same error:
//!
//! 1. password and salt presence
//! 2. input encoding: both hex strings are validated before either is
//!    decoded
//! 3. variant (lenient)
//! 4. version (strict)
//! 5. cost parameters, each an integer in `0..=u32::MAX` or absent

use zeroize::Zeroizing;

use crate::config::{HashingConfig, InputEncoding, SecretInput};
use crate::error::{BridgeError, Result};
use crate::hex;
use crate::params::{CostParams, RawNumber, Variant, Version};

/// A hashing request with every field concretely set.
///
/// Password and salt bytes are wiped when the request is dropped, on every
/// exit path.
pub struct ResolvedRequest {
    password: Zeroizing<Vec<u8>>,
    salt: Zeroizing<Vec<u8>>,
    pub variant: Variant,
    pub version: Version,
    pub costs: CostParams,
}

impl ResolvedRequest {
    /// Build a request from raw parts.
    pub fn new(
        password: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        variant: Variant,
        version: Version,
        costs: CostParams,
    ) -> Self {
        Self {
            password: Zeroizing::new(password.into()),
            salt: Zeroizing::new(salt.into()),
            variant,
            version,
            costs,
        }
    }

    /// Password bytes. Avoid copying or logging these.
    pub fn password(&self) -> &[u8] {
        &self.password
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }
}

impl std::fmt::Debug for ResolvedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedRequest")
            .field("password", &"[REDACTED]")
            .field("salt_len", &self.salt.len())
            .field("variant", &self.variant)
            .field("version", &self.version)
            .field("costs", &self.costs)
            .finish()
    }
}

/// Validate and normalize a configuration.
///
/// Pure transformation; nothing here is expensive, so every validation
/// failure is reported before the engine does any work.
///
/// # Errors
///
/// - `MissingField` if password or salt is absent
/// - `InvalidHexEncoding` if hex input is requested and either string is
///   not valid even-length hex
/// - `InvalidVersion` if the version is not 0x10 or 0x13
/// - `EngineRejected` if a cost is not an integer in `0..=u32::MAX`
pub fn resolve(config: &HashingConfig) -> Result<ResolvedRequest> {
    let password = config
        .password
        .as_ref()
        .ok_or(BridgeError::MissingField("password"))?;
    let salt = config
        .salt
        .as_ref()
        .ok_or(BridgeError::MissingField("salt"))?;

    let encoding = config.input_encoding();
    if encoding == InputEncoding::Hex {
        validate_hex("password", password)?;
        validate_hex("salt", salt)?;
    }
    let password = to_bytes("password", password, encoding)?;
    let salt = to_bytes("salt", salt, encoding)?;

    let variant = Variant::resolve(config.variant_name());
    let version = Version::resolve(config.version.as_ref())?;

    let defaults = CostParams::default();
    let costs = CostParams {
        iterations: cost("iterations", config.iterations.as_ref(), defaults.iterations)?,
        memory: cost("memory", config.memory.as_ref(), defaults.memory)?,
        parallelism: cost("parallelism", config.parallelism.as_ref(), defaults.parallelism)?,
        hash_length: cost("hashLength", config.hash_length.as_ref(), defaults.hash_length)?,
    };

    tracing::debug!(
        %variant,
        %version,
        iterations = costs.iterations,
        memory_kib = costs.memory,
        parallelism = costs.parallelism,
        hash_length = costs.hash_length,
        password_len = password.len(),
        salt_len = salt.len(),
        hex = matches!(encoding, InputEncoding::Hex),
        "resolved hashing request"
    );

    Ok(ResolvedRequest {
        password,
        salt,
        variant,
        version,
        costs,
    })
}

fn validate_hex(field: &'static str, input: &SecretInput) -> Result<()> {
    match input {
        SecretInput::Text(text) => hex::validate(field, text),
        SecretInput::Bytes(_) => Ok(()),
    }
}

/// Range is the engine's to judge; a value that cannot even be a `u32` is
/// reported the way the engine reports a bad parameter.
fn cost(field: &'static str, value: Option<&RawNumber>, default: u32) -> Result<u32> {
    match value {
        None => Ok(default),
        Some(raw) => raw.as_u32().ok_or_else(|| {
            BridgeError::EngineRejected(format!(
                "Invalid Argon2 parameters: {} must be an integer from 0 to {} (got {})",
                field,
                u32::MAX,
                raw
            ))
        }),
    }
}

/// Byte sequences pass through untouched; only strings are subject to the
/// input encoding.
fn to_bytes(
    field: &'static str,
    input: &SecretInput,
    encoding: InputEncoding,
) -> Result<Zeroizing<Vec<u8>>> {
    match (input, encoding) {
        (SecretInput::Bytes(bytes), _) => Ok(Zeroizing::new(bytes.clone())),
        (SecretInput::Text(text), InputEncoding::Utf8) => {
            Ok(Zeroizing::new(text.as_bytes().to_vec()))
        }
        (SecretInput::Text(text), InputEncoding::Hex) => hex::decode(field, text),
    }
}
