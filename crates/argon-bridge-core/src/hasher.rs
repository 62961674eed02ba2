//! The hashing pipeline: resolve → derive → encode.
//!
//! One pass, no retries, no partial results. Either a complete
//! [`HashResult`] comes back or an error does; the password and salt
//! buffers are wiped in both cases when the resolved request drops.

use subtle::ConstantTimeEq;

use crate::config::HashingConfig;
use crate::encoder::{encode, EncodedHash, HashResult};
use crate::engine::{Argon2Engine, KdfEngine};
use crate::error::{BridgeError, Result};
use crate::resolver::{resolve, ResolvedRequest};

/// Hash with the default [`Argon2Engine`].
///
/// # Examples
///
/// ```
/// use argon_bridge_core::{hash, HashingConfig};
///
/// let config = HashingConfig::new("password", "somesalt").with_memory(64);
/// let result = hash(&config).unwrap();
/// assert_eq!(result.raw_hash.len(), 64);
/// assert!(result.encoded_hash.starts_with("$argon2id$v=19$m=64,t=2,p=1$"));
/// ```
pub fn hash(config: &HashingConfig) -> Result<HashResult> {
    hash_with(&Argon2Engine, config)
}

/// Hash with a caller-supplied engine.
pub fn hash_with<E: KdfEngine + ?Sized>(engine: &E, config: &HashingConfig) -> Result<HashResult> {
    let request = resolve(config)?;
    hash_resolved(engine, &request)
}

/// Run the engine on an already resolved request and encode the output.
pub fn hash_resolved<E: KdfEngine + ?Sized>(
    engine: &E,
    request: &ResolvedRequest,
) -> Result<HashResult> {
    let raw = engine.hash(request)?;

    let expected = request.costs.hash_length as usize;
    if raw.len() != expected {
        return Err(BridgeError::EngineRejected(format!(
            "Engine returned {} bytes, expected {}",
            raw.len(),
            expected
        )));
    }

    Ok(encode(
        &raw,
        request.variant,
        request.version,
        &request.costs,
        request.salt(),
    ))
}

/// Check a password against an encoded hash with the default engine.
///
/// The hash is recomputed with the parameters embedded in `encoded` and
/// compared in constant time.
///
/// # Errors
///
/// Returns an error if `encoded` cannot be parsed or the engine rejects the
/// embedded parameters. A wrong password is `Ok(false)`, not an error.
pub fn verify(password: &[u8], encoded: &str) -> Result<bool> {
    verify_with(&Argon2Engine, password, encoded)
}

/// Check a password against an encoded hash with a caller-supplied engine.
pub fn verify_with<E: KdfEngine + ?Sized>(
    engine: &E,
    password: &[u8],
    encoded: &str,
) -> Result<bool> {
    let parsed = EncodedHash::parse(encoded)?;
    let request = ResolvedRequest::new(
        password.to_vec(),
        parsed.salt.clone(),
        parsed.variant,
        parsed.version,
        parsed.costs(),
    );

    let candidate = engine.hash(&request)?;
    let matched: bool = candidate.as_slice().ct_eq(&parsed.hash).into();
    tracing::debug!(variant = %parsed.variant, matched, "verified encoded hash");
    Ok(matched)
}
