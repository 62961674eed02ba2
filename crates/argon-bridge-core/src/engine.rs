//! Key derivation engine.
//!
//! The engine is the one expensive step in the pipeline. It is reached only
//! through the [`KdfEngine`] trait so callers can substitute their own
//! implementation; [`Argon2Engine`] is the default, backed by the RustCrypto
//! `argon2` crate.
//!
//! ## Preconditions enforced by `Argon2Engine`
//!
//! - salt at least [`MIN_SALT_LEN`] (8) bytes
//! - memory at least `8 × parallelism` KiB
//! - iterations and parallelism at least 1
//! - hash length at least [`MIN_HASH_LENGTH`] (4) bytes
//!
//! Any violation, and any allocation failure for the output or the working
//! memory, is returned as `BridgeError::EngineRejected`.

use std::time::Instant;

use argon2::{Argon2, Block, Params};
use zeroize::Zeroizing;

use crate::error::{BridgeError, Result};
use crate::resolver::ResolvedRequest;

/// Shortest salt the engine accepts, in bytes.
pub const MIN_SALT_LEN: usize = 8;

/// Shortest output the engine produces, in bytes.
pub const MIN_HASH_LENGTH: u32 = 4;

/// Interface to the underlying key-derivation function.
///
/// Implementations must be deterministic: the same request always yields
/// the same bytes. Calls block for the full duration of the derivation and
/// are never interrupted.
pub trait KdfEngine: Send + Sync {
    /// Derive `request.costs.hash_length` bytes from the request.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::EngineRejected` if the parameters are
    /// unacceptable or the derivation fails.
    fn hash(&self, request: &ResolvedRequest) -> Result<Zeroizing<Vec<u8>>>;
}

/// Argon2 engine backed by the `argon2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Engine;

impl KdfEngine for Argon2Engine {
    fn hash(&self, request: &ResolvedRequest) -> Result<Zeroizing<Vec<u8>>> {
        let costs = request.costs;

        if request.salt().len() < MIN_SALT_LEN {
            return Err(BridgeError::EngineRejected(format!(
                "Salt must be at least {} bytes (got {})",
                MIN_SALT_LEN,
                request.salt().len()
            )));
        }

        let output_len = usize::try_from(costs.hash_length).map_err(|_| {
            BridgeError::EngineRejected(format!(
                "Hash length {} is not addressable",
                costs.hash_length
            ))
        })?;

        let params = Params::new(
            costs.memory,
            costs.iterations,
            costs.parallelism,
            Some(output_len),
        )
        .map_err(|e| BridgeError::EngineRejected(format!("Invalid Argon2 parameters: {}", e)))?;
        let block_count = params.block_count();

        let argon2 = Argon2::new(
            request.variant.algorithm(),
            request.version.argon2_version(),
            params,
        );

        let mut output = Zeroizing::new(Vec::new());
        output.try_reserve_exact(output_len).map_err(|_| {
            BridgeError::EngineRejected(format!("Cannot allocate {} output bytes", output_len))
        })?;
        output.resize(output_len, 0);

        let mut memory: Vec<Block> = Vec::new();
        memory.try_reserve_exact(block_count).map_err(|_| {
            BridgeError::EngineRejected(format!(
                "Cannot allocate {} KiB of working memory",
                costs.memory
            ))
        })?;
        memory.resize(block_count, Block::default());

        let started = Instant::now();
        argon2
            .hash_password_into_with_memory(
                request.password(),
                request.salt(),
                output.as_mut_slice(),
                &mut memory,
            )
            .map_err(|e| BridgeError::EngineRejected(format!("Key derivation failed: {}", e)))?;

        tracing::debug!(
            variant = %request.variant,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "argon2 derivation finished"
        );

        Ok(output)
    }
}
