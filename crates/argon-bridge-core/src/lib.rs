//! # Argon Bridge Core
//!
//! Configurable Argon2 password hashing behind a plain key-value contract.
//!
//! A caller hands over a [`HashingConfig`] (password, salt and optional
//! tuning parameters) and gets back a [`HashResult`] holding the raw hash as
//! lowercase hex and the self-describing encoded hash, or a typed
//! [`BridgeError`] with a stable [`ErrorCode`].
//!
//! ## Architecture
//!
//! - **config**: inbound key-value configuration
//! - **resolver**: validation, defaults, hex decoding, variant and version
//!   selection
//! - **engine**: the key-derivation seam and its Argon2 implementation
//! - **encoder**: hex and encoded-string serialization, encoded-string parser
//! - **hasher**: the resolve → derive → encode pipeline and verification
//! - **bridge**: JSON map in, JSON map out
//! - **pool**: memory-budgeted concurrent hashing on blocking threads
//!
//! ## Example
//!
//! ```
//! use argon_bridge_core::{hash, HashingConfig, Variant};
//!
//! let config = HashingConfig::new("password", "somesalt")
//!     .with_variant(Variant::Argon2i)
//!     .with_memory(64)
//!     .with_iterations(1);
//! let result = hash(&config).unwrap();
//! assert!(result.encoded_hash.starts_with("$argon2i$v=19$m=64,t=1,p=1$c29tZXNhbHQ$"));
//! ```

pub mod bridge;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod hex;
pub mod params;
pub mod pool;
pub mod resolver;

pub use bridge::{call, call_json, BridgeResponse, ErrorPayload};
pub use config::{ArgonEncoding, HashingConfig, InputEncoding, SecretInput};
pub use encoder::{encode, EncodedHash, HashResult};
pub use engine::{Argon2Engine, KdfEngine, MIN_HASH_LENGTH, MIN_SALT_LEN};
pub use error::{BridgeError, ErrorCode, Result};
pub use hasher::{hash, hash_with, verify, verify_with};
pub use params::{ArgonVersion, CostParams, RawNumber, Variant, Version};
pub use pool::{HashPool, PoolConfig};
pub use resolver::{resolve, ResolvedRequest};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
