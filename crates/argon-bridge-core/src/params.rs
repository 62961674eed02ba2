//! Argon2 algorithm selection and cost parameters.
//!
//! Variant and version are resolved under different policies. An unknown
//! variant name falls back to Argon2id; an unknown version is an error,
//! because the version changes the compression function and therefore the
//! bytes of every stored hash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Default time cost.
pub const DEFAULT_ITERATIONS: u32 = 2;

/// Default memory cost in KiB (32 MiB).
pub const DEFAULT_MEMORY_KIB: u32 = 32 * 1024;

/// Default number of lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;

/// Default output length in bytes.
pub const DEFAULT_HASH_LENGTH: u32 = 32;

/// Version constants, as accepted in the `version` field.
pub struct ArgonVersion;

impl ArgonVersion {
    /// Argon2 version 1.0.
    pub const V10: i64 = 0x10;
    /// Argon2 version 1.3.
    pub const V13: i64 = 0x13;
}

/// A numeric option exactly as the caller sent it.
///
/// Any JSON value is accepted here. Type and range are checked during
/// resolution, so a bad `version` is `InvalidVersion` and a bad cost is
/// `EngineRejected`, in resolution order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawNumber(serde_json::Value);

impl RawNumber {
    /// The value if it is an integer that fits in `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    /// The value if it is an integer in `0..=u32::MAX`.
    pub fn as_u32(&self) -> Option<u32> {
        self.0.as_u64().and_then(|n| u32::try_from(n).ok())
    }
}

impl From<u32> for RawNumber {
    fn from(value: u32) -> Self {
        RawNumber(value.into())
    }
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber(value.into())
    }
}

impl From<serde_json::Value> for RawNumber {
    fn from(value: serde_json::Value) -> Self {
        RawNumber(value)
    }
}

impl fmt::Display for RawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Argon2 algorithm flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Argon2d,
    Argon2i,
    #[default]
    Argon2id,
}

impl Variant {
    /// Look up a variant by its exact name (`argon2d`, `argon2i`, `argon2id`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "argon2d" => Some(Variant::Argon2d),
            "argon2i" => Some(Variant::Argon2i),
            "argon2id" => Some(Variant::Argon2id),
            _ => None,
        }
    }

    /// Resolve a caller-supplied variant name, never failing.
    ///
    /// Absent or unrecognized names resolve to [`Variant::Argon2id`].
    pub fn resolve(name: Option<&str>) -> Self {
        match name.map(Self::from_name) {
            Some(Some(variant)) => variant,
            Some(None) => {
                tracing::debug!(
                    requested = name.unwrap_or_default(),
                    "unknown variant, using argon2id"
                );
                Variant::Argon2id
            }
            None => Variant::default(),
        }
    }

    /// Name used in the encoded hash, e.g. `argon2id`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Argon2d => "argon2d",
            Variant::Argon2i => "argon2i",
            Variant::Argon2id => "argon2id",
        }
    }

    pub(crate) fn algorithm(&self) -> argon2::Algorithm {
        match self {
            Variant::Argon2d => argon2::Algorithm::Argon2d,
            Variant::Argon2i => argon2::Algorithm::Argon2i,
            Variant::Argon2id => argon2::Algorithm::Argon2id,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse, for places that must not guess (encoded hashes, CLI flags).
impl FromStr for Variant {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| BridgeError::InvalidConfig(format!("Unknown Argon2 variant: {}", s)))
    }
}

/// Argon2 specification revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Version {
    /// Version 1.0 (`0x10`, written as `v=16`)
    V0x10,
    /// Version 1.3 (`0x13`, written as `v=19`)
    #[default]
    V0x13,
}

impl Version {
    /// Numeric version code.
    pub fn as_u32(&self) -> u32 {
        match self {
            Version::V0x10 => 0x10,
            Version::V0x13 => 0x13,
        }
    }

    /// Resolve the optional `version` field; absent means 0x13.
    ///
    /// Only the integers 16 and 19 are accepted. Strings, fractions and
    /// every other number are `InvalidVersion`.
    pub fn resolve(value: Option<&RawNumber>) -> Result<Self> {
        match value {
            None => Ok(Version::default()),
            Some(raw) => match raw.as_i64() {
                Some(number) => Self::try_from(number),
                None => Err(BridgeError::InvalidVersion(raw.to_string())),
            },
        }
    }

    pub(crate) fn argon2_version(&self) -> argon2::Version {
        match self {
            Version::V0x10 => argon2::Version::V0x10,
            Version::V0x13 => argon2::Version::V0x13,
        }
    }
}

impl TryFrom<i64> for Version {
    type Error = BridgeError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            ArgonVersion::V10 => Ok(Version::V0x10),
            ArgonVersion::V13 => Ok(Version::V0x13),
            other if other < 0 => Err(BridgeError::InvalidVersion(other.to_string())),
            other => Err(BridgeError::InvalidVersion(format!("{:#x}", other))),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Time, memory, lane and output-length costs.
///
/// Values are passed to the engine untouched; nothing here clamps or bounds
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostParams {
    pub iterations: u32,
    /// Memory cost in KiB
    pub memory: u32,
    pub parallelism: u32,
    /// Output length in bytes
    pub hash_length: u32,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            memory: DEFAULT_MEMORY_KIB,
            parallelism: DEFAULT_PARALLELISM,
            hash_length: DEFAULT_HASH_LENGTH,
        }
    }
}
