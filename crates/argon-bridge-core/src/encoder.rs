//! Result serialization and the encoded hash format.
//!
//! The encoded form follows the Argon2 reference encoding:
//!
//! ```text
//! $argon2<d|i|id>$v=<version>$m=<memory>,t=<iterations>,p=<parallelism>$<salt>$<hash>
//! ```
//!
//! with the version in decimal and salt and hash in standard base64 without
//! padding. It is the one artifact meant to be stored, so its bytes must not
//! drift between releases.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};
use crate::hex;
use crate::params::{CostParams, Variant, Version};

/// Output of a hashing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashResult {
    /// Lowercase hex, two digits per output byte
    pub raw_hash: String,
    /// Self-describing encoded hash
    pub encoded_hash: String,
}

/// Serialize raw hash bytes and the parameters that produced them.
pub fn encode(
    raw_hash: &[u8],
    variant: Variant,
    version: Version,
    costs: &CostParams,
    salt: &[u8],
) -> HashResult {
    let encoded = EncodedHash {
        variant,
        version,
        memory: costs.memory,
        iterations: costs.iterations,
        parallelism: costs.parallelism,
        salt: salt.to_vec(),
        hash: raw_hash.to_vec(),
    };

    HashResult {
        raw_hash: hex::encode(raw_hash),
        encoded_hash: encoded.to_string(),
    }
}

/// Parsed form of an encoded hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub variant: Variant,
    pub version: Version,
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl EncodedHash {
    /// Parse an encoded hash string.
    ///
    /// A missing `v=` segment is read as version 0x10, matching the
    /// reference decoder, which predates the version field.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidVersion` for a version other than 16 or
    /// 19, and `BridgeError::InvalidConfig` for any other malformation.
    pub fn parse(encoded: &str) -> Result<Self> {
        let body = encoded
            .strip_prefix('$')
            .ok_or_else(|| malformed("must start with '$'"))?;
        let fields: Vec<&str> = body.split('$').collect();

        let (algorithm, version, costs, salt, hash) = match fields.as_slice() {
            [a, v, c, s, h] => (*a, Some(*v), *c, *s, *h),
            [a, c, s, h] => (*a, None, *c, *s, *h),
            _ => return Err(malformed("wrong number of '$' separated fields")),
        };

        let variant: Variant = algorithm.parse()?;

        let version = match version {
            Some(field) => {
                let value = field
                    .strip_prefix("v=")
                    .ok_or_else(|| malformed("expected v=<version>"))?;
                Version::try_from(parse_decimal::<i64>("v", value)?)?
            }
            None => Version::V0x10,
        };

        let mut parts = costs.split(',');
        let memory = cost_field(parts.next(), "m")?;
        let iterations = cost_field(parts.next(), "t")?;
        let parallelism = cost_field(parts.next(), "p")?;
        if parts.next().is_some() {
            return Err(malformed("unexpected extra parameter"));
        }

        Ok(Self {
            variant,
            version,
            memory,
            iterations,
            parallelism,
            salt: decode_b64("salt", salt)?,
            hash: decode_b64("hash", hash)?,
        })
    }

    /// Cost parameters, with the hash length taken from the decoded hash.
    pub fn costs(&self) -> CostParams {
        CostParams {
            iterations: self.iterations,
            memory: self.memory,
            parallelism: self.parallelism,
            hash_length: self.hash.len() as u32,
        }
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            self.variant,
            self.version,
            self.memory,
            self.iterations,
            self.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.hash)
        )
    }
}

impl FromStr for EncodedHash {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn malformed(reason: &str) -> BridgeError {
    BridgeError::InvalidConfig(format!("Malformed encoded hash: {}", reason))
}

fn cost_field(field: Option<&str>, key: &str) -> Result<u32> {
    let field = field.ok_or_else(|| malformed(&format!("missing {}=", key)))?;
    let value = field
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| malformed(&format!("expected {}=<value>, got {:?}", key, field)))?;
    parse_decimal(key, value)
}

fn parse_decimal<T: FromStr>(key: &str, value: &str) -> Result<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(&format!("{} is not a decimal number", key)));
    }
    value
        .parse()
        .map_err(|_| malformed(&format!("{} is out of range", key)))
}

fn decode_b64(what: &str, value: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(value)
        .map_err(|e| malformed(&format!("{} is not unpadded base64 ({})", what, e)))
}
