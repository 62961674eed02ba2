//! Caller-supplied hashing configuration.
//!
//! [`HashingConfig`] is the single inbound shape: a key-value structure that
//! carries the password, the salt and every tuning parameter. Every field is
//! optional at this level; defaults and validation are applied by
//! [`crate::resolver::resolve`].
//!
//! Keys use camelCase (`isHexEncoded`, `hashLength`). `mode` is accepted in
//! place of `variant` (`variant` wins when both are sent), and
//! `inputEncoding: "hex"` is accepted as an alternative to
//! `isHexEncoded: true`.
//!
//! Reading a map never fails on a field's type or range. Each field is
//! judged when it is resolved, so the error code follows resolution order:
//! a bad `version` is `InvalidVersion`, a bad cost is `EngineRejected`, and
//! a missing password beats both.

use std::fmt;

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{BridgeError, Result};
use crate::params::{RawNumber, Variant};

/// Encoding names accepted in the `inputEncoding` field.
pub struct ArgonEncoding;

impl ArgonEncoding {
    pub const UTF8: &'static str = "utf8";
    pub const HEX: &'static str = "hex";
}

/// How password and salt strings are turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEncoding {
    #[default]
    Utf8,
    Hex,
}

/// Password or salt material, as text or raw bytes.
///
/// Contents are zeroized on drop and never shown by `Debug`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub enum SecretInput {
    Text(String),
    Bytes(Vec<u8>),
}

struct SecretInputVisitor;

impl<'de> Visitor<'de> for SecretInputVisitor {
    type Value = SecretInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or an array of bytes")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<SecretInput, E> {
        Ok(SecretInput::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<SecretInput, E> {
        Ok(SecretInput::Text(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<SecretInput, E> {
        Ok(SecretInput::Bytes(v.to_vec()))
    }

    fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> std::result::Result<SecretInput, E> {
        Ok(SecretInput::Bytes(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<SecretInput, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Wiped if a later element fails to parse
        let mut buf = Zeroizing::new(Vec::with_capacity(seq.size_hint().unwrap_or(0)));
        while let Some(byte) = seq.next_element::<u8>()? {
            buf.push(byte);
        }
        Ok(SecretInput::Bytes(std::mem::take(&mut *buf)))
    }
}

impl<'de> Deserialize<'de> for SecretInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SecretInputVisitor)
    }
}

/// Take a secret out of a parsed map. Strings are moved, not copied.
fn take_secret(map: &mut serde_json::Map<String, Value>, key: &str) -> Result<Option<SecretInput>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(SecretInput::Text(text))),
        Some(other) => Ok(Some(SecretInput::deserialize(other)?)),
    }
}

/// Any non-null value becomes a name. Non-strings keep their JSON text
/// and so never match a known name.
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Only a JSON boolean sets the flag; anything else counts as absent.
fn lenient_bool<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

impl std::fmt::Debug for SecretInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretInput::Text(_) => f.write_str("Text([REDACTED])"),
            SecretInput::Bytes(bytes) => write!(f, "Bytes([REDACTED; {}])", bytes.len()),
        }
    }
}

impl From<&str> for SecretInput {
    fn from(value: &str) -> Self {
        SecretInput::Text(value.to_string())
    }
}

impl From<String> for SecretInput {
    fn from(value: String) -> Self {
        SecretInput::Text(value)
    }
}

impl From<&[u8]> for SecretInput {
    fn from(value: &[u8]) -> Self {
        SecretInput::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for SecretInput {
    fn from(value: Vec<u8>) -> Self {
        SecretInput::Bytes(value)
    }
}

/// Inbound hashing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashingConfig {
    #[serde(default)]
    pub password: Option<SecretInput>,
    #[serde(default)]
    pub salt: Option<SecretInput>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_hex_encoded: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub input_encoding: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub variant: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: Option<String>,
    #[serde(default)]
    pub version: Option<RawNumber>,
    #[serde(default)]
    pub iterations: Option<RawNumber>,
    #[serde(default)]
    pub memory: Option<RawNumber>,
    #[serde(default)]
    pub parallelism: Option<RawNumber>,
    #[serde(default)]
    pub hash_length: Option<RawNumber>,
}

impl HashingConfig {
    /// Create a configuration with password and salt set and every other
    /// field left to its default.
    pub fn new(password: impl Into<SecretInput>, salt: impl Into<SecretInput>) -> Self {
        Self {
            password: Some(password.into()),
            salt: Some(salt.into()),
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Read a configuration from an already-parsed key-value map.
    ///
    /// Password and salt are moved out of the map before anything else is
    /// read, so no unzeroized copy of either is left behind.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(BridgeError::InvalidConfig(format!(
                    "expected a key-value map, got {}",
                    json_kind(&other)
                )))
            }
        };
        let password = take_secret(&mut map, "password")?;
        let salt = take_secret(&mut map, "salt")?;

        let mut config: HashingConfig = serde_json::from_value(Value::Object(map))?;
        config.password = password;
        config.salt = salt;
        Ok(config)
    }

    pub fn with_hex_encoded(mut self, is_hex_encoded: bool) -> Self {
        self.is_hex_encoded = Some(is_hex_encoded);
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant.as_str().to_string());
        self
    }

    /// Set the variant by name; unknown names are kept and resolve to
    /// Argon2id later.
    pub fn with_variant_name(mut self, name: impl Into<String>) -> Self {
        self.variant = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: i64) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations.into());
        self
    }

    pub fn with_memory(mut self, memory_kib: u32) -> Self {
        self.memory = Some(memory_kib.into());
        self
    }

    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = Some(parallelism.into());
        self
    }

    pub fn with_hash_length(mut self, hash_length: u32) -> Self {
        self.hash_length = Some(hash_length.into());
        self
    }

    /// The requested variant name: `variant`, else `mode`.
    pub fn variant_name(&self) -> Option<&str> {
        self.variant.as_deref().or(self.mode.as_deref())
    }

    /// Effective input encoding.
    ///
    /// `isHexEncoded` wins when present. Otherwise `inputEncoding: "hex"`
    /// selects hex and anything else means UTF-8.
    pub fn input_encoding(&self) -> InputEncoding {
        let from_name = match self.input_encoding.as_deref() {
            Some(ArgonEncoding::HEX) => Some(InputEncoding::Hex),
            Some(_) => Some(InputEncoding::Utf8),
            None => None,
        };

        match (self.is_hex_encoded, from_name) {
            (Some(flag), named) => {
                let flagged = if flag {
                    InputEncoding::Hex
                } else {
                    InputEncoding::Utf8
                };
                if named.is_some_and(|n| n != flagged) {
                    tracing::warn!(
                        is_hex_encoded = flag,
                        input_encoding = self.input_encoding.as_deref().unwrap_or_default(),
                        "isHexEncoded and inputEncoding disagree; using isHexEncoded"
                    );
                }
                flagged
            }
            (None, Some(named)) => named,
            (None, None) => InputEncoding::default(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_camel_case() {
        let config = HashingConfig::from_json_str(
            r#"{
                "password": "pw",
                "salt": "somesalt",
                "isHexEncoded": false,
                "variant": "argon2i",
                "version": 16,
                "iterations": 3,
                "memory": 1024,
                "parallelism": 2,
                "hashLength": 16
            }"#,
        )
        .unwrap();

        assert!(matches!(config.password, Some(SecretInput::Text(ref s)) if s == "pw"));
        assert_eq!(config.is_hex_encoded, Some(false));
        assert_eq!(config.variant.as_deref(), Some("argon2i"));
        assert_eq!(config.version.and_then(|v| v.as_i64()), Some(0x10));
        assert_eq!(config.iterations.and_then(|v| v.as_u32()), Some(3));
        assert_eq!(config.memory.and_then(|v| v.as_u32()), Some(1024));
        assert_eq!(config.parallelism.and_then(|v| v.as_u32()), Some(2));
        assert_eq!(config.hash_length.and_then(|v| v.as_u32()), Some(16));
    }

    #[test]
    fn test_mode_accepted_for_variant() {
        let config = HashingConfig::from_json_str(r#"{"mode": "argon2d"}"#).unwrap();
        assert_eq!(config.variant_name(), Some("argon2d"));
    }

    #[test]
    fn test_variant_beats_mode() {
        let config =
            HashingConfig::from_json_str(r#"{"variant": "argon2i", "mode": "argon2d"}"#).unwrap();
        assert_eq!(config.variant_name(), Some("argon2i"));

        let config = HashingConfig::from_value(serde_json::json!({
            "mode": "argon2d",
            "variant": "argon2i"
        }))
        .unwrap();
        assert_eq!(config.variant_name(), Some("argon2i"));
    }

    #[test]
    fn test_byte_array_input() {
        let config =
            HashingConfig::from_json_str(r#"{"password": [1, 2, 3], "salt": "s"}"#).unwrap();
        assert!(matches!(config.password, Some(SecretInput::Bytes(ref b)) if b == &[1, 2, 3]));
    }

    #[test]
    fn test_null_means_absent() {
        let config = HashingConfig::from_json_str(r#"{"password": null}"#).unwrap();
        assert!(config.password.is_none());
        assert!(config.salt.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config =
            HashingConfig::from_json_str(r#"{"salt": "s", "somethingElse": true}"#).unwrap();
        assert!(config.salt.is_some());
    }

    #[test]
    fn test_wrong_types_kept_for_resolution() {
        let config = HashingConfig::from_json_str(
            r#"{"iterations": "two", "memory": -1, "version": "0x13", "variant": 5}"#,
        )
        .unwrap();
        assert_eq!(config.iterations.as_ref().and_then(|v| v.as_u32()), None);
        assert_eq!(config.memory.as_ref().and_then(|v| v.as_i64()), Some(-1));
        assert_eq!(config.version.as_ref().map(|v| v.to_string()).as_deref(), Some("\"0x13\""));
        assert_eq!(config.variant_name(), Some("5"));
    }

    #[test]
    fn test_non_boolean_hex_flag_is_absent() {
        let config = HashingConfig::from_json_str(r#"{"isHexEncoded": "yes"}"#).unwrap();
        assert_eq!(config.is_hex_encoded, None);

        let config = HashingConfig::from_json_str(
            r#"{"isHexEncoded": 1, "inputEncoding": "hex"}"#,
        )
        .unwrap();
        assert_eq!(config.input_encoding(), InputEncoding::Hex);
    }

    #[test]
    fn test_non_map_rejected() {
        for value in [
            serde_json::json!(["not", "a", "map"]),
            serde_json::json!("just a string"),
            serde_json::json!(null),
        ] {
            let err = HashingConfig::from_value(value).unwrap_err();
            assert_eq!(err.code(), crate::ErrorCode::InvalidConfig);
        }

        let err = HashingConfig::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err.code(), crate::ErrorCode::InvalidConfig);
    }

    #[test]
    fn test_from_value_moves_secrets() {
        let config = HashingConfig::from_value(serde_json::json!({
            "password": "pw",
            "salt": [115, 97, 108, 116],
            "iterations": 3
        }))
        .unwrap();
        assert!(matches!(config.password, Some(SecretInput::Text(ref s)) if s == "pw"));
        assert!(matches!(config.salt, Some(SecretInput::Bytes(ref b)) if b == b"salt"));
        assert_eq!(config.iterations.and_then(|v| v.as_u32()), Some(3));

        let config =
            HashingConfig::from_value(serde_json::json!({"password": null, "salt": "s"})).unwrap();
        assert!(config.password.is_none());
        assert!(config.salt.is_some());
    }

    #[test]
    fn test_secret_of_wrong_shape_rejected() {
        for json in [
            r#"{"password": 12}"#,
            r#"{"password": [1, 300]}"#,
            r#"{"salt": {"a": 1}}"#,
        ] {
            let err = HashingConfig::from_json_str(json).unwrap_err();
            assert_eq!(err.code(), crate::ErrorCode::InvalidConfig, "{}", json);

            let value: serde_json::Value = serde_json::from_str(json).unwrap();
            let err = HashingConfig::from_value(value).unwrap_err();
            assert_eq!(err.code(), crate::ErrorCode::InvalidConfig, "{}", json);
        }
    }

    #[test]
    fn test_input_encoding_resolution() {
        let base = HashingConfig::new("a", "b");
        assert_eq!(base.input_encoding(), InputEncoding::Utf8);

        let flagged = base.clone().with_hex_encoded(true);
        assert_eq!(flagged.input_encoding(), InputEncoding::Hex);

        let mut named = base.clone();
        named.input_encoding = Some(ArgonEncoding::HEX.to_string());
        assert_eq!(named.input_encoding(), InputEncoding::Hex);

        let mut unknown = base.clone();
        unknown.input_encoding = Some("base64".to_string());
        assert_eq!(unknown.input_encoding(), InputEncoding::Utf8);

        // The boolean flag is authoritative
        let mut both = base.with_hex_encoded(false);
        both.input_encoding = Some(ArgonEncoding::HEX.to_string());
        assert_eq!(both.input_encoding(), InputEncoding::Utf8);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = HashingConfig::new("hunter2-secret", b"pepper-bytes".as_slice());
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("hunter2-secret"));
        assert!(!debug_output.contains("pepper"));
    }
}
