use argon2::{Argon2, PasswordHash, PasswordVerifier};
use serde_json::json;

use argon_bridge_core::{
    call, hash, verify, BridgeError, EncodedHash, ErrorCode, HashingConfig, Variant, Version,
};

/// Small costs for tests where the exact values do not matter.
fn quick(password: &str, salt: &str) -> HashingConfig {
    HashingConfig::new(password, salt)
        .with_memory(64)
        .with_iterations(1)
}

fn reference_config(variant: Variant, version: i64) -> HashingConfig {
    HashingConfig::new("password", "somesalt")
        .with_variant(variant)
        .with_version(version)
        .with_iterations(2)
        .with_memory(65536)
        .with_parallelism(1)
}

#[test]
fn test_reference_vector_argon2i_v13() {
    let result = hash(&reference_config(Variant::Argon2i, 0x13)).expect("hash should succeed");
    assert_eq!(
        result.raw_hash,
        "c1628832147d9720c5bd1cfd61367078729f6dfb6f8fea9ff98158e0d7816ed0"
    );
    assert_eq!(
        result.encoded_hash,
        "$argon2i$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$wWKIMhR9lyDFvRz9YTZweHKfbftvj+qf+YFY4NeBbtA"
    );
}

#[test]
fn test_reference_vector_argon2i_v10() {
    let result = hash(&reference_config(Variant::Argon2i, 0x10)).expect("hash should succeed");
    assert_eq!(
        result.raw_hash,
        "f6c4db4a54e2a370627aff3db6176b94a2a209a62c8e36152711802f7b30c694"
    );
    assert_eq!(
        result.encoded_hash,
        "$argon2i$v=16$m=65536,t=2,p=1$c29tZXNhbHQ$9sTbSlTio3Biev89thdrlKKiCaYsjjYVJxGAL3swxpQ"
    );
}

#[test]
fn test_reference_vector_argon2id_v13() {
    let result = hash(&reference_config(Variant::Argon2id, 0x13)).expect("hash should succeed");
    assert_eq!(
        result.raw_hash,
        "09316115d5cf24ed5a15a31a3ba326e5cf32edc24702987c02b6566f61913cf7"
    );
    assert_eq!(
        result.encoded_hash,
        "$argon2id$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$CTFhFdXPJO1aFaMaO6Mm5c8y7cJHAph8ArZWb2GRPPc"
    );
}

#[test]
fn test_default_scenario() {
    let result = hash(&HashingConfig::new("password", "somesalt")).expect("hash should succeed");

    assert_eq!(result.raw_hash.len(), 64);
    assert!(result
        .raw_hash
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    assert!(result
        .encoded_hash
        .starts_with("$argon2id$v=19$m=32768,t=2,p=1$"));
}

#[test]
fn test_deterministic() {
    let config = quick("password", "somesalt")
        .with_variant(Variant::Argon2d)
        .with_parallelism(2)
        .with_hash_length(48);
    let first = hash(&config).unwrap();
    let second = hash(&config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.raw_hash.len(), 96);
}

#[test]
fn test_encoded_round_trip() {
    let cases = [
        (Variant::Argon2d, 0x10, 1, 64, 1, 16),
        (Variant::Argon2i, 0x13, 3, 128, 2, 32),
        (Variant::Argon2id, 0x13, 2, 256, 4, 64),
    ];

    for (variant, version, iterations, memory, parallelism, length) in cases {
        let config = HashingConfig::new("password", "a-longer-salt-value")
            .with_variant(variant)
            .with_version(version)
            .with_iterations(iterations)
            .with_memory(memory)
            .with_parallelism(parallelism)
            .with_hash_length(length);
        let result = hash(&config).unwrap();
        let parsed = EncodedHash::parse(&result.encoded_hash).unwrap();

        assert_eq!(parsed.variant, variant);
        assert_eq!(parsed.version, Version::try_from(version).unwrap());
        assert_eq!(parsed.iterations, iterations);
        assert_eq!(parsed.memory, memory);
        assert_eq!(parsed.parallelism, parallelism);
        assert_eq!(parsed.salt, b"a-longer-salt-value");
        assert_eq!(hex::encode(&parsed.hash), result.raw_hash);
        assert_eq!(parsed.to_string(), result.encoded_hash);
    }
}

#[test]
fn test_version_strictness() {
    let err = hash(&quick("password", "somesalt").with_version(0x11)).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidVersion(ref v) if v == "0x11"));

    let v10 = hash(&quick("password", "somesalt").with_version(0x10)).unwrap();
    assert!(v10.encoded_hash.starts_with("$argon2id$v=16$"));

    let v13 = hash(&quick("password", "somesalt").with_version(0x13)).unwrap();
    assert!(v13.encoded_hash.starts_with("$argon2id$v=19$"));

    assert_ne!(v10.raw_hash, v13.raw_hash);
}

#[test]
fn test_hex_input_matches_text_input() {
    let hex = hash(&quick("70617373776f7264", "736f6d6573616c74").with_hex_encoded(true)).unwrap();
    let text = hash(&quick("password", "somesalt")).unwrap();
    assert_eq!(hex, text);

    // Uppercase digits and embedded whitespace decode to the same bytes
    let spaced =
        hash(&quick("70 61 73 73 77 6F 72 64", "736F6D65 73616C74").with_hex_encoded(true))
            .unwrap();
    assert_eq!(spaced, text);
}

#[test]
fn test_short_hex_salt_behaves_like_text() {
    // "73616c74" is "salt": four bytes, under the engine's floor either way
    let hex = hash(&quick("70617373776f7264", "73616c74").with_hex_encoded(true)).unwrap_err();
    let text = hash(&quick("password", "salt")).unwrap_err();
    assert_eq!(hex.code(), ErrorCode::EngineRejected);
    assert_eq!(text.code(), ErrorCode::EngineRejected);
    assert_eq!(hex.to_string(), text.to_string());
}

#[test]
fn test_invalid_hex_rejected() {
    for (password, salt) in [("7061737", "736f6d6573616c74"), ("password", "736f6d6573616c74")] {
        let err = hash(&quick(password, salt).with_hex_encoded(true)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidHexEncoding);
    }
}

#[test]
fn test_unknown_variant_hashes_as_argon2id() {
    let unknown = hash(&quick("password", "somesalt").with_variant_name("argon2x")).unwrap();
    let explicit = hash(&quick("password", "somesalt").with_variant(Variant::Argon2id)).unwrap();
    assert_eq!(unknown, explicit);
}

#[test]
fn test_interop_with_phc_verifier() {
    for variant in [Variant::Argon2d, Variant::Argon2i, Variant::Argon2id] {
        let result = hash(&quick("hunter2", "somesalt").with_variant(variant)).unwrap();
        let parsed = PasswordHash::new(&result.encoded_hash).expect("PHC string should parse");
        assert!(Argon2::default()
            .verify_password(b"hunter2", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"hunter3", &parsed)
            .is_err());
    }
}

#[test]
fn test_verify_against_reference_string() {
    let encoded =
        "$argon2i$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$wWKIMhR9lyDFvRz9YTZweHKfbftvj+qf+YFY4NeBbtA";
    assert!(verify(b"password", encoded).unwrap());
    assert!(!verify(b"Password", encoded).unwrap());
}

#[test]
fn test_bridge_call_full_options() {
    let response = call(json!({
        "password": "password",
        "salt": "somesalt",
        "isHexEncoded": false,
        "variant": "argon2i",
        "version": 0x13,
        "iterations": 2,
        "memory": 65536,
        "parallelism": 1,
        "hashLength": 32
    }));
    let value = response.to_value();
    assert_eq!(
        value["rawHash"],
        "c1628832147d9720c5bd1cfd61367078729f6dfb6f8fea9ff98158e0d7816ed0"
    );
}

#[test]
fn test_bridge_call_legacy_option_names() {
    let response = call(json!({
        "password": "70617373776f7264",
        "salt": "736f6d6573616c74",
        "inputEncoding": "hex",
        "mode": "argon2d",
        "memory": 64,
        "iterations": 1
    }));
    let expected = hash(&quick("password", "somesalt").with_variant(Variant::Argon2d)).unwrap();
    assert_eq!(response.to_value()["encodedHash"], expected.encoded_hash);
}
