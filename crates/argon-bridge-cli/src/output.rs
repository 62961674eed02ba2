//! Output formatting helpers for the CLI.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use argon_bridge_core::{hex, EncodedHash, HashResult};

/// Print a value as one line of JSON.
pub fn print_json_line(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print a value as indented JSON.
pub fn print_json_pretty(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable hash output. Quiet mode prints only the encoded form.
pub fn hash_text(result: &HashResult, quiet: bool) -> String {
    if quiet {
        return result.encoded_hash.clone();
    }
    format!(
        "Raw:     {}\nEncoded: {}",
        result.raw_hash, result.encoded_hash
    )
}

/// Parsed parameters of an encoded hash as JSON.
pub fn encoded_json(parsed: &EncodedHash) -> serde_json::Value {
    serde_json::json!({
        "variant": parsed.variant.as_str(),
        "version": parsed.version.as_u32(),
        "memory": parsed.memory,
        "iterations": parsed.iterations,
        "parallelism": parsed.parallelism,
        "salt": hex::encode(&parsed.salt),
        "hash": hex::encode(&parsed.hash),
        "hashLength": parsed.hash.len(),
    })
}

/// Parsed parameters of an encoded hash as a two-column table.
pub fn encoded_table(parsed: &EncodedHash) -> String {
    let rows = [
        ("Variant", parsed.variant.to_string()),
        (
            "Version",
            format!("{} ({:#x})", parsed.version, parsed.version.as_u32()),
        ),
        ("Memory (KiB)", parsed.memory.to_string()),
        ("Iterations", parsed.iterations.to_string()),
        ("Parallelism", parsed.parallelism.to_string()),
        ("Salt (hex)", hex::encode(&parsed.salt)),
        ("Hash length", parsed.hash.len().to_string()),
        ("Hash (hex)", hex::encode(&parsed.hash)),
    ];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str =
        "$argon2i$v=19$m=65536,t=2,p=1$c29tZXNhbHQ$wWKIMhR9lyDFvRz9YTZweHKfbftvj+qf+YFY4NeBbtA";

    #[test]
    fn test_hash_text_quiet() {
        let result = HashResult {
            raw_hash: "abcd".to_string(),
            encoded_hash: "$argon2id$v=19$m=64,t=1,p=1$c29tZXNhbHQ$q80".to_string(),
        };
        assert_eq!(hash_text(&result, true), result.encoded_hash);
        assert!(hash_text(&result, false).contains("Raw:     abcd"));
    }

    #[test]
    fn test_encoded_json_fields() {
        let parsed = EncodedHash::parse(ENCODED).unwrap();
        let json = encoded_json(&parsed);
        assert_eq!(json["variant"], "argon2i");
        assert_eq!(json["version"], 19);
        assert_eq!(json["memory"], 65536);
        assert_eq!(json["salt"], "736f6d6573616c74");
        assert_eq!(json["hashLength"], 32);
    }

    #[test]
    fn test_encoded_table_lists_parameters() {
        let parsed = EncodedHash::parse(ENCODED).unwrap();
        let table = encoded_table(&parsed);
        assert!(table.contains("argon2i"));
        assert!(table.contains("65536"));
        assert!(table.contains("0x13"));
    }
}
