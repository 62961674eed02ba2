//! Hex input handling.
//!
//! Input must match `^[0-9a-fA-F]+$` once whitespace is removed, and must
//! have an even number of digits. Output is always lowercase.

use zeroize::Zeroizing;

use crate::error::{BridgeError, Result};

/// Check that `input` is acceptable hex without decoding it.
///
/// Whitespace anywhere in `input` is ignored. `field` names the input in
/// the returned error.
///
/// # Errors
///
/// Returns `BridgeError::InvalidHexEncoding` if the stripped input is
/// empty, contains a non-hex character, or has odd length.
pub fn validate(field: &'static str, input: &str) -> Result<()> {
    let mut digits = 0usize;
    for c in input.chars().filter(|c| !c.is_whitespace()) {
        if !c.is_ascii_hexdigit() {
            return Err(BridgeError::invalid_hex(field, "contains non-hex characters"));
        }
        digits += 1;
    }

    if digits == 0 {
        return Err(BridgeError::invalid_hex(field, "no hex digits"));
    }
    if digits % 2 != 0 {
        return Err(BridgeError::invalid_hex(
            field,
            format!("odd number of digits ({})", digits),
        ));
    }
    Ok(())
}

/// Decode a hex string into bytes, after [`validate`].
pub fn decode(field: &'static str, input: &str) -> Result<Zeroizing<Vec<u8>>> {
    validate(field, input)?;
    let stripped: Zeroizing<String> =
        Zeroizing::new(input.chars().filter(|c| !c.is_whitespace()).collect());

    ::hex::decode(stripped.as_bytes())
        .map(Zeroizing::new)
        .map_err(|e| BridgeError::invalid_hex(field, e.to_string()))
}

/// Render bytes as lowercase hex, two digits per byte.
pub fn encode(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}
