use argon_bridge_core::MIN_SALT_LEN;

/// Upper bound for `salt --length`.
pub const MAX_SALT_LEN: usize = 1024;

/// Fresh random salt bytes from the OS.
pub fn generate_salt(length: usize) -> anyhow::Result<Vec<u8>> {
    if !(MIN_SALT_LEN..=MAX_SALT_LEN).contains(&length) {
        return Err(anyhow::anyhow!(
            "Salt length must be between {} and {} bytes (got {})",
            MIN_SALT_LEN,
            MAX_SALT_LEN,
            length
        ));
    }
    let mut bytes = vec![0u8; length];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| anyhow::anyhow!("Failed to generate salt: {}", e))?;
    Ok(bytes)
}
