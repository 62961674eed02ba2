use argon_bridge_core::hex;

use crate::cli::SaltArgs;
use crate::security::generate_salt;

pub fn handle_salt(args: &SaltArgs) -> anyhow::Result<()> {
    let salt = generate_salt(args.length)?;
    println!("{}", hex::encode(&salt));
    Ok(())
}
