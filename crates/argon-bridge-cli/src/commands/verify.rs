use secrecy::ExposeSecret;

use crate::cli::VerifyArgs;
use crate::errors::CliError;
use crate::helpers::resolve_password;

pub fn handle_verify(args: &VerifyArgs, quiet: bool) -> anyhow::Result<()> {
    let password = resolve_password(args.password.clone())?;
    let matches = argon_bridge_core::verify(password.expose_secret().as_bytes(), &args.encoded)
        .map_err(CliError::from)?;

    if !matches {
        return Err(CliError::Mismatch.into());
    }
    if !quiet {
        println!("Password matches");
    }
    Ok(())
}
