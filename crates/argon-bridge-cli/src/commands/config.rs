use crate::cli::ConfigInitArgs;
use crate::config::{load_config, resolve_config_path, to_toml, write_config, CliConfig};

pub fn handle_init(args: &ConfigInitArgs, quiet: bool) -> anyhow::Result<()> {
    let path = resolve_config_path()?;
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            path.display()
        ));
    }
    write_config(&path, &CliConfig::default())?;
    if !quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Print the effective configuration: file values over built-in defaults.
pub fn handle_show() -> anyhow::Result<()> {
    let config = load_config()?;
    print!("{}", to_toml(&config)?);
    Ok(())
}

pub fn handle_path() -> anyhow::Result<()> {
    println!("{}", resolve_config_path()?.display());
    Ok(())
}
