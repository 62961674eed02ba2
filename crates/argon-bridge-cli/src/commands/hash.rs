use secrecy::ExposeSecret;

use argon_bridge_core::{HashingConfig, Variant};

use crate::cli::HashArgs;
use crate::config::{load_config, DefaultsSection};
use crate::errors::CliError;
use crate::helpers::resolve_password;
use crate::output::{hash_text, print_json_pretty};

pub fn handle_hash(args: &HashArgs, quiet: bool) -> anyhow::Result<()> {
    let settings = load_config()?;
    let password = resolve_password(args.password.clone())?;

    let config = build_config(args, &settings.defaults, password.expose_secret());
    let result = argon_bridge_core::hash(&config).map_err(CliError::from)?;

    if args.raw_only {
        println!("{}", result.raw_hash);
    } else if args.encoded_only {
        println!("{}", result.encoded_hash);
    } else if args.json {
        print_json_pretty(&serde_json::to_value(&result)?)?;
    } else {
        println!("{}", hash_text(&result, quiet));
    }
    Ok(())
}

/// Config-file defaults first, then any flags given.
fn build_config(args: &HashArgs, defaults: &DefaultsSection, password: &str) -> HashingConfig {
    let mut config = defaults.apply(HashingConfig::new(password, args.salt.as_str()));

    if args.hex {
        config = config.with_hex_encoded(true);
    }
    if let Some(name) = &args.variant {
        if Variant::from_name(name).is_none() {
            tracing::warn!(variant = %name, "unknown variant, hashing with argon2id");
        }
        config = config.with_variant_name(name.clone());
    }
    if let Some(version) = args.argon_version {
        config = config.with_version(version);
    }
    if let Some(iterations) = args.iterations {
        config = config.with_iterations(iterations);
    }
    if let Some(memory) = args.memory {
        config = config.with_memory(memory);
    }
    if let Some(parallelism) = args.parallelism {
        config = config.with_parallelism(parallelism);
    }
    if let Some(length) = args.length {
        config = config.with_hash_length(length);
    }
    config
}
