//! argon-bridge CLI - Argon2 password hashing from the command line
//!
//! Thin front end over `argon_bridge_core`: flag and config handling here,
//! all hashing semantics in the core crate.

mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;
mod security;

use argon_bridge_core::VERSION;
use clap::Parser;

use crate::cli::{Cli, Commands, ConfigSubcommand};
use crate::commands::{batch, call, config as config_cmd, hash, inspect, misc, salt, verify};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Hash(args)) => {
            hash::handle_hash(args, cli.quiet)?;
        }
        Some(Commands::Call(args)) => {
            call::handle_call(args)?;
        }
        Some(Commands::Batch(args)) => {
            batch::handle_batch(args)?;
        }
        Some(Commands::Verify(args)) => {
            verify::handle_verify(args, cli.quiet)?;
        }
        Some(Commands::Inspect(args)) => {
            inspect::handle_inspect(args)?;
        }
        Some(Commands::Salt(args)) => {
            salt::handle_salt(args)?;
        }
        Some(Commands::Config(args)) => match &args.command {
            ConfigSubcommand::Init(init_args) => {
                config_cmd::handle_init(init_args, cli.quiet)?;
            }
            ConfigSubcommand::Show => {
                config_cmd::handle_show()?;
            }
            ConfigSubcommand::Path => {
                config_cmd::handle_path()?;
            }
        },
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("argon-bridge v{}", VERSION);
            println!("\nQuickstart:");
            println!("  argon-bridge salt");
            println!("  argon-bridge hash --salt <SALT>");
            println!("  argon-bridge verify --encoded '<ENCODED>'");
            println!("  echo '{{\"password\":\"pw\",\"salt\":\"somesalt\"}}' | argon-bridge call");
            println!("\nRun `argon-bridge --help` for full usage.");
        }
    }

    Ok(())
}
