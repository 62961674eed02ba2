use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use argon_bridge_core::VERSION;

/// Argon2 password hashing from the command line
#[derive(Parser)]
#[command(name = "argon-bridge")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Hash a password with an explicit salt
    Hash(HashArgs),

    /// Run one JSON hashing request and print the JSON response
    Call(CallArgs),

    /// Hash JSON lines concurrently, printing results in input order
    Batch(BatchArgs),

    /// Check a password against an encoded hash
    Verify(VerifyArgs),

    /// Show the parameters stored in an encoded hash
    Inspect(InspectArgs),

    /// Print a random salt as hex
    Salt(SaltArgs),

    /// Manage the config file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `hash` command
#[derive(Args)]
pub struct HashArgs {
    /// Password (falls back to ARGON_BRIDGE_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,

    /// Salt, at least 8 bytes once decoded
    #[arg(long)]
    pub salt: String,

    /// Treat password and salt as hex
    #[arg(long)]
    pub hex: bool,

    /// Variant: argon2d, argon2i or argon2id
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<String>,

    /// Argon2 version: 16 (0x10) or 19 (0x13)
    #[arg(long, value_name = "N", value_parser = parse_version)]
    pub argon_version: Option<i64>,

    /// Number of passes
    #[arg(short = 't', long)]
    pub iterations: Option<u32>,

    /// Memory cost in KiB
    #[arg(short = 'm', long, value_name = "KiB")]
    pub memory: Option<u32>,

    /// Number of lanes
    #[arg(short = 'p', long)]
    pub parallelism: Option<u32>,

    /// Output length in bytes
    #[arg(long, value_name = "N")]
    pub length: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the raw hash (hex)
    #[arg(long, conflicts_with_all = ["encoded_only", "json"])]
    pub raw_only: bool,

    /// Print only the encoded hash
    #[arg(long, conflicts_with = "json")]
    pub encoded_only: bool,
}

/// Arguments for the `call` command
#[derive(Args)]
pub struct CallArgs {
    /// JSON request file (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

/// Arguments for the `batch` command
#[derive(Args)]
pub struct BatchArgs {
    /// JSON lines file (reads stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Memory budget in KiB shared by running hashes
    #[arg(long, value_name = "KiB")]
    pub memory_budget: Option<u32>,

    /// Maximum hashes running at once
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

/// Arguments for the `verify` command
#[derive(Args)]
pub struct VerifyArgs {
    /// Encoded hash ($argon2id$v=19$...)
    #[arg(long)]
    pub encoded: String,

    /// Password (falls back to ARGON_BRIDGE_PASSWORD, then a prompt)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Encoded hash ($argon2id$v=19$...)
    #[arg(value_name = "ENCODED")]
    pub encoded: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `salt` command
#[derive(Args)]
pub struct SaltArgs {
    /// Salt length in bytes
    #[arg(long, default_value_t = 16)]
    pub length: usize,
}

/// Arguments for the `config` command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Write a config file with the built-in defaults
    Init(ConfigInitArgs),

    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,
}

/// Arguments for the `config init` command
#[derive(Args)]
pub struct ConfigInitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Accept decimal or 0x-prefixed hex.
fn parse_version(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(digits) => i64::from_str_radix(digits, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| format!("not a number: {}", value))
}
