use argon_bridge_core::EncodedHash;

use crate::cli::InspectArgs;
use crate::errors::CliError;
use crate::output::{encoded_json, encoded_table, print_json_pretty};

pub fn handle_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let parsed = EncodedHash::parse(args.encoded.trim()).map_err(CliError::from)?;
    if args.json {
        print_json_pretty(&encoded_json(&parsed))?;
    } else {
        println!("{}", encoded_table(&parsed));
    }
    Ok(())
}
