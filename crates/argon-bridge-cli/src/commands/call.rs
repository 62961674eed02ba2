use argon_bridge_core::call_json;

use crate::cli::CallArgs;
use crate::errors::CliError;
use crate::helpers::read_input;
use crate::output::print_json_line;

/// One request in, one response out. Failures are JSON on stdout too; the
/// exit code carries the error code.
pub fn handle_call(args: &CallArgs) -> anyhow::Result<()> {
    let input = read_input(args.file.as_deref())?;
    let response = call_json(&input);
    print_json_line(&response.to_value())?;

    match response.error_code() {
        Some(code) => Err(CliError::Reported(code).into()),
        None => Ok(()),
    }
}
