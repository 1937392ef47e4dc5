use std::io::{stdin, stdout, Write};

use rust_how_core::error::Result;
use rust_how_core::safety::SafetyWarning;

use super::types::RunChoice;

/// Interprets one line of input to the run confirmation.
///
/// An empty answer means yes. `c` is only accepted when the command has
/// parameters to change.
pub fn parse_run_choice(input: &str, has_params: bool) -> Option<RunChoice> {
    match input.trim().to_lowercase().as_str() {
        "" | "y" | "yes" => Some(RunChoice::Yes),
        "n" | "no" => Some(RunChoice::No),
        "c" if has_params => Some(RunChoice::ChangeParams),
        _ => None,
    }
}

/// Confirms with the user whether the command should be run.
///
/// End of input counts as no, so a closed stdin never runs a command.
pub fn confirm_command_should_run(has_params: bool) -> Result<RunChoice> {
    loop {
        let prompt_change_params = if has_params {
            "/[c]hange parameters"
        } else {
            ""
        };

        print!("Are you sure you want to run? ([Y]es/[n]o{prompt_change_params}): ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(RunChoice::No);
        }

        if let Some(choice) = parse_run_choice(&input, has_params) {
            return Ok(choice);
        }
    }
}

/// Writes the final command followed by any safety warnings.
pub fn write_command_summary(
    out: &mut impl Write,
    command: &str,
    warnings: &[SafetyWarning],
) -> std::io::Result<()> {
    writeln!(out, "Command:\n{command}")?;

    if !warnings.is_empty() {
        writeln!(out, "Warning, this command may be destructive:")?;
        for warning in warnings {
            writeln!(out, "\t{warning}")?;
        }
    }

    Ok(())
}
