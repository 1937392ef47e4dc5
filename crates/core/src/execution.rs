use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Builds `<shell> -i -c <command>`, run in `working_directory` when given.
pub fn shell_command(shell: &str, command: &str, working_directory: Option<&str>) -> Command {
    let mut shell_command = Command::new(shell);
    shell_command.arg("-i").arg("-c").arg(command);

    if let Some(working_directory) = working_directory {
        info!("Using working directory: {working_directory}");
        shell_command.current_dir(working_directory);
    }

    shell_command
}

/// Runs a command with inherited stdio and waits for it.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits with a
/// non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Executing: {command:?}");
    let subprocess_exit_success = command.spawn()?.wait()?.success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit)
    }
}
