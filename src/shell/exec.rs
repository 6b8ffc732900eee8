// ABOUTME: Pass-through execution of host programs with inherited standard streams

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use super::error::ShellError;

/// Runs a host program with the caller's stdin/stdout/stderr. Spawn failure
/// and a non-zero exit are both errors.
pub(super) async fn run_external(program: &str, args: &[String]) -> Result<(), ShellError> {
    debug!("executing host program {}", program);

    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        return Err(ShellError::CommandFailed(status));
    }

    Ok(())
}
