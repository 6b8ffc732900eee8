// ABOUTME: Error taxonomy for the interactive shell

use thiserror::Error;

use crate::runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid exit code: {0}")]
    InvalidExitCode(String),

    #[error("usage: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("command failed: {0}")]
    CommandFailed(std::process::ExitStatus),
}
