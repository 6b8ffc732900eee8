// ABOUTME: Raw-terminal stream splice between the caller and an attached container

use std::pin::Pin;

use bollard::container::LogOutput;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::runtime::RuntimeError;

type OutputStream = Pin<Box<dyn Stream<Item = Result<LogOutput, bollard::errors::Error>> + Send>>;
type InputSink = Pin<Box<dyn AsyncWrite + Send>>;

/// Pumps host stdin into the container and container output back to the
/// host until the remote stream closes. The terminal is in raw mode for the
/// duration; the remote side owns line editing and echo.
pub(super) async fn splice(mut output: OutputStream, mut input: InputSink) -> Result<(), RuntimeError> {
    let _raw = RawModeGuard::enable()?;

    let stdin_pump = tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut buf = [0u8; 1024];
        loop {
            match stdin.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if input.write_all(&buf[..n]).await.is_err() {
                        break;
                    }
                    if input.flush().await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    let result = forward_output(&mut output).await;

    // The output stream is gone; the pending stdin read must not outlive it.
    stdin_pump.abort();
    result
}

async fn forward_output(output: &mut OutputStream) -> Result<(), RuntimeError> {
    let mut stdout = tokio::io::stdout();
    let mut stderr = tokio::io::stderr();

    while let Some(chunk) = output.next().await {
        match chunk.map_err(RuntimeError::Attach)? {
            LogOutput::StdOut { message } | LogOutput::Console { message } => {
                stdout.write_all(&message).await?;
                stdout.flush().await?;
            }
            LogOutput::StdErr { message } => {
                stderr.write_all(&message).await?;
                stderr.flush().await?;
            }
            LogOutput::StdIn { .. } => {}
        }
    }

    Ok(())
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, std::io::Error> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        debug!("terminal restored");
    }
}
