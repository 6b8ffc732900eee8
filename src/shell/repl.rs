// ABOUTME: The interactive loop: prompt, read one line, classify, dispatch, repeat

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use super::classifier::{classify, Classification};
use super::error::ShellError;
use super::{builtins, exec, run};
use crate::runtime::ContainerRuntime;

const BANNER: &str = "the shell for the 2000nds";
const PROMPT: &str = "> ";

pub struct Shell {
    runtime: Arc<dyn ContainerRuntime>,
}

impl Shell {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Runs the session over the process's standard streams.
    pub async fn run(&self) -> Result<(), ShellError> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.run_with_io(reader, writer).await
    }

    /// Reads one line at a time until end-of-input. Blank lines re-prompt
    /// without dispatching; the first failing dispatch ends the session
    /// with that error.
    pub async fn run_with_io<R, W>(&self, reader: R, mut writer: W) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        writer.write_all(BANNER.as_bytes()).await?;
        writer.write_all(b"\n").await?;

        let mut lines = reader.lines();
        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                info!("end of input");
                return Ok(());
            };

            let Some(classification) = classify(&line) else {
                debug!("blank line");
                continue;
            };
            self.dispatch(classification, &mut writer).await?;
        }
    }

    async fn dispatch<W>(
        &self,
        classification: Classification,
        writer: &mut W,
    ) -> Result<(), ShellError>
    where
        W: AsyncWrite + Unpin,
    {
        match classification {
            Classification::Builtin { cmd, args } => {
                let rendered = builtins::dispatch(self.runtime.as_ref(), cmd, &args).await?;
                if !rendered.is_empty() {
                    writer.write_all(rendered.as_bytes()).await?;
                    writer.write_all(b"\n").await?;
                }
            }
            Classification::ContainerRun {
                image,
                args,
                detached,
            } => {
                run::run_container(self.runtime.as_ref(), &image, &args, detached).await?;
            }
            Classification::Exec { program, args } => {
                exec::run_external(&program, &args).await?;
            }
        }
        Ok(())
    }
}
