// ABOUTME: Run/attach orchestration: create, start, splice streams after readiness

use std::io::Write;

use tokio::sync::oneshot;
use tracing::info;

use super::error::ShellError;
use crate::models::RunSpec;
use crate::runtime::ContainerRuntime;

/// Creates and starts a container for `image`. Unless detached, attaches
/// the caller's streams to it, blocking until the remote stream closes.
/// The synthetic first prompt is printed only once the engine has
/// acknowledged the attach.
pub(super) async fn run_container(
    runtime: &dyn ContainerRuntime,
    image: &str,
    args: &[String],
    detached: bool,
) -> Result<(), ShellError> {
    let spec = RunSpec {
        image: image.to_string(),
        cmd: args.to_vec(),
        attach_output: !detached,
    };

    let id = runtime.create_container(&spec).await?;
    runtime.start_container(&id).await?;

    if detached {
        info!("started detached container {}", id);
        return Ok(());
    }

    let (ready_tx, ready_rx) = oneshot::channel();
    let prompt = tokio::spawn(async move {
        // Fires at most once; a dropped sender means the attach never came up.
        if ready_rx.await.is_ok() {
            info!("attached");
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"# ");
            let _ = stdout.flush();
        }
    });

    // Blocks until the remote closes the stream. On error the container is
    // left running; the shell has crash-only semantics.
    runtime.attach_container(&id, ready_tx).await?;

    let _ = prompt.await;
    info!("detached");
    Ok(())
}
