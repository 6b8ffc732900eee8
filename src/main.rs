// ABOUTME: Main entry point: logging, config, engine connection, interactive loop

use std::sync::Arc;

use anyhow::Result;

use boxsh::config::AppConfig;
use boxsh::docker::DockerRuntime;
use boxsh::shell::Shell;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    setup_panic_handler();

    let config = AppConfig::load()?;
    let endpoint = config.resolve_endpoint()?;
    let runtime = DockerRuntime::connect(&endpoint, config.docker.show_all).await?;

    let shell = Shell::new(Arc::new(runtime));
    if let Err(err) = shell.run().await {
        tracing::error!("fatal: {}", err);
        eprintln!("boxsh: {}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    // Log to a file so log lines never corrupt the interactive session.
    let log_dir = std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(".boxsh").join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".boxsh/logs"));

    let _ = std::fs::create_dir_all(&log_dir);

    let log_file = log_dir.join(format!(
        "boxsh-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .expect("Failed to create log file");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boxsh=info".into()),
        )
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // An attach may have left the terminal in raw mode.
        let _ = crossterm::terminal::disable_raw_mode();

        tracing::error!("application panicked: {}", panic_info);
        eprintln!("boxsh panicked: {}", panic_info);
    }));
}
