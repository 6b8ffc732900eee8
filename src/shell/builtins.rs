// ABOUTME: The builtin command set: exit, ps, kill, ls

use chrono::{TimeZone, Utc};
use comfy_table::{presets, Table};

use super::classifier::Builtin;
use super::error::ShellError;
use crate::runtime::ContainerRuntime;

/// Dispatches a builtin and returns its rendered output; the loop owns all
/// terminal writes. `exit` with a valid code never returns.
pub(super) async fn dispatch(
    runtime: &dyn ContainerRuntime,
    cmd: Builtin,
    args: &[String],
) -> Result<String, ShellError> {
    match cmd {
        Builtin::Exit => exit(args),
        Builtin::Ps => ps(runtime).await,
        Builtin::Kill => kill(runtime, args).await,
        Builtin::Ls => ls(runtime).await,
    }
}

fn exit(args: &[String]) -> Result<String, ShellError> {
    let code = parse_exit_code(args)?;
    std::process::exit(code);
}

pub(super) fn parse_exit_code(args: &[String]) -> Result<i32, ShellError> {
    match args.first() {
        None => Ok(0),
        Some(raw) => raw
            .parse()
            .map_err(|_| ShellError::InvalidExitCode(raw.clone())),
    }
}

async fn ps(runtime: &dyn ContainerRuntime) -> Result<String, ShellError> {
    let containers = runtime.list_containers().await?;

    let mut table = listing_table(vec!["ID", "IMAGE", "CMD"]);
    for c in &containers {
        table.add_row(vec![
            c.short_id().to_string(),
            c.image.clone(),
            c.command.clone(),
        ]);
    }

    Ok(table.to_string())
}

async fn kill(runtime: &dyn ContainerRuntime, args: &[String]) -> Result<String, ShellError> {
    let id = args
        .first()
        .ok_or(ShellError::MissingArgument("kill <id>"))?;
    runtime.kill_container(id).await?;
    Ok(String::new())
}

async fn ls(runtime: &dyn ContainerRuntime) -> Result<String, ShellError> {
    let images = runtime.list_images().await?;

    let mut table = listing_table(vec!["ID", "SIZE", "DATE", "NAME"]);
    for image in &images {
        let Some(first_tag) = image.repo_tags.first() else {
            continue;
        };
        if first_tag.contains("<none>") {
            continue;
        }

        let date = Utc
            .timestamp_opt(image.created, 0)
            .single()
            .map(|t| t.format("%b %d").to_string())
            .unwrap_or_default();

        table.add_row(vec![
            image.short_id().to_string(),
            human_size(image.size),
            date,
            repo_name(first_tag).to_string(),
        ]);
    }

    Ok(table.to_string())
}

fn listing_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(header);
    table
}

/// Repository name is the first repo-tag cut at its last `:`, so registry
/// host:port prefixes survive.
fn repo_name(tag: &str) -> &str {
    tag.rsplit_once(':').map(|(name, _)| name).unwrap_or(tag)
}

fn human_size(bytes: i64) -> String {
    const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1000.0 && unit < UNITS.len() - 1 {
        size /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContainerDescriptor, ImageDescriptor};
    use crate::runtime::{MockContainerRuntime, RuntimeError};
    use mockall::predicate::eq;

    fn server_error(message: &str) -> bollard::errors::Error {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 500,
            message: message.to_string(),
        }
    }

    #[test]
    fn exit_code_defaults_to_zero() {
        assert_eq!(parse_exit_code(&[]).unwrap(), 0);
    }

    #[test]
    fn exit_code_parses_an_integer_argument() {
        assert_eq!(parse_exit_code(&["7".to_string()]).unwrap(), 7);
    }

    #[test]
    fn exit_code_rejects_non_integers() {
        let err = parse_exit_code(&["abc".to_string()]).unwrap_err();
        assert!(matches!(err, ShellError::InvalidExitCode(ref raw) if raw == "abc"));
    }

    #[tokio::test]
    async fn ps_renders_truncated_ids_in_engine_order() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_list_containers().returning(|| {
            Ok(vec![
                ContainerDescriptor {
                    id: "abc123def456".to_string(),
                    image: "alpine".to_string(),
                    command: "sh".to_string(),
                },
                ContainerDescriptor {
                    id: "def456abc789".to_string(),
                    image: "nginx".to_string(),
                    command: "nginx".to_string(),
                },
            ])
        });

        let rendered = ps(&runtime).await.unwrap();

        let first = rendered.find("abc12").expect("first row present");
        let second = rendered.find("def45").expect("second row present");
        assert!(first < second, "engine order preserved");
        assert!(!rendered.contains("abc123d"), "ids truncated to 5 chars");
        assert!(rendered.contains("alpine"));
        assert!(rendered.contains("nginx"));
    }

    #[tokio::test]
    async fn ps_surfaces_engine_errors() {
        let mut runtime = MockContainerRuntime::new();
        runtime
            .expect_list_containers()
            .returning(|| Err(RuntimeError::List(server_error("boom"))));

        let err = ps(&runtime).await.unwrap_err();
        assert!(matches!(err, ShellError::Runtime(RuntimeError::List(_))));
    }

    #[tokio::test]
    async fn kill_requires_an_identifier() {
        let runtime = MockContainerRuntime::new();
        let err = kill(&runtime, &[]).await.unwrap_err();
        assert!(matches!(err, ShellError::MissingArgument(_)));
    }

    #[tokio::test]
    async fn kill_forwards_the_identifier() {
        let mut runtime = MockContainerRuntime::new();
        runtime
            .expect_kill_container()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(()));

        let rendered = kill(&runtime, &["abc123".to_string()]).await.unwrap();
        assert!(rendered.is_empty());
    }

    #[tokio::test]
    async fn ls_skips_untagged_images_and_truncates_names() {
        let mut runtime = MockContainerRuntime::new();
        runtime.expect_list_images().returning(|| {
            Ok(vec![
                ImageDescriptor {
                    id: "sha256:0123456789ab".to_string(),
                    repo_tags: vec!["<none>:<none>".to_string()],
                    created: 1_400_000_000,
                    size: 5_312_000,
                },
                ImageDescriptor {
                    id: "sha256:fedcba987654".to_string(),
                    repo_tags: vec!["registry:5000/app:latest".to_string()],
                    created: 1_400_000_000,
                    size: 5_312_000,
                },
            ])
        });

        let rendered = ls(&runtime).await.unwrap();

        assert!(!rendered.contains("<none>"), "untagged images skipped");
        assert!(rendered.contains("registry:5000/app"));
        assert!(!rendered.contains("registry:5000/app:latest"));
        assert!(rendered.contains("fedcb"), "digest prefix dropped before truncation");
        assert!(rendered.contains("May 13"), "created date formatted");
    }

    #[test]
    fn repo_name_cuts_at_the_last_colon() {
        assert_eq!(repo_name("alpine:latest"), "alpine");
        assert_eq!(repo_name("registry:5000/app:tag"), "registry:5000/app");
        assert_eq!(repo_name("plain"), "plain");
    }

    #[test]
    fn human_size_steps_through_decimal_units() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(5_312_000), "5.31 MB");
        assert_eq!(human_size(2_000_000_000), "2.00 GB");
    }
}
