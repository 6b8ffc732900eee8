// ABOUTME: Bollard-backed implementation of the ContainerRuntime capability

use async_trait::async_trait;
use bollard::container::{
    AttachContainerOptions, AttachContainerResults, Config, CreateContainerOptions,
    KillContainerOptions, ListContainersOptions, StartContainerOptions,
};
use bollard::image::ListImagesOptions;
use bollard::Docker;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::models::{ContainerDescriptor, ImageDescriptor, RunSpec};
use crate::runtime::{ContainerRuntime, RuntimeError};

use super::attach;

/// Request timeout in seconds, matching the bollard default.
const CLIENT_TIMEOUT: u64 = 120;

pub struct DockerRuntime {
    docker: Docker,
    show_all: bool,
}

impl DockerRuntime {
    /// Connects to the engine at `endpoint` and pings it. Unreachability is
    /// a startup error; nothing else is attempted.
    pub async fn connect(endpoint: &str, show_all: bool) -> Result<Self, RuntimeError> {
        let docker = if endpoint.starts_with("unix://") || endpoint.starts_with('/') {
            Docker::connect_with_unix(endpoint, CLIENT_TIMEOUT, bollard::API_DEFAULT_VERSION)
        } else {
            Docker::connect_with_http(endpoint, CLIENT_TIMEOUT, bollard::API_DEFAULT_VERSION)
        }
        .map_err(RuntimeError::Connection)?;

        docker.ping().await.map_err(RuntimeError::Connection)?;
        info!("connected to container engine at {}", endpoint);

        Ok(Self { docker, show_all })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn list_containers(&self) -> Result<Vec<ContainerDescriptor>, RuntimeError> {
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions::<String> {
                all: self.show_all,
                ..Default::default()
            }))
            .await
            .map_err(RuntimeError::List)?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerDescriptor {
                id: c.id.unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                command: c.command.unwrap_or_default(),
            })
            .collect())
    }

    async fn list_images(&self) -> Result<Vec<ImageDescriptor>, RuntimeError> {
        let images = self
            .docker
            .list_images(Some(ListImagesOptions::<String>::default()))
            .await
            .map_err(RuntimeError::List)?;

        Ok(images
            .into_iter()
            .map(|i| ImageDescriptor {
                id: i.id,
                repo_tags: i.repo_tags,
                created: i.created,
                size: i.size,
            })
            .collect())
    }

    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError> {
        debug!("killing container {}", id);
        self.docker
            .kill_container(id, None::<KillContainerOptions<String>>)
            .await
            .map_err(RuntimeError::Kill)
    }

    async fn create_container(&self, spec: &RunSpec) -> Result<String, RuntimeError> {
        let config = Config {
            image: Some(spec.image.clone()),
            cmd: if spec.cmd.is_empty() {
                None
            } else {
                Some(spec.cmd.clone())
            },
            tty: Some(true),
            open_stdin: Some(true),
            attach_stdin: Some(true),
            attach_stdout: Some(spec.attach_output),
            attach_stderr: Some(spec.attach_output),
            ..Default::default()
        };

        let response = self
            .docker
            .create_container(None::<CreateContainerOptions<String>>, config)
            .await
            .map_err(RuntimeError::Creation)?;

        info!("created container {} from image {}", response.id, spec.image);
        Ok(response.id)
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        self.docker
            .start_container(id, None::<StartContainerOptions<String>>)
            .await
            .map_err(RuntimeError::Start)?;

        info!("started container {}", id);
        Ok(())
    }

    async fn attach_container(
        &self,
        id: &str,
        ready: oneshot::Sender<()>,
    ) -> Result<(), RuntimeError> {
        let options = AttachContainerOptions::<String> {
            stdin: Some(true),
            stdout: Some(true),
            stderr: Some(true),
            stream: Some(true),
            logs: Some(false),
            // No detach sequence: closing the remote stream is the only way out.
            detach_keys: None,
        };

        let AttachContainerResults { output, input } = self
            .docker
            .attach_container(id, Some(options))
            .await
            .map_err(RuntimeError::Attach)?;

        // The engine accepted the upgrade; streaming may begin.
        let _ = ready.send(());

        attach::splice(output, input).await
    }
}
