// ABOUTME: Capability trait over a remote container engine, mockable for tests

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::oneshot;

use crate::models::{ContainerDescriptor, ImageDescriptor, RunSpec};

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("engine connection failed: {0}")]
    Connection(#[source] bollard::errors::Error),

    #[error("listing failed: {0}")]
    List(#[source] bollard::errors::Error),

    #[error("kill rejected: {0}")]
    Kill(#[source] bollard::errors::Error),

    #[error("container creation rejected: {0}")]
    Creation(#[source] bollard::errors::Error),

    #[error("container start rejected: {0}")]
    Start(#[source] bollard::errors::Error),

    #[error("attach failed: {0}")]
    Attach(#[source] bollard::errors::Error),

    #[error("stream error during attach: {0}")]
    Stream(#[from] std::io::Error),
}

/// The engine operations the shell depends on. Constructed once at session
/// start and injected into the loop; safe for sequential use only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn list_containers(&self) -> Result<Vec<ContainerDescriptor>, RuntimeError>;

    async fn list_images(&self) -> Result<Vec<ImageDescriptor>, RuntimeError>;

    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError>;

    /// Creates a container and returns its identifier.
    async fn create_container(&self, spec: &RunSpec) -> Result<String, RuntimeError>;

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError>;

    /// Splices the caller's standard streams onto the container's streams.
    /// Fires `ready` exactly once, after the engine has accepted the attach
    /// and before any stream data is forwarded. Blocks until the remote
    /// stream closes.
    async fn attach_container(
        &self,
        id: &str,
        ready: oneshot::Sender<()>,
    ) -> Result<(), RuntimeError>;
}
