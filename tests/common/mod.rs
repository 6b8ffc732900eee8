// ABOUTME: Shared stub runtime recording engine calls for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use boxsh::models::{ContainerDescriptor, ImageDescriptor, RunSpec};
use boxsh::runtime::{ContainerRuntime, RuntimeError};

pub const CONTAINER_ID: &str = "abcdef1234567890";

/// In-memory engine double: serves canned listings and records every call
/// in order.
#[derive(Default)]
pub struct StubRuntime {
    containers: Vec<ContainerDescriptor>,
    images: Vec<ImageDescriptor>,
    fail_start: bool,
    fail_kill: bool,
    events: Arc<Mutex<Vec<String>>>,
}

impl StubRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_containers(mut self, containers: Vec<ContainerDescriptor>) -> Self {
        self.containers = containers;
        self
    }

    pub fn with_images(mut self, images: Vec<ImageDescriptor>) -> Self {
        self.images = images;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub fn failing_kill(mut self) -> Self {
        self.fail_kill = true;
        self
    }

    /// Handle to the call log; clone before handing the stub to the shell.
    pub fn event_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.events.clone()
    }

    fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

fn server_error(message: &str) -> bollard::errors::Error {
    bollard::errors::Error::DockerResponseServerError {
        status_code: 500,
        message: message.to_string(),
    }
}

#[async_trait]
impl ContainerRuntime for StubRuntime {
    async fn list_containers(&self) -> Result<Vec<ContainerDescriptor>, RuntimeError> {
        self.record("list_containers");
        Ok(self.containers.clone())
    }

    async fn list_images(&self) -> Result<Vec<ImageDescriptor>, RuntimeError> {
        self.record("list_images");
        Ok(self.images.clone())
    }

    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError> {
        self.record(format!("kill {}", id));
        if self.fail_kill {
            return Err(RuntimeError::Kill(server_error("no such container")));
        }
        Ok(())
    }

    async fn create_container(&self, spec: &RunSpec) -> Result<String, RuntimeError> {
        self.record(format!(
            "create {} cmd={:?} attach_output={}",
            spec.image, spec.cmd, spec.attach_output
        ));
        Ok(CONTAINER_ID.to_string())
    }

    async fn start_container(&self, id: &str) -> Result<(), RuntimeError> {
        if self.fail_start {
            self.record(format!("start-rejected {}", id));
            return Err(RuntimeError::Start(server_error("cannot start")));
        }
        self.record(format!("start {}", id));
        Ok(())
    }

    async fn attach_container(
        &self,
        id: &str,
        ready: oneshot::Sender<()>,
    ) -> Result<(), RuntimeError> {
        // `is_ok` proves the consumer was armed before attach was called.
        let consumed = ready.send(()).is_ok();
        self.record(format!("attach {} ready_consumed={}", id, consumed));
        Ok(())
    }
}
