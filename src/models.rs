// ABOUTME: Transient descriptors the shell holds for display and follow-up engine calls

/// Number of identifier characters shown in listings.
const SHORT_ID_LEN: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    pub id: String,
    pub image: String,
    pub command: String,
}

impl ContainerDescriptor {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub id: String,
    pub repo_tags: Vec<String>,
    /// Creation time, unix seconds.
    pub created: i64,
    /// Size in bytes.
    pub size: i64,
}

impl ImageDescriptor {
    pub fn short_id(&self) -> &str {
        // Engine image ids carry a digest prefix; drop it before truncating.
        let id = self.id.strip_prefix("sha256:").unwrap_or(&self.id);
        short_id(id)
    }
}

/// Creation request for the run path. TTY allocation and open-stdin are
/// always requested; stdout/stderr attachment only for foreground runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub image: String,
    pub cmd: Vec<String>,
    pub attach_output: bool,
}

fn short_id(id: &str) -> &str {
    &id[..id.len().min(SHORT_ID_LEN)]
}
