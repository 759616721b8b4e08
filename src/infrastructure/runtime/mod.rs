use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ContainerName, ContainerState, EngineContainer};

mod docker;

pub use docker::DockerCli;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Failed to run `{command}`: {source}")]
    SpawnError {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Unexpected output from `{command}`: {reason}")]
    BadOutput { command: String, reason: String },

    #[error("Env file not found: {0}")]
    EnvFileMissing(PathBuf),
}

/// The container engine the manager drives.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List every container, running or not.
    async fn list(&self) -> Result<Vec<EngineContainer>, RuntimeError>;

    /// Start a container by engine id.
    async fn start(&self, id: &str) -> Result<(), RuntimeError>;

    /// Stop a container by engine id, waiting up to the configured timeout.
    async fn stop(&self, id: &str) -> Result<(), RuntimeError>;

    /// Current state of a container by name.
    async fn state(&self, name: &ContainerName) -> Result<ContainerState, RuntimeError>;

    /// Pull images and bring up the compose project in `project_dir`.
    async fn compose_up(&self, project_dir: &Path, env_file: &Path) -> Result<(), RuntimeError>;
}
