pub mod container_service;
pub mod install_compose;

pub use container_service::ContainerService;

use thiserror::Error;

use crate::domain::ContainerName;
use crate::infrastructure::compose::TemplateError;
use crate::infrastructure::runtime::RuntimeError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Cannot find container `{0}`")]
    NotFound(ContainerName),

    #[error("Container `{0}` has no compose template")]
    NoTemplate(ContainerName),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to prepare install directory: {0}")]
    Workspace(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
