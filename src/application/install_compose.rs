use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::info;

use super::ServiceError;
use crate::domain::ContainerName;
use crate::infrastructure::compose::render_dir;
use crate::infrastructure::runtime::ContainerRuntime;

/// Use case: render a container's compose template into a scratch
/// directory and bring the project up from there.
pub struct InstallCompose<'a> {
    runtime: &'a dyn ContainerRuntime,
    env_file: &'a Path,
}

impl<'a> InstallCompose<'a> {
    pub fn new(runtime: &'a dyn ContainerRuntime, env_file: &'a Path) -> Self {
        Self { runtime, env_file }
    }

    pub async fn execute(
        &self,
        name: &ContainerName,
        template_dir: PathBuf,
    ) -> Result<(), ServiceError> {
        // The project directory is named after the container so compose
        // derives the same project name on every install.
        let workspace = TempDir::new()?;
        let project_dir = workspace.path().join(name.as_str());

        let render_into = project_dir.clone();
        tokio::task::spawn_blocking(move || -> Result<(), ServiceError> {
            fs::create_dir(&render_into)?;
            render_dir(&template_dir, &render_into)?;
            Ok(())
        })
        .await??;

        info!(name = %name, "Installing compose project");
        self.runtime.compose_up(&project_dir, self.env_file).await?;

        // workspace is removed on drop
        Ok(())
    }
}
