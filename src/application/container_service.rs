use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::ServiceError;
use super::install_compose::InstallCompose;
use crate::domain::{ContainerInfo, ContainerMap, ContainerName, ContainerState};
use crate::infrastructure::runtime::ContainerRuntime;

/// Server-side use cases behind the action endpoints.
///
/// Holds the in-memory container map; every action goes to the engine
/// first and then refreshes the affected entry.
pub struct ContainerService {
    runtime: Arc<dyn ContainerRuntime>,
    containers: RwLock<ContainerMap>,
    env_file: PathBuf,
}

impl ContainerService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, env_file: PathBuf) -> Self {
        Self {
            runtime,
            containers: RwLock::new(ContainerMap::new()),
            env_file,
        }
    }

    /// Replace the map with `templates` merged with the engine's list.
    pub async fn load(&self, mut templates: ContainerMap) -> Result<(), ServiceError> {
        let engine = self.runtime.list().await?;
        templates.merge_engine(engine);
        info!(containers = templates.len(), "Container map loaded");
        *self.containers.write().await = templates;
        Ok(())
    }

    /// Containers sorted by name.
    pub async fn snapshot(&self) -> Vec<ContainerInfo> {
        self.containers.read().await.values().cloned().collect()
    }

    pub async fn get(&self, name: &ContainerName) -> Option<ContainerInfo> {
        self.containers.read().await.get(name).cloned()
    }

    /// Look the name up in a fresh engine listing; the map may be stale.
    async fn engine_id(&self, name: &ContainerName) -> Result<String, ServiceError> {
        self.runtime
            .list()
            .await?
            .into_iter()
            .find(|c| &c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| ServiceError::NotFound(name.clone()))
    }

    async fn refresh_state(&self, name: &ContainerName) -> Result<ContainerState, ServiceError> {
        let state = self.runtime.state(name).await?;
        self.containers.write().await.set_state(name, state.clone());
        Ok(state)
    }

    pub async fn start(&self, name: &ContainerName) -> Result<ContainerState, ServiceError> {
        let id = self.engine_id(name).await?;
        info!("Starting {}", name);
        self.runtime.start(&id).await?;
        self.refresh_state(name).await
    }

    pub async fn stop(&self, name: &ContainerName) -> Result<ContainerState, ServiceError> {
        let id = self.engine_id(name).await?;
        info!("Stopping {}", name);
        self.runtime.stop(&id).await?;
        self.refresh_state(name).await
    }

    /// Stop, then start once the stop has completed.
    pub async fn restart(&self, name: &ContainerName) -> Result<ContainerState, ServiceError> {
        let id = self.engine_id(name).await?;
        info!("Restarting {}", name);
        self.runtime.stop(&id).await?;
        self.runtime.start(&id).await?;
        self.refresh_state(name).await
    }

    /// Render the container's template and bring it up. Also used for
    /// updates, since `compose up` pulls and recreates changed services.
    pub async fn install(&self, name: &ContainerName) -> Result<ContainerState, ServiceError> {
        let template_dir = match self.get(name).await {
            Some(ContainerInfo {
                template_dir: Some(dir),
                ..
            }) => dir,
            Some(_) => return Err(ServiceError::NoTemplate(name.clone())),
            None => return Err(ServiceError::NotFound(name.clone())),
        };

        InstallCompose::new(self.runtime.as_ref(), &self.env_file)
            .execute(name, template_dir)
            .await?;

        // New services may have appeared
        let engine = self.runtime.list().await?;
        let mut containers = self.containers.write().await;
        containers.merge_engine(engine);
        Ok(containers
            .get(name)
            .map(|c| c.state.clone())
            .unwrap_or_default())
    }
}
