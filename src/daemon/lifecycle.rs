use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::Server;
use super::router::AppState;
use crate::application::ContainerService;
use crate::domain::ContainerMap;
use crate::infrastructure::compose::scan_dir;
use crate::infrastructure::config::Settings;
use crate::infrastructure::runtime::DockerCli;

/// Run the Seahorse server.
///
/// Scans the template directory, merges it with the engine's containers,
/// and serves until a shutdown signal arrives.
#[tokio::main]
pub async fn run(settings: Settings) -> Result<()> {
    info!("Seahorse server starting");

    let templates = match scan_dir(&settings.template_dir) {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "No compose templates loaded");
            ContainerMap::new()
        }
    };
    info!(
        templates = templates.len(),
        dir = %settings.template_dir.display(),
        "Scanned compose templates"
    );

    let runtime = Arc::new(DockerCli::new(
        settings.docker_host.clone(),
        settings.stop_timeout,
    ));
    if let Some(host) = &settings.docker_host {
        info!(host = %host, "Using remote docker");
    }

    let service = Arc::new(ContainerService::new(runtime, settings.env_file.clone()));
    service
        .load(templates)
        .await
        .context("Failed to list containers. Is the docker engine reachable?")?;

    Server::new(AppState::new(service), settings.port).run().await
}
