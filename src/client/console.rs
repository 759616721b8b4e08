use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{ActionSink, ClientError};
use crate::domain::{Action, ContainerInfo, ContainerName};

/// Terminal sink: "reload" re-fetches and prints the container listing.
pub struct ConsoleSink {
    http: Client,
    base_url: String,
}

impl ConsoleSink {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ActionSink for ConsoleSink {
    fn busy(&self, action: Action, name: &ContainerName) {
        eprintln!("{} {}...", action, name);
    }

    async fn reload(&self) -> Result<(), ClientError> {
        let containers = fetch_containers(&self.http, &self.base_url).await?;
        print_containers(&containers);
        Ok(())
    }

    fn log(&self, action: Action, text: &str) {
        info!(action = %action, "{}", text);
        println!("{}", text);
    }
}

/// GET the server's container listing.
pub async fn fetch_containers(
    http: &Client,
    base_url: &str,
) -> Result<Vec<ContainerInfo>, ClientError> {
    let url = format!("{}/api/containers", base_url.trim_end_matches('/'));
    let request_err = |source| ClientError::Request {
        url: url.clone(),
        source,
    };

    http.get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(request_err)?
        .json()
        .await
        .map_err(request_err)
}

pub fn print_containers(containers: &[ContainerInfo]) {
    if containers.is_empty() {
        println!("No containers.");
        return;
    }

    println!("{:<24} {:<14} {:<32} STATUS", "NAME", "STATE", "IMAGE");
    for c in containers {
        println!(
            "{:<24} {:<14} {:<32} {}",
            c.name.as_str(),
            c.state.as_str(),
            c.image.as_deref().unwrap_or("-"),
            c.status.as_deref().unwrap_or(""),
        );
    }
}
