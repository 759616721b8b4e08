use anyhow::Result;
use reqwest::Client;

use super::server_url;
use crate::client::{fetch_containers, print_containers};
use crate::infrastructure::config::Settings;

#[tokio::main]
pub async fn execute(url: Option<String>, settings: &Settings) -> Result<()> {
    let url = server_url(url, settings);
    let containers = fetch_containers(&Client::new(), &url).await?;
    print_containers(&containers);
    Ok(())
}
