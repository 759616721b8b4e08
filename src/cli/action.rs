use anyhow::Result;
use reqwest::Client;

use super::server_url;
use crate::client::{ActionDispatcher, ConsoleSink};
use crate::domain::{Action, ContainerName};
use crate::infrastructure::config::Settings;

#[tokio::main]
pub async fn execute(
    action: Action,
    name: String,
    url: Option<String>,
    settings: &Settings,
) -> Result<()> {
    let name = ContainerName::new(name)?;
    let url = server_url(url, settings);

    let http = Client::new();
    let sink = ConsoleSink::new(http.clone(), &url);
    let dispatcher = ActionDispatcher::with_client(http, &url, sink)?;

    dispatcher.dispatch(action, &name).await?;
    Ok(())
}
