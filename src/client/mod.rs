//! HTTP client for the action endpoints.

mod console;
mod dispatcher;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Action, ContainerName};

pub use console::{ConsoleSink, fetch_containers, print_containers};
pub use dispatcher::ActionDispatcher;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
}

/// Where the dispatcher reports progress and results.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Called before a request is sent.
    fn busy(&self, action: Action, name: &ContainerName);

    /// Called once a reloading action has settled.
    async fn reload(&self) -> Result<(), ClientError>;

    /// Called with the response text of a logging action.
    fn log(&self, action: Action, text: &str);
}
