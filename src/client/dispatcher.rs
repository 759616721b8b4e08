use reqwest::{Client, Url};
use tracing::debug;

use super::{ActionSink, ClientError};
use crate::domain::{Action, Completion, ContainerName};

/// Sends container actions to the server and applies their completion
/// behavior through an [`ActionSink`].
///
/// The response status is not inspected: an error reply settles the
/// action just like a success. Only transport failures are errors.
pub struct ActionDispatcher<S> {
    http: Client,
    base_url: String,
    sink: S,
}

impl<S: ActionSink> ActionDispatcher<S> {
    pub fn new(base_url: &str, sink: S) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url, sink)
    }

    pub fn with_client(http: Client, base_url: &str, sink: S) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            sink,
        })
    }

    /// POST the bare container name to the action's path and return the
    /// response text.
    async fn post(&self, path: &str, name: &ContainerName) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let request_err = |source| ClientError::Request {
            url: url.clone(),
            source,
        };

        debug!(url = %url, name = %name, "Sending action");
        let response = self
            .http
            .post(&url)
            .body(name.as_str().to_string())
            .send()
            .await
            .map_err(request_err)?;

        let status = response.status();
        let text = response.text().await.map_err(request_err)?;
        debug!(url = %url, status = status.as_u16(), "Action settled");
        Ok(text)
    }

    async fn complete(&self, action: Action, text: String) -> Result<(), ClientError> {
        match action.completion() {
            Completion::Reload => self.sink.reload().await,
            Completion::Log => {
                self.sink.log(action, &text);
                Ok(())
            }
        }
    }

    async fn send(&self, action: Action, name: &ContainerName) -> Result<(), ClientError> {
        self.sink.busy(action, name);
        let text = self.post(action.path(), name).await?;
        self.complete(action, text).await
    }

    pub async fn start(&self, name: &ContainerName) -> Result<(), ClientError> {
        self.send(Action::Start, name).await
    }

    pub async fn stop(&self, name: &ContainerName) -> Result<(), ClientError> {
        self.send(Action::Stop, name).await
    }

    /// Stop, wait for the stop request to settle, then start. Reloads
    /// once, after the start.
    pub async fn restart(&self, name: &ContainerName) -> Result<(), ClientError> {
        self.sink.busy(Action::Restart, name);
        self.post(Action::Stop.path(), name).await?;
        let text = self.post(Action::Start.path(), name).await?;
        self.complete(Action::Restart, text).await
    }

    pub async fn update(&self, name: &ContainerName) -> Result<(), ClientError> {
        self.send(Action::Update, name).await
    }

    pub async fn install(&self, name: &ContainerName) -> Result<(), ClientError> {
        self.send(Action::Install, name).await
    }

    pub async fn dispatch(&self, action: Action, name: &ContainerName) -> Result<(), ClientError> {
        match action {
            Action::Start => self.start(name).await,
            Action::Stop => self.stop(name).await,
            Action::Restart => self.restart(name).await,
            Action::Update => self.update(name).await,
            Action::Install => self.install(name).await,
        }
    }
}
