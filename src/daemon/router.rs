use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::ContainerService;
use crate::domain::{Action, ContainerInfo, ContainerName};

use super::embedded_assets::{SCRIPT_JS, SCRIPT_PATH};
use super::error::AppError;
use super::index::render_index;

/// Shared state for the router
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContainerService>,
}

impl AppState {
    pub fn new(service: Arc<ContainerService>) -> Self {
        Self { service }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(SCRIPT_PATH, get(script))
        .route("/api/containers", get(list_containers))
        .route(Action::Start.path(), post(start))
        .route(Action::Stop.path(), post(stop))
        .route(Action::Restart.path(), post(restart))
        .route(Action::Install.path(), post(install))
        // Update re-renders and re-applies the template, same as install
        .route(Action::Update.path(), post(update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.service.snapshot().await))
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

async fn list_containers(State(state): State<AppState>) -> Json<Vec<ContainerInfo>> {
    Json(state.service.snapshot().await)
}

/// The request body is the bare container name.
fn parse_name(body: String) -> Result<ContainerName, AppError> {
    Ok(ContainerName::new(body)?)
}

async fn start(State(state): State<AppState>, body: String) -> Result<String, AppError> {
    let name = parse_name(body)?;
    let new_state = state.service.start(&name).await?;
    info!(name = %name, state = %new_state, "Container started");
    Ok(format!("{}: {}", name, new_state))
}

async fn stop(State(state): State<AppState>, body: String) -> Result<String, AppError> {
    let name = parse_name(body)?;
    let new_state = state.service.stop(&name).await?;
    info!(name = %name, state = %new_state, "Container stopped");
    Ok(format!("{}: {}", name, new_state))
}

async fn restart(State(state): State<AppState>, body: String) -> Result<String, AppError> {
    let name = parse_name(body)?;
    let new_state = state.service.restart(&name).await?;
    info!(name = %name, state = %new_state, "Container restarted");
    Ok(format!("{}: {}", name, new_state))
}

async fn install(State(state): State<AppState>, body: String) -> Result<String, AppError> {
    let name = parse_name(body)?;
    let new_state = state.service.install(&name).await?;
    info!(name = %name, state = %new_state, "Compose project installed");
    Ok(format!("Installed {} ({})", name, new_state))
}

async fn update(State(state): State<AppState>, body: String) -> Result<String, AppError> {
    let name = parse_name(body)?;
    let new_state = state.service.install(&name).await?;
    info!(name = %name, state = %new_state, "Compose project updated");
    Ok(format!("Updated {} ({})", name, new_state))
}
