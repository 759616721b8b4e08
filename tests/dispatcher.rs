use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{Router, extract::State, http::StatusCode, routing::post};
use tokio::net::TcpListener;

use seahorse::client::{ActionDispatcher, ActionSink, ClientError};
use seahorse::domain::{Action, ContainerName};

/// Shared event log written by both the mock server and the sink, so
/// tests can assert on the interleaving of requests and effects.
#[derive(Clone, Default)]
struct Events(Arc<Mutex<Vec<String>>>);

impl Events {
    fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

struct RecordingSink(Events);

#[async_trait]
impl ActionSink for RecordingSink {
    fn busy(&self, action: Action, name: &ContainerName) {
        self.0.push(format!("busy {} {}", action, name));
    }

    async fn reload(&self) -> Result<(), ClientError> {
        self.0.push("reload");
        Ok(())
    }

    fn log(&self, action: Action, text: &str) {
        self.0.push(format!("log {} {}", action, text));
    }
}

async fn mock_server(events: Events) -> String {
    let app = Router::new()
        .route(
            "/start",
            post(|State(ev): State<Events>, body: String| async move {
                ev.push(format!("POST /start {}", body));
                "started"
            }),
        )
        .route(
            "/stop",
            post(|State(ev): State<Events>, body: String| async move {
                // Slow stop: a start sent without waiting would land first
                tokio::time::sleep(Duration::from_millis(150)).await;
                ev.push(format!("POST /stop {}", body));
                (StatusCode::SERVICE_UNAVAILABLE, "engine busy")
            }),
        )
        .route(
            "/update",
            post(|State(ev): State<Events>, body: String| async move {
                ev.push(format!("POST /update {}", body));
                (StatusCode::INTERNAL_SERVER_ERROR, "update failed")
            }),
        )
        .route(
            "/install",
            post(|State(ev): State<Events>, body: String| async move {
                ev.push(format!("POST /install {}", body));
                format!("Installed {} (running)", body)
            }),
        )
        .with_state(events);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn setup() -> (Events, ActionDispatcher<RecordingSink>) {
    let events = Events::default();
    let url = mock_server(events.clone()).await;
    let dispatcher = ActionDispatcher::new(&url, RecordingSink(events.clone())).unwrap();
    (events, dispatcher)
}

fn nginx() -> ContainerName {
    ContainerName::new("nginx-1").unwrap()
}

#[tokio::test]
async fn test_start_posts_name_then_reloads() {
    let (events, dispatcher) = setup().await;

    dispatcher.start(&nginx()).await.unwrap();

    assert_eq!(
        events.take(),
        vec!["busy start nginx-1", "POST /start nginx-1", "reload"]
    );
}

#[tokio::test]
async fn test_stop_reloads_regardless_of_status() {
    let (events, dispatcher) = setup().await;

    dispatcher.stop(&nginx()).await.unwrap();

    assert_eq!(
        events.take(),
        vec!["busy stop nginx-1", "POST /stop nginx-1", "reload"]
    );
}

#[tokio::test]
async fn test_restart_waits_for_stop_before_start() {
    let (events, dispatcher) = setup().await;

    dispatcher.restart(&nginx()).await.unwrap();

    assert_eq!(
        events.take(),
        vec![
            "busy restart nginx-1",
            "POST /stop nginx-1",
            "POST /start nginx-1",
            "reload",
        ]
    );
}

#[tokio::test]
async fn test_update_logs_response_without_reload() {
    let (events, dispatcher) = setup().await;

    dispatcher.update(&nginx()).await.unwrap();

    assert_eq!(
        events.take(),
        vec![
            "busy update nginx-1",
            "POST /update nginx-1",
            "log update update failed",
        ]
    );
}

#[tokio::test]
async fn test_install_logs_response_without_reload() {
    let (events, dispatcher) = setup().await;

    dispatcher.dispatch(Action::Install, &nginx()).await.unwrap();

    let events = events.take();
    assert_eq!(
        events,
        vec![
            "busy install nginx-1",
            "POST /install nginx-1",
            "log install Installed nginx-1 (running)",
        ]
    );
    assert!(!events.iter().any(|e| e == "reload"));
}

#[tokio::test]
async fn test_unreachable_server_is_an_error_and_skips_reload() {
    // Grab a free port, then close it
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let events = Events::default();
    let dispatcher =
        ActionDispatcher::new(&format!("http://{}", addr), RecordingSink(events.clone())).unwrap();

    let err = dispatcher.start(&nginx()).await.unwrap_err();

    assert!(matches!(err, ClientError::Request { .. }));
    assert_eq!(events.take(), vec!["busy start nginx-1"]);
}

#[test]
fn test_invalid_base_url() {
    let result = ActionDispatcher::new("not a url", RecordingSink(Events::default()));
    assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
}
