//! In-process stand-ins for the analysis service

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

pub const VERDICT: &str = r#"{"label":"authentic","score":0.92}"#;

pub const DESCRIPTOR: &str = r#"{"name":"VerifyLens API","version":"1.0.0"}"#;

/// One multipart part as the service saw it
#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One analysis request as the service saw it
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub media_type: String,
    pub parts: Vec<ReceivedPart>,
}

#[derive(Clone)]
struct ServiceState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Running mock service
pub struct MockService {
    pub url: String,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockService {
    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle_analyze(
    Path(media_type): Path<String>,
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Response {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }

    state
        .requests
        .lock()
        .unwrap()
        .push(ReceivedRequest { media_type, parts });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

async fn handle_root() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], DESCRIPTOR).into_response()
}

/// Serve `/analyze/:media_type` answering every upload with `status` and `body`
pub async fn spawn_service(status: StatusCode, body: &'static str) -> MockService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock service");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = ServiceState {
        status,
        body,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/", get(handle_root))
        .route("/analyze/:media_type", post(handle_analyze))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockService {
        url: format!("http://{addr}"),
        requests,
    }
}

/// Accept connections and drop them before answering
pub async fn spawn_resetting_listener() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    format!("http://{addr}")
}

/// URL of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
