// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use fieldwatch::config::Config;
use fieldwatch::models::{DisplayRing, DrawnGeometry, LatLng};
use fieldwatch::routes::create_router;
use fieldwatch::services::{AnalysisClient, FieldSession, GeocodingClient};
use fieldwatch::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Canned reply from a mock backend: status, raw body, delay before replying.
#[allow(dead_code)]
pub struct MockReply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = dyn Fn(&serde_json::Value) -> MockReply + Send + Sync;

/// In-process stand-in for the analysis service.
pub struct MockAnalysis {
    pub url: String,
    hits: Arc<AtomicUsize>,
    requests: Arc<std::sync::Mutex<Vec<serde_json::Value>>>,
}

#[allow(dead_code)]
impl MockAnalysis {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    hits: Arc<AtomicUsize>,
    requests: Arc<std::sync::Mutex<Vec<serde_json::Value>>>,
    responder: Arc<Responder>,
}

async fn mock_analyze(
    State(state): State<MockState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().unwrap().push(body.clone());

    let reply = (state.responder)(&body);
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    (
        reply.status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

/// Start a mock analysis service answering `/analyze-farm` with `responder`.
#[allow(dead_code)]
pub async fn spawn_mock_analysis<F>(responder: F) -> MockAnalysis
where
    F: Fn(&serde_json::Value) -> MockReply + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(std::sync::Mutex::new(Vec::new()));
    let state = MockState {
        hits: hits.clone(),
        requests: requests.clone(),
        responder: Arc::new(responder),
    };

    let app = Router::new()
        .route("/analyze-farm", post(mock_analyze))
        .with_state(state);

    MockAnalysis {
        url: serve(app).await,
        hits,
        requests,
    }
}

/// Start a mock geocoder whose `/search` always returns `body`.
#[allow(dead_code)]
pub async fn spawn_mock_geocoder(body: &'static str) -> String {
    let app = Router::new().route(
        "/search",
        get(move || async move { ([(header::CONTENT_TYPE, "application/json")], body) }),
    );
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Mock server has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });
    format!("http://{}", addr)
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No address");
    drop(listener);
    format!("http://{}", addr)
}

/// Field session talking to the analysis service at `analysis_url`.
#[allow(dead_code)]
pub fn test_session(analysis_url: &str) -> FieldSession {
    let client = AnalysisClient::new(analysis_url, None).expect("Failed to build client");
    FieldSession::new(client)
}

/// Create a test app wired to the given backends.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(analysis_url: &str, geocoder_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        analysis_api_url: analysis_url.to_string(),
        geocoder_url: geocoder_url.to_string(),
        ..Config::default()
    };
    let geocoder = GeocodingClient::new(&config.geocoder_url).expect("Failed to build geocoder");

    let state = Arc::new(AppState {
        session: test_session(&config.analysis_api_url),
        geocoder,
        config,
    });

    (create_router(state.clone()), state)
}

/// The rectangle from the dashboard walkthrough: (23.025, 72.570) to (23.027, 72.575).
#[allow(dead_code)]
pub fn sample_rectangle() -> DrawnGeometry {
    DrawnGeometry::Rectangle {
        ring: DisplayRing::new(vec![
            LatLng::new(23.025, 72.570),
            LatLng::new(23.027, 72.570),
            LatLng::new(23.027, 72.575),
            LatLng::new(23.025, 72.575),
        ]),
    }
}

/// Backend reply for a healthy wheat field.
#[allow(dead_code)]
pub const HEALTHY_REPLY: &str = r#"{
    "indices": {"NDVI": 0.72, "EVI": 0.65, "MSI": 0.30},
    "health_status": "Healthy crop",
    "healthy_range": "NDVI > 0.6"
}"#;
