//! HTTP surface of the time-estimate relay.
//!
//! - `POST /estimate-task-time` with `{ "taskTitle": "..." }`
//! - `GET /health`

use super::client::Estimator;
use super::error::RelayError;
use crate::config::RelayConfig;
use anyhow::Context;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Deserialize)]
struct EstimateRequest {
    #[serde(rename = "taskTitle", default)]
    task_title: Option<String>,
}

/// Open CORS: any origin, the relay's methods and the client headers
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub fn router(estimator: Estimator) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/estimate-task-time", post(estimate_task_time))
        .with_state(estimator)
        .layer(cors_layer())
}

/// Bind `config.listen` and serve until Ctrl-C
pub async fn run_server(config: RelayConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("invalid listen address '{}'", config.listen))?;

    if config.api_key().is_none() {
        tracing::warn!(env = %config.api_key_env, "no API key set, estimate requests will fail");
    }
    let estimator = Estimator::from_config(config)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("estimate relay listening on http://{local_addr}");

    axum::serve(listener, router(estimator))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn error_response(err: &RelayError) -> Response {
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.user_message() }))).into_response()
}

async fn estimate_task_time(State(estimator): State<Estimator>, body: Bytes) -> Response {
    let title = match serde_json::from_slice::<EstimateRequest>(&body) {
        Ok(request) => request.task_title.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "unreadable estimate request");
            return error_response(&RelayError::MissingTitle);
        }
    };

    match estimator.estimate(&title).await {
        Ok(estimate) => Json(estimate).into_response(),
        Err(e) => {
            tracing::warn!(code = e.code(), "estimate request failed");
            error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::estimate::Estimate;
    use serde_json::{json, Value};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Serve the relay on an ephemeral port, returning its base URL
    async fn spawn_relay(upstream: &MockServer, api_key: Option<&str>) -> String {
        let config = RelayConfig {
            base_url: upstream.uri(),
            timeout_secs: 5,
            ..RelayConfig::default()
        };
        let estimator = Estimator::new(config, api_key.map(str::to_string)).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router(estimator)).await;
        });
        format!("http://{addr}")
    }

    async fn mount_reply(upstream: &MockServer, status: u16, content: &str) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "choices": [{ "message": { "content": content } }]
            })))
            .mount(upstream)
            .await;
    }

    #[tokio::test]
    async fn test_health() {
        let upstream = MockServer::start().await;
        let base = spawn_relay(&upstream, Some("k")).await;

        let body: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_estimate_roundtrip() {
        let upstream = MockServer::start().await;
        mount_reply(&upstream, 200, r#"{"minutes": 1, "firstPrinciples": "Tiny.", "steps": ["Do it"]}"#).await;
        let base = spawn_relay(&upstream, Some("k")).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/estimate-task-time"))
            .json(&json!({ "taskTitle": "Reply to Ana" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let estimate: Estimate = response.json().await.unwrap();
        assert_eq!(estimate.minutes, 5);
        assert_eq!(estimate.first_principles, "Tiny.");
    }

    #[tokio::test]
    async fn test_bad_requests_are_400() {
        let upstream = MockServer::start().await;
        let base = spawn_relay(&upstream, Some("k")).await;
        let client = reqwest::Client::new();

        for body in [r#"{"taskTitle": "  "}"#, "{}", "not json", r#"{"taskTitle": 7}"#] {
            let response = client
                .post(format!("{base}/estimate-task-time"))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 400, "body: {body}");
            let json: Value = response.json().await.unwrap();
            assert_eq!(json["error"], "Task title is required");
        }
    }

    #[tokio::test]
    async fn test_upstream_statuses_pass_through() {
        for (upstream_status, expected) in [(429, 429), (402, 402), (500, 500)] {
            let upstream = MockServer::start().await;
            mount_reply(&upstream, upstream_status, "").await;
            let base = spawn_relay(&upstream, Some("k")).await;

            let response = reqwest::Client::new()
                .post(format!("{base}/estimate-task-time"))
                .json(&json!({ "taskTitle": "Email" }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status().as_u16(), expected);
            let json: Value = response.json().await.unwrap();
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_500() {
        let upstream = MockServer::start().await;
        let base = spawn_relay(&upstream, None).await;

        let response = reqwest::Client::new()
            .post(format!("{base}/estimate-task-time"))
            .json(&json!({ "taskTitle": "Email" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);
        let json: Value = response.json().await.unwrap();
        assert_eq!(json["error"], "AI service not configured");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let upstream = MockServer::start().await;
        let base = spawn_relay(&upstream, Some("k")).await;

        let response = reqwest::Client::new()
            .request(reqwest::Method::OPTIONS, format!("{base}/estimate-task-time"))
            .header("origin", "http://example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type,apikey")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
