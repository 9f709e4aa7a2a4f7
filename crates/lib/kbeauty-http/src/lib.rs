//! JSON HTTP server for kbeauty-mcp.
//!
//! Exposes the catalog tools to plain HTTP clients: `POST /tools/call` takes a
//! tool name and an argument object and returns the rendered text.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use kbeauty_core::{KBeautyControlPlane, ToolName};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

pub const DEFAULT_HTTP_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 4110);

/// Configuration for the tool-call HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl HttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            max_body_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_ADDR)
    }
}

/// HTTP server wrapper.
pub struct HttpServer {
    config: HttpServerConfig,
    state: AppState,
}

impl HttpServer {
    #[must_use]
    pub const fn new(control: Arc<KBeautyControlPlane>, config: HttpServerConfig) -> Self {
        let state = AppState {
            control,
            request_timeout: config.request_timeout,
        };
        Self { config, state }
    }

    /// Runs the HTTP server until shutdown.
    ///
    /// # Errors
    /// Returns any listener or server error.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = build_router(self.state, self.config.max_body_bytes);

        info!("kbeauty-http listening on {addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    control: Arc<KBeautyControlPlane>,
    request_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn timeout() -> Self {
        Self {
            status: StatusCode::REQUEST_TIMEOUT,
            message: "tool call timed out".to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: rejection.body_text(),
            };
        }
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse { error: self.message });
        (self.status, payload).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ToolCallPayload {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct ToolCallResponse {
    tool: String,
    text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct ToolDescriptor {
    name: String,
    description: String,
    required: Vec<String>,
}

fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(
        ToolName::ALL
            .into_iter()
            .map(|tool| ToolDescriptor {
                name: tool.as_str().to_string(),
                description: tool.description().to_string(),
                required: tool
                    .required_arguments()
                    .iter()
                    .map(|field| (*field).to_string())
                    .collect(),
            })
            .collect(),
    )
}

async fn call_tool(
    State(state): State<AppState>,
    payload: Result<Json<ToolCallPayload>, JsonRejection>,
) -> Result<Json<ToolCallResponse>, ApiError> {
    let Json(payload) = payload?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let arguments = payload.arguments.unwrap_or_default();
    debug!(tool = name, "http tool call");
    let text = tokio::time::timeout(state.request_timeout, state.control.call(name, &arguments))
        .await
        .map_err(|_| ApiError::timeout())?;

    Ok(Json(ToolCallResponse {
        tool: name.to_string(),
        text,
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use kbeauty_store::Catalog;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let catalog = Catalog::builtin().expect("builtin catalog");
        let state = AppState {
            control: Arc::new(KBeautyControlPlane::new(Arc::new(catalog))),
            request_timeout: Duration::from_secs(5),
        };
        build_router(state, 1024)
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/tools/call")
            .header("content-type", "application/json")
            .body(body.into())
            .expect("request")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn tools_lists_required_arguments() {
        let response = router()
            .oneshot(Request::get("/tools").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let tools: Vec<ToolDescriptor> =
            serde_json::from_value(body_json(response).await).expect("descriptors");
        assert_eq!(tools.len(), ToolName::ALL.len());
        assert_eq!(tools[1].name, "get_product_info");
        assert_eq!(tools[1].required, ["brand"]);
    }

    #[tokio::test]
    async fn call_returns_rendered_text() {
        let body = json!({"name": "get_product_info", "arguments": {"brand": "cosrx", "product_name": "snail"}});
        let response = router()
            .oneshot(post_json(body.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let payload: ToolCallResponse =
            serde_json::from_value(body_json(response).await).expect("tool response");
        assert_eq!(payload.tool, "get_product_info");
        assert!(payload.text.starts_with("## COSRX Products"));
    }

    #[tokio::test]
    async fn unknown_tool_is_still_ok() {
        let response = router()
            .oneshot(post_json(json!({"name": "teleport"}).to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = body_json(response).await;
        assert_eq!(payload["text"], "Unknown tool: teleport");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = router()
            .oneshot(post_json("{not json"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert!(payload["error"].is_string());
    }

    #[tokio::test]
    async fn blank_name_is_bad_request() {
        let response = router()
            .oneshot(post_json(json!({"name": "  "}).to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "name is required");
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let padding = "x".repeat(4096);
        let body = json!({"name": "search_brands", "arguments": {"query": padding}});
        let response = router()
            .oneshot(post_json(body.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
