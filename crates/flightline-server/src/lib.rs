//! HTTP relay for aviationstack endpoints.
//!
//! The relay re-exposes the upstream `flights` and `airports` endpoints
//! under `/api/...`, injecting the server-held credential into every
//! outbound query and forwarding the upstream response verbatim: same
//! status, same content type when available, same raw body. The only
//! response the relay constructs itself is the 500 envelope produced when
//! the fetch itself fails. Everything that is not an API route is served
//! from a static asset directory.

pub mod error;

pub use error::{Result, ServerError};

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use flightline_core::{Endpoint, QueryParams, UpstreamClient};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Configuration for the relay server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory served for every non-API path
    pub public_dir: PathBuf,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 3000).into(),
            public_dir: PathBuf::from("public"),
            enable_cors: true,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the static asset directory.
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }
}

/// Shared application state: one upstream client handle, cloned per
/// request. No other state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub client: UpstreamClient,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for `GET /api/flights`: caller parameters only, no injected
/// defaults.
async fn flights_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    relay(&state, Endpoint::Flights, QueryParams::from_pairs(pairs)).await
}

/// Handler for `GET /api/airports`: paging defaults are injected first,
/// then caller parameters are overlaid so explicit values win.
async fn airports_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let mut params = QueryParams::page_defaults();
    params.overlay(&QueryParams::from_pairs(pairs));
    relay(&state, Endpoint::Airports, params).await
}

/// Fetch from upstream and forward the response unchanged. A failure to
/// perform the fetch is the one case the relay answers for itself.
async fn relay(state: &AppState, endpoint: Endpoint, params: QueryParams) -> Response {
    match state.client.fetch_raw(endpoint, &params).await {
        Ok(upstream) => {
            log::debug!(
                "relayed {} upstream response ({})",
                endpoint.as_str(),
                upstream.status
            );
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let content_type = upstream
                .content_type
                .unwrap_or_else(|| "application/json".to_string());
            (status, [(header::CONTENT_TYPE, content_type)], upstream.body).into_response()
        }
        Err(err) => {
            log::error!("proxy fetch for {} failed: {}", endpoint.as_str(), err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "proxy_error",
                    "message": err.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// The relay server: two API routes plus static assets.
pub struct ProxyServer {
    client: UpstreamClient,
    config: ServerConfig,
}

impl ProxyServer {
    /// Create a new server with the given upstream client and default
    /// configuration.
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            client,
            config: ServerConfig::default(),
        }
    }

    /// Create a new server with custom configuration.
    pub fn with_config(client: UpstreamClient, config: ServerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        let state = AppState {
            client: self.client.clone(),
        };

        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/api/flights", get(flights_handler))
            .route("/api/airports", get(airports_handler))
            .fallback_service(ServeDir::new(&self.config.public_dir))
            .with_state(state);

        router = router.layer(TraceLayer::new_for_http());
        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }

    /// Start the server and listen for connections.
    ///
    /// This method will block until the server is shut down.
    pub async fn serve(self) -> Result<()> {
        let router = self.build_router();
        let listener = self.bind().await?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server will shut down when the provided shutdown signal is
    /// received.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = self.bind().await?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("proxy server shut down gracefully");
        Ok(())
    }

    async fn bind(&self) -> Result<TcpListener> {
        let listener = TcpListener::bind(self.config.bind_addr).await.map_err(|e| {
            ServerError::config_error(format!(
                "Failed to bind to {}: {}",
                self.config.bind_addr, e
            ))
        })?;

        log::info!("proxy server listening on {}", self.config.bind_addr);
        log::info!("Flights relay: http://{}/api/flights", self.config.bind_addr);
        log::info!("Airports relay: http://{}/api/airports", self.config.bind_addr);
        log::info!(
            "Static assets from: {}",
            self.config.public_dir.display()
        );

        Ok(listener)
    }
}

/// Utility function to create a shutdown signal from Ctrl+C.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::extract::RawQuery;
    use axum::http::Request;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt; // for `oneshot`

    /// Bind a stub upstream on an ephemeral port that answers every
    /// `/v1/{endpoint}` call with a canned response and records the query
    /// string it received.
    async fn spawn_upstream(
        status: StatusCode,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, Arc<Mutex<Vec<String>>>) {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let recorded = queries.clone();

        let app = Router::new().route(
            "/v1/{endpoint}",
            get(move |RawQuery(query): RawQuery| {
                let recorded = recorded.clone();
                async move {
                    recorded.lock().unwrap().push(query.unwrap_or_default());
                    (status, [(header::CONTENT_TYPE, content_type)], body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}/v1", addr), queries)
    }

    fn proxy_router(base_url: String) -> Router {
        let client = UpstreamClient::with_base_url("server-key".to_string(), base_url);
        ProxyServer::new(client).build_router()
    }

    async fn get_uri(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn airports_requests_carry_paging_defaults() {
        let (base, queries) =
            spawn_upstream(StatusCode::OK, "application/json", r#"{"data":[]}"#).await;
        let (status, body) = get_uri(proxy_router(base), "/api/airports").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"data":[]}"#);
        let query = queries.lock().unwrap().pop().unwrap();
        assert_eq!(query, "access_key=server-key&limit=5&offset=0");
    }

    #[tokio::test]
    async fn explicit_airport_params_override_the_defaults() {
        let (base, queries) =
            spawn_upstream(StatusCode::OK, "application/json", r#"{"data":[]}"#).await;
        let (status, _) =
            get_uri(proxy_router(base), "/api/airports?limit=10&search=berlin").await;

        assert_eq!(status, StatusCode::OK);
        let query = queries.lock().unwrap().pop().unwrap();
        assert_eq!(
            query,
            "access_key=server-key&limit=10&offset=0&search=berlin"
        );
    }

    #[tokio::test]
    async fn flights_requests_get_no_injected_defaults() {
        let (base, queries) =
            spawn_upstream(StatusCode::OK, "application/json", r#"{"data":[]}"#).await;
        let (status, _) = get_uri(proxy_router(base), "/api/flights?flight_iata=BA283").await;

        assert_eq!(status, StatusCode::OK);
        let query = queries.lock().unwrap().pop().unwrap();
        assert_eq!(query, "access_key=server-key&flight_iata=BA283");
    }

    #[tokio::test]
    async fn upstream_errors_are_forwarded_not_wrapped() {
        let (base, _) = spawn_upstream(
            StatusCode::FORBIDDEN,
            "text/plain",
            "usage limit reached",
        )
        .await;
        let router = proxy_router(base);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/flights")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"usage limit reached");
    }

    #[tokio::test]
    async fn fetch_failure_yields_the_local_error_envelope() {
        // Grab an ephemeral port, then close it so the fetch is refused.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (status, body) =
            get_uri(proxy_router(format!("http://{}/v1", addr)), "/api/flights").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["error"], "proxy_error");
        assert!(payload["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn a_caller_supplied_credential_overwrites_the_injected_one() {
        let (base, queries) =
            spawn_upstream(StatusCode::OK, "application/json", r#"{"data":[]}"#).await;
        let (status, _) = get_uri(proxy_router(base), "/api/flights?access_key=spoofed").await;

        assert_eq!(status, StatusCode::OK);
        let query = queries.lock().unwrap().pop().unwrap();
        assert_eq!(query, "access_key=spoofed");
    }

    #[tokio::test]
    async fn non_api_paths_are_served_from_the_public_directory() {
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("hello.txt"), "hi there").unwrap();

        let client = UpstreamClient::with_base_url(
            "server-key".to_string(),
            "http://127.0.0.1:9/v1".to_string(),
        );
        let config = ServerConfig::default().with_public_dir(public.path());
        let router = ProxyServer::with_config(client, config).build_router();

        let (status, body) = get_uri(router.clone(), "/hello.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "hi there");

        let (status, _) = get_uri(router, "/missing.txt").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_endpoint_reports_healthy() {
        let client = UpstreamClient::with_base_url(
            "server-key".to_string(),
            "http://127.0.0.1:9/v1".to_string(),
        );
        let (status, body) = get_uri(ProxyServer::new(client).build_router(), "/health").await;

        assert_eq!(status, StatusCode::OK);
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["status"], "healthy");
    }
}
