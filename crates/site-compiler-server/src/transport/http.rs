//! HTTP transport — `POST /compile` and `/health`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json as AxumJson,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::service::CompileService;
use crate::types::{CompileRequest, CompileResponse, ServerError, ServerResult};

/// HTTP server wrapping a [`CompileService`].
pub struct HttpTransport {
    service: Arc<CompileService>,
}

impl HttpTransport {
    pub fn new(service: CompileService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Build the router. Exposed so tests can drive it without a socket.
    pub fn router(&self) -> Router {
        router(self.service.clone())
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> ServerResult<()> {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(ServerError::Io)?;

        tracing::info!("HTTP transport listening on {addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router over a shared service.
pub fn router(service: Arc<CompileService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/compile", post(handle_compile))
        .route("/health", get(handle_health))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(service)
}

async fn handle_compile(
    State(service): State<Arc<CompileService>>,
    body: Result<AxumJson<CompileRequest>, JsonRejection>,
) -> ServerResult<AxumJson<CompileResponse>> {
    let AxumJson(request) = body.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    tracing::info!(
        "Compile request: website {} (home page {:?})",
        request.website_id,
        request.home_page_id
    );
    let response = service.compile(request).await?;
    Ok(AxumJson(response))
}

async fn handle_health(State(service): State<Arc<CompileService>>) -> AxumJson<serde_json::Value> {
    AxumJson(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "websites": service.website_count().await,
    }))
}
