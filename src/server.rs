//! Static asset server.
//!
//! Maps `GET /` to the default document and `GET /<path>` to `<root>/<path>`,
//! with the content type picked from the extension table in [`crate::mime`].
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | file read | 200 | file bytes |
//! | file missing | 404 | minimal HTML page |
//! | any other read error | 500 | `Server error: <code>` |
//!
//! Each request performs one independent async read; the only shared state
//! is the immutable [`ServerState`]. No caching headers, compression or
//! directory listings.

use crate::mime;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

pub const NOT_FOUND_BODY: &str = "<h1>404 - Page not found</h1>";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Immutable per-server settings shared by every request.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub root: PathBuf,
    pub default_document: String,
}

impl ServerState {
    pub fn new(root: impl Into<PathBuf>, default_document: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_document: default_document.into(),
        }
    }
}

/// Result of resolving and reading one request path.
#[derive(Debug)]
pub enum Asset {
    Found {
        content_type: &'static str,
        body: Vec<u8>,
    },
    NotFound,
    Failed(io::Error),
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        match self {
            Asset::Found { content_type, body } => {
                (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            Asset::NotFound => (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/html")],
                NOT_FOUND_BODY,
            )
                .into_response(),
            Asset::Failed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                format!("Server error: {}", io_error_code(&err)),
            )
                .into_response(),
        }
    }
}

/// Map a request path onto the document root.
///
/// `/` resolves to the default document. Returns `None` for paths that try
/// to climb out of the root with `..`.
pub fn resolve_request_path(state: &ServerState, uri_path: &str) -> Option<PathBuf> {
    let relative = uri_path.trim_start_matches('/');
    if relative.is_empty() {
        return Some(state.root.join(&state.default_document));
    }
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return None;
    }
    Some(state.root.join(relative))
}

/// Resolve and read the file behind a request path.
pub async fn load_asset(state: &ServerState, uri_path: &str) -> Asset {
    let Some(path) = resolve_request_path(state, uri_path) else {
        debug!(path = uri_path, "rejected path outside document root");
        return Asset::NotFound;
    };
    match tokio::fs::read(&path).await {
        Ok(body) => Asset::Found {
            content_type: mime::content_type_for(&path),
            body,
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "not found");
            Asset::NotFound
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "read failed");
            Asset::Failed(err)
        }
    }
}

async fn serve_asset(State(state): State<Arc<ServerState>>, uri: Uri) -> Asset {
    load_asset(&state, uri.path()).await
}

/// Build the router. Only `GET` (and the implied `HEAD`) is routed.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(serve_asset))
        .route("/{*path}", get(serve_asset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener for `host:port`.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let addr = format!("{host}:{port}");
    TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serve until `shutdown` resolves, then stop accepting and wait for the
/// listener to close.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<ServerState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    info!(addr = ?addr, root = %state.root.display(), "serving landing page");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("listener closed");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "SIGINT handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, closing server");
}

/// Short error code for 500 bodies, e.g. `IsADirectory (os error 21)`.
fn io_error_code(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => format!("{:?} (os error {code})", err.kind()),
        None => format!("{:?}", err.kind()),
    }
}
