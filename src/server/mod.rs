//! HTTP front end over a shared [`DependencyResolver`].
//!
//! One resolver serves every request, so the caches built by one query speed
//! up the next. Requests are serialized through a mutex around it.

pub mod error;
pub mod handlers;

pub use error::ApiError;

use crate::core::dependency_resolver::DependencyResolver;
use crate::core::traits::MetadataSource;
use crate::export::GraphSerializer;
use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, Notify};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub type DynResolver = DependencyResolver<Box<dyn MetadataSource>>;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Mutex<DynResolver>>,
    pub serializer: Arc<GraphSerializer>,
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(resolver: DynResolver, serializer: GraphSerializer) -> Self {
        Self {
            resolver: Arc::new(Mutex::new(resolver)),
            serializer: Arc::new(serializer),
            shutdown: Arc::new(Notify::new()),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/metadata", get(handlers::list_types))
        .route("/api/metadata/{type}", get(handlers::list_components))
        .route("/api/metadata/usage/{type}/{id}", get(handlers::usage))
        .route(
            "/api/metadata/references/{type}/{id}",
            get(handlers::references),
        )
        .route("/quit", post(handlers::quit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Prime the type catalog, bind and serve until `/quit` or Ctrl-C.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    {
        let mut resolver = state.resolver.lock().await;
        let types = resolver
            .describe()
            .await
            .context("Failed to load the type catalog")?;
        info!("Type catalog ready: {} types", types.len());
    }

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    let shutdown = state.shutdown.clone();
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = shutdown.notified() => {}
                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        warn!("Failed to listen for Ctrl-C: {}", e);
                        shutdown.notified().await;
                    }
                }
            }
            info!("Shutting down HTTP API");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
