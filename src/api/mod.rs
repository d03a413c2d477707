//! HTTP transport for the record store
//!
//! Exposes the store as a small REST API:
//!
//! ```text
//! GET    /transactions        list all records
//! GET    /transactions/:id    fetch one record
//! POST   /transactions        insert a record
//! PUT    /transactions/:id    merge fields into a record
//! DELETE /transactions/:id    remove a record
//! ```
//!
//! Every route, including the not-found fallback, sits behind HTTP Basic auth.
//!
//! # Concurrency
//!
//! The runtime dispatches requests on several worker threads, so the store is
//! held behind a single async mutex. Each handler keeps the lock for exactly
//! one store operation, which serializes every insert, update and delete.

pub mod auth;
pub mod handlers;

pub use auth::{CredentialTable, AUTH_CHALLENGE};

use crate::core::RecordStore;
use crate::types::LedgerError;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Store shared between request handlers
pub type SharedStore = Arc<Mutex<RecordStore>>;

/// Bind address for the HTTP server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// State handed to every handler and to the auth middleware
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SharedStore,
    pub credentials: Arc<CredentialTable>,
}

impl AppState {
    /// Take ownership of a loaded store and the credential table
    pub fn new(store: RecordStore, credentials: CredentialTable) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            credentials: Arc::new(credentials),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        .fallback(handlers::endpoint_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .with_state(state)
}

/// Bind and serve until Ctrl+C
///
/// # Errors
///
/// Returns `IoError` if the address cannot be bound or the server fails.
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), LedgerError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Server running at http://{}:{}/", config.host, config.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down server...");
}
