//! HTTP API layer - axum router, handlers and the server loop.
//!
//! Handlers are thin: they parse the request, call into [`crate::core`] and
//! map the outcome onto a JSON response.

/// Error to HTTP response mapping
pub mod error;
/// Request body extractors
pub mod extract;
/// Request handlers grouped by resource
pub mod handlers;
/// Route table
pub mod routes;
/// Server start-up and graceful shutdown
pub mod server;
/// JSON request and response bodies
pub mod types;

use sea_orm::DatabaseConnection;

/// Shared state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection.
    #[must_use]
    pub const fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

pub use routes::create_router;
pub use server::serve;
