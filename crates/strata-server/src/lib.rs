//! Strata Server - HTTP surface for the Strata Config store.
//!
//! Thin plumbing: routing, request validation, and error-to-status mapping
//! over [`strata_store::ConfigStore`]. Everything with real invariants
//! lives in `strata-store` and `strata-core`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod server;
pub mod settings;
pub mod state;

pub use error::AppError;
pub use handlers::health::HealthResponse;
pub use server::{create_router, run_server};
pub use settings::{GitHubSettings, ServerSettings, Settings};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
