//! HTTP boundary: axum router, auth guards and error-to-envelope mapping.

pub mod errors;
pub mod guards;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_app, run};
pub use state::{Repositories, ServerState};
