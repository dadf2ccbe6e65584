//! # Rostrum API
//!
//! HTTP surface for the debate arena: axum routes over the debate engine,
//! JWT bearer authentication with lazy user creation, and a server with
//! graceful shutdown.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use auth::{AuthedUser, Claims, JwtAuth};
pub use error::{ApiError, ApiResult};
pub use server::{build_router, init_tracing, RostrumServer, ServerConfig};
pub use state::AppState;
