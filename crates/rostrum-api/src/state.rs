//! Application state shared across handlers

use rostrum_engine::DebateEngine;

use crate::auth::JwtAuth;

/// Shared per-request context: auth plus the debate engine (which owns the
/// stores and the model backend).
#[derive(Clone)]
pub struct AppState {
    jwt_auth: JwtAuth,
    engine: DebateEngine,
}

impl AppState {
    pub fn new(jwt_auth: JwtAuth, engine: DebateEngine) -> Self {
        Self { jwt_auth, engine }
    }

    pub fn jwt_auth(&self) -> &JwtAuth {
        &self.jwt_auth
    }

    pub fn engine(&self) -> &DebateEngine {
        &self.engine
    }
}
