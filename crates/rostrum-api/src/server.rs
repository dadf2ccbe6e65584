//! Rostrum API server with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use tokio::signal;

use rostrum_engine::DebateEngine;
use rostrum_llm::{ChatBackend, GeminiBackend, LlmConfig, MockBackend};
use rostrum_persist::{DebateStore, UserStore};

use crate::auth::JwtAuth;
use crate::error::ApiError;
use crate::middleware::{
    auth_middleware, body_limit_layer, cors_layer, request_id_middleware, timeout_layer,
    tracing_middleware,
};
use crate::routes::api_router;
use crate::state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Request timeout. Phase operations wait on several sequential model
    /// calls, so this is generous compared to a typical API.
    pub timeout: Duration,
    /// Max request body size (bytes)
    pub max_body_size: usize,
    /// Database URL
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".parse().unwrap(),
            timeout: Duration::from_secs(120),
            max_body_size: 64 * 1024,
            database_url: "sqlite::memory:".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("ROSTRUM_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let timeout_secs: u64 = std::env::var("ROSTRUM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(120);

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());

        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            timeout: Duration::from_secs(timeout_secs),
            database_url,
            ..Default::default()
        }
    }
}

/// The Rostrum API server
pub struct RostrumServer {
    config: ServerConfig,
    app_state: AppState,
}

impl RostrumServer {
    /// Initialize state and dependencies.
    pub async fn new(config: ServerConfig) -> Result<Self, ApiError> {
        let jwt_auth = JwtAuth::from_env()?;

        let pool = rostrum_persist::connect(&config.database_url)
            .await
            .map_err(|e| ApiError::Internal(format!("DB init failed: {}", e)))?;

        let llm_config = LlmConfig::from_env();
        let backend: Arc<dyn ChatBackend> = match &llm_config.gemini_api_key {
            Some(key) => {
                tracing::info!(model = %llm_config.model, "Initializing Gemini backend");
                Arc::new(GeminiBackend::new(key, &llm_config.model))
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not found. Using mock backend.");
                Arc::new(MockBackend::debater())
            }
        };

        let engine = DebateEngine::new(
            DebateStore::new(pool.clone()),
            UserStore::new(pool),
            backend,
            llm_config.max_sentences,
        );

        Ok(Self {
            config,
            app_state: AppState::new(jwt_auth, engine),
        })
    }

    /// Build a server around existing state (testing).
    pub fn with_state(config: ServerConfig, app_state: AppState) -> Self {
        Self { config, app_state }
    }

    /// Get the configured router with all middleware applied.
    pub fn router(&self) -> Router {
        build_router(self.app_state.clone(), &self.config)
    }

    /// Run the server with graceful shutdown.
    pub async fn run(self) -> Result<(), ApiError> {
        let app = self.router();
        let addr = self.config.addr;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::Internal(format!("Bind failed: {}", e)))?;

        tracing::info!("Rostrum API listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Assemble the router with the middleware stack (order matters - bottom
/// to top execution).
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    api_router(state.clone())
        .layer(body_limit_layer(config.max_body_size))
        .layer(timeout_layer(config.timeout))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
        .layer(cors_layer())
        .layer(middleware::from_fn(tracing_middleware))
        .layer(middleware::from_fn(request_id_middleware))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Initialize tracing subscriber
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rostrum_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
