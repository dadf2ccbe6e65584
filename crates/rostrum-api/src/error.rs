//! API error types with HTTP mapping
//!
//! Route errors serialize as `{"error": ...}`; auth errors keep the
//! `{code, description}` shape clients already parse.

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use rostrum_engine::EngineError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {description}")]
    Unauthorized { code: String, description: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Judgment failed: {0}")]
    Judgment(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(code: &str, description: &str) -> Self {
        ApiError::Unauthorized {
            code: code.to_string(),
            description: description.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Unauthorized { code, description } => (
                StatusCode::UNAUTHORIZED,
                json!({ "code": code, "description": description }),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg }))
            }
            ApiError::Judgment(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            ApiError::BackendUnavailable(msg) => {
                tracing::error!(error = %msg, "Model backend unavailable");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Model backend unavailable" }),
                )
            }
            ApiError::Internal(msg) => {
                // Don't expose internals to clients
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::MissingTopic
            | EngineError::MissingQuestion
            | EngineError::DebateNotStarted
            | EngineError::AlreadyJudged
            | EngineError::EmptyTranscript => ApiError::BadRequest(e.to_string()),
            EngineError::DebateNotFound | EngineError::UserNotFound => {
                ApiError::NotFound(e.to_string())
            }
            EngineError::InvalidJudgment(_) => ApiError::Judgment(e.to_string()),
            EngineError::Backend(inner) => ApiError::BackendUnavailable(inner.to_string()),
            EngineError::Storage(inner) => ApiError::Internal(inner.to_string()),
        }
    }
}

/// JSON body extractor whose rejections keep the `{"error": ...}` contract
/// with a 422 status instead of axum's plain-text defaults.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// Query extractor with the same JSON error contract.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}
