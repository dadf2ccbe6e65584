//! API routes for the debate endpoints

use axum::{
    extract::{Extension, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use rostrum_core::{Debate, LogEntry, Winner};

use crate::auth::AuthedUser;
use crate::error::{ApiJson, ApiQuery, ApiResult};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[derive(Debug, Deserialize)]
pub struct StartDebateRequest {
    pub topic: String,
}

#[derive(Debug, Serialize)]
pub struct StartDebateResponse {
    pub message: String,
    pub debate_id: i64,
    pub topic: String,
    pub pro_initial: String,
    pub con_initial: String,
    pub logs: Vec<LogEntry>,
}

pub async fn start_debate(
    Extension(user): Extension<AuthedUser>,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<StartDebateRequest>,
) -> ApiResult<Json<StartDebateResponse>> {
    let started = state.engine().start(user.0, &req.topic).await?;

    Ok(Json(StartDebateResponse {
        message: "Debate started".to_string(),
        debate_id: started.debate_id,
        topic: started.topic,
        pro_initial: started.pro_initial,
        con_initial: started.con_initial,
        logs: started.logs,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ProcessTurnRequest {
    pub debate_id: i64,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessTurnResponse {
    pub message: String,
    pub question: String,
    pub pro_side_response: String,
    pub con_side_response: String,
    pub pro_side_rebuttal: String,
    pub con_side_rebuttal: String,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

pub async fn process_turn(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ProcessTurnRequest>,
) -> ApiResult<Json<ProcessTurnResponse>> {
    let outcome = state
        .engine()
        .process_turn(req.debate_id, &req.question)
        .await?;

    Ok(Json(ProcessTurnResponse {
        message: "Turn processed".to_string(),
        question: outcome.question,
        pro_side_response: outcome.pro_side_response,
        con_side_response: outcome.con_side_response,
        pro_side_rebuttal: outcome.pro_side_rebuttal,
        con_side_rebuttal: outcome.con_side_rebuttal,
        logs: outcome.logs,
        questions: outcome.questions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ClosingArgumentsRequest {
    pub debate_id: i64,
}

#[derive(Debug, Serialize)]
pub struct ClosingArgumentsResponse {
    pub message: String,
    pub pro_closing: String,
    pub con_closing: String,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

pub async fn closing_arguments(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ClosingArgumentsRequest>,
) -> ApiResult<Json<ClosingArgumentsResponse>> {
    let outcome = state.engine().closing_arguments(req.debate_id).await?;

    Ok(Json(ClosingArgumentsResponse {
        message: "Closing arguments processed".to_string(),
        pro_closing: outcome.pro_closing,
        con_closing: outcome.con_closing,
        logs: outcome.logs,
        questions: outcome.questions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct JudgeDebateRequest {
    pub debate_id: i64,
}

#[derive(Debug, Serialize)]
pub struct JudgeDebateResponse {
    pub message: String,
    pub judgment: Winner,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
}

pub async fn judge_debate(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<JudgeDebateRequest>,
) -> ApiResult<Json<JudgeDebateResponse>> {
    let outcome = state.engine().judge(req.debate_id).await?;

    Ok(Json(JudgeDebateResponse {
        message: "Debate judged".to_string(),
        judgment: outcome.judgment,
        logs: outcome.logs,
        questions: outcome.questions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GetDebateParams {
    pub debate_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GetDebateResponse {
    pub debate_id: i64,
    pub topic: String,
    pub logs: Vec<LogEntry>,
    pub questions: Vec<String>,
    pub winner: Option<Winner>,
}

pub async fn get_debate(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GetDebateParams>,
) -> ApiResult<Json<GetDebateResponse>> {
    let debate = state.engine().fetch(params.debate_id).await?;

    Ok(Json(GetDebateResponse {
        debate_id: debate.id,
        topic: debate.topic,
        logs: debate.transcript,
        questions: debate.questions,
        winner: debate.winner,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GetUserDebatesParams {
    pub user_id: i64,
}

/// One debate in a user's listing.
#[derive(Debug, Serialize)]
pub struct DebateSummary {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub questions: Vec<String>,
    pub logs: Vec<LogEntry>,
    pub winner: Option<Winner>,
}

impl From<Debate> for DebateSummary {
    fn from(debate: Debate) -> Self {
        Self {
            id: debate.id,
            user_id: debate.user_id,
            topic: debate.topic,
            questions: debate.questions,
            logs: debate.transcript,
            winner: debate.winner,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetUserDebatesResponse {
    pub debates: Vec<DebateSummary>,
}

pub async fn get_user_debates(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<GetUserDebatesParams>,
) -> ApiResult<Json<GetUserDebatesResponse>> {
    let debates = state.engine().list_for_user(params.user_id).await?;

    Ok(Json(GetUserDebatesResponse {
        debates: debates.into_iter().map(DebateSummary::from).collect(),
    }))
}

/// Build the API router with all debate routes.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/start_debate", post(start_debate))
        .route("/process_turn", post(process_turn))
        .route("/closing_arguments", post(closing_arguments))
        .route("/judge_debate", post(judge_debate))
        .route("/get_debate", get(get_debate))
        .route("/get_user_debates", get(get_user_debates))
        .with_state(state)
}
