//! End-to-end HTTP tests against the full router with a mock backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rostrum_api::{build_router, AppState, Claims, JwtAuth, ServerConfig};
use rostrum_engine::DebateEngine;
use rostrum_llm::MockBackend;
use rostrum_persist::{connect_with, DebateStore, SqliteConfig, UserStore};

const TEST_SECRET: &str = "integration-test-secret-32-chars!!";

async fn test_app(backend: MockBackend) -> (Router, JwtAuth) {
    let pool = connect_with(SqliteConfig::memory()).await.unwrap();
    let engine = DebateEngine::new(
        DebateStore::new(pool.clone()),
        UserStore::new(pool),
        Arc::new(backend),
        2,
    );
    let jwt_auth = JwtAuth::new(TEST_SECRET);
    let state = AppState::new(jwt_auth.clone(), engine);
    (build_router(state, &ServerConfig::default()), jwt_auth)
}

fn token_for(auth: &JwtAuth, sub: &str) -> String {
    auth.encode(&Claims::for_subject(sub, Duration::hours(1)))
        .unwrap()
}

fn post(path: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(path: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_is_public() {
    let (app, _) = test_app(MockBackend::debater()).await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_auth_header() {
    let (app, _) = test_app(MockBackend::debater()).await;

    let request = Request::post("/start_debate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"topic": "x"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], "authorization_header_missing");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let (app, _) = test_app(MockBackend::debater()).await;

    let response = app
        .oneshot(post("/start_debate", "not-a-jwt", json!({"topic": "x"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_full_debate_over_http() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|alice");

    // Start
    let response = app
        .clone()
        .oneshot(post(
            "/start_debate",
            &token,
            json!({"topic": "Should AI be regulated?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Debate started");
    assert_eq!(body["logs"].as_array().unwrap().len(), 3);
    assert_eq!(body["logs"][0]["speaker"], "moderator");
    assert_eq!(body["logs"][0]["response_type"], "opening_statement");
    let debate_id = body["debate_id"].as_i64().unwrap();

    // Turn
    let response = app
        .clone()
        .oneshot(post(
            "/process_turn",
            &token,
            json!({"debate_id": debate_id, "question": "What about innovation?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 8);
    assert_eq!(body["questions"], json!(["What about innovation?"]));
    assert!(body["pro_side_rebuttal"].as_str().unwrap().contains("rebuttal"));

    // Judge
    let response = app
        .clone()
        .oneshot(post(
            "/judge_debate",
            &token,
            json!({"debate_id": debate_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["judgment"], "pro");
    assert_eq!(body["logs"].as_array().unwrap().len(), 10);

    // Fetch: winner visible, transcript intact
    let response = app
        .clone()
        .oneshot(get(&format!("/get_debate?debate_id={}", debate_id), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["winner"], "pro");
    assert_eq!(body["logs"].as_array().unwrap().len(), 10);

    // Re-judging is rejected and leaves the winner alone.
    let response = app
        .clone()
        .oneshot(post(
            "/judge_debate",
            &token,
            json!({"debate_id": debate_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Listing shows the debate under the owner.
    let owner_id = {
        // The auth middleware created the user row; its id is what the
        // debate rows carry.
        let response = app
            .clone()
            .oneshot(get(&format!("/get_user_debates?user_id={}", 1), &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let debates = body["debates"].as_array().unwrap();
        assert_eq!(debates.len(), 1);
        assert_eq!(debates[0]["winner"], "pro");
        debates[0]["user_id"].as_i64().unwrap()
    };
    assert_eq!(owner_id, 1);
}

#[tokio::test]
async fn test_closing_arguments_route() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|closer");

    let response = app
        .clone()
        .oneshot(post("/start_debate", &token, json!({"topic": "tabs"})))
        .await
        .unwrap();
    let debate_id = json_body(response).await["debate_id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post(
            "/closing_arguments",
            &token,
            json!({"debate_id": debate_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Closing arguments processed");
    assert_eq!(body["logs"].as_array().unwrap().len(), 6);
    assert!(body["pro_closing"].as_str().unwrap().contains("closing"));
}

#[tokio::test]
async fn test_empty_topic_is_bad_request() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .oneshot(post("/start_debate", &token, json!({"topic": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Topic is required");
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .oneshot(post("/start_debate", &token, json!({"subject": "x"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_debate_is_not_found() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .clone()
        .oneshot(post(
            "/process_turn",
            &token,
            json!({"debate_id": 404, "question": "why?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Debate not found");

    let response = app
        .oneshot(get("/get_debate?debate_id=404", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_user_listing_is_not_found() {
    let (app, auth) = test_app(MockBackend::debater()).await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .oneshot(get("/get_user_debates?user_id=9999", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_backend_outage_surfaces_bad_gateway() {
    let (app, auth) = test_app(MockBackend::failing()).await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .oneshot(post("/start_debate", &token, json!({"topic": "x"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Model backend unavailable");
}

#[tokio::test]
async fn test_unparsable_judgment_is_internal_error() {
    let (app, auth) = test_app(MockBackend::scripted(vec![
        "Opening one.".to_string(),
        "Opening two.".to_string(),
        "It's a tie.".to_string(),
    ]))
    .await;
    let token = token_for(&auth, "auth0|alice");

    let response = app
        .clone()
        .oneshot(post("/start_debate", &token, json!({"topic": "ties"})))
        .await
        .unwrap();
    let debate_id = json_body(response).await["debate_id"].as_i64().unwrap();

    let response = app
        .oneshot(post(
            "/judge_debate",
            &token,
            json!({"debate_id": debate_id}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Invalid judgment received from model"));
}
