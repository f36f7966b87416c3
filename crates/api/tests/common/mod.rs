//! Shared fixtures for the HTTP boundary tests.
//!
//! Builds a small router whose handlers stand in for the real persistence
//! layer: they materialize records in memory and count how often they ran, so
//! tests can assert that rejected bodies never reach them.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assignment_api::config::SchemaConfig;
use assignment_api::error::AppResult;
use assignment_api::extract::ValidatedJson;
use assignment_api::response::DataResponse;
use assignment_core::types::Timestamp;
use assignment_db::models::assignment::{
    Assignment, AssignmentResponse, CreateAssignment, UpdateAssignment,
};
use axum::body::Body;
use axum::extract::{FromRef, State};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Router state for the test app.
#[derive(Clone)]
pub struct TestState {
    pub config: Arc<SchemaConfig>,
    pub writes: Arc<AtomicUsize>,
}

impl FromRef<TestState> for Arc<SchemaConfig> {
    fn from_ref(state: &TestState) -> Self {
        Arc::clone(&state.config)
    }
}

pub fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap()
}

/// The record every `PATCH` is applied to.
pub fn stored_record() -> Assignment {
    Assignment {
        id: 1,
        title: "Grade essays".to_string(),
        description: Some("Period 2".to_string()),
        status: "Pending".to_string(),
        created_time: fixed_now(),
        updated_time: fixed_now(),
        deleted: false,
        deleted_time: None,
    }
}

async fn create(
    State(state): State<TestState>,
    ValidatedJson(input): ValidatedJson<CreateAssignment>,
) -> AppResult<(StatusCode, Json<DataResponse<AssignmentResponse>>)> {
    state.writes.fetch_add(1, Ordering::SeqCst);
    let record = Assignment::from_create(42, input, fixed_now());
    let data = AssignmentResponse::try_from(record)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

async fn update(
    State(state): State<TestState>,
    ValidatedJson(patch): ValidatedJson<UpdateAssignment>,
) -> AppResult<Json<DataResponse<AssignmentResponse>>> {
    state.writes.fetch_add(1, Ordering::SeqCst);
    let mut record = stored_record();
    record.apply_update(&patch, fixed_now())?;
    let data = AssignmentResponse::try_from(record)?;
    Ok(Json(DataResponse { data }))
}

/// Returns a row that violates the soft-delete invariant.
async fn broken() -> AppResult<Json<DataResponse<AssignmentResponse>>> {
    let mut record = stored_record();
    record.deleted = true;
    let data = AssignmentResponse::try_from(record)?;
    Ok(Json(DataResponse { data }))
}

/// Build the test router with the given config.
pub fn build_test_app(config: SchemaConfig) -> (Router, Arc<AtomicUsize>) {
    let writes = Arc::new(AtomicUsize::new(0));
    let state = TestState {
        config: Arc::new(config),
        writes: Arc::clone(&writes),
    };

    let app = Router::new()
        .route("/assignments", post(create).patch(update))
        .route("/assignments/broken", post(broken))
        .with_state(state);

    (app, writes)
}

pub async fn send_json(app: Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, &body.to_string()).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PATCH, uri, &body.to_string()).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
