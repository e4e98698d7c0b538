//! Respondent session endpoints.
//!
//! Sessions are anonymous; the token returned on start is the
//! respondent's handle for the lifetime of the session.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use chrono::{DateTime, FixedOffset};
use formflow_common::AppResult;
use formflow_db::entities::{form_session, form_session_response};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    middleware::AppState,
    response::{ApiResponse, Created},
};

/// Session representation.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub form_id: String,
    pub token: String,
    pub created_at: DateTime<FixedOffset>,
}

impl SessionResponse {
    pub(crate) fn from_model(session: &form_session::Model) -> Self {
        Self {
            id: session.id.clone(),
            form_id: session.form_id.clone(),
            token: session.token.clone(),
            created_at: session.created_at,
        }
    }
}

/// Respond request.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub block_id: String,
    pub payload: JsonValue,
}

/// Recorded response representation.
#[derive(Debug, Serialize)]
pub struct ResponseRecord {
    pub id: String,
    pub form_block_id: String,
    pub payload: JsonValue,
    pub created_at: DateTime<FixedOffset>,
}

impl ResponseRecord {
    fn from_model(response: form_session_response::Model) -> Self {
        Self {
            id: response.id,
            form_block_id: response.form_block_id,
            payload: response.payload,
            created_at: response.created_at,
        }
    }
}

/// List the answers recorded in a session.
///
/// The session id doubles as the access handle; it is generated, never
/// enumerable.
async fn list_responses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<ResponseRecord>>> {
    let session = state.session_service.get_by_id(&id).await?;
    let responses = state.session_service.responses(&session.id).await?;

    Ok(ApiResponse::ok(
        responses.into_iter().map(ResponseRecord::from_model).collect(),
    ))
}

/// Record an answer to a block within a session.
///
/// The payload runs through the block's resolved validator; an invalid
/// payload comes back as a validation error with the validator's message
/// and nothing is stored.
async fn respond(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> AppResult<Created<ResponseRecord>> {
    let session = state.session_service.get_by_id(&id).await?;
    let response = state
        .session_service
        .respond(&session, &req.block_id, req.payload)
        .await?;

    Ok(Created(ResponseRecord::from_model(response)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/responses", post(respond).get(list_responses))
}
