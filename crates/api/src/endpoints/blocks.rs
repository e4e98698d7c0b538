//! Block endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset};
use formflow_common::AppResult;
use formflow_core::{BlockBinding, block_type_tag};
use formflow_db::entities::form_block;
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::{interactions, owned_form_of_block},
    extractors::AuthUser,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Block representation.
#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub id: String,
    pub form_id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl BlockResponse {
    pub(crate) fn from_model(block: &form_block::Model) -> Self {
        Self {
            id: block.id.clone(),
            form_id: block.form_id.clone(),
            block_type: block_type_tag(block.block_type),
            position: block.position,
            message: block.message.clone(),
            created_at: block.created_at,
        }
    }
}

/// Update block request.
#[derive(Debug, Deserialize)]
pub struct UpdateBlockRequest {
    pub message: Option<String>,
}

/// Show a block.
async fn show_block(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlockResponse>> {
    let block = state.block_service.get_by_id(&id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    Ok(ApiResponse::ok(BlockResponse::from_model(&block)))
}

/// Update a block's prompt message.
async fn update_block(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBlockRequest>,
) -> AppResult<ApiResponse<BlockResponse>> {
    let block = state.block_service.get_by_id(&id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    let updated = state.block_service.update_message(block, req.message).await?;
    Ok(ApiResponse::ok(BlockResponse::from_model(&updated)))
}

/// Delete a block. Its interactions and responses go with it.
async fn delete_block(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    let block = state.block_service.get_by_id(&id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    state.block_service.delete(&block.id).await?;
    Ok(response::ok())
}

/// UI-binding descriptor for a block.
///
/// Served to the respondent client, so no authentication.
async fn block_binding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<BlockBinding>> {
    let block = state.block_service.get_by_id(&id).await?;
    Ok(ApiResponse::ok(state.block_service.binding(&block).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(show_block).post(update_block).delete(delete_block),
        )
        .route("/{id}/binding", get(block_binding))
        .route(
            "/{id}/interactions",
            post(interactions::create_interaction).get(interactions::list_interactions),
        )
}
