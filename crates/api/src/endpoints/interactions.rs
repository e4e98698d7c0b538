//! Interaction endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use chrono::{DateTime, FixedOffset};
use formflow_common::{AppError, AppResult};
use formflow_core::UpdateInteractionInput;
use formflow_db::entities::{InteractionType, form_block_interaction};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    endpoints::owned_form_of_block,
    extractors::AuthUser,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Interaction representation.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub id: String,
    pub uuid: String,
    pub form_block_id: String,
    #[serde(rename = "type")]
    pub interaction_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub options: JsonValue,
    pub position: i32,
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl InteractionResponse {
    fn from_model(interaction: form_block_interaction::Model) -> Self {
        Self {
            id: interaction.id,
            uuid: interaction.uuid,
            form_block_id: interaction.form_block_id,
            interaction_type: interaction.interaction_type.to_value(),
            label: interaction.label,
            reply: interaction.reply,
            options: interaction.options,
            position: interaction.position,
            created_at: interaction.created_at,
            updated_at: interaction.updated_at,
        }
    }
}

/// Create interaction request.
#[derive(Debug, Deserialize)]
pub struct CreateInteractionRequest {
    /// Interaction type tag, e.g. `textarea`.
    #[serde(rename = "type")]
    pub interaction_type: String,
}

fn parse_interaction_type(tag: &str) -> AppResult<InteractionType> {
    InteractionType::try_from_value(&tag.to_string())
        .map_err(|_| AppError::BadRequest(format!("Unknown interaction type: {tag}")))
}

/// Append an interaction to a block. Registered under the blocks router.
pub(super) async fn create_interaction(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(block_id): Path<String>,
    Json(req): Json<CreateInteractionRequest>,
) -> AppResult<Created<InteractionResponse>> {
    let block = state.block_service.get_by_id(&block_id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    let interaction_type = parse_interaction_type(&req.interaction_type)?;
    let created = state
        .interaction_service
        .create(&block, interaction_type)
        .await?;

    Ok(Created(InteractionResponse::from_model(created)))
}

/// List a block's interactions. Registered under the blocks router.
pub(super) async fn list_interactions(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(block_id): Path<String>,
) -> AppResult<ApiResponse<Vec<InteractionResponse>>> {
    let block = state.block_service.get_by_id(&block_id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    let interactions = state.interaction_service.list(&block.id).await?;
    Ok(ApiResponse::ok(
        interactions
            .into_iter()
            .map(InteractionResponse::from_model)
            .collect(),
    ))
}

/// Partial update request. Absent fields stay untouched; the options
/// patch merges per key into the stored bag.
#[derive(Debug, Deserialize)]
pub struct UpdateInteractionRequest {
    pub label: Option<String>,
    pub reply: Option<String>,
    pub uuid: Option<String>,
    pub options: Option<JsonValue>,
}

/// Show an interaction.
async fn show_interaction(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<InteractionResponse>> {
    let interaction = state.interaction_service.get_by_id(&id).await?;
    let block = state.block_service.get_by_id(&interaction.form_block_id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    Ok(ApiResponse::ok(InteractionResponse::from_model(interaction)))
}

/// Apply a partial update to an interaction.
async fn update_interaction(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateInteractionRequest>,
) -> AppResult<ApiResponse<InteractionResponse>> {
    let interaction = state.interaction_service.get_by_id(&id).await?;
    let block = state.block_service.get_by_id(&interaction.form_block_id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    let updated = state
        .interaction_service
        .update(
            &interaction.id,
            UpdateInteractionInput {
                label: req.label,
                reply: req.reply,
                uuid: req.uuid,
                options: req.options,
            },
        )
        .await?;

    Ok(ApiResponse::ok(InteractionResponse::from_model(updated)))
}

/// Hard-delete an interaction.
async fn delete_interaction(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    let interaction = state.interaction_service.get_by_id(&id).await?;
    let block = state.block_service.get_by_id(&interaction.form_block_id).await?;
    owned_form_of_block(&state, &block, &user).await?;

    state.interaction_service.delete(&interaction.id).await?;
    Ok(response::ok())
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        post(update_interaction)
            .get(show_interaction)
            .delete(delete_interaction),
    )
}
