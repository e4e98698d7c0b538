//! Form endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use formflow_common::{AppError, AppResult};
use formflow_core::{CreateBlockInput, CreateFormInput, FormService, FormStats};
use formflow_core::presentation::FormPresentation;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{
    endpoints::{blocks::BlockResponse, sessions::SessionResponse},
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::{ApiResponse, Created},
};

/// Create form request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFormRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Hex color, e.g. `#1d4ed8`.
    #[validate(length(min = 4, max = 9))]
    pub brand_color: Option<String>,
}

/// Create a form owned by the caller.
async fn create_form(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateFormRequest>,
) -> AppResult<Created<JsonValue>> {
    req.validate()?;

    let form = state
        .form_service
        .create(
            &user.id,
            CreateFormInput {
                name: req.name,
                brand_color: req.brand_color,
            },
        )
        .await?;

    Ok(Created(state.form_service.to_api_json(&form).await?))
}

/// List the caller's forms.
async fn list_forms(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<JsonValue>>> {
    let forms = state.form_service.list_for_user(&user.id).await?;

    let mut views = Vec::with_capacity(forms.len());
    for form in &forms {
        views.push(state.form_service.to_api_json(form).await?);
    }

    Ok(ApiResponse::ok(views))
}

/// Public presentation of a form.
///
/// Anonymous callers only see published forms; the owner can always
/// preview. Unpublished forms are indistinguishable from absent ones for
/// everyone else.
async fn show_form(
    MaybeAuthUser(maybe_user): MaybeAuthUser,
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<ApiResponse<FormPresentation>> {
    let form = state.form_service.get_by_uuid(&uuid).await?;

    let is_owner = maybe_user.is_some_and(|u| u.id == form.user_id);
    if !FormService::is_published(&form) && !is_owner {
        return Err(AppError::FormNotFound(uuid));
    }

    Ok(ApiResponse::ok(state.form_service.presentation(&form).await?))
}

/// Delete a form with everything attached to it.
async fn delete_form(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl axum::response::IntoResponse> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    state.form_service.delete(&form).await?;
    Ok(crate::response::ok())
}

/// Owner-only rollup figures.
async fn form_stats(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FormStats>> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    Ok(ApiResponse::ok(state.form_service.stats(&form.id).await?))
}

/// Publish a form.
async fn publish_form(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<JsonValue>> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    let form = state.form_service.publish(form).await?;
    Ok(ApiResponse::ok(state.form_service.to_api_json(&form).await?))
}

/// Unpublish a form.
async fn unpublish_form(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<JsonValue>> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    let form = state.form_service.unpublish(form).await?;
    Ok(ApiResponse::ok(state.form_service.to_api_json(&form).await?))
}

/// Create block request.
#[derive(Debug, Deserialize)]
pub struct CreateBlockRequest {
    /// Block type tag, e.g. `input-long`.
    #[serde(rename = "type")]
    pub block_type: String,
    pub message: Option<String>,
}

/// Append a block to a form.
async fn create_block(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CreateBlockRequest>,
) -> AppResult<Created<BlockResponse>> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    let block = state
        .block_service
        .create(
            &form.id,
            CreateBlockInput {
                block_type: req.block_type,
                message: req.message,
            },
        )
        .await?;

    Ok(Created(BlockResponse::from_model(&block)))
}

/// List a form's blocks in display order.
async fn list_blocks(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<BlockResponse>>> {
    let form = state.form_service.get_by_id(&id).await?;
    FormService::assert_owner(&form, &user.id)?;

    let blocks = state.block_service.list(&form.id).await?;
    Ok(ApiResponse::ok(
        blocks.iter().map(BlockResponse::from_model).collect(),
    ))
}

/// Start a respondent session on a published form.
async fn start_session(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Created<SessionResponse>> {
    let form = state.form_service.get_by_uuid(&uuid).await?;
    let session = state.session_service.start(&form).await?;

    Ok(Created(SessionResponse::from_model(&session)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_form).get(list_forms))
        // Public routes address forms by uuid, owner routes by internal id;
        // the path parameter shares one name because they overlap.
        .route("/{id}", get(show_form).delete(delete_form))
        .route("/{id}/stats", get(form_stats))
        .route("/{id}/publish", post(publish_form))
        .route("/{id}/unpublish", post(unpublish_form))
        .route("/{id}/blocks", post(create_block).get(list_blocks))
        .route("/{id}/sessions", post(start_session))
}
