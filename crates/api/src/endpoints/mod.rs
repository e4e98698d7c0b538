//! API endpoints.

mod blocks;
mod forms;
mod interactions;
mod sessions;

use axum::Router;
use formflow_common::AppResult;
use formflow_core::FormService;
use formflow_db::entities::{form, form_block, user};

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/forms", forms::router())
        .nest("/blocks", blocks::router())
        .nest("/interactions", interactions::router())
        .nest("/sessions", sessions::router())
}

/// Load the form owning a block and check that the user owns it.
pub(crate) async fn owned_form_of_block(
    state: &AppState,
    block: &form_block::Model,
    user: &user::Model,
) -> AppResult<form::Model> {
    let form = state.form_service.get_by_id(&block.form_id).await?;
    FormService::assert_owner(&form, &user.id)?;
    Ok(form)
}
