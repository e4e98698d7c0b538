//! API middleware.

use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};
use formflow_core::{
    BlockService, FormService, InteractionService, SessionService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Authentication and account lookup.
    pub user_service: UserService,
    /// Form lifecycle, stats and presentation.
    pub form_service: FormService,
    /// Block management and UI-binding resolution.
    pub block_service: BlockService,
    /// Interaction management.
    pub interaction_service: InteractionService,
    /// Respondent sessions and responses.
    pub session_service: SessionService,
}

/// Authentication middleware.
///
/// Resolves a bearer API token to a user and stores it in request
/// extensions; requests without a valid token pass through anonymous and
/// are rejected later by the [`crate::extractors::AuthUser`] extractor
/// where authentication is required.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.user_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
