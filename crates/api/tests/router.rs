//! Router-level tests over a mocked database.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
};
use chrono::Utc;
use formflow_api::{AppState, router};
use formflow_common::{AppResult, StorageBackend};
use formflow_core::{
    BlockService, FormService, InteractionService, SessionService, UserService,
};
use formflow_db::entities::user;
use formflow_db::repositories::{
    FormBlockInteractionRepository, FormBlockRepository, FormRepository, FormSessionRepository,
    FormSessionResponseRepository, UserRepository,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tower::util::ServiceExt;

struct NullStorage;

#[async_trait::async_trait]
impl StorageBackend for NullStorage {
    async fn put(&self, _key: &str, _data: &[u8]) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("/assets/{key}")
    }

    async fn exists(&self, _key: &str) -> AppResult<bool> {
        Ok(false)
    }
}

fn app(db: DatabaseConnection) -> Router {
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let form_repo = FormRepository::new(Arc::clone(&db));
    let block_repo = FormBlockRepository::new(Arc::clone(&db));
    let interaction_repo = FormBlockInteractionRepository::new(Arc::clone(&db));
    let session_repo = FormSessionRepository::new(Arc::clone(&db));
    let response_repo = FormSessionResponseRepository::new(Arc::clone(&db));

    let state = AppState {
        user_service: UserService::new(user_repo.clone()),
        form_service: FormService::new(
            form_repo,
            block_repo.clone(),
            response_repo.clone(),
            user_repo,
            Arc::new(NullStorage),
            url::Url::parse("https://forms.example.com/").unwrap(),
        ),
        block_service: BlockService::new(block_repo.clone(), interaction_repo.clone()),
        interaction_service: InteractionService::new(interaction_repo.clone()),
        session_service: SessionService::new(
            session_repo,
            response_repo,
            block_repo,
            interaction_repo,
        ),
    };

    Router::new()
        .nest("/api", router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            formflow_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn test_user() -> user::Model {
    user::Model {
        id: "user1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        api_token: "secret".to_string(),
        company_name: None,
        company_description: None,
        privacy_link: None,
        legal_notice_link: None,
        privacy_contact_person: None,
        privacy_contact_email: None,
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_create_form_requires_authentication() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = app(db);

    let response = app
        .oneshot(
            Request::post("/api/forms")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Feedback"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_block_binding_is_404() {
    // Binding lookup is public; an unknown block id maps to not found.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<formflow_db::entities::form_block::Model>::new()])
        .into_connection();
    let app = app(db);

    let response = app
        .oneshot(
            Request::get("/api/blocks/nope/binding")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_token_is_anonymous() {
    // A bad bearer token falls through to the extractor rejection.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user::Model>::new()])
        .into_connection();
    let app = app(db);

    let response = app
        .oneshot(
            Request::post("/api/forms")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name": "Feedback"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_block_type_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // auth lookup, then form lookup
        .append_query_results([vec![test_user()]])
        .append_query_results([vec![formflow_db::entities::form::Model {
            id: "form1".to_string(),
            uuid: "uuid-1".to_string(),
            user_id: "user1".to_string(),
            name: "Feedback".to_string(),
            published_at: None,
            brand_color: None,
            privacy_link: None,
            legal_notice_link: None,
            avatar_path: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }]])
        .into_connection();
    let app = app(db);

    let response = app
        .oneshot(
            Request::post("/api/forms/form1/blocks")
                .header(header::AUTHORIZATION, "Bearer secret")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"type": "carousel"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
