//! User service.

use formflow_common::{AppError, AppResult};
use formflow_db::{entities::user, repositories::UserRepository};

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Authenticate a user by API token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_api_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, token: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            api_token: token.to_string(),
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
    async fn test_authenticate_by_token() {
        let user = test_user("user1", "secret");
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let found = service.authenticate_by_token("secret").await.unwrap();
        assert_eq!(found.id, "user1");
    }

    #[tokio::test]
    async fn test_authenticate_with_unknown_token_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let service = UserService::new(UserRepository::new(db));
        let err = service.authenticate_by_token("wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
