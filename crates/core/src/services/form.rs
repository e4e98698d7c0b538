//! Form service.

use std::sync::Arc;

use chrono::Utc;
use formflow_common::{AppError, AppResult, IdGenerator, StorageBackend, storage};
use formflow_db::{
    entities::form,
    repositories::{
        FormBlockRepository, FormRepository, FormSessionResponseRepository, UserRepository,
    },
};
use sea_orm::Set;
use serde_json::json;
use url::Url;

use crate::presentation::{self, FormPresentation};
use crate::stats::{self, FormStats};

/// Form service for business logic.
#[derive(Clone)]
pub struct FormService {
    form_repo: FormRepository,
    block_repo: FormBlockRepository,
    response_repo: FormSessionResponseRepository,
    user_repo: UserRepository,
    storage: Arc<dyn StorageBackend>,
    public_base: Url,
    id_gen: IdGenerator,
}

/// Input for creating a form.
pub struct CreateFormInput {
    pub name: String,
    pub brand_color: Option<String>,
}

impl FormService {
    /// Create a new form service.
    #[must_use]
    pub fn new(
        form_repo: FormRepository,
        block_repo: FormBlockRepository,
        response_repo: FormSessionResponseRepository,
        user_repo: UserRepository,
        storage: Arc<dyn StorageBackend>,
        public_base: Url,
    ) -> Self {
        Self {
            form_repo,
            block_repo,
            response_repo,
            user_repo,
            storage,
            public_base,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a form owned by a user.
    pub async fn create(&self, user_id: &str, input: CreateFormInput) -> AppResult<form::Model> {
        let model = form::ActiveModel {
            id: Set(self.id_gen.generate()),
            uuid: Set(self.id_gen.generate_uuid_v4()),
            user_id: Set(user_id.to_string()),
            name: Set(input.name),
            published_at: Set(None),
            brand_color: Set(input.brand_color),
            privacy_link: Set(None),
            legal_notice_link: Set(None),
            avatar_path: Set(None),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let created = self.form_repo.create(model).await?;
        tracing::info!(form_id = %created.id, user_id = %created.user_id, "Created form");
        Ok(created)
    }

    /// Get a form by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form::Model> {
        self.form_repo.get_by_id(id).await
    }

    /// Get a form by its public uuid.
    pub async fn get_by_uuid(&self, uuid: &str) -> AppResult<form::Model> {
        self.form_repo
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| AppError::FormNotFound(uuid.to_string()))
    }

    /// List forms owned by a user.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<form::Model>> {
        self.form_repo.find_by_user(user_id).await
    }

    /// Assert that a user owns a form.
    pub fn assert_owner(form: &form::Model, user_id: &str) -> AppResult<()> {
        if form.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "You do not own this form".to_string(),
            ))
        }
    }

    /// Whether a form is currently published.
    #[must_use]
    pub fn is_published(form: &form::Model) -> bool {
        presentation::is_published(form, Utc::now())
    }

    /// Publish a form, opening its publish window now.
    pub async fn publish(&self, form: form::Model) -> AppResult<form::Model> {
        let mut model: form::ActiveModel = form.into();
        model.published_at = Set(Some(Utc::now().into()));
        model.updated_at = Set(Some(Utc::now().into()));
        self.form_repo.update(model).await
    }

    /// Unpublish a form.
    pub async fn unpublish(&self, form: form::Model) -> AppResult<form::Model> {
        let mut model: form::ActiveModel = form.into();
        model.published_at = Set(None);
        model.updated_at = Set(Some(Utc::now().into()));
        self.form_repo.update(model).await
    }

    /// Delete a form. Blocks, interactions and recorded sessions cascade.
    pub async fn delete(&self, form: &form::Model) -> AppResult<()> {
        self.form_repo.delete(&form.id).await?;
        tracing::info!(form_id = %form.id, "Deleted form");
        Ok(())
    }

    /// Derive the rollup figures for a form.
    ///
    /// Tolerates a form without blocks or responses; every figure comes
    /// back zero.
    pub async fn stats(&self, form_id: &str) -> AppResult<FormStats> {
        let blocks = self.block_repo.find_by_form(form_id).await?;
        let block_ids: Vec<String> = blocks.iter().map(|b| b.id.clone()).collect();
        let responses = self.response_repo.find_by_blocks(&block_ids).await?;

        Ok(stats::aggregate(&blocks, &responses))
    }

    /// Assemble the display-only presentation of a form.
    pub async fn presentation(&self, form: &form::Model) -> AppResult<FormPresentation> {
        let owner = self.user_repo.get_by_id(&form.user_id).await?;
        let avatar = self.resolve_avatar(form).await?;
        Ok(presentation::presentation(form, &owner, avatar))
    }

    /// Resolve the public avatar URL, if the asset exists in storage.
    ///
    /// Falls back to the conventional `{uuid}/avatar.png` key when the form
    /// has no explicit path recorded.
    async fn resolve_avatar(&self, form: &form::Model) -> AppResult<Option<String>> {
        let key = form
            .avatar_path
            .clone()
            .unwrap_or_else(|| storage::avatar_key(&form.uuid));

        if self.storage.exists(&key).await? {
            Ok(Some(self.storage.public_url(&key)))
        } else {
            Ok(None)
        }
    }

    /// Serialize a form together with its derived display fields, the way
    /// the owner-facing API returns it.
    pub async fn to_api_json(&self, form: &form::Model) -> AppResult<serde_json::Value> {
        let view = self.presentation(form).await?;
        let public_url = presentation::public_url(&self.public_base, form)
            .map_err(|e| AppError::Internal(format!("Invalid public URL: {e}")))?;

        Ok(json!({
            "id": form.id,
            "uuid": form.uuid,
            "name": form.name,
            "url": public_url.as_str(),
            "published_at": form.published_at,
            "is_published": Self::is_published(form),
            "brand_color": view.brand_color,
            "contrast_color": view.contrast_color,
            "company_name": view.company_name,
            "company_description": view.company_description,
            "active_privacy_link": view.active_privacy_link,
            "active_legal_notice_link": view.active_legal_notice_link,
            "privacy_contact_person": view.privacy_contact_person,
            "privacy_contact_email": view.privacy_contact_email,
            "avatar": view.avatar,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use formflow_db::entities::{FormBlockType, form_block, form_session_response, user};
    use sea_orm::{DatabaseBackend, MockDatabase};

    struct FakeStorage {
        present: Vec<String>,
    }

    #[async_trait::async_trait]
    impl StorageBackend for FakeStorage {
        async fn put(&self, _key: &str, _data: &[u8]) -> AppResult<()> {
            Ok(())
        }

        async fn delete(&self, _key: &str) -> AppResult<()> {
            Ok(())
        }

        fn public_url(&self, key: &str) -> String {
            format!("/assets/{key}")
        }

        async fn exists(&self, key: &str) -> AppResult<bool> {
            Ok(self.present.iter().any(|k| k == key))
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection, present: Vec<String>) -> FormService {
        let db = Arc::new(db);
        FormService::new(
            FormRepository::new(Arc::clone(&db)),
            FormBlockRepository::new(Arc::clone(&db)),
            FormSessionResponseRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
            Arc::new(FakeStorage { present }),
            Url::parse("https://forms.example.com/").unwrap(),
        )
    }

    fn test_form(avatar_path: Option<&str>) -> form::Model {
        form::Model {
            id: "form1".to_string(),
            uuid: "uuid-1".to_string(),
            user_id: "user1".to_string(),
            name: "Feedback".to_string(),
            published_at: None,
            brand_color: None,
            privacy_link: None,
            legal_notice_link: None,
            avatar_path: avatar_path.map(str::to_string),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_owner() -> user::Model {
        user::Model {
            id: "user1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            api_token: "token".to_string(),
            company_name: Some("Test Corp".to_string()),
            company_description: None,
            privacy_link: Some("https://privacy".to_string()),
            legal_notice_link: None,
            privacy_contact_person: None,
            privacy_contact_email: None,
            created_at: Utc::now().into(),
        }
    }

    fn block(id: &str, block_type: FormBlockType) -> form_block::Model {
        form_block::Model {
            id: id.to_string(),
            form_id: "form1".to_string(),
            block_type,
            position: 0,
            message: None,
            created_at: Utc::now().into(),
        }
    }

    fn response(id: &str, session_id: &str, block_id: &str) -> form_session_response::Model {
        form_session_response::Model {
            id: id.to_string(),
            form_session_id: session_id.to_string(),
            form_block_id: block_id.to_string(),
            payload: serde_json::json!("hi"),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_stats_aggregates_blocks_and_responses() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                block("b1", FormBlockType::InputShort),
                block("b2", FormBlockType::Radio),
                block("b3", FormBlockType::None),
            ]])
            .append_query_results([vec![
                response("r1", "s1", "b1"),
                response("r2", "s1", "b2"),
                response("r3", "s2", "b1"),
            ]])
            .into_connection();

        let service = service_with(db, vec![]);
        let stats = service.stats("form1").await.unwrap();

        assert_eq!(stats.blocks_count, 3);
        assert_eq!(stats.action_blocks_count, 2);
        assert_eq!(stats.responses_count, 3);
        assert_eq!(stats.total_sessions, 2);
    }

    #[tokio::test]
    async fn test_stats_on_empty_form_are_zero() {
        // A form without blocks issues no response query at all.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<form_block::Model>::new()])
            .into_connection();

        let service = service_with(db, vec![]);
        let stats = service.stats("form1").await.unwrap();
        assert_eq!(stats, FormStats::default());
    }

    #[tokio::test]
    async fn test_presentation_resolves_existing_avatar() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_owner()]])
            .into_connection();

        let service = service_with(db, vec!["uuid-1/avatar.png".to_string()]);
        let view = service
            .presentation(&test_form(Some("uuid-1/avatar.png")))
            .await
            .unwrap();

        assert_eq!(view.avatar.as_deref(), Some("/assets/uuid-1/avatar.png"));
        assert_eq!(view.active_privacy_link.as_deref(), Some("https://privacy"));
    }

    #[tokio::test]
    async fn test_presentation_absent_avatar_asset_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_owner()]])
            .into_connection();

        let service = service_with(db, vec![]);
        let view = service
            .presentation(&test_form(Some("uuid-1/avatar.png")))
            .await
            .unwrap();

        assert!(view.avatar.is_none());
    }

    #[tokio::test]
    async fn test_api_json_carries_public_url() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_owner()]])
            .into_connection();

        let service = service_with(db, vec![]);
        let json = service.to_api_json(&test_form(None)).await.unwrap();

        assert_eq!(
            json["url"].as_str(),
            Some("https://forms.example.com/uuid-1")
        );
        assert_eq!(json["is_published"].as_bool(), Some(false));
    }

    #[test]
    fn test_assert_owner() {
        let form = test_form(None);
        assert!(FormService::assert_owner(&form, "user1").is_ok());
        assert!(matches!(
            FormService::assert_owner(&form, "user2").unwrap_err(),
            AppError::Forbidden(_)
        ));
    }
}
