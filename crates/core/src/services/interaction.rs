//! Form block interaction service.

use chrono::Utc;
use formflow_common::{AppError, AppResult, IdGenerator};
use formflow_db::{
    entities::{InteractionType, form_block, form_block_interaction},
    repositories::FormBlockInteractionRepository,
};
use sea_orm::Set;
use serde_json::{Value as JsonValue, json};

use crate::blocks::descriptor;
use crate::options::InteractionOptions;

/// Interaction service for business logic.
#[derive(Clone)]
pub struct InteractionService {
    interaction_repo: FormBlockInteractionRepository,
    id_gen: IdGenerator,
}

/// Partial update for an interaction. Absent fields stay untouched.
#[derive(Debug, Default)]
pub struct UpdateInteractionInput {
    pub label: Option<String>,
    pub reply: Option<String>,
    pub uuid: Option<String>,
    /// Option bag patch, merged per key into the stored bag.
    pub options: Option<JsonValue>,
}

impl InteractionService {
    /// Create a new interaction service.
    #[must_use]
    pub const fn new(interaction_repo: FormBlockInteractionRepository) -> Self {
        Self {
            interaction_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create an interaction at the end of a block.
    ///
    /// The block's type decides which interaction types it accepts; a type
    /// outside that set is rejected before anything is written.
    pub async fn create(
        &self,
        block: &form_block::Model,
        interaction_type: InteractionType,
    ) -> AppResult<form_block_interaction::Model> {
        if !descriptor(block.block_type).accepts_interaction(interaction_type) {
            return Err(AppError::Validation(format!(
                "Block type '{}' does not accept this interaction type",
                crate::blocks::block_type_tag(block.block_type)
            )));
        }

        let existing = self.interaction_repo.find_by_block(&block.id).await?;

        let model = form_block_interaction::ActiveModel {
            id: Set(self.id_gen.generate()),
            uuid: Set(self.id_gen.generate_uuid_v4()),
            form_block_id: Set(block.id.clone()),
            interaction_type: Set(interaction_type),
            label: Set(None),
            reply: Set(None),
            options: Set(json!({})),
            position: Set(i32::try_from(existing.len()).unwrap_or(i32::MAX)),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        let created = self.interaction_repo.create(model).await?;
        tracing::debug!(
            interaction_id = %created.id,
            block_id = %block.id,
            "Created interaction"
        );
        Ok(created)
    }

    /// Get an interaction by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_block_interaction::Model> {
        self.interaction_repo.get_by_id(id).await
    }

    /// List a block's interactions in display order.
    pub async fn list(&self, block_id: &str) -> AppResult<Vec<form_block_interaction::Model>> {
        self.interaction_repo.find_by_block(block_id).await
    }

    /// Apply a partial update to an interaction.
    ///
    /// An options patch merges per key into the stored bag, database-side,
    /// so keys absent from the patch keep their stored values even under a
    /// racing writer. The remaining fields update independently.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateInteractionInput,
    ) -> AppResult<form_block_interaction::Model> {
        let current = self.interaction_repo.get_by_id(id).await?;

        if let Some(patch) = input.options {
            // Re-encoding through the bag drops non-scalar entries before
            // they reach the column.
            let patch = InteractionOptions::from_json(&patch).to_json();
            self.interaction_repo.merge_options(&current.id, patch).await?;
        }

        let mut model: form_block_interaction::ActiveModel = current.into();
        if let Some(label) = input.label {
            model.label = Set(Some(label));
        }
        if let Some(reply) = input.reply {
            model.reply = Set(Some(reply));
        }
        if let Some(uuid) = input.uuid {
            model.uuid = Set(uuid);
        }
        model.updated_at = Set(Some(Utc::now().into()));

        self.interaction_repo.update(model).await
    }

    /// Hard-delete an interaction.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        // Surfaces not-found before the delete becomes a silent no-op.
        let interaction = self.interaction_repo.get_by_id(id).await?;
        self.interaction_repo.delete(&interaction.id).await?;
        tracing::debug!(interaction_id = %id, "Deleted interaction");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use formflow_db::entities::FormBlockType;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> InteractionService {
        InteractionService::new(FormBlockInteractionRepository::new(Arc::new(db)))
    }

    fn block(block_type: FormBlockType) -> form_block::Model {
        form_block::Model {
            id: "b1".to_string(),
            form_id: "form1".to_string(),
            block_type,
            position: 0,
            message: None,
            created_at: Utc::now().into(),
        }
    }

    fn interaction(id: &str, options: JsonValue) -> form_block_interaction::Model {
        form_block_interaction::Model {
            id: id.to_string(),
            uuid: "uuid-i1".to_string(),
            form_block_id: "b1".to_string(),
            interaction_type: InteractionType::Textarea,
            label: Some("Answer".to_string()),
            reply: None,
            options,
            position: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_appends_to_block() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![interaction("i0", json!({}))]])
            .append_query_results([vec![form_block_interaction::Model {
                position: 1,
                ..interaction("i1", json!({}))
            }]])
            .into_connection();

        let service = service_with(db);
        let created = service
            .create(&block(FormBlockType::InputLong), InteractionType::Textarea)
            .await
            .unwrap();

        assert_eq!(created.position, 1);
        assert_eq!(created.interaction_type, InteractionType::Textarea);
    }

    #[tokio::test]
    async fn test_create_rejects_unaccepted_interaction_type() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let err = service
            .create(&block(FormBlockType::Radio), InteractionType::Textarea)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service
            .create(&block(FormBlockType::None), InteractionType::Input)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_message_block_takes_a_button() {
        let created_row = form_block_interaction::Model {
            interaction_type: InteractionType::Button,
            ..interaction("i1", json!({}))
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<form_block_interaction::Model>::new()])
            .append_query_results([vec![created_row]])
            .into_connection();

        let service = service_with(db);
        let created = service
            .create(&block(FormBlockType::None), InteractionType::Button)
            .await
            .unwrap();
        assert_eq!(created.interaction_type, InteractionType::Button);
    }

    #[tokio::test]
    async fn test_update_merges_options_in_the_database() {
        let stored = interaction("i1", json!({"max_chars": 250, "rows": 5}));
        let after = interaction("i1", json!({"max_chars": 500, "rows": 5}));

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![stored]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .append_query_results([vec![after]])
                .into_connection(),
        );

        let service =
            InteractionService::new(FormBlockInteractionRepository::new(Arc::clone(&db)));
        service
            .update(
                "i1",
                UpdateInteractionInput {
                    options: Some(json!({"max_chars": 500})),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        drop(service);

        // The merge must happen in one statement with the jsonb
        // concatenation operator, carrying only the patched key; the
        // untouched key stays server-side and cannot be reverted by a
        // racing writer.
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let merge = log
            .iter()
            .map(|t| format!("{t:?}"))
            .find(|s| s.contains("||"))
            .expect("no jsonb merge statement issued");
        assert!(merge.contains("max_chars"));
        assert!(merge.contains("500"));
        assert!(!merge.contains("rows"));

        // The follow-up field update must not rewrite the bag.
        let field_update = log
            .iter()
            .map(|t| format!("{t:?}"))
            .filter(|s| s.contains("UPDATE") && !s.contains("||"))
            .next_back()
            .expect("no field update issued");
        let set_clause = field_update.split("RETURNING").next().unwrap();
        assert!(!set_clause.contains("\"options\""));
    }

    #[tokio::test]
    async fn test_update_uuid_only_touches_nothing_else() {
        let stored = interaction("i1", json!({"max_chars": 250}));
        let after = form_block_interaction::Model {
            uuid: "i-10".to_string(),
            ..interaction("i1", json!({"max_chars": 250}))
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![stored]])
                .append_query_results([vec![after]])
                .into_connection(),
        );

        let service =
            InteractionService::new(FormBlockInteractionRepository::new(Arc::clone(&db)));
        let updated = service
            .update(
                "i1",
                UpdateInteractionInput {
                    uuid: Some("i-10".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.uuid, "i-10");
        assert_eq!(updated.label.as_deref(), Some("Answer"));
        drop(service);

        // Only uuid and the bookkeeping timestamp appear in the SET clause.
        let log = Arc::try_unwrap(db).unwrap().into_transaction_log();
        let update = log
            .iter()
            .map(|t| format!("{t:?}"))
            .find(|s| s.contains("UPDATE"))
            .expect("no update issued");
        let set_clause = update.split("RETURNING").next().unwrap();
        assert!(set_clause.contains("\"uuid\""));
        assert!(set_clause.contains("\"updated_at\""));
        assert!(!set_clause.contains("\"label\""));
        assert!(!set_clause.contains("\"reply\""));
        assert!(!set_clause.contains("\"options\""));
    }

    #[tokio::test]
    async fn test_delete_is_hard() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![interaction("i1", json!({}))]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = service_with(db);
        assert!(service.delete("i1").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_interaction_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<form_block_interaction::Model>::new()])
            .into_connection();

        let service = service_with(db);
        let err = service.delete("nope").await.unwrap_err();
        assert!(matches!(err, AppError::InteractionNotFound(_)));
    }
}
