//! Form block service.

use chrono::Utc;
use formflow_common::{AppResult, IdGenerator};
use formflow_db::{
    entities::form_block,
    repositories::{FormBlockInteractionRepository, FormBlockRepository},
};
use sea_orm::Set;
use serde::Serialize;

use crate::blocks::parse_block_type;
use crate::resolver::{Component, ComponentProps, resolve};

/// Block service for business logic.
#[derive(Clone)]
pub struct BlockService {
    block_repo: FormBlockRepository,
    interaction_repo: FormBlockInteractionRepository,
    id_gen: IdGenerator,
}

/// Input for creating a block.
pub struct CreateBlockInput {
    /// Block type tag, e.g. `input-long`. Unknown tags are rejected.
    pub block_type: String,
    /// Prompt text shown to the respondent.
    pub message: Option<String>,
}

/// UI-binding descriptor for one block, as served to the client.
#[derive(Debug, Clone, Serialize)]
pub struct BlockBinding {
    /// Whether a component should be mounted for this block.
    pub in_use: bool,
    /// Component tag to mount, when in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    /// Static component props, when in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<ComponentProps>,
}

impl BlockService {
    /// Create a new block service.
    #[must_use]
    pub const fn new(
        block_repo: FormBlockRepository,
        interaction_repo: FormBlockInteractionRepository,
    ) -> Self {
        Self {
            block_repo,
            interaction_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a block at the end of a form.
    ///
    /// The type tag goes through the block type registry; tags outside the
    /// closed set surface [`formflow_common::AppError::UnknownBlockType`].
    pub async fn create(
        &self,
        form_id: &str,
        input: CreateBlockInput,
    ) -> AppResult<form_block::Model> {
        let block_type = parse_block_type(&input.block_type)?;
        let position = self.block_repo.count_by_form(form_id).await?;

        let model = form_block::ActiveModel {
            id: Set(self.id_gen.generate()),
            form_id: Set(form_id.to_string()),
            block_type: Set(block_type),
            position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
            message: Set(input.message),
            created_at: Set(Utc::now().into()),
        };

        let created = self.block_repo.create(model).await?;
        tracing::debug!(block_id = %created.id, form_id = %form_id, "Created block");
        Ok(created)
    }

    /// Get a block by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_block::Model> {
        self.block_repo.get_by_id(id).await
    }

    /// List a form's blocks in display order.
    pub async fn list(&self, form_id: &str) -> AppResult<Vec<form_block::Model>> {
        self.block_repo.find_by_form(form_id).await
    }

    /// Update a block's prompt message.
    pub async fn update_message(
        &self,
        block: form_block::Model,
        message: Option<String>,
    ) -> AppResult<form_block::Model> {
        let mut model: form_block::ActiveModel = block.into();
        model.message = Set(message);
        self.block_repo.update(model).await
    }

    /// Delete a block. Interactions and responses cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        // Surfaces not-found before the delete becomes a silent no-op.
        let block = self.block_repo.get_by_id(id).await?;
        self.block_repo.delete(&block.id).await
    }

    /// Resolve the UI-binding descriptor for a block.
    pub async fn binding(&self, block: &form_block::Model) -> AppResult<BlockBinding> {
        let interactions = self.interaction_repo.find_by_block(&block.id).await?;
        let resolved = resolve(block.block_type, &interactions);

        Ok(BlockBinding {
            in_use: resolved.in_use(),
            component: resolved.component(),
            props: resolved.props(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use formflow_common::AppError;
    use formflow_db::entities::FormBlockType;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service_with(db: sea_orm::DatabaseConnection) -> BlockService {
        let db = Arc::new(db);
        BlockService::new(
            FormBlockRepository::new(Arc::clone(&db)),
            FormBlockInteractionRepository::new(db),
        )
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

    #[tokio::test]
    async fn test_create_rejects_unknown_type_tag() {
        let service = service_with(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let err = service
            .create(
                "form1",
                CreateBlockInput {
                    block_type: "carousel".to_string(),
                    message: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UnknownBlockType(_)));
    }

    #[tokio::test]
    async fn test_binding_for_input_long_block() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<
                formflow_db::entities::form_block_interaction::Model,
            >::new()])
            .into_connection();

        let service = service_with(db);
        let binding = service
            .binding(&block("b1", FormBlockType::InputLong))
            .await
            .unwrap();

        assert!(binding.in_use);
        assert_eq!(binding.component, Some(Component::TextareaAction));
        assert!(binding.props.unwrap().disable_enter_key);
    }

    #[tokio::test]
    async fn test_binding_for_none_block_is_unused() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<
                formflow_db::entities::form_block_interaction::Model,
            >::new()])
            .into_connection();

        let service = service_with(db);
        let binding = service
            .binding(&block("b1", FormBlockType::None))
            .await
            .unwrap();

        assert!(!binding.in_use);
        assert!(binding.component.is_none());
        assert!(binding.props.is_none());
    }
}
