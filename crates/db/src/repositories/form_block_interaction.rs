//! Form block interaction repository.

use std::sync::Arc;

use crate::entities::{FormBlockInteraction, form_block_interaction};
use formflow_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::Expr,
};
use serde_json::Value as JsonValue;

/// Interaction repository for database operations.
#[derive(Clone)]
pub struct FormBlockInteractionRepository {
    db: Arc<DatabaseConnection>,
}

impl FormBlockInteractionRepository {
    /// Create a new interaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an interaction by ID.
    pub async fn find_by_id(
        &self,
        id: &str,
    ) -> AppResult<Option<form_block_interaction::Model>> {
        FormBlockInteraction::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an interaction by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_block_interaction::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::InteractionNotFound(id.to_string()))
    }

    /// List a block's interactions in display order.
    pub async fn find_by_block(
        &self,
        block_id: &str,
    ) -> AppResult<Vec<form_block_interaction::Model>> {
        FormBlockInteraction::find()
            .filter(form_block_interaction::Column::FormBlockId.eq(block_id))
            .order_by_asc(form_block_interaction::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new interaction.
    pub async fn create(
        &self,
        model: form_block_interaction::ActiveModel,
    ) -> AppResult<form_block_interaction::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an interaction.
    pub async fn update(
        &self,
        model: form_block_interaction::ActiveModel,
    ) -> AppResult<form_block_interaction::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Merge a JSON patch into the stored options bag.
    ///
    /// The merge runs database-side (`jsonb ||`) in a single statement, so
    /// racing writers patching different keys cannot revert each other.
    pub async fn merge_options(&self, id: &str, patch: JsonValue) -> AppResult<()> {
        FormBlockInteraction::update_many()
            .col_expr(
                form_block_interaction::Column::Options,
                Expr::cust_with_values("\"options\" || $1", [patch]),
            )
            .filter(form_block_interaction::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Hard-delete an interaction.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        FormBlockInteraction::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
