//! Form block repository.

use std::sync::Arc;

use crate::entities::{FormBlock, form_block};
use formflow_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// Form block repository for database operations.
#[derive(Clone)]
pub struct FormBlockRepository {
    db: Arc<DatabaseConnection>,
}

impl FormBlockRepository {
    /// Create a new form block repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a block by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<form_block::Model>> {
        FormBlock::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a block by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_block::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BlockNotFound(id.to_string()))
    }

    /// List a form's blocks in display order.
    pub async fn find_by_form(&self, form_id: &str) -> AppResult<Vec<form_block::Model>> {
        FormBlock::find()
            .filter(form_block::Column::FormId.eq(form_id))
            .order_by_asc(form_block::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a form's blocks.
    pub async fn count_by_form(&self, form_id: &str) -> AppResult<u64> {
        FormBlock::find()
            .filter(form_block::Column::FormId.eq(form_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new block.
    pub async fn create(&self, model: form_block::ActiveModel) -> AppResult<form_block::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a block.
    pub async fn update(&self, model: form_block::ActiveModel) -> AppResult<form_block::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a block. Its interactions and responses cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        FormBlock::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
