//! Form session and response repositories.

use std::sync::Arc;

use crate::entities::{FormSession, FormSessionResponse, form_session, form_session_response};
use formflow_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Session repository for database operations.
#[derive(Clone)]
pub struct FormSessionRepository {
    db: Arc<DatabaseConnection>,
}

impl FormSessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<form_session::Model>> {
        FormSession::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a session by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_session::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session not found: {id}")))
    }

    /// Create a new session.
    pub async fn create(&self, model: form_session::ActiveModel) -> AppResult<form_session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Session response repository for database operations.
#[derive(Clone)]
pub struct FormSessionResponseRepository {
    db: Arc<DatabaseConnection>,
}

impl FormSessionResponseRepository {
    /// Create a new response repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List responses given for any of the supplied blocks.
    ///
    /// Returns an empty list for an empty block set without touching the
    /// database.
    pub async fn find_by_blocks(
        &self,
        block_ids: &[String],
    ) -> AppResult<Vec<form_session_response::Model>> {
        if block_ids.is_empty() {
            return Ok(Vec::new());
        }

        FormSessionResponse::find()
            .filter(form_session_response::Column::FormBlockId.is_in(block_ids.iter().cloned()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List responses recorded in a session.
    pub async fn find_by_session(
        &self,
        session_id: &str,
    ) -> AppResult<Vec<form_session_response::Model>> {
        FormSessionResponse::find()
            .filter(form_session_response::Column::FormSessionId.eq(session_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new response.
    pub async fn create(
        &self,
        model: form_session_response::ActiveModel,
    ) -> AppResult<form_session_response::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
