//! Respondent session service.

use chrono::Utc;
use formflow_common::{AppError, AppResult, IdGenerator};
use formflow_db::{
    entities::{form, form_block, form_session, form_session_response},
    repositories::{
        FormBlockInteractionRepository, FormBlockRepository, FormSessionRepository,
        FormSessionResponseRepository,
    },
};
use sea_orm::Set;
use serde_json::Value as JsonValue;

use crate::resolver::resolve;

/// Session service for business logic.
#[derive(Clone)]
pub struct SessionService {
    session_repo: FormSessionRepository,
    response_repo: FormSessionResponseRepository,
    block_repo: FormBlockRepository,
    interaction_repo: FormBlockInteractionRepository,
    id_gen: IdGenerator,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub const fn new(
        session_repo: FormSessionRepository,
        response_repo: FormSessionResponseRepository,
        block_repo: FormBlockRepository,
        interaction_repo: FormBlockInteractionRepository,
    ) -> Self {
        Self {
            session_repo,
            response_repo,
            block_repo,
            interaction_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Start a respondent session on a published form.
    pub async fn start(&self, form: &form::Model) -> AppResult<form_session::Model> {
        if !crate::presentation::is_published(form, Utc::now()) {
            return Err(AppError::Forbidden(
                "This form is not published".to_string(),
            ));
        }

        let model = form_session::ActiveModel {
            id: Set(self.id_gen.generate()),
            form_id: Set(form.id.clone()),
            token: Set(self.id_gen.generate_token()),
            created_at: Set(Utc::now().into()),
        };

        let created = self.session_repo.create(model).await?;
        tracing::debug!(session_id = %created.id, form_id = %form.id, "Started session");
        Ok(created)
    }

    /// Get a session by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<form_session::Model> {
        self.session_repo.get_by_id(id).await
    }

    /// Record a respondent's answer to a block within a session.
    ///
    /// The block must belong to the session's form, and the payload must
    /// pass the block's resolved validator. An invalid payload surfaces as
    /// a validation error carrying the validator's message; nothing is
    /// written in that case.
    pub async fn respond(
        &self,
        session: &form_session::Model,
        block_id: &str,
        payload: JsonValue,
    ) -> AppResult<form_session_response::Model> {
        let block = self.block_repo.get_by_id(block_id).await?;
        if block.form_id != session.form_id {
            return Err(AppError::BadRequest(
                "Block does not belong to this form".to_string(),
            ));
        }

        self.validate_payload(&block, &payload).await?;

        let model = form_session_response::ActiveModel {
            id: Set(self.id_gen.generate()),
            form_session_id: Set(session.id.clone()),
            form_block_id: Set(block.id.clone()),
            payload: Set(payload),
            created_at: Set(Utc::now().into()),
        };

        let created = self.response_repo.create(model).await?;
        tracing::debug!(
            response_id = %created.id,
            session_id = %session.id,
            block_id = %block.id,
            "Recorded response"
        );
        Ok(created)
    }

    /// List the responses recorded in a session.
    pub async fn responses(
        &self,
        session_id: &str,
    ) -> AppResult<Vec<form_session_response::Model>> {
        self.response_repo.find_by_session(session_id).await
    }

    async fn validate_payload(
        &self,
        block: &form_block::Model,
        payload: &JsonValue,
    ) -> AppResult<()> {
        let interactions = self.interaction_repo.find_by_block(&block.id).await?;
        let outcome = resolve(block.block_type, &interactions).validate_payload(payload);

        if outcome.valid {
            Ok(())
        } else {
            Err(AppError::Validation(
                outcome
                    .message
                    .unwrap_or_else(|| "Invalid input".to_string()),
            ))
        }
    }
}
