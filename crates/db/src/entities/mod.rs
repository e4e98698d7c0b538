//! Database entities.
//!
//! `SeaORM` models for forms, their blocks and interactions, and the
//! respondent sessions/responses recorded against them.

pub mod form;
pub mod form_block;
pub mod form_block_interaction;
pub mod form_session;
pub mod form_session_response;
pub mod user;

pub use form::Entity as Form;
pub use form_block::Entity as FormBlock;
pub use form_block::FormBlockType;
pub use form_block_interaction::Entity as FormBlockInteraction;
pub use form_block_interaction::InteractionType;
pub use form_session::Entity as FormSession;
pub use form_session_response::Entity as FormSessionResponse;
pub use user::Entity as User;
