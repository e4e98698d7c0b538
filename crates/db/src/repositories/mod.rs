//! Database repositories.
//!
//! Thin query layers over the entities. Repositories only translate
//! between `SeaORM` and [`formflow_common::AppError`]; business rules live
//! in the core services.

pub mod form;
pub mod form_block;
pub mod form_block_interaction;
pub mod form_session;
pub mod user;

pub use form::FormRepository;
pub use form_block::FormBlockRepository;
pub use form_block_interaction::FormBlockInteractionRepository;
pub use form_session::{FormSessionRepository, FormSessionResponseRepository};
pub use user::UserRepository;
