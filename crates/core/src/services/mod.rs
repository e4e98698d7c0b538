//! Business logic services.

#![allow(missing_docs)]

pub mod block;
pub mod form;
pub mod interaction;
pub mod session;
pub mod user;

pub use block::{BlockBinding, BlockService, CreateBlockInput};
pub use form::{CreateFormInput, FormService};
pub use interaction::{InteractionService, UpdateInteractionInput};
pub use session::SessionService;
pub use user::UserService;
