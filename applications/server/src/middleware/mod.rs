/// Request guards: authentication and payload validation
pub mod auth;
pub mod validation;

pub use auth::{AdminUser, AuthenticatedUser};
pub use validation::{Validate, ValidId, ValidatedJson};
