pub mod bearer_validator;

pub use bearer_validator::{BearerAuthError, BearerTokenValidator, Principal};
