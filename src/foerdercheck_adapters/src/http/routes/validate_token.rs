use axum::{Json, response::IntoResponse};
use foerdercheck_core::Email;
use serde::{Deserialize, Serialize};

use crate::auth_validation::Principal;

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub email: Email,
}

#[tracing::instrument(name = "Validate token", skip_all)]
pub async fn validate_token(principal: Principal) -> impl IntoResponse {
    Json(ValidateTokenResponse {
        valid: true,
        email: principal.email,
    })
}
