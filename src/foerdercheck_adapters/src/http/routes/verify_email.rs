use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use foerdercheck_application::AuthFlow;
use foerdercheck_core::{Email, EmailClient, TokenCodec, VerifiedEmailRegistry};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub success: bool,
    pub email: Email,
}

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify_email<C, V, E>(
    State(auth_flow): State<AuthFlow<C, V, E>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    C: TokenCodec + Clone + 'static,
    V: VerifiedEmailRegistry + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = auth_flow.verify_email(&token).await?;

    Ok(Json(VerifyEmailResponse {
        success: true,
        email,
    }))
}
