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
pub struct ValidateLoginResponse {
    pub success: bool,
    pub email: Email,
    /// Session token to send as `Authorization: Bearer`.
    pub token: String,
}

#[tracing::instrument(name = "Validate login", skip_all)]
pub async fn validate_login<C, V, E>(
    State(auth_flow): State<AuthFlow<C, V, E>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    C: TokenCodec + Clone + 'static,
    V: VerifiedEmailRegistry + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let session = auth_flow.validate_login(&token).await?;

    Ok(Json(ValidateLoginResponse {
        success: true,
        email: session.email,
        token: session.session_token.into_string(),
    }))
}
