use axum::{Json, extract::State, response::IntoResponse};
use foerdercheck_application::AuthFlow;
use foerdercheck_core::{Email, EmailClient, TokenCodec, VerifiedEmailRegistry};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub token: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<C, V, E>(
    State(auth_flow): State<AuthFlow<C, V, E>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: TokenCodec + Clone + 'static,
    V: VerifiedEmailRegistry + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let token = auth_flow.register(email).await?;

    Ok(Json(RegisterResponse {
        message: "Verification email sent".to_owned(),
        token: token.into_string(),
    }))
}
