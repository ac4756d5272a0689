use axum::{Json, extract::State, response::IntoResponse};
use foerdercheck_application::AuthFlow;
use foerdercheck_core::{Email, EmailClient, TokenCodec, VerifiedEmailRegistry};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<C, V, E>(
    State(auth_flow): State<AuthFlow<C, V, E>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    C: TokenCodec + Clone + 'static,
    V: VerifiedEmailRegistry + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let token = auth_flow.login(email).await?;

    Ok(Json(LoginResponse {
        message: "Login link sent".to_owned(),
        token: token.into_string(),
    }))
}
