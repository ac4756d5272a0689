use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use foerdercheck_application::AuthFlowError;
use foerdercheck_core::{
    EmailError, ProvisioningError, RecordStoreError, RemoteUserId, TokenError, UpstreamFailure,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth_validation::BearerAuthError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Please verify your email address before logging in")]
    EmailNotVerified,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Upstream request timed out")]
    UpstreamTimeout { user_id: Option<RemoteUserId> },

    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        user_id: Option<RemoteUserId>,
    },

    #[error("Internal server error")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, user_id) = match &self {
            ApiError::InvalidInput(_) | ApiError::InvalidToken | ApiError::EmailNotVerified => {
                (StatusCode::BAD_REQUEST, None)
            }

            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, None),

            ApiError::UpstreamTimeout { user_id } => (StatusCode::GATEWAY_TIMEOUT, *user_id),

            ApiError::Upstream { user_id, .. } => (StatusCode::BAD_GATEWAY, *user_id),

            ApiError::UnexpectedError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            user_id: user_id.map(|id| id.to_string()),
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<uuid::Error> for ApiError {
    fn from(error: uuid::Error) -> Self {
        ApiError::InvalidInput(format!("Invalid user id: {error}"))
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Signing(e) => ApiError::UnexpectedError(e),
            TokenError::InvalidSignature | TokenError::Expired | TokenError::WrongPurpose { .. } => {
                ApiError::InvalidToken
            }
        }
    }
}

impl From<AuthFlowError> for ApiError {
    fn from(error: AuthFlowError) -> Self {
        match error {
            AuthFlowError::EmailNotVerified => ApiError::EmailNotVerified,
            AuthFlowError::Token(e) => e.into(),
            AuthFlowError::Registry(e) => ApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RecordStoreError> for ApiError {
    fn from(error: RecordStoreError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<BearerAuthError> for ApiError {
    fn from(error: BearerAuthError) -> Self {
        match error {
            BearerAuthError::InvalidToken(TokenError::Signing(e)) => ApiError::UnexpectedError(e),
            BearerAuthError::MissingToken | BearerAuthError::InvalidToken(_) => {
                ApiError::Unauthorized
            }
        }
    }
}

impl From<ProvisioningError> for ApiError {
    fn from(error: ProvisioningError) -> Self {
        let user_id = error.user_id().copied();
        match error.failure() {
            UpstreamFailure::Timeout => ApiError::UpstreamTimeout { user_id },
            _ => ApiError::Upstream {
                message: error.to_string(),
                user_id,
            },
        }
    }
}
