use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use foerdercheck_core::{AuthValidator, Email, TokenCodec, TokenError, TokenPurpose};
use thiserror::Error;

use crate::http::routes::ApiError;

/// Identity established from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: Email,
}

#[derive(Debug, Error)]
pub enum BearerAuthError {
    #[error("Missing bearer token")]
    MissingToken,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),
}

/// Validates `Authorization: Bearer <token>` headers. Only session tokens are accepted.
#[derive(Clone)]
pub struct BearerTokenValidator {
    codec: Arc<dyn TokenCodec>,
}

impl BearerTokenValidator {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }
}

#[async_trait]
impl AuthValidator for BearerTokenValidator {
    type Principal = Principal;
    type RequestParts = http::request::Parts;
    type Error = BearerAuthError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Self::Principal, Self::Error> {
        let Authorization(bearer) = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or(BearerAuthError::MissingToken)?;

        let payload = self.codec.verify(bearer.token(), TokenPurpose::Session)?;

        Ok(Principal {
            email: payload.subject,
        })
    }
}

impl<S> FromRequestParts<S> for Principal
where
    BearerTokenValidator: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let validator = BearerTokenValidator::from_ref(state);
        validator.validate(parts).await.map_err(|e| {
            tracing::debug!(error = %e, "Bearer authentication failed");
            ApiError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use http::{Request, header::AUTHORIZATION};
    use secrecy::Secret;

    use crate::token::JwtTokenCodec;

    fn codec() -> Arc<JwtTokenCodec> {
        Arc::new(JwtTokenCodec::new(Secret::from("secret".to_owned())))
    }

    fn parts(authorization: Option<&str>) -> http::request::Parts {
        let mut builder = Request::builder().uri("/document-check/load");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn token(codec: &JwtTokenCodec, purpose: TokenPurpose) -> String {
        codec
            .issue(&Email::parse("a@x.com").unwrap(), purpose, Duration::hours(1))
            .unwrap()
            .into_string()
    }

    #[tokio::test]
    async fn test_session_token_yields_principal() {
        let codec = codec();
        let validator = BearerTokenValidator::new(codec.clone());
        let token = token(&codec, TokenPurpose::Session);

        let principal = validator
            .validate(&parts(Some(format!("Bearer {token}").as_str())))
            .await
            .unwrap();

        assert_eq!(principal.email.as_str(), "a@x.com");
    }

    #[tokio::test]
    async fn test_missing_or_malformed_header_is_missing_token() {
        let validator = BearerTokenValidator::new(codec());

        for header in [None, Some("Basic abc"), Some("Bearer")] {
            let result = validator.validate(&parts(header)).await;
            assert!(matches!(result, Err(BearerAuthError::MissingToken)));
        }
    }

    #[tokio::test]
    async fn test_login_token_is_not_a_session() {
        let codec = codec();
        let validator = BearerTokenValidator::new(codec.clone());
        let token = token(&codec, TokenPurpose::Login);

        let result = validator
            .validate(&parts(Some(format!("Bearer {token}").as_str())))
            .await;

        assert!(matches!(
            result,
            Err(BearerAuthError::InvalidToken(TokenError::WrongPurpose { .. }))
        ));
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let validator = BearerTokenValidator::new(codec());
        let result = validator.validate(&parts(Some("Bearer garbage"))).await;
        assert!(matches!(
            result,
            Err(BearerAuthError::InvalidToken(TokenError::InvalidSignature))
        ));
    }
}
