use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use foerdercheck_core::{
    AuthToken, Clock, Email, SystemClock, TokenCodec, TokenError, TokenPayload, TokenPurpose,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// HS256 token codec. Expiry is checked against the injected clock rather than
/// the library's own view of the current time.
#[derive(Clone)]
pub struct JwtTokenCodec {
    secret: Secret<String>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenCodec {
    pub fn new(secret: Secret<String>) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: Secret<String>, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();
        validation
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    purpose: TokenPurpose,
    iat: i64,
    exp: i64,
}

impl TokenCodec for JwtTokenCodec {
    fn issue(
        &self,
        subject: &Email,
        purpose: TokenPurpose,
        validity: Duration,
    ) -> Result<AuthToken, TokenError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(validity)
            .ok_or_else(|| TokenError::Signing("Duration out of range".to_owned()))?;

        let claims = Claims {
            sub: subject.as_str().to_owned(),
            purpose,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.as_bytes()),
        )
        .map(AuthToken::new)
        .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.as_bytes()),
            &Self::validation(),
        )
        .map(|data| data.claims)
        .map_err(|_| TokenError::InvalidSignature)?;

        if self.clock.now().timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let subject = Email::parse(&claims.sub).map_err(|_| TokenError::InvalidSignature)?;
        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;

        Ok(TokenPayload {
            subject,
            purpose: claims.purpose,
            issued_at,
            expires_at,
        })
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0).ok_or(TokenError::InvalidSignature)
}
