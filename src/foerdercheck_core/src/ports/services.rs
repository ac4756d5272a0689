use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;

use crate::domain::{
    email::Email,
    remote_user::{RemoteUser, RemoteUserId},
    token::{AuthToken, TokenPayload, TokenPurpose},
};

// TokenCodec port trait and errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token issued for {actual}, expected {expected}")]
    WrongPurpose {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Creates and checks signed, expiring tokens. Pure apart from reading the clock.
pub trait TokenCodec: Send + Sync {
    fn issue(
        &self,
        subject: &Email,
        purpose: TokenPurpose,
        validity: Duration,
    ) -> Result<AuthToken, TokenError>;

    /// Check signature and expiry without looking at the purpose.
    ///
    /// Malformed input is reported as `InvalidSignature`.
    fn decode(&self, token: &str) -> Result<TokenPayload, TokenError>;

    /// Check signature, expiry and that the token was minted for `expected`.
    fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenPayload, TokenError> {
        let payload = self.decode(token)?;
        if payload.purpose != expected {
            return Err(TokenError::WrongPurpose {
                expected,
                actual: payload.purpose,
            });
        }
        Ok(payload)
    }
}

#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(&self, recipient: &Email, subject: &str, content: &str)
    -> Result<(), String>;
}

// UserProvisioningGateway port trait and errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpstreamFailure {
    #[error("request timed out")]
    Timeout,
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("row not found")]
    RowNotFound,
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisioningError {
    /// The identity could not be created. Nothing exists remotely.
    #[error("Identity creation failed: {0}")]
    UpstreamAuth(UpstreamFailure),
    /// The identity exists but its data row could not be written.
    #[error("Eligibility data write failed for user {user_id}: {failure}")]
    UpstreamData {
        user_id: RemoteUserId,
        failure: UpstreamFailure,
    },
}

impl ProvisioningError {
    pub fn failure(&self) -> &UpstreamFailure {
        match self {
            Self::UpstreamAuth(failure) | Self::UpstreamData { failure, .. } => failure,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.failure(), UpstreamFailure::Timeout)
    }

    /// Identity that already exists remotely, if any.
    pub fn user_id(&self) -> Option<&RemoteUserId> {
        match self {
            Self::UpstreamAuth(_) => None,
            Self::UpstreamData { user_id, .. } => Some(user_id),
        }
    }
}

/// Creates identities and their eligibility-data rows in the external backend.
#[async_trait]
pub trait UserProvisioningGateway: Send + Sync {
    /// Create a confirmed identity, then its data row with status "pending".
    ///
    /// A failure after the identity was created is returned as
    /// `UpstreamData` carrying the new identity's id.
    async fn create_user(&self, email: &Email) -> Result<RemoteUser, ProvisioningError>;

    /// Create only the data row for an identity that already exists.
    async fn create_user_data(&self, user_id: &RemoteUserId) -> Result<(), ProvisioningError>;

    async fn store_eligibility_data(
        &self,
        user_id: &RemoteUserId,
        data: serde_json::Value,
    ) -> Result<(), ProvisioningError>;
}

impl<T: TokenCodec + ?Sized> TokenCodec for Arc<T> {
    fn issue(
        &self,
        subject: &Email,
        purpose: TokenPurpose,
        validity: Duration,
    ) -> Result<AuthToken, TokenError> {
        (**self).issue(subject, purpose, validity)
    }

    fn decode(&self, token: &str) -> Result<TokenPayload, TokenError> {
        (**self).decode(token)
    }
}

#[async_trait]
impl<T: EmailClient + ?Sized> EmailClient for Arc<T> {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        (**self).send_email(recipient, subject, content).await
    }
}

#[async_trait]
impl<T: UserProvisioningGateway + ?Sized> UserProvisioningGateway for Arc<T> {
    async fn create_user(&self, email: &Email) -> Result<RemoteUser, ProvisioningError> {
        (**self).create_user(email).await
    }

    async fn create_user_data(&self, user_id: &RemoteUserId) -> Result<(), ProvisioningError> {
        (**self).create_user_data(user_id).await
    }

    async fn store_eligibility_data(
        &self,
        user_id: &RemoteUserId,
        data: serde_json::Value,
    ) -> Result<(), ProvisioningError> {
        (**self).store_eligibility_data(user_id, data).await
    }
}
