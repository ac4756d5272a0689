use askama::Template;
use chrono::Duration;
use foerdercheck_core::{
    AuthToken, Email, EmailClient, RegistryError, TokenCodec, TokenError, TokenPurpose,
    VerifiedEmailRegistry,
};

use crate::notifications::{LoginEmail, VerificationEmail, describe_validity};

/// Token lifetimes and link targets used by the flow.
#[derive(Debug, Clone)]
pub struct AuthFlowSettings {
    pub verification_ttl: Duration,
    pub login_ttl: Duration,
    pub session_ttl: Duration,
    pub frontend_url: String,
}

impl Default for AuthFlowSettings {
    fn default() -> Self {
        Self {
            verification_ttl: Duration::hours(24),
            login_ttl: Duration::hours(1),
            session_ttl: Duration::hours(24),
            frontend_url: "http://localhost:3000".to_owned(),
        }
    }
}

/// Result of redeeming a login token
#[derive(Debug, Clone, PartialEq)]
pub struct LoginSession {
    pub email: Email,
    pub session_token: AuthToken,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("Please verify your email address before logging in")]
    EmailNotVerified,
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Passwordless email-link authentication.
///
/// Per address: `Unregistered -> VerificationPending -> Verified`. Login
/// attempts issue a short-lived login token which is exchanged for a session
/// token; neither step changes the verification state.
#[derive(Clone)]
pub struct AuthFlow<C, V, E> {
    codec: C,
    registry: V,
    email_client: E,
    settings: AuthFlowSettings,
}

impl<C, V, E> AuthFlow<C, V, E>
where
    C: TokenCodec,
    V: VerifiedEmailRegistry,
    E: EmailClient,
{
    pub fn new(codec: C, registry: V, email_client: E, settings: AuthFlowSettings) -> Self {
        Self {
            codec,
            registry,
            email_client,
            settings,
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Issue a verification token. Repeated registrations are allowed.
    #[tracing::instrument(name = "AuthFlow::register", skip(self))]
    pub async fn register(&self, email: Email) -> Result<AuthToken, AuthFlowError> {
        let token = self.codec.issue(
            &email,
            TokenPurpose::Verification,
            self.settings.verification_ttl,
        )?;

        let link = format!("{}/verify/{}", self.frontend_url(), token.as_str());
        let template = VerificationEmail {
            link: &link,
            validity: describe_validity(self.settings.verification_ttl),
        };
        self.notify(&email, VerificationEmail::SUBJECT, template.render())
            .await;

        Ok(token)
    }

    /// Redeem a verification token. Redeeming it again has no further effect.
    #[tracing::instrument(name = "AuthFlow::verify_email", skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<Email, AuthFlowError> {
        let payload = self.codec.verify(token, TokenPurpose::Verification)?;

        self.registry.mark_verified(&payload.subject).await?;
        tracing::info!(email = %payload.subject, "Email verified");

        Ok(payload.subject)
    }

    /// Issue a login token for an address that completed verification.
    #[tracing::instrument(name = "AuthFlow::login", skip(self))]
    pub async fn login(&self, email: Email) -> Result<AuthToken, AuthFlowError> {
        if !self.registry.is_verified(&email).await? {
            tracing::warn!(%email, "Login requested for unverified email");
            return Err(AuthFlowError::EmailNotVerified);
        }

        let token = self
            .codec
            .issue(&email, TokenPurpose::Login, self.settings.login_ttl)?;

        let link = format!("{}/login?token={}", self.frontend_url(), token.as_str());
        let template = LoginEmail {
            link: &link,
            validity: describe_validity(self.settings.login_ttl),
        };
        self.notify(&email, LoginEmail::SUBJECT, template.render())
            .await;

        Ok(token)
    }

    /// Exchange a login token for a session token.
    #[tracing::instrument(name = "AuthFlow::validate_login", skip_all)]
    pub async fn validate_login(&self, token: &str) -> Result<LoginSession, AuthFlowError> {
        let payload = self.codec.verify(token, TokenPurpose::Login)?;

        let session_token = self.codec.issue(
            &payload.subject,
            TokenPurpose::Session,
            self.settings.session_ttl,
        )?;

        Ok(LoginSession {
            email: payload.subject,
            session_token,
        })
    }

    fn frontend_url(&self) -> &str {
        self.settings.frontend_url.trim_end_matches('/')
    }

    // Link delivery never fails the flow; the token is also returned to the caller.
    async fn notify(&self, recipient: &Email, subject: &str, body: askama::Result<String>) {
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render email");
                return;
            }
        };

        if let Err(e) = self
            .email_client
            .send_email(recipient, subject, &body)
            .await
        {
            tracing::warn!(%recipient, error = %e, "Failed to send email");
        }
    }
}
