use foerdercheck_core::{Email, EmailClient};

/// Logs outgoing mail instead of delivering it. Used when no mail provider is configured.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        tracing::info!(%recipient, subject, "Email delivery skipped, no provider configured");
        Ok(())
    }
}
