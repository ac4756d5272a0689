use std::sync::LazyLock;

use foerdercheck_core::{Email, EmailClient};
use regex::Regex;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

const SEND_PATH: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s[^>]*href="([^"]*)"[^>]*>(.*?)</a>"#).expect("valid anchor pattern")
});
static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(p|h[1-6]|div|li)>|<br\s*/?>").expect("valid block pattern")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Sends link emails through Postmark's single-message endpoint.
///
/// Each message carries the rendered HTML and a plain-text part derived from
/// it, so the link survives in clients that refuse HTML.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: String,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SEND_PATH),
            sender,
            server_token,
        }
    }
}

/// Plain-text rendering of a link email: anchors become "text: url", one line per block.
fn plain_text(html: &str) -> String {
    let text = ANCHOR.replace_all(html, "$2: $1");
    let text = BLOCK_END.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailResponse {
    #[serde(rename = "MessageID")]
    message_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkRejection {
    error_code: i64,
    message: String,
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let text_body = plain_text(content);
        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject,
            html_body: content,
            text_body: &text_body,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(SERVER_TOKEN_HEADER, self.server_token.expose_secret())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(match response.json::<PostmarkRejection>().await {
                Ok(rejection) => format!(
                    "Postmark rejected message with status {status} (error code {}): {}",
                    rejection.error_code, rejection.message
                ),
                Err(_) => format!("Postmark rejected message with status {status}"),
            });
        }

        match response.json::<SendEmailResponse>().await {
            Ok(sent) => tracing::info!(message_id = %sent.message_id, "Email accepted"),
            Err(e) => tracing::debug!(error = %e, "Email accepted without a readable receipt"),
        }
        Ok(())
    }
}
