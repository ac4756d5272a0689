use chrono::Utc;
use foerdercheck_core::{
    Email, ProvisioningError, RemoteUser, RemoteUserId, UpstreamFailure, UserProvisioningGateway,
};
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const USER_DATA_PATH: &str = "/rest/v1/user_data";
const API_KEY_HEADER: &str = "apikey";
const PENDING_STATUS: &str = "pending";

/// Provisions identities through the Supabase admin API and the `user_data` table.
///
/// Every call authenticates with the service-role key. Identity creation and
/// the data-row write are two separate requests with no rollback; when the
/// second fails the caller gets the new identity's id back in the error.
#[derive(Clone)]
pub struct SupabaseProvisioningGateway {
    http_client: Client,
    base_url: String,
    service_role_key: Secret<String>,
}

impl SupabaseProvisioningGateway {
    pub fn new(base_url: String, service_role_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            service_role_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_role_key.expose_secret();
        request.header(API_KEY_HEADER, key).bearer_auth(key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, UpstreamFailure> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(UpstreamFailure::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn insert_user_data(&self, user_id: &RemoteUserId) -> Result<(), UpstreamFailure> {
        let row = UserDataRow {
            id: user_id,
            eligibility_data: json!({}),
            application_status: PENDING_STATUS,
            document_status: json!({}),
        };

        self.send(self.http_client.post(self.url(USER_DATA_PATH)).json(&row))
            .await
            .map(|_| ())
    }
}

// Applies to failures while sending and while reading the body.
fn classify(error: reqwest::Error) -> UpstreamFailure {
    if error.is_timeout() {
        UpstreamFailure::Timeout
    } else if error.is_decode() {
        UpstreamFailure::InvalidResponse(error.to_string())
    } else {
        UpstreamFailure::Transport(error.to_string())
    }
}

#[derive(Serialize)]
struct CreateIdentityRequest<'a> {
    email: &'a str,
    email_confirm: bool,
}

#[derive(Deserialize)]
struct CreateIdentityResponse {
    id: RemoteUserId,
}

#[derive(Serialize)]
struct UserDataRow<'a> {
    id: &'a RemoteUserId,
    eligibility_data: Value,
    application_status: &'a str,
    document_status: Value,
}

#[derive(Serialize)]
struct EligibilityDataPatch {
    eligibility_data: Value,
    updated_at: String,
}

#[async_trait::async_trait]
impl UserProvisioningGateway for SupabaseProvisioningGateway {
    #[tracing::instrument(name = "Provisioning remote user", skip_all)]
    async fn create_user(&self, email: &Email) -> Result<RemoteUser, ProvisioningError> {
        let request = self
            .http_client
            .post(self.url(ADMIN_USERS_PATH))
            .json(&CreateIdentityRequest {
                email: email.as_str(),
                email_confirm: true,
            });

        let identity: CreateIdentityResponse = self
            .send(request)
            .await
            .map_err(ProvisioningError::UpstreamAuth)?
            .json()
            .await
            .map_err(|e| ProvisioningError::UpstreamAuth(classify(e)))?;

        let user_id = identity.id;
        tracing::info!(%user_id, "Remote identity created");

        if let Err(failure) = self.insert_user_data(&user_id).await {
            tracing::error!(%user_id, error = %failure, "Identity created but data row failed");
            return Err(ProvisioningError::UpstreamData { user_id, failure });
        }

        Ok(RemoteUser {
            id: user_id,
            email: email.clone(),
        })
    }

    #[tracing::instrument(name = "Creating remote user data row", skip_all)]
    async fn create_user_data(&self, user_id: &RemoteUserId) -> Result<(), ProvisioningError> {
        self.insert_user_data(user_id)
            .await
            .map_err(|failure| ProvisioningError::UpstreamData {
                user_id: *user_id,
                failure,
            })
    }

    #[tracing::instrument(name = "Storing remote eligibility data", skip_all)]
    async fn store_eligibility_data(
        &self,
        user_id: &RemoteUserId,
        data: Value,
    ) -> Result<(), ProvisioningError> {
        let data_failure = |failure: UpstreamFailure| ProvisioningError::UpstreamData {
            user_id: *user_id,
            failure,
        };

        let request = self
            .http_client
            .patch(self.url(USER_DATA_PATH))
            .query(&[("id", format!("eq.{user_id}"))])
            .header("Prefer", "return=representation")
            .json(&EligibilityDataPatch {
                eligibility_data: data,
                updated_at: Utc::now().to_rfc3339(),
            });

        let rows: Vec<Value> = self
            .send(request)
            .await
            .map_err(data_failure)?
            .json()
            .await
            .map_err(|e| data_failure(classify(e)))?;

        if rows.is_empty() {
            return Err(data_failure(UpstreamFailure::RowNotFound));
        }
        Ok(())
    }
}
