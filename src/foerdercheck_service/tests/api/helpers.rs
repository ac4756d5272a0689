use std::sync::Arc;
use std::time::Duration;

use fake::{Fake, faker::internet::en::SafeEmail};
use foerdercheck_adapters::{
    auth_validation::BearerTokenValidator,
    email::MockEmailClient,
    gateway::SupabaseProvisioningGateway,
    persistence::{HashMapEligibilityRecordStore, HashSetVerifiedEmailRegistry},
    token::JwtTokenCodec,
};
use foerdercheck_application::{AuthFlow, AuthFlowSettings};
use foerdercheck_service::AppService;
use secrecy::Secret;
use serde_json::Value;
use wiremock::MockServer;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub supabase: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let supabase = MockServer::start().await;

        let codec = JwtTokenCodec::new(Secret::from("test-secret".to_owned()));
        let auth_flow = AuthFlow::new(
            codec.clone(),
            HashSetVerifiedEmailRegistry::new(),
            MockEmailClient::new(),
            AuthFlowSettings::default(),
        );
        let validator = BearerTokenValidator::new(Arc::new(codec));
        let gateway = SupabaseProvisioningGateway::new(
            supabase.uri(),
            Secret::from("service-role-key".to_owned()),
            reqwest::Client::builder()
                .timeout(Duration::from_millis(200))
                .build()
                .unwrap(),
        );

        let router = AppService::new(
            auth_flow,
            validator,
            HashMapEligibilityRecordStore::new(),
            gateway,
        )
        .as_nested_router(None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            address,
            http_client: reqwest::Client::new(),
            supabase,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post<B: serde::Serialize>(&self, path: &str, body: &B) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_with_bearer(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_with_bearer<B: serde::Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
    ) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Run register, verify, login and validate-login; returns the session token.
    pub async fn session_for(&self, email: &str) -> String {
        let body: Value = self
            .post("/auth/register", &serde_json::json!({ "email": email }))
            .await
            .json()
            .await
            .unwrap();
        let verification = body["token"].as_str().unwrap().to_owned();

        let response = self.get(&format!("/auth/verify-email/{verification}")).await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = self
            .post("/auth/login", &serde_json::json!({ "email": email }))
            .await
            .json()
            .await
            .unwrap();
        let login = body["token"].as_str().unwrap().to_owned();

        let body: Value = self
            .get(&format!("/auth/validate-login/{login}"))
            .await
            .json()
            .await
            .unwrap();
        body["token"].as_str().unwrap().to_owned()
    }
}

pub fn random_email() -> String {
    SafeEmail().fake()
}
