use serde_json::{Value, json};

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn root_reports_liveness() {
    let app = TestApp::new().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Eligibility Check API is running");
}

#[tokio::test]
async fn register_returns_verification_token() {
    let app = TestApp::new().await;

    let response = app
        .post("/auth/register", &json!({ "email": random_email() }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].is_string());
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = TestApp::new().await;

    for email in ["", "   ", "not-an-email", "a@b"] {
        let response = app.post("/auth/register", &json!({ "email": email })).await;
        assert_eq!(response.status().as_u16(), 400, "email: {email:?}");
    }
}

#[tokio::test]
async fn login_before_verification_is_rejected() {
    let app = TestApp::new().await;
    let email = random_email();

    app.post("/auth/register", &json!({ "email": email })).await;
    let response = app.post("/auth/login", &json!({ "email": email })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("verify"));
}

#[tokio::test]
async fn full_flow_yields_a_usable_session() {
    let app = TestApp::new().await;
    let email = random_email();

    let session = app.session_for(&email).await;
    let response = app.get_with_bearer("/auth/validate", &session).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["email"], email.as_str());
}

#[tokio::test]
async fn verify_email_is_idempotent() {
    let app = TestApp::new().await;
    let email = random_email();

    let body: Value = app
        .post("/auth/register", &json!({ "email": email }))
        .await
        .json()
        .await
        .unwrap();
    let token = body["token"].as_str().unwrap();

    for _ in 0..2 {
        let response = app.get(&format!("/auth/verify-email/{token}")).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["email"], email.as_str());
    }
}

#[tokio::test]
async fn tokens_are_not_interchangeable_between_endpoints() {
    let app = TestApp::new().await;
    let email = random_email();

    let body: Value = app
        .post("/auth/register", &json!({ "email": email }))
        .await
        .json()
        .await
        .unwrap();
    let verification = body["token"].as_str().unwrap().to_owned();

    let response = app.get(&format!("/auth/validate-login/{verification}")).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");

    let session = app.session_for(&email).await;
    let response = app.get(&format!("/auth/verify-email/{session}")).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let app = TestApp::new().await;

    let response = app.get("/auth/verify-email/garbage").await;
    assert_eq!(response.status().as_u16(), 400);

    let response = app.get("/auth/validate-login/garbage").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn validate_requires_a_session_token() {
    let app = TestApp::new().await;
    let email = random_email();

    let response = app.get("/auth/validate").await;
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = app
        .post("/auth/register", &json!({ "email": email }))
        .await
        .json()
        .await
        .unwrap();
    let verification = body["token"].as_str().unwrap();

    let response = app.get_with_bearer("/auth/validate", verification).await;
    assert_eq!(response.status().as_u16(), 401);
}
