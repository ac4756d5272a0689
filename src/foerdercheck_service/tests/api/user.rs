use std::time::Duration;

use serde_json::{Value, json};
use uuid::Uuid;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{method, path},
};

use crate::helpers::{TestApp, random_email};

async fn mount_identity(app: &TestApp, id: Uuid) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id })))
        .mount(&app.supabase)
        .await;
}

#[tokio::test]
async fn create_user_returns_remote_user() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();
    let email = random_email();
    mount_identity(&app, id).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_data"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.supabase)
        .await;

    let response = app.post("/user/create", &json!({ "email": email })).await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["id"], id.to_string());
    assert_eq!(body["user"]["email"], email.as_str());
}

#[tokio::test]
async fn failed_row_creation_reports_orphaned_identity_and_can_be_retried() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();
    mount_identity(&app, id).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/user_data"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&app.supabase)
        .await;

    let response = app
        .post("/user/create", &json!({ "email": random_email() }))
        .await;

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["userId"], id.to_string());

    Mock::given(method("POST"))
        .and(path("/rest/v1/user_data"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&app.supabase)
        .await;

    let response = app
        .post("/user/create-data", &json!({ "userId": id }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
}

#[tokio::test]
async fn identity_timeout_maps_to_gateway_timeout() {
    let app = TestApp::new().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&app.supabase)
        .await;

    let response = app
        .post("/user/create", &json!({ "email": random_email() }))
        .await;

    assert_eq!(response.status().as_u16(), 504);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("userId").is_none());
}

#[tokio::test]
async fn store_eligibility_for_missing_row_fails() {
    let app = TestApp::new().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/user_data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.supabase)
        .await;

    let response = app
        .post(
            "/user/store-eligibility",
            &json!({ "userId": Uuid::new_v4(), "eligibilityData": { "group": "Gruppe B" } }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn store_eligibility_updates_existing_row() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/user_data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": id }])))
        .expect(1)
        .mount(&app.supabase)
        .await;

    let response = app
        .post(
            "/user/store-eligibility",
            &json!({ "userId": id, "eligibilityData": { "group": "Gruppe B" } }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn invalid_user_id_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/user/store-eligibility",
            &json!({ "userId": "nope", "eligibilityData": {} }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
