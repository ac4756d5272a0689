use serde_json::{Value, json};

use crate::helpers::{TestApp, random_email};

#[tokio::test]
async fn document_check_requires_bearer_token() {
    let app = TestApp::new().await;

    let response = app.get("/document-check/load").await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post(
            "/document-check/save",
            &json!({ "propertyType": "house", "answers": {} }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .get_with_bearer("/document-check/load", "not-a-token")
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn load_without_saved_state_returns_null() {
    let app = TestApp::new().await;
    let session = app.session_for(&random_email()).await;

    let response = app
        .get_with_bearer("/document-check/load", &session)
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn save_creates_then_merges_record() {
    let app = TestApp::new().await;
    let email = random_email();
    let session = app.session_for(&email).await;

    let response = app
        .post_with_bearer(
            "/document-check/save",
            &session,
            &json!({
                "propertyType": "house",
                "answers": { "hasInheritanceRight": true, "hasBEGStandardLoan": true }
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["ownerId"], email.as_str());
    assert_eq!(created["answers"]["isMarried"], false);

    let response = app
        .post_with_bearer(
            "/document-check/save",
            &session,
            &json!({ "answers": { "isMarried": true } }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let loaded: Value = app
        .get_with_bearer("/document-check/load", &session)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(loaded["propertyType"], "house");
    assert_eq!(loaded["answers"]["isMarried"], true);
    assert_eq!(loaded["answers"]["hasInheritanceRight"], true);
    assert_eq!(loaded["answers"]["hasBEGStandardLoan"], true);
    assert_eq!(loaded["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn records_are_isolated_per_principal() {
    let app = TestApp::new().await;
    let alice = app.session_for(&random_email()).await;
    let bob = app.session_for(&random_email()).await;

    app.post_with_bearer(
        "/document-check/save",
        &alice,
        &json!({ "propertyType": "apartment", "answers": { "isPregnant": true } }),
    )
    .await;

    let body: Value = app
        .get_with_bearer("/document-check/load", &bob)
        .await
        .json()
        .await
        .unwrap();
    assert!(body.is_null());
}
