use serde_json::{Value, json};

use crate::helpers::TestApp;

fn household(gross: f64, net: f64) -> Value {
    json!({
        "adultCount": 1,
        "childCount": 0,
        "isDisabled": false,
        "isMarried": false,
        "isRetired": false,
        "grossIncome": gross,
        "netIncome": net
    })
}

#[tokio::test]
async fn low_income_household_is_group_a() {
    let app = TestApp::new().await;

    let response = app
        .post("/check-eligibility", &household(30000.0, 20000.0))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["eligible"], true);
    assert_eq!(body["group"], "Gruppe A");
    assert_eq!(body["details"]["adjustedGrossA"], 38011.0);
}

#[tokio::test]
async fn high_income_household_is_not_eligible() {
    let app = TestApp::new().await;

    let body: Value = app
        .post("/check-eligibility", &household(90000.0, 60000.0))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["eligible"], false);
    assert_eq!(body["group"], "Nicht Förderungsfähig");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post("/check-eligibility", &json!({ "adultCount": "two" }))
        .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn minimum_adult_count_is_answered_not_eligible() {
    let app = TestApp::new().await;
    let mut body = household(30000.0, 20000.0);
    body["adultCount"] = json!(i32::MIN);

    let response = app.post("/check-eligibility", &body).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["eligible"], false);
    assert_eq!(body["group"], "Nicht Förderungsfähig");
}
