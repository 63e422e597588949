use anyhow::Result;
use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{Value, json};

use rigdex_core::api_routes::{utils, v1};

#[path = "support/mod.rs"]
mod support;
use support::build_test_app;

fn first_violation(body: &Value) -> &Value {
    &body["violations"][0]
}

#[tokio::test]
async fn unparsable_json_is_a_bad_request() -> Result<()> {
    let app = build_test_app()?;

    let response = app
        .server
        .post(v1::sockets::COLLECTION)
        .bytes(Bytes::from_static(b"{\"name\": "))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let violation = first_violation(&body);
    assert!(violation.get("paramNames").is_none());
    assert!(
        violation["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("Malformed request body: "))
    );
    Ok(())
}

#[tokio::test]
async fn wrong_field_type_is_a_bad_request() -> Result<()> {
    let app = build_test_app()?;

    let response = app
        .server
        .post(v1::fan_sizes::COLLECTION)
        .json(&json!({ "length": "wide", "width": 120, "height": 25 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post(v1::chipsets::COLLECTION)
        .json(&json!({ "name": "B660", "socketId": "not-a-uuid" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn non_uuid_path_id_is_reported_on_id() -> Result<()> {
    let app = build_test_app()?;

    let response = app.server.get(&utils::item("vendors", "42")).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let violation = first_violation(&body);
    assert_eq!(violation["paramNames"], json!(["id"]));
    assert!(
        violation["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("Invalid ID: "))
    );
    Ok(())
}

#[tokio::test]
async fn overlong_name_is_rejected() -> Result<()> {
    let app = build_test_app()?;

    let response = app
        .server
        .post(&utils::collection("expansion-bay-formats"))
        .json(&json!({ "name": "x".repeat(256) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({
        "violations": [{
            "paramNames": ["name"],
            "message": "Name must be at most 255 characters!"
        }]
    }));
    Ok(())
}
