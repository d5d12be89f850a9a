//! Integration tests for user, tool type and tool management.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;
    let response = app.request("GET", "/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}

#[tokio::test]
async fn test_user_crud() {
    let app = helpers::TestApp::new().await;

    let created = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "username": "edwin_omondi", "email": "edwin.omondi@gmail.com" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["role"], "technician");
    let id = created.id();

    let updated = app
        .request(
            "PUT",
            &format!("/api/users/{id}"),
            Some(json!({ "username": "edwin_omondi", "role": "mud_engineer" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["role"], "mud_engineer");
    assert!(updated.data()["email"].is_null());

    let duplicate = app
        .request("POST", "/api/users", Some(json!({ "username": "edwin_omondi" })))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["error"], "CONSTRAINT_VIOLATION");

    let deleted = app.request("DELETE", &format!("/api/users/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    let missing = app.request("GET", &format!("/api/users/{id}"), None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_body_is_bad_request() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "username": "x", "email": "not-an-email" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "INVALID_INPUT");

    let response = app
        .request("POST", "/api/tools", Some(json!({ "name": "No serial" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tool_type_delete_keeps_tools() {
    let app = helpers::TestApp::new().await;
    let tool_type = app
        .request(
            "POST",
            "/api/tool-types",
            Some(json!({ "name": "Reamers", "description": "Hole enlargement tools" })),
        )
        .await;
    assert_eq!(tool_type.status, StatusCode::CREATED);
    let type_id = tool_type.id();

    let tool = app
        .request(
            "POST",
            "/api/tools",
            Some(json!({ "name": "Hole Opener", "serial_number": "REAM-001", "type_id": type_id })),
        )
        .await;
    assert_eq!(tool.status, StatusCode::CREATED);
    assert_eq!(tool.data()["status"], "available");
    assert!(!tool.data()["last_calibrated"].is_null());
    let tool_id = tool.id();

    let deleted = app
        .request("DELETE", &format!("/api/tool-types/{type_id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let tool = app.request("GET", &format!("/api/tools/{tool_id}"), None).await;
    assert_eq!(tool.status, StatusCode::OK);
    assert!(tool.data()["type_id"].is_null());
}

#[tokio::test]
async fn test_seeded_search_and_lookup() {
    let app = helpers::TestApp::seeded().await;

    let all = app.request("GET", "/api/tools", None).await;
    assert_eq!(all.data().as_array().map(Vec::len), Some(18));

    let found = app.request("GET", "/api/tools?search=powerpulse", None).await;
    let found = found.data().as_array().cloned().unwrap_or_default();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["serial_number"], "MWDSYS-001");

    let by_serial = app.request("GET", "/api/tools/serial/STABIL-003", None).await;
    assert_eq!(by_serial.status, StatusCode::OK);
    assert_eq!(by_serial.data()["name"], "String Stabilizer");

    let missing = app.request("GET", "/api/tools/serial/NOPE-1", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let types = app.request("GET", "/api/tool-types", None).await;
    assert_eq!(types.data().as_array().map(Vec::len), Some(10));
    let users = app.request("GET", "/api/users", None).await;
    assert_eq!(users.data().as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn test_available_excludes_checked_out() {
    let app = helpers::TestApp::seeded().await;
    let tool = app.request("GET", "/api/tools/serial/DDSYS-001", None).await;
    let tool_id = tool.id();

    let checkout = app.checkout(1, tool_id, "2025-06-01").await;
    assert_eq!(checkout.status, StatusCode::CREATED, "{}", checkout.body);

    let available = app.request("GET", "/api/tools/available", None).await;
    let serials: Vec<String> = available
        .data()
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|t| t["serial_number"].as_str().map(str::to_string))
        .collect();
    assert_eq!(serials.len(), 17);
    assert!(!serials.contains(&"DDSYS-001".to_string()));
    let mut sorted = serials.clone();
    sorted.sort();
    assert_eq!(serials, sorted);

    let delete = app.request("DELETE", &format!("/api/tools/{tool_id}"), None).await;
    assert_eq!(delete.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_tool_update_keeps_checked_out_status() {
    let app = helpers::TestApp::new().await;
    let user_id = app.create_user("simon_njoroge").await;
    let tool_id = app.create_tool("MWDBIT-001").await;
    app.checkout(user_id, tool_id, "2025-06-01").await;

    let updated = app
        .request(
            "PUT",
            &format!("/api/tools/{tool_id}"),
            Some(json!({
                "name": "PDC Bit 8.5\"",
                "serial_number": "MWDBIT-001",
                "location": "  ",
                "status": "available",
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.data()["name"], "PDC Bit 8.5\"");
    assert_eq!(updated.data()["status"], "checked_out");
    assert!(updated.data()["location"].is_null());

    let missing = app
        .request(
            "PUT",
            "/api/tools/9999",
            Some(json!({ "name": "Ghost", "serial_number": "GHOST-1" })),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_email_is_stored_as_absent() {
    let app = helpers::TestApp::new().await;
    let response = app
        .request(
            "POST",
            "/api/users",
            Some(json!({ "username": "ann_kwamboka", "full_name": "", "email": "" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert!(response.data()["email"].is_null());
    assert!(response.data()["full_name"].is_null());
}
