mod common;

use axum::http::{Method, StatusCode};
use common::{item_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_create_and_read_lost_item() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;

    let (status, body) = app.post("/api/lost-items", Some(&user.token), item_body("Umbrella", "a@x.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "lost");
    assert_eq!(body["itemName"], "Umbrella");
    assert_eq!(body["owner"], user.id.as_str());
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/lost-items/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Library");
    assert_eq!(body["phone"], "9999999999");

    // Registries are separate collections
    assert_eq!(app.lost_items.len(), 1);
    assert_eq!(app.found_items.len(), 0);
    let (status, _) = app.get(&format!("/api/found-items/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_public_and_newest_first() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;
    app.report_found(&user, "Wallet").await;
    app.report_found(&user, "Keys").await;

    let (status, body) = app.get("/api/found-items", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body.as_array().unwrap().iter().map(|i| i["itemName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Keys", "Wallet"]);
}

#[tokio::test]
async fn test_missing_phone_is_rejected_and_nothing_stored() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;

    let mut body = item_body("Umbrella", "a@x.com");
    body.as_object_mut().unwrap().remove("phone");
    let (status, body) = app.post("/api/lost-items", Some(&user.token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation");

    let (_, listing) = app.get("/api/lost-items", None).await;
    assert!(listing.as_array().unwrap().is_empty());
    assert_eq!(app.lost_items.len(), 0);
}

#[tokio::test]
async fn test_create_requires_user_token() {
    let app = TestApp::new();
    let (status, _) = app.post("/api/found-items", None, item_body("Wallet", "a@x.com")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = app.admin_token().await;
    let (status, _) = app.post("/api/found-items", Some(&admin), item_body("Wallet", "a@x.com")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.found_items.len(), 0);
}

#[tokio::test]
async fn test_unknown_or_malformed_id_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/lost-items/65f1c0ffee0000000000beef", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Lost item not found");

    let (status, _) = app.get("/api/lost-items/not-an-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_owner_updates_only_provided_fields() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;
    let id = app.report_found(&user, "Wallet").await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/found-items/{}", id),
            Some(&user.token),
            Some(json!({ "location": "Cafeteria", "phone": "", "description": "  " })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Cafeteria");
    assert_eq!(body["phone"], "9999999999");
    assert_eq!(body["description"], "Brown leather");
    assert_eq!(body["itemName"], "Wallet");
}

#[tokio::test]
async fn test_non_owner_cannot_modify_but_admin_can() {
    let app = TestApp::new();
    let owner = app.signup("Asha", "a@x.com", "1234567").await;
    let other = app.signup("Ben", "b@x.com", "7654321").await;
    let id = app.report_found(&owner, "Wallet").await;
    let uri = format!("/api/found-items/{}", id);

    let (status, _) = app
        .send(Method::PUT, &uri, Some(&other.token), Some(json!({ "itemName": "Mine now" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&other.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let admin = app.admin_token().await;
    let (status, body) = app
        .send(Method::PUT, &uri, Some(&admin), Some(json!({ "itemName": "Black wallet" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["itemName"], "Black wallet");

    let (status, body) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Found item deleted successfully");
    assert_eq!(app.found_items.len(), 0);
}

#[tokio::test]
async fn test_owner_deletes_and_second_delete_is_not_found() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;
    let (_, body) = app.post("/api/lost-items", Some(&user.token), item_body("Umbrella", "a@x.com")).await;
    let uri = format!("/api/lost-items/{}", body["id"].as_str().unwrap());

    let (status, body) = app.send(Method::DELETE, &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Lost item deleted successfully");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&user.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_unknown_fields() {
    let app = TestApp::new();
    let user = app.signup("Asha", "a@x.com", "1234567").await;
    let id = app.report_found(&user, "Wallet").await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/found-items/{}", id),
            Some(&user.token),
            Some(json!({ "owner": "65f1c0ffee0000000000beef" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
