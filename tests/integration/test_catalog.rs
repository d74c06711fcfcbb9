//! Health and catalog endpoints

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{get, post, setup_app};

#[tokio::test]
async fn test_health_reports_loan_counts() {
    let (app, _) = setup_app();

    let (status, body) = get(&app, "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["active_loans"], 1);
    assert_eq!(body["overdue_loans"], 1);
}

#[tokio::test]
async fn test_list_items_in_catalog_order() {
    let (app, _) = setup_app();

    let (status, body) = get(&app, "/api/v1/items").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Dune", "Spade", "Lathe", "Dictionary", "Emma"]);
}

#[tokio::test]
async fn test_filter_items_by_category() {
    let (app, _) = setup_app();

    let (status, body) = get(&app, "/api/v1/items?category=gardening_tool").await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Spade");
    assert_eq!(items[0]["location"], "Main Library");
}

#[tokio::test]
async fn test_get_item_and_unknown_item() {
    let (app, _) = setup_app();

    let (status, body) = get(&app, "/api/v1/items/5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["copies"], 2);
    assert_eq!(body["on_loan"], 1);

    let (status, body) = get(&app, "/api/v1/items/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");
}

#[tokio::test]
async fn test_create_item() {
    let (app, repository) = setup_app();

    let (status, body) = post(
        &app,
        "/api/v1/items",
        json!({ "name": "Hand Saw", "category": "carpentry_tool", "copies": 1, "location": "Workshop" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 6);
    assert_eq!(body["on_loan"], 0);

    let library = repository.lock().unwrap();
    assert_eq!(library.items.get_by_id(6).unwrap().location, "Workshop");
}

#[tokio::test]
async fn test_create_item_without_copies_is_rejected() {
    let (app, repository) = setup_app();

    let (status, body) = post(
        &app,
        "/api/v1/items",
        json!({ "name": "Hand Saw", "category": "carpentry_tool", "copies": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(repository.lock().unwrap().items.len(), 5);
}

#[tokio::test]
async fn test_blank_item_name_is_rejected() {
    let (app, repository) = setup_app();

    let (status, body) = post(
        &app,
        "/api/v1/items",
        json!({ "name": "  ", "category": "book", "copies": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
    assert_eq!(repository.lock().unwrap().items.len(), 5);
}
