//! Borrowing and returning through the API

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{json, Value};

use crate::common::{decimal, get, post, setup_app, today};

fn loan(patron_id: i32, item_id: i32) -> Value {
    json!({ "patron_id": patron_id, "item_id": item_id })
}

fn loan_dates(body: &Value) -> (NaiveDate, NaiveDate) {
    let start = serde_json::from_value(body["start_date"].clone()).unwrap();
    let due = serde_json::from_value(body["due_date"].clone()).unwrap();
    (start, due)
}

#[tokio::test]
async fn test_training_required_then_allowed() {
    let (app, _) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans/check", loan(1, 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "training required");

    let (_, body) = post(&app, "/api/v1/loans/check", loan(4, 2)).await;
    assert_eq!(body["allowed"], true);
    assert_eq!(body["reason"], "allowed");
}

#[tokio::test]
async fn test_denied_borrow_leaves_state_untouched() {
    let (app, repository) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans", loan(1, 2)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "TrainingRequired");
    assert_eq!(body["message"], "training required");

    let library = repository.lock().unwrap();
    assert_eq!(library.items.get_by_id(2).unwrap().on_loan, 0);
    assert!(library.patrons.get_by_id(1).unwrap().loans.is_empty());
}

#[tokio::test]
async fn test_borrow_sets_due_date() {
    let (app, repository) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans", loan(4, 2)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item_name"], "Spade");
    let (start, due) = loan_dates(&body);
    assert_eq!(due, start + Duration::days(14));
    assert!((start - today()).num_days().abs() <= 1);

    let library = repository.lock().unwrap();
    assert_eq!(library.items.get_by_id(2).unwrap().on_loan, 1);
    assert_eq!(library.patrons.get_by_id(4).unwrap().loans.len(), 1);
}

#[tokio::test]
async fn test_minor_gets_a_week() {
    let (app, _) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans", loan(2, 1)).await;

    assert_eq!(status, StatusCode::CREATED);
    let (start, due) = loan_dates(&body);
    assert_eq!(due, start + Duration::days(7));
}

#[tokio::test]
async fn test_last_copy_goes_to_first_borrower() {
    let (app, _) = setup_app();

    let (status, _) = post(&app, "/api/v1/loans", loan(1, 1)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/api/v1/loans", loan(4, 1)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "item not available");
}

#[tokio::test]
async fn test_reference_and_fees_are_refused() {
    let (app, _) = setup_app();

    let (_, body) = post(&app, "/api/v1/loans/check", loan(1, 4)).await;
    assert_eq!(body["reason"], "item is not borrowable");

    let (_, body) = post(&app, "/api/v1/loans/check", loan(3, 1)).await;
    assert_eq!(body["reason"], "outstanding fees");
}

#[tokio::test]
async fn test_tool_category_cap() {
    let (app, _) = setup_app();

    let (status, _) = post(&app, "/api/v1/loans", loan(4, 2)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = post(&app, "/api/v1/loans/check", loan(4, 2)).await;
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "limit reached for Gardening Tool");
}

#[tokio::test]
async fn test_unknown_ids_in_loan_requests() {
    let (app, _) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans/check", loan(99, 1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchPatron");

    let (status, body) = post(&app, "/api/v1/loans", loan(1, 99)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");
}

#[tokio::test]
async fn test_borrow_then_return_round_trip() {
    let (app, repository) = setup_app();
    post(&app, "/api/v1/loans", loan(4, 2)).await;

    let (_, body) = post(&app, "/api/v1/loans/return/check", loan(4, 2)).await;
    assert_eq!(body["allowed"], true);

    let (status, body) = post(&app, "/api/v1/loans/return", loan(4, 2)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returned"], true);
    assert_eq!(decimal(&body["fee_charged"]), Decimal::ZERO);

    let library = repository.lock().unwrap();
    assert_eq!(library.items.get_by_id(2).unwrap().on_loan, 0);
    assert!(library.patrons.get_by_id(4).unwrap().loans.is_empty());
}

#[tokio::test]
async fn test_return_of_item_not_held() {
    let (app, repository) = setup_app();

    let (_, body) = post(&app, "/api/v1/loans/return/check", loan(1, 5)).await;
    assert_eq!(body["allowed"], false);
    assert_eq!(body["reason"], "not on loan to this patron");

    let (status, body) = post(&app, "/api/v1/loans/return", loan(1, 5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returned"], false);

    assert_eq!(repository.lock().unwrap().items.get_by_id(5).unwrap().on_loan, 1);
}

#[tokio::test]
async fn test_late_return_posts_fee_and_blocks_borrowing() {
    let (app, _) = setup_app();

    let (status, body) = post(&app, "/api/v1/loans/return", loan(5, 5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returned"], true);
    assert_eq!(decimal(&body["fee_charged"]), Decimal::from(6));

    let (_, body) = get(&app, "/api/v1/patrons/5").await;
    assert_eq!(decimal(&body["outstanding_fees"]), Decimal::from(6));
    assert!(body["loans"].as_array().unwrap().is_empty());

    let (_, body) = post(&app, "/api/v1/loans/check", loan(5, 1)).await;
    assert_eq!(body["reason"], "outstanding fees");

    let (status, _) = post(&app, "/api/v1/patrons/5/payments", json!({ "amount": "6" })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = post(&app, "/api/v1/loans/check", loan(5, 1)).await;
    assert_eq!(body["allowed"], true);
}

#[tokio::test]
async fn test_patron_loans_listing() {
    let (app, _) = setup_app();
    post(&app, "/api/v1/loans", loan(4, 1)).await;

    let (status, body) = get(&app, "/api/v1/patrons/4/loans").await;

    assert_eq!(status, StatusCode::OK);
    let loans = body.as_array().unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["item_name"], "Dune");
    assert_eq!(loans[0]["is_overdue"], false);
}

#[tokio::test]
async fn test_patron_cannot_take_two_copies_of_one_item() {
    let (app, repository) = setup_app();
    let (_, item) = post(
        &app,
        "/api/v1/items",
        json!({ "name": "Foundation", "category": "book", "copies": 3 }),
    )
    .await;
    let item_id = item["id"].as_i64().unwrap() as i32;

    let (status, _) = post(&app, "/api/v1/loans", loan(1, item_id)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post(&app, "/api/v1/loans", loan(1, item_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "AlreadyBorrowed");
    assert_eq!(body["message"], "already borrowing this item");

    let library = repository.lock().unwrap();
    assert_eq!(library.items.get_by_id(item_id).unwrap().on_loan, 1);
    assert_eq!(library.patrons.get_by_id(1).unwrap().loans.len(), 1);
}
