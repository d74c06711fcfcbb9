//! Shared helpers for API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Local, NaiveDate};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use bat_server::{
    api,
    config::AppConfig,
    models::{enums::ItemCategory, item::Item, loan::Loan, patron::Patron},
    repository::{Library, Repository},
    AppState,
};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fixture library:
///
/// Items: 1 Dune (book, 1 copy), 2 Spade (gardening tool, 2 copies),
/// 3 Lathe (makerspace tool), 4 Dictionary (reference), 5 Emma (book, 2
/// copies, one of them on loan to patron 5).
///
/// Patrons: 1 Ada (30, no training), 2 Kim (10, makerspace training),
/// 3 Ed (70, owes 3.00), 4 Zoe (25, gardening training),
/// 5 Lou (40, holds Emma six days past due).
pub fn fixture_library() -> Library {
    let mut emma = Item::new(5, "Emma", ItemCategory::Book, 2);
    emma.on_loan = 1;

    let items = vec![
        Item::new(1, "Dune", ItemCategory::Book, 1),
        Item::new(2, "Spade", ItemCategory::GardeningTool, 2),
        Item::new(3, "Lathe", ItemCategory::MakerspaceTool, 1),
        Item::new(4, "Dictionary", ItemCategory::Reference, 1),
        emma.clone(),
    ];

    let mut kim = Patron::new(2, "Kim", 10);
    kim.makerspace_training = true;

    let mut ed = Patron::new(3, "Ed", 70);
    ed.outstanding_fees = Decimal::new(300, 2);

    let mut zoe = Patron::new(4, "Zoe", 25);
    zoe.gardening_training = true;

    let mut lou = Patron::new(5, "Lou", 40);
    lou.loans
        .push(Loan::new(&emma, today() - Duration::days(20), 14));

    let patrons = vec![Patron::new(1, "Ada", 30), kim, ed, zoe, lou];

    Library::from_records(items, patrons).expect("fixture library is consistent")
}

/// Router over the fixture library, plus the repository for state checks
pub fn setup_app() -> (Router, Repository) {
    let repository = Repository::new(fixture_library());
    let state = AppState::new(AppConfig::default(), repository.clone());
    (api::create_router(state), repository)
}

/// Send one request and decode the JSON response
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response should be JSON")
    };

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// Read a decimal amount serialized as a JSON string or number
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        other => other.to_string().parse().expect("decimal number"),
    }
}
