//! API handlers for BAT REST endpoints

pub mod health;
pub mod items;
pub mod loans;
pub mod openapi;
pub mod patrons;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{services::eligibility::Decision, AppState};

/// Answer of the eligibility check endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct EligibilityResponse {
    pub allowed: bool,
    /// `allowed`, or the rule that refused the request
    #[schema(example = "training required")]
    pub reason: String,
}

impl From<Decision> for EligibilityResponse {
    fn from(decision: Decision) -> Self {
        Self {
            allowed: decision.is_allowed(),
            reason: decision.reason(),
        }
    }
}

/// Local calendar date used for due dates and overdue fees
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Catalog
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/:id", get(items::get_item))
        // Patrons
        .route("/patrons", get(patrons::list_patrons).post(patrons::create_patron))
        .route("/patrons/:id", get(patrons::get_patron))
        .route("/patrons/:id/loans", get(loans::get_patron_loans))
        .route("/patrons/:id/makerspace-access", get(patrons::makerspace_access))
        .route("/patrons/:id/payments", post(patrons::pay_fee))
        // Loans
        .route("/loans", post(loans::borrow_item))
        .route("/loans/check", post(loans::check_borrow))
        .route("/loans/return", post(loans::return_item))
        .route("/loans/return/check", post(loans::check_return))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
