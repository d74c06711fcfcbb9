//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetails},
    services::lifecycle::ReturnOutcome,
    AppState,
};

use super::EligibilityResponse;

/// Patron and item a borrow or return is about
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoanRequest {
    pub patron_id: i32,
    pub item_id: i32,
}

/// Get active loans for a patron
#[utoipa::path(
    get,
    path = "/patrons/{id}/loans",
    tag = "loans",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Patron's active loans", body = Vec<LoanDetails>),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_patron_loans(
    State(state): State<AppState>,
    Path(patron_id): Path<i32>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.get_patron_loans(patron_id, super::today())?;
    Ok(Json(loans))
}

/// Check whether a borrow would be allowed, without lending anything
#[utoipa::path(
    post,
    path = "/loans/check",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Borrow decision", body = EligibilityResponse),
        (status = 404, description = "Patron or item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_borrow(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<EligibilityResponse>> {
    let decision = state
        .services
        .loans
        .check_borrow(request.patron_id, request.item_id)?;
    Ok(Json(decision.into()))
}

/// Borrow an item
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan created", body = Loan),
        (status = 404, description = "Patron or item not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Borrowing rules refuse the loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_item(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<Loan>)> {
    let loan = state
        .services
        .loans
        .borrow(request.patron_id, request.item_id, super::today())?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// Check whether the patron holds the item and may return it
#[utoipa::path(
    post,
    path = "/loans/return/check",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Return decision", body = EligibilityResponse),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_return(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<EligibilityResponse>> {
    let decision = state
        .services
        .loans
        .check_return(request.patron_id, request.item_id)?;
    Ok(Json(decision.into()))
}

/// Return a borrowed item, posting any overdue fee
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Return outcome; `returned` is false when the patron did not hold the item", body = ReturnOutcome),
        (status = 404, description = "Patron or item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_item(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<ReturnOutcome>> {
    let outcome = state
        .services
        .loans
        .return_item(request.patron_id, request.item_id, super::today())?;
    Ok(Json(outcome))
}
