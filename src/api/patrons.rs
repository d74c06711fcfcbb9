//! Patron endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::patron::{CreatePatron, FeePayment, FeePaymentReceipt, PatronDetails, PatronQuery, PatronShort},
    AppState,
};

use super::EligibilityResponse;

/// Search patrons by name and/or age
#[utoipa::path(
    get,
    path = "/patrons",
    tag = "patrons",
    params(PatronQuery),
    responses(
        (status = 200, description = "Matching patrons", body = Vec<PatronShort>)
    )
)]
pub async fn list_patrons(
    State(state): State<AppState>,
    Query(query): Query<PatronQuery>,
) -> AppResult<Json<Vec<PatronShort>>> {
    let patrons = state.services.patrons.search_patrons(&query)?;
    Ok(Json(patrons))
}

/// Get a patron with current loans and overdue fees
#[utoipa::path(
    get,
    path = "/patrons/{id}",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Patron details", body = PatronDetails),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_patron(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PatronDetails>> {
    let patron = state.services.patrons.get_patron_details(id, super::today())?;
    Ok(Json(patron))
}

/// Register a patron
#[utoipa::path(
    post,
    path = "/patrons",
    tag = "patrons",
    request_body = CreatePatron,
    responses(
        (status = 201, description = "Patron registered", body = PatronShort),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_patron(
    State(state): State<AppState>,
    Json(patron): Json<CreatePatron>,
) -> AppResult<(StatusCode, Json<PatronShort>)> {
    let created = state.services.patrons.create_patron(patron)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Pay outstanding fees
#[utoipa::path(
    post,
    path = "/patrons/{id}/payments",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    request_body = FeePayment,
    responses(
        (status = 200, description = "Payment recorded", body = FeePaymentReceipt),
        (status = 400, description = "Amount not positive or above the balance", body = crate::error::ErrorResponse),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn pay_fee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payment): Json<FeePayment>,
) -> AppResult<Json<FeePaymentReceipt>> {
    let receipt = state.services.patrons.pay_fee(id, payment.amount)?;
    Ok(Json(receipt))
}

/// Check whether a patron may use the makerspace
#[utoipa::path(
    get,
    path = "/patrons/{id}/makerspace-access",
    tag = "patrons",
    params(
        ("id" = i32, Path, description = "Patron ID")
    ),
    responses(
        (status = 200, description = "Access decision", body = EligibilityResponse),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn makerspace_access(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<EligibilityResponse>> {
    let decision = state.services.patrons.check_makerspace_access(id)?;
    Ok(Json(decision.into()))
}
