//! Error types for the BAT server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::eligibility::DenialReason;

/// Stable numeric error codes returned to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NoSuchPatron = 2,
    NoSuchItem = 3,
    ItemNotAvailable = 4,
    NotBorrowable = 5,
    MaxBorrowsReached = 6,
    OutstandingFees = 7,
    AgeRestricted = 8,
    TrainingRequired = 9,
    CategoryLimitReached = 10,
    DuplicateCategory = 11,
    NotOnLoan = 12,
    BadValue = 13,
    Duplicate = 14,
    StorageFailure = 15,
    AlreadyBorrowed = 16,
}

impl From<DenialReason> for ErrorCode {
    fn from(reason: DenialReason) -> Self {
        match reason {
            DenialReason::ItemNotAvailable => ErrorCode::ItemNotAvailable,
            DenialReason::NotBorrowable => ErrorCode::NotBorrowable,
            DenialReason::LoanLimitReached => ErrorCode::MaxBorrowsReached,
            DenialReason::OutstandingFees => ErrorCode::OutstandingFees,
            DenialReason::NotOldEnough | DenialReason::MustBeOlder => ErrorCode::AgeRestricted,
            DenialReason::TrainingRequired | DenialReason::MakerspaceTrainingRequired => {
                ErrorCode::TrainingRequired
            }
            DenialReason::CategoryLimitReached(_) => ErrorCode::CategoryLimitReached,
            DenialReason::AlreadyBorrowed => ErrorCode::AlreadyBorrowed,
            DenialReason::DuplicateCategory => ErrorCode::DuplicateCategory,
            DenialReason::NotOnLoan => ErrorCode::NotOnLoan,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Patron not found: {0}")]
    PatronNotFound(i32),

    #[error("Item not found: {0}")]
    ItemNotFound(i32),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request denied: {0}")]
    Denied(DenialReason),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Data format error: {0}")]
    DataFormat(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, code, message) = match &self {
            AppError::PatronNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchPatron, message),
            AppError::ItemNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, message),
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone()),
            AppError::Denied(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::from(*reason),
                reason.to_string(),
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageFailure,
                    "Storage error".to_string(),
                )
            }
            AppError::DataFormat(e) => {
                tracing::error!("Data format error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::StorageFailure,
                    "Data format error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
