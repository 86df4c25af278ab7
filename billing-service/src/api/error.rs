use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::billing::BillingError;

/// Client-visible request failures. Serialized as `{"detail": "..."}`
/// alongside the mapped status code.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The addressed parent entity does not exist. Carries the entity kind
    /// for the response detail, e.g. "Factory not found".
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A date component outside its accepted range, rejected before any
    /// data access.
    #[error("{0}")]
    InvalidRange(String),
    #[error("Energy producer already registered")]
    DuplicateName,
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl From<BillingError> for ApiError {
    fn from(e: BillingError) -> Self {
        match e {
            BillingError::FactoryNotFound(_) => ApiError::NotFound("Factory"),
            BillingError::InvalidPeriod { .. } => ApiError::InvalidRange(e.to_string()),
            BillingError::Store(e) => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRange(_) | ApiError::DuplicateName => StatusCode::BAD_REQUEST,
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

pub fn validate_year(year: i32) -> Result<(), ApiError> {
    if year < 1900 {
        return Err(ApiError::InvalidRange("Year can't be < 1900".to_string()));
    }
    Ok(())
}

pub fn validate_month(month: u8) -> Result<(), ApiError> {
    if !(1..=12).contains(&month) {
        return Err(ApiError::InvalidRange(
            "Month must be in range [1, 12]".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_day(day: u8) -> Result<(), ApiError> {
    if !(1..=31).contains(&day) {
        return Err(ApiError::InvalidRange(
            "Day must be in range [1, 31]".to_string(),
        ));
    }
    Ok(())
}
