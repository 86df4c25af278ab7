use axum::extract::{Path, Query, State};
use axum::Json;

use energy_store::db;
use energy_store::domain::Invoice;

use super::error::{validate_month, validate_year, ApiError};
use super::{AppState, Pagination};

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let invoices = db::list_invoices(&state.pool, None, page.skip, page.limit).await?;
    Ok(Json(invoices))
}

pub async fn by_uid(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = db::invoice_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Invoice"))?;
    Ok(Json(invoice))
}

/// List persisted invoices for a billed month. Only the month component is
/// matched; the year is validated but deliberately ignored by the filter.
pub async fn by_period(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    validate_year(year)?;
    validate_month(month)?;

    let invoices = db::list_invoices(&state.pool, Some(month), page.skip, page.limit).await?;
    Ok(Json(invoices))
}
