use axum::extract::{Path, Query, State};
use axum::Json;

use energy_store::db;
use energy_store::domain::{ElectricalMeter, Factory, Invoice, NewFactory};

use super::error::{validate_month, validate_year, ApiError};
use super::{AppState, Pagination};
use crate::billing;

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewFactory>,
) -> Result<Json<Factory>, ApiError> {
    let factory = db::insert_factory(&state.pool, &payload).await?;
    tracing::debug!(uid = factory.uid, name = %factory.name, "factory created");
    metrics::counter!("factories_created_total").increment(1);
    Ok(Json(factory))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Factory>>, ApiError> {
    let factories = db::list_factories(&state.pool, page.skip, page.limit).await?;
    Ok(Json(factories))
}

pub async fn by_uid(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Factory>, ApiError> {
    let factory = db::factory_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Factory"))?;
    Ok(Json(factory))
}

pub async fn electrical_meters(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Vec<ElectricalMeter>>, ApiError> {
    let factory = db::factory_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Factory"))?;
    let meters = db::meters_of_factory(&state.pool, factory.uid).await?;
    Ok(Json(meters))
}

pub async fn invoices(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let factory = db::factory_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Factory"))?;
    let invoices = db::invoices_of_factory(&state.pool, factory.uid).await?;
    Ok(Json(invoices))
}

/// Get-or-compute the factory's invoice for one billed month. Reading an
/// uncomputed period persists its invoice.
pub async fn invoice_at_period(
    State(state): State<AppState>,
    Path((uid, year, month)): Path<(i64, i32, u8)>,
) -> Result<Json<Invoice>, ApiError> {
    let factory = db::factory_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Factory"))?;

    validate_year(year)?;
    validate_month(month)?;

    let invoice = billing::materialize_invoice(
        &state.pool,
        factory.uid,
        year,
        month,
        state.price_per_kwh,
    )
    .await?;
    Ok(Json(invoice))
}
