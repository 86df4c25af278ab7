use axum::extract::{Path, Query, State};
use axum::Json;

use energy_store::db;
use energy_store::domain::{ElectricalMeter, MeterReading, NewElectricalMeter};

use super::error::ApiError;
use super::{AppState, Pagination};

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewElectricalMeter>,
) -> Result<Json<ElectricalMeter>, ApiError> {
    let meter = db::insert_meter(&state.pool, &payload).await?;
    tracing::debug!(
        uid = meter.uid,
        name = %meter.name,
        is_producer = meter.is_producer,
        "electrical meter created"
    );
    metrics::counter!("electrical_meters_created_total").increment(1);
    Ok(Json(meter))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ElectricalMeter>>, ApiError> {
    let meters = db::list_meters(&state.pool, page.skip, page.limit).await?;
    Ok(Json(meters))
}

pub async fn by_uid(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<ElectricalMeter>, ApiError> {
    let meter = db::meter_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Electrical meter"))?;
    Ok(Json(meter))
}

pub async fn readings(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Vec<MeterReading>>, ApiError> {
    let meter = db::meter_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Electrical meter"))?;
    let readings = db::readings_of_meter(&state.pool, meter.uid).await?;
    Ok(Json(readings))
}
