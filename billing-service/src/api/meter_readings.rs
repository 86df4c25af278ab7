use axum::extract::{Path, Query, State};
use axum::Json;

use energy_store::db;
use energy_store::domain::{MeterReading, NewMeterReading};

use super::error::{validate_day, validate_month, validate_year, ApiError};
use super::{AppState, Pagination};

/// Optional date-component filters plus pagination. Kept flat because the
/// query-string deserializer cannot flatten nested numeric fields.
#[derive(Debug, serde::Deserialize)]
pub struct ReadingFilter {
    pub year: Option<i32>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "super::default_limit")]
    pub limit: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewMeterReading>,
) -> Result<Json<MeterReading>, ApiError> {
    let reading = db::insert_reading(&state.pool, &payload).await?;
    tracing::debug!(
        uid = reading.uid,
        electrical_meter_uid = reading.electrical_meter_uid,
        "meter reading created"
    );
    metrics::counter!("meter_readings_created_total").increment(1);
    Ok(Json(reading))
}

/// List readings, optionally narrowed by `year`/`month`/`day` query
/// parameters. Each provided component is range-checked first.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ReadingFilter>,
) -> Result<Json<Vec<MeterReading>>, ApiError> {
    if let Some(year) = filter.year {
        validate_year(year)?;
    }
    if let Some(month) = filter.month {
        validate_month(month)?;
    }
    if let Some(day) = filter.day {
        validate_day(day)?;
    }

    let readings = db::list_readings(
        &state.pool,
        filter.year,
        filter.month,
        filter.day,
        filter.skip,
        filter.limit,
    )
    .await?;
    Ok(Json(readings))
}

pub async fn by_uid(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<MeterReading>, ApiError> {
    let reading = db::reading_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Meter reading"))?;
    Ok(Json(reading))
}

pub async fn by_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u8)>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MeterReading>>, ApiError> {
    validate_year(year)?;
    validate_month(month)?;

    let readings = db::list_readings(
        &state.pool,
        Some(year),
        Some(month),
        None,
        page.skip,
        page.limit,
    )
    .await?;
    Ok(Json(readings))
}

pub async fn by_day(
    State(state): State<AppState>,
    Path((year, month, day)): Path<(i32, u8, u8)>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MeterReading>>, ApiError> {
    validate_year(year)?;
    validate_month(month)?;
    validate_day(day)?;

    let readings = db::list_readings(
        &state.pool,
        Some(year),
        Some(month),
        Some(day),
        page.skip,
        page.limit,
    )
    .await?;
    Ok(Json(readings))
}
