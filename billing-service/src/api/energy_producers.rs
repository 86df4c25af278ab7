use axum::extract::{Path, Query, State};
use axum::Json;

use energy_store::db;
use energy_store::domain::{EnergyProducer, Factory, Invoice, NewEnergyProducer};

use super::error::{validate_month, validate_year, ApiError};
use super::{AppState, Pagination};
use crate::billing;

/// Create a producer, rejecting an already-registered name with 400.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewEnergyProducer>,
) -> Result<Json<EnergyProducer>, ApiError> {
    if db::producer_by_name(&state.pool, &payload.name)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateName);
    }

    let producer = db::insert_producer(&state.pool, &payload).await?;
    tracing::debug!(uid = producer.uid, name = %producer.name, "energy producer created");
    metrics::counter!("energy_producers_created_total").increment(1);
    Ok(Json(producer))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<EnergyProducer>>, ApiError> {
    let producers = db::list_producers(&state.pool, page.skip, page.limit).await?;
    Ok(Json(producers))
}

pub async fn by_uid(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<EnergyProducer>, ApiError> {
    let producer = db::producer_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Energy producer"))?;
    Ok(Json(producer))
}

pub async fn factories(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Vec<Factory>>, ApiError> {
    let producer = db::producer_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Energy producer"))?;
    let factories = db::factories_of_producer(&state.pool, producer.uid).await?;
    Ok(Json(factories))
}

/// All persisted invoices across the producer's factories, concatenated
/// with no deduplication and no defined cross-factory order.
pub async fn invoices(
    State(state): State<AppState>,
    Path(uid): Path<i64>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let producer = db::producer_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Energy producer"))?;

    let mut invoices = Vec::new();
    for factory in db::factories_of_producer(&state.pool, producer.uid).await? {
        invoices.extend(db::invoices_of_factory(&state.pool, factory.uid).await?);
    }
    Ok(Json(invoices))
}

/// Get-or-compute the invoice of every factory of the producer for one
/// billed month. Reading an uncomputed period persists its invoice.
pub async fn invoices_at_period(
    State(state): State<AppState>,
    Path((uid, year, month)): Path<(i64, i32, u8)>,
) -> Result<Json<Vec<Invoice>>, ApiError> {
    let producer = db::producer_by_uid(&state.pool, uid)
        .await?
        .ok_or(ApiError::NotFound("Energy producer"))?;

    validate_year(year)?;
    validate_month(month)?;

    let factories = db::factories_of_producer(&state.pool, producer.uid).await?;
    let mut invoices = Vec::with_capacity(factories.len());
    for factory in factories {
        let invoice = billing::materialize_invoice(
            &state.pool,
            factory.uid,
            year,
            month,
            state.price_per_kwh,
        )
        .await?;
        invoices.push(invoice);
    }
    Ok(Json(invoices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use energy_store::domain::{NewElectricalMeter, NewFactory, NewInvoice, NewMeterReading};
    use sqlx::sqlite::SqlitePoolOptions;
    use time::macros::date;
    use time::Date;

    const PRICE: f64 = 0.5;

    async fn test_state() -> AppState {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory sqlite");
        db::init_schema(&pool).await.expect("failed to initialize schema");
        AppState {
            pool,
            price_per_kwh: PRICE,
            metrics: None,
        }
    }

    async fn seed_producer(state: &AppState, name: &str) -> i64 {
        db::insert_producer(
            &state.pool,
            &NewEnergyProducer {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
        .uid
    }

    async fn seed_factory(state: &AppState, name: &str, owner_uid: i64) -> i64 {
        db::insert_factory(
            &state.pool,
            &NewFactory {
                name: name.to_string(),
                owner_uid,
            },
        )
        .await
        .unwrap()
        .uid
    }

    async fn seed_meter(state: &AppState, name: &str, is_producer: bool, factory_uid: i64) -> i64 {
        db::insert_meter(
            &state.pool,
            &NewElectricalMeter {
                name: name.to_string(),
                is_producer,
                factory_uid,
            },
        )
        .await
        .unwrap()
        .uid
    }

    async fn seed_reading(state: &AppState, meter_uid: i64, date: Date, amount: f64) {
        db::insert_reading(
            &state.pool,
            &NewMeterReading {
                date,
                amount,
                electrical_meter_uid: meter_uid,
            },
        )
        .await
        .unwrap();
    }

    async fn seed_invoice(state: &AppState, factory_uid: i64, date: Date, production: f64) {
        db::insert_invoice(
            &state.pool,
            &NewInvoice {
                date,
                production,
                price: production * PRICE,
                factory_uid,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn producer_invoices_concatenate_across_factories() {
        let state = test_state().await;
        let producer = seed_producer(&state, "edf").await;
        let first = seed_factory(&state, "ED_Cha_1", producer).await;
        let second = seed_factory(&state, "ED_Cha_2", producer).await;

        seed_invoice(&state, first, date!(2022 - 11 - 01), 10.0).await;
        seed_invoice(&state, first, date!(2022 - 12 - 01), 20.0).await;
        seed_invoice(&state, second, date!(2022 - 12 - 01), 30.0).await;

        let listed = invoices(State(state.clone()), Path(producer)).await.unwrap().0;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed.iter().filter(|i| i.factory_uid == first).count(), 2);
        assert_eq!(listed.iter().filter(|i| i.factory_uid == second).count(), 1);
    }

    #[tokio::test]
    async fn period_endpoint_materializes_one_invoice_per_factory() {
        let state = test_state().await;
        let producer = seed_producer(&state, "edf").await;
        let first = seed_factory(&state, "ED_Cha_1", producer).await;
        let second = seed_factory(&state, "ED_Cha_2", producer).await;

        let producing = seed_meter(&state, "em1", true, first).await;
        let consuming = seed_meter(&state, "em2", false, second).await;
        seed_reading(&state, producing, date!(2022 - 12 - 05), 100.0).await;
        seed_reading(&state, consuming, date!(2022 - 12 - 05), 40.0).await;

        let result = invoices_at_period(State(state.clone()), Path((producer, 2022, 12)))
            .await
            .unwrap()
            .0;
        assert_eq!(result.len(), 2);

        let of_first = result.iter().find(|i| i.factory_uid == first).unwrap();
        assert_eq!(of_first.production, 100.0);
        assert_eq!(of_first.price, 50.0);
        let of_second = result.iter().find(|i| i.factory_uid == second).unwrap();
        assert_eq!(of_second.production, -40.0);
        assert_eq!(of_second.price, -20.0);

        // One persisted row per factory, and a repeat request returns the
        // same rows instead of recomputing.
        assert_eq!(db::invoices_of_factory(&state.pool, first).await.unwrap().len(), 1);
        assert_eq!(db::invoices_of_factory(&state.pool, second).await.unwrap().len(), 1);

        let again = invoices_at_period(State(state.clone()), Path((producer, 2022, 12)))
            .await
            .unwrap()
            .0;
        let mut uids: Vec<i64> = result.iter().map(|i| i.uid).collect();
        let mut again_uids: Vec<i64> = again.iter().map(|i| i.uid).collect();
        uids.sort_unstable();
        again_uids.sort_unstable();
        assert_eq!(uids, again_uids);
    }

    #[tokio::test]
    async fn missing_producer_is_reported_before_date_validation() {
        let state = test_state().await;

        let err = invoices_at_period(State(state.clone()), Path((42, 2022, 13)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Energy producer")));
    }

    #[tokio::test]
    async fn invalid_period_is_rejected_for_an_existing_producer() {
        let state = test_state().await;
        let producer = seed_producer(&state, "edf").await;

        let err = invoices_at_period(State(state.clone()), Path((producer, 2022, 13)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRange(_)));

        let err = invoices_at_period(State(state.clone()), Path((producer, 1899, 12)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRange(_)));
    }
}
