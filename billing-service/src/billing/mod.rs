//! Invoice computation and on-demand materialization.
//!
//! [`compute_invoice`] is the pure aggregation: the signed sum of one
//! factory's meter readings over one calendar month, priced at a fixed
//! per-kWh rate. [`materialize_invoice`] wraps it with get-or-compute
//! semantics against the persisted invoices, so reading an invoice for an
//! uncomputed period has a documented write side effect.

use energy_store::db;
use energy_store::domain::{Invoice, NewInvoice};
use sqlx::SqlitePool;
use time::{Date, Month};

#[derive(thiserror::Error, Debug)]
pub enum BillingError {
    #[error("Factory not found")]
    FactoryNotFound(i64),
    #[error("no calendar month for year {year}, month {month}")]
    InvalidPeriod { year: i32, month: u8 },
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// First day of the billed month. Invoice dates are always normalized to
/// this day, which lets the unique index on `invoices (factory_uid, date)`
/// hold one row per factory per month.
pub fn period_start(year: i32, month: u8) -> Result<Date, BillingError> {
    let m = Month::try_from(month).map_err(|_| BillingError::InvalidPeriod { year, month })?;
    Date::from_calendar_date(year, m, 1).map_err(|_| BillingError::InvalidPeriod { year, month })
}

/// Compute the net production and price of one factory for one calendar
/// month, without consulting or writing any persisted invoice.
///
/// Producing meters contribute their readings positively, consuming meters
/// negatively; a null reading amount counts as zero. A month without
/// readings is valid and yields a zero invoice. Accumulation is plain f64
/// with no rounding.
pub async fn compute_invoice(
    pool: &SqlitePool,
    factory_uid: i64,
    year: i32,
    month: u8,
    price_per_kwh: f64,
) -> Result<NewInvoice, BillingError> {
    let factory = db::factory_by_uid(pool, factory_uid)
        .await?
        .ok_or(BillingError::FactoryNotFound(factory_uid))?;

    let period = period_start(year, month)?;

    let mut production = 0.0_f64;
    for meter in db::meters_of_factory(pool, factory.uid).await? {
        for reading in db::readings_for_month(pool, meter.uid, year, month).await? {
            let amount = reading.amount.unwrap_or(0.0);
            if meter.is_producer {
                production += amount;
            } else {
                production -= amount;
            }
        }
    }

    metrics::counter!("invoices_computed_total").increment(1);

    Ok(NewInvoice {
        date: period,
        production,
        price: production * price_per_kwh,
        factory_uid: factory.uid,
    })
}

/// Return the persisted invoice for (factory, year, month), computing and
/// persisting it first when none exists yet.
///
/// The check-then-insert window is closed by the storage-level unique index:
/// when a concurrent request wins the insert race, the unique violation is
/// treated as success and the winner's row is returned. At most one invoice
/// exists per key afterwards, under sequential and concurrent access alike.
pub async fn materialize_invoice(
    pool: &SqlitePool,
    factory_uid: i64,
    year: i32,
    month: u8,
    price_per_kwh: f64,
) -> Result<Invoice, BillingError> {
    if let Some(existing) = db::invoice_for_period(pool, factory_uid, year, month).await? {
        return Ok(existing);
    }

    let candidate = compute_invoice(pool, factory_uid, year, month, price_per_kwh).await?;
    match db::insert_invoice(pool, &candidate).await {
        Ok(invoice) => {
            tracing::debug!(
                factory_uid,
                year,
                month,
                production = invoice.production,
                price = invoice.price,
                "invoice materialized"
            );
            metrics::counter!("invoices_materialized_total").increment(1);
            Ok(invoice)
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            // Lost the race to a concurrent request for the same period.
            db::invoice_for_period(pool, factory_uid, year, month)
                .await?
                .ok_or(BillingError::Store(sqlx::Error::RowNotFound))
        }
        Err(e) => Err(e.into()),
    }
}
