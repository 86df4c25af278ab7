use sqlx::SqlitePool;

use crate::domain::{Invoice, NewInvoice};

pub async fn invoice_by_uid(pool: &SqlitePool, uid: i64) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "SELECT uid, date, production, price, factory_uid FROM invoices WHERE uid = ?1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await
}

/// List invoices, optionally filtered by the month component of their date.
///
/// The filter deliberately ignores the year: invoices from January of any
/// year match a January filter. This mirrors the one-parameter-date listing
/// behavior of the API and must not be tightened to a full-period match.
pub async fn list_invoices(
    pool: &SqlitePool,
    month: Option<u8>,
    skip: i64,
    limit: i64,
) -> Result<Vec<Invoice>, sqlx::Error> {
    match month {
        Some(m) => {
            sqlx::query_as::<_, Invoice>(
                "SELECT uid, date, production, price, factory_uid FROM invoices \
                 WHERE CAST(strftime('%m', date) AS INTEGER) = ?1 \
                 ORDER BY uid LIMIT ?2 OFFSET ?3",
            )
            .bind(i64::from(m))
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Invoice>(
                "SELECT uid, date, production, price, factory_uid FROM invoices \
                 ORDER BY uid LIMIT ?1 OFFSET ?2",
            )
            .bind(limit)
            .bind(skip)
            .fetch_all(pool)
            .await
        }
    }
}

/// All invoices accumulated by one factory.
pub async fn invoices_of_factory(
    pool: &SqlitePool,
    factory_uid: i64,
) -> Result<Vec<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "SELECT uid, date, production, price, factory_uid FROM invoices \
         WHERE factory_uid = ?1 ORDER BY uid",
    )
    .bind(factory_uid)
    .fetch_all(pool)
    .await
}

/// The persisted invoice of one factory for a given billed month, if any.
/// Matches on the year and month components of the stored date so rows
/// predating day-of-month normalization are still found.
pub async fn invoice_for_period(
    pool: &SqlitePool,
    factory_uid: i64,
    year: i32,
    month: u8,
) -> Result<Option<Invoice>, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "SELECT uid, date, production, price, factory_uid FROM invoices \
         WHERE factory_uid = ?1 \
           AND CAST(strftime('%Y', date) AS INTEGER) = ?2 \
           AND CAST(strftime('%m', date) AS INTEGER) = ?3",
    )
    .bind(factory_uid)
    .bind(i64::from(year))
    .bind(i64::from(month))
    .fetch_optional(pool)
    .await
}

/// Persist a computed invoice. Fails with a unique violation when an invoice
/// for the same (factory, date) already exists; callers decide whether that
/// is an error or a lost race to tolerate.
pub async fn insert_invoice(pool: &SqlitePool, new: &NewInvoice) -> Result<Invoice, sqlx::Error> {
    sqlx::query_as::<_, Invoice>(
        "INSERT INTO invoices (date, production, price, factory_uid) VALUES (?1, ?2, ?3, ?4) \
         RETURNING uid, date, production, price, factory_uid",
    )
    .bind(new.date)
    .bind(new.production)
    .bind(new.price)
    .bind(new.factory_uid)
    .fetch_one(pool)
    .await
}
