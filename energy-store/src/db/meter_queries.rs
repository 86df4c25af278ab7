use sqlx::SqlitePool;

use crate::domain::{ElectricalMeter, NewElectricalMeter};

pub async fn meter_by_uid(
    pool: &SqlitePool,
    uid: i64,
) -> Result<Option<ElectricalMeter>, sqlx::Error> {
    sqlx::query_as::<_, ElectricalMeter>(
        "SELECT uid, name, is_producer, factory_uid FROM electrical_meters WHERE uid = ?1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await
}

pub async fn list_meters(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<ElectricalMeter>, sqlx::Error> {
    sqlx::query_as::<_, ElectricalMeter>(
        "SELECT uid, name, is_producer, factory_uid FROM electrical_meters \
         ORDER BY uid LIMIT ?1 OFFSET ?2",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

/// All meters installed in one factory, the variable set the invoice
/// calculator aggregates over.
pub async fn meters_of_factory(
    pool: &SqlitePool,
    factory_uid: i64,
) -> Result<Vec<ElectricalMeter>, sqlx::Error> {
    sqlx::query_as::<_, ElectricalMeter>(
        "SELECT uid, name, is_producer, factory_uid FROM electrical_meters \
         WHERE factory_uid = ?1 ORDER BY uid",
    )
    .bind(factory_uid)
    .fetch_all(pool)
    .await
}

pub async fn insert_meter(
    pool: &SqlitePool,
    new: &NewElectricalMeter,
) -> Result<ElectricalMeter, sqlx::Error> {
    sqlx::query_as::<_, ElectricalMeter>(
        "INSERT INTO electrical_meters (name, is_producer, factory_uid) VALUES (?1, ?2, ?3) \
         RETURNING uid, name, is_producer, factory_uid",
    )
    .bind(&new.name)
    .bind(new.is_producer)
    .bind(new.factory_uid)
    .fetch_one(pool)
    .await
}
