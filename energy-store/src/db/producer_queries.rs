use sqlx::SqlitePool;

use crate::domain::{EnergyProducer, NewEnergyProducer};

pub async fn producer_by_uid(
    pool: &SqlitePool,
    uid: i64,
) -> Result<Option<EnergyProducer>, sqlx::Error> {
    sqlx::query_as::<_, EnergyProducer>(
        "SELECT uid, name FROM energy_producers WHERE uid = ?1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await
}

/// Lookup by the unique producer name, used for the duplicate-name check on
/// creation.
pub async fn producer_by_name(
    pool: &SqlitePool,
    name: &str,
) -> Result<Option<EnergyProducer>, sqlx::Error> {
    sqlx::query_as::<_, EnergyProducer>(
        "SELECT uid, name FROM energy_producers WHERE name = ?1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn list_producers(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<EnergyProducer>, sqlx::Error> {
    sqlx::query_as::<_, EnergyProducer>(
        "SELECT uid, name FROM energy_producers ORDER BY uid LIMIT ?1 OFFSET ?2",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub async fn insert_producer(
    pool: &SqlitePool,
    new: &NewEnergyProducer,
) -> Result<EnergyProducer, sqlx::Error> {
    sqlx::query_as::<_, EnergyProducer>(
        "INSERT INTO energy_producers (name) VALUES (?1) RETURNING uid, name",
    )
    .bind(&new.name)
    .fetch_one(pool)
    .await
}
