use sqlx::SqlitePool;

use crate::domain::{Factory, NewFactory};

pub async fn factory_by_uid(pool: &SqlitePool, uid: i64) -> Result<Option<Factory>, sqlx::Error> {
    sqlx::query_as::<_, Factory>(
        "SELECT uid, name, owner_uid FROM factories WHERE uid = ?1",
    )
    .bind(uid)
    .fetch_optional(pool)
    .await
}

pub async fn list_factories(
    pool: &SqlitePool,
    skip: i64,
    limit: i64,
) -> Result<Vec<Factory>, sqlx::Error> {
    sqlx::query_as::<_, Factory>(
        "SELECT uid, name, owner_uid FROM factories ORDER BY uid LIMIT ?1 OFFSET ?2",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

/// All factories owned by one energy producer.
pub async fn factories_of_producer(
    pool: &SqlitePool,
    owner_uid: i64,
) -> Result<Vec<Factory>, sqlx::Error> {
    sqlx::query_as::<_, Factory>(
        "SELECT uid, name, owner_uid FROM factories WHERE owner_uid = ?1 ORDER BY uid",
    )
    .bind(owner_uid)
    .fetch_all(pool)
    .await
}

pub async fn insert_factory(pool: &SqlitePool, new: &NewFactory) -> Result<Factory, sqlx::Error> {
    sqlx::query_as::<_, Factory>(
        "INSERT INTO factories (name, owner_uid) VALUES (?1, ?2) RETURNING uid, name, owner_uid",
    )
    .bind(&new.name)
    .bind(new.owner_uid)
    .fetch_one(pool)
    .await
}
