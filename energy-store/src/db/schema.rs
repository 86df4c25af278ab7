use sqlx::SqlitePool;

/// DDL executed at startup. Dates are stored as TEXT in `YYYY-MM-DD` form,
/// which is what sqlx encodes `time::Date` to and what `strftime` expects.
///
/// The unique index on `invoices (factory_uid, date)` is the serialization
/// point for invoice materialization: invoice dates are normalized to the
/// first day of the billed month, so the index holds one row per factory
/// per month even under concurrent requests.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS energy_producers (
        uid  INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS factories (
        uid       INTEGER PRIMARY KEY AUTOINCREMENT,
        name      TEXT NOT NULL,
        owner_uid INTEGER NOT NULL REFERENCES energy_producers (uid)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS electrical_meters (
        uid         INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        is_producer INTEGER NOT NULL DEFAULT 0,
        factory_uid INTEGER NOT NULL REFERENCES factories (uid)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS meter_readings (
        uid                  INTEGER PRIMARY KEY AUTOINCREMENT,
        date                 TEXT NOT NULL,
        amount               REAL,
        electrical_meter_uid INTEGER NOT NULL REFERENCES electrical_meters (uid)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        uid         INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT NOT NULL,
        production  REAL NOT NULL,
        price       REAL NOT NULL,
        factory_uid INTEGER NOT NULL REFERENCES factories (uid)
    )
    "#,
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS invoices_factory_period
        ON invoices (factory_uid, date)
    "#,
];

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
