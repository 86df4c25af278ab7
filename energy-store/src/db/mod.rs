mod factory_queries;
mod invoice_queries;
mod meter_queries;
mod producer_queries;
mod reading_queries;
mod schema;

pub use factory_queries::{factories_of_producer, factory_by_uid, insert_factory, list_factories};
pub use invoice_queries::{
    insert_invoice, invoice_by_uid, invoice_for_period, invoices_of_factory, list_invoices,
};
pub use meter_queries::{insert_meter, list_meters, meter_by_uid, meters_of_factory};
pub use producer_queries::{insert_producer, list_producers, producer_by_name, producer_by_uid};
pub use reading_queries::{
    insert_reading, list_readings, reading_by_uid, readings_for_month, readings_of_meter,
};
pub use schema::init_schema;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    /// In-memory database for tests. A single connection keeps every query
    /// on the same SQLite memory instance.
    pub async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory sqlite");
        super::init_schema(&pool)
            .await
            .expect("failed to initialize schema");
        pool
    }
}
