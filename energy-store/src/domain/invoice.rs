use serde::Serialize;
use time::Date;

/// A monthly net-production and price summary for one factory.
///
/// `date` is always the first day of the billed month; `production` is the
/// signed kWh total (may be negative or zero) and `price` is
/// `production * price_per_kwh`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Invoice {
    pub uid: i64,
    pub date: Date,
    pub production: f64,
    pub price: f64,
    pub factory_uid: i64,
}

/// An invoice candidate that has not been persisted yet. Produced by the
/// billing calculator, never accepted from clients.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    pub date: Date,
    pub production: f64,
    pub price: f64,
    pub factory_uid: i64,
}
