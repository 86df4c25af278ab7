use serde::{Deserialize, Serialize};
use time::Date;

/// A daily measured quantity (kWh) for one meter.
///
/// `amount` is nullable in the store; aggregation treats a null amount as
/// zero contribution. No uniqueness per (meter, date) is enforced, so
/// duplicate same-day readings count twice.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MeterReading {
    pub uid: i64,
    pub date: Date,
    pub amount: Option<f64>,
    pub electrical_meter_uid: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewMeterReading {
    pub date: Date,
    pub amount: f64,
    pub electrical_meter_uid: i64,
}
