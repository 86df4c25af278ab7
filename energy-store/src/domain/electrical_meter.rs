use serde::{Deserialize, Serialize};

/// A metering point within a factory.
///
/// `is_producer` fixes the sign of this meter's readings in monthly
/// aggregation: producing meters contribute positively, consuming meters
/// negatively.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ElectricalMeter {
    pub uid: i64,
    pub name: String,
    pub is_producer: bool,
    pub factory_uid: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewElectricalMeter {
    pub name: String,
    pub is_producer: bool,
    pub factory_uid: i64,
}
