use serde::{Deserialize, Serialize};

/// A company owning one or more factories. Names are unique.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EnergyProducer {
    pub uid: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEnergyProducer {
    pub name: String,
}
