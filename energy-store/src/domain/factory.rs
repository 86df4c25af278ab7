use serde::{Deserialize, Serialize};

/// A production site containing electrical meters, owned by an energy
/// producer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Factory {
    pub uid: i64,
    pub name: String,
    pub owner_uid: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFactory {
    pub name: String,
    pub owner_uid: i64,
}
