//! Modelo de Fleet (cuenta de la empresa)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fleet - mapea exactamente a la tabla fleets
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fleet {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
