//! Modelo de User
//!
//! Este módulo contiene el struct User (gestores y conductores de la flota).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// "admin" o "driver"
    pub role: String,
    pub created_at: DateTime<Utc>,
}
