//! DTOs de MaintenanceRecord

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};

/// Request para registrar un mantenimiento preventivo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 5, max = 20))]
    pub license_plate: String,

    pub km_last_service: i64,

    pub km_next_service: i64,

    #[serde(default)]
    pub oil_change: bool,
    #[serde(default)]
    pub oil_filter: bool,
    #[serde(default)]
    pub fuel_filter: bool,
    #[serde(default)]
    pub air_filter: bool,
    #[serde(default)]
    pub lubrication: bool,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Request para actualizar los servicios realizados
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    pub km_next_service: Option<i64>,

    pub oil_change: Option<bool>,
    pub oil_filter: Option<bool>,
    pub fuel_filter: Option<bool>,
    pub air_filter: Option<bool>,
    pub lubrication: Option<bool>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Response de mantenimiento con el estado derivado contra el odómetro actual
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub license_plate: String,
    pub km_last_service: i64,
    pub km_next_service: i64,
    pub oil_change: bool,
    pub oil_filter: bool,
    pub fuel_filter: bool,
    pub air_filter: bool,
    pub lubrication: bool,
    pub notes: Option<String>,
    /// None cuando el intervalo del registro es degenerado
    pub status: Option<MaintenanceStatus>,
    pub progress_pct: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceResponse {
    pub fn from_record(
        record: MaintenanceRecord,
        status: Option<MaintenanceStatus>,
        progress_pct: Option<f64>,
    ) -> Self {
        Self {
            id: record.id,
            fleet_id: record.fleet_id,
            license_plate: record.license_plate,
            km_last_service: record.km_last_service,
            km_next_service: record.km_next_service,
            oil_change: record.oil_change,
            oil_filter: record.oil_filter,
            fuel_filter: record.fuel_filter,
            air_filter: record.air_filter,
            lubrication: record.lubrication,
            notes: record.notes,
            status,
            progress_pct,
            created_at: record.created_at,
        }
    }
}
