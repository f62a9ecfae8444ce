//! DTOs de RefuelRecord

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::refuel::RefuelRecord;

/// Request para registrar un abastecimiento.
/// El costo total lo calcula el servidor: litros × precio, redondeado a 2 decimales.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRefuelRequest {
    #[validate(length(min = 5, max = 20))]
    pub license_plate: String,

    pub refuel_date: NaiveDate,

    pub refuel_time: NaiveTime,

    pub odometer_km: i64,

    pub liters: Decimal,

    pub price_per_liter: Decimal,

    #[validate(length(min = 2, max = 30))]
    pub fuel_type: String,

    #[validate(length(max = 100))]
    pub station: Option<String>,

    #[serde(default)]
    pub full_tank: bool,
}

/// Filtros del listado de abastecimientos (query params)
#[derive(Debug, Deserialize)]
pub struct RefuelFilters {
    pub license_plate: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Response de abastecimiento para la API
#[derive(Debug, Serialize)]
pub struct RefuelResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub license_plate: String,
    pub refuel_date: NaiveDate,
    pub refuel_time: NaiveTime,
    pub odometer_km: i64,
    pub liters: Decimal,
    pub price_per_liter: Decimal,
    pub total_cost: Decimal,
    pub fuel_type: String,
    pub station: Option<String>,
    pub full_tank: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RefuelRecord> for RefuelResponse {
    fn from(record: RefuelRecord) -> Self {
        Self {
            id: record.id,
            fleet_id: record.fleet_id,
            license_plate: record.license_plate,
            refuel_date: record.refuel_date,
            refuel_time: record.refuel_time,
            odometer_km: record.odometer_km,
            liters: record.liters,
            price_per_liter: record.price_per_liter,
            total_cost: record.total_cost,
            fuel_type: record.fuel_type,
            station: record.station,
            full_tank: record.full_tank,
            created_at: record.created_at,
        }
    }
}
