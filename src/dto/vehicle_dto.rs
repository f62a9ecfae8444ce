//! DTOs de Vehicle

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 5, max = 20))]
    pub license_plate: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    pub vehicle_type: Option<String>,

    pub current_km: Option<i64>,

    pub fuel_capacity: Option<Decimal>,

    pub driver_id: Option<Uuid>,

    pub maintenance_interval_km: Option<i64>,

    pub km_next_service: Option<i64>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    pub vehicle_type: Option<String>,

    pub vehicle_status: Option<String>,

    pub fuel_capacity: Option<Decimal>,

    pub maintenance_interval_km: Option<i64>,

    pub km_next_service: Option<i64>,
}

/// Request para actualizar el odómetro
#[derive(Debug, Deserialize)]
pub struct UpdateKmRequest {
    pub current_km: i64,
}

/// Request para asignar o desasignar un conductor
#[derive(Debug, Deserialize)]
pub struct AssignDriverRequest {
    /// None desasigna al conductor actual
    pub driver_id: Option<Uuid>,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: String,
    pub vehicle_status: String,
    pub current_km: i64,
    pub fuel_capacity: Option<Decimal>,
    pub driver_id: Option<Uuid>,
    pub maintenance_interval_km: Option<i64>,
    pub km_next_service: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            fleet_id: vehicle.fleet_id,
            license_plate: vehicle.license_plate,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            vehicle_type: vehicle.vehicle_type,
            vehicle_status: vehicle.vehicle_status,
            current_km: vehicle.current_km,
            fuel_capacity: vehicle.fuel_capacity,
            driver_id: vehicle.driver_id,
            maintenance_interval_km: vehicle.maintenance_interval_km,
            km_next_service: vehicle.km_next_service,
            created_at: vehicle.created_at,
        }
    }
}
