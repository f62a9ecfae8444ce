//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea exactamente
//! a la tabla vehicles del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: String,
    pub vehicle_status: String,
    /// Odómetro actual en km; nunca decrece durante la vida del vehículo
    pub current_km: i64,
    /// Capacidad del tanque en litros
    pub fuel_capacity: Option<Decimal>,
    /// Conductor asignado (referencia débil a users)
    pub driver_id: Option<Uuid>,
    /// Distancia entre servicios programados
    pub maintenance_interval_km: Option<i64>,
    /// Odómetro del próximo servicio programado
    pub km_next_service: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nombre para mostrar en rankings y alertas: "Marca Modelo (PLACA)"
    pub fn display_name(&self) -> String {
        match (&self.brand, &self.model) {
            (Some(brand), Some(model)) => {
                format!("{} {} ({})", brand, model, self.license_plate)
            }
            (Some(brand), None) => format!("{} ({})", brand, self.license_plate),
            (None, Some(model)) => format!("{} ({})", model, self.license_plate),
            (None, None) => self.license_plate.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(brand: Option<&str>, model: Option<&str>) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: "ABC-1234".to_string(),
            brand: brand.map(str::to_string),
            model: model.map(str::to_string),
            year: Some(2020),
            vehicle_type: "car".to_string(),
            vehicle_status: "active".to_string(),
            current_km: 50_000,
            fuel_capacity: None,
            driver_id: None,
            maintenance_interval_km: Some(10_000),
            km_next_service: Some(60_000),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_full() {
        let v = vehicle(Some("Fiat"), Some("Strada"));
        assert_eq!(v.display_name(), "Fiat Strada (ABC-1234)");
    }

    #[test]
    fn test_display_name_plate_only() {
        let v = vehicle(None, None);
        assert_eq!(v.display_name(), "ABC-1234");
    }
}
