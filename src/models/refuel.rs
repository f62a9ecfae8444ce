//! Modelo de RefuelRecord
//!
//! Este módulo contiene el struct RefuelRecord que mapea exactamente
//! a la tabla refuel_records del schema PostgreSQL.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registro de abastecimiento - mapea exactamente a la tabla refuel_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefuelRecord {
    pub id: Uuid,
    pub fleet_id: Uuid,
    /// Placa del vehículo abastecido
    pub license_plate: String,
    pub refuel_date: NaiveDate,
    pub refuel_time: NaiveTime,
    /// Lectura del odómetro al momento del abastecimiento
    pub odometer_km: i64,
    pub liters: Decimal,
    pub price_per_liter: Decimal,
    /// litros × precio por litro, redondeado a 2 decimales al crear
    pub total_cost: Decimal,
    pub fuel_type: String,
    pub station: Option<String>,
    /// Tanque lleno: sirve de referencia para el cálculo de consumo
    pub full_tank: bool,
    pub created_at: DateTime<Utc>,
}

impl RefuelRecord {
    /// Un registro con litros o precio no positivos es un error de datos
    /// y queda fuera de todo cálculo de costos y consumo.
    pub fn is_valid(&self) -> bool {
        self.liters > Decimal::ZERO && self.price_per_liter > Decimal::ZERO
    }

    /// Clave de ordenamiento cronológico
    pub fn timestamp_key(&self) -> (NaiveDate, NaiveTime) {
        (self.refuel_date, self.refuel_time)
    }
}
