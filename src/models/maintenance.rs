//! Modelo de MaintenanceRecord
//!
//! Este módulo contiene el struct MaintenanceRecord y el estado derivado
//! de mantenimiento calculado contra el odómetro actual del vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Registro de mantenimiento preventivo - mapea a la tabla maintenance_records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub license_plate: String,
    /// Odómetro al momento del último servicio
    pub km_last_service: i64,
    /// Odómetro programado para el próximo servicio
    pub km_next_service: i64,
    pub oil_change: bool,
    pub oil_filter: bool,
    pub fuel_filter: bool,
    pub air_filter: bool,
    pub lubrication: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Un intervalo con km_next_service <= km_last_service es una configuración
    /// inválida: el progreso no se puede calcular.
    pub fn has_valid_interval(&self) -> bool {
        self.km_next_service > self.km_last_service
    }

    /// Progreso del intervalo de servicio en porcentaje, sin clamping.
    /// Valores > 100 significan servicio vencido. None si el intervalo es inválido.
    pub fn progress_pct(&self, current_km: i64) -> Option<f64> {
        if !self.has_valid_interval() {
            return None;
        }
        let done = (current_km - self.km_last_service) as f64;
        let interval = (self.km_next_service - self.km_last_service) as f64;
        Some(done / interval * 100.0)
    }
}

/// Estado derivado de mantenimiento; se calcula en cada consulta, nunca se persiste
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    UpToDate,
    DueSoon,
    Overdue,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(last: i64, next: i64) -> MaintenanceRecord {
        MaintenanceRecord {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: "ABC-1234".to_string(),
            km_last_service: last,
            km_next_service: next,
            oil_change: true,
            oil_filter: false,
            fuel_filter: false,
            air_filter: false,
            lubrication: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_progress_pct_past_due() {
        // 76000 km con servicio programado a los 74000: 114.3%
        let r = record(60_000, 74_000);
        let progress = r.progress_pct(76_000).unwrap();
        assert!((progress - 114.285).abs() < 0.01);
    }

    #[test]
    fn test_progress_pct_degenerate_interval() {
        let r = record(60_000, 60_000);
        assert!(!r.has_valid_interval());
        assert!(r.progress_pct(61_000).is_none());
    }
}
