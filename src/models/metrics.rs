//! Modelos de métricas de flota
//!
//! Agregados efímeros del dashboard: se calculan frescos en cada llamada
//! y se descartan después de serializar la respuesta.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Filtro opcional del dashboard: rango de fechas inclusivo y subconjunto de placas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Vacío significa "todas las placas"
    pub plates: Vec<String>,
}

impl FleetFilter {
    pub fn new(
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        plates: Vec<String>,
    ) -> Self {
        Self {
            start_date,
            end_date,
            plates,
        }
    }

    /// Rechazar rangos invertidos antes de calcular cualquier métrica
    pub fn validate(&self) -> Result<(), AppError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::InvalidFilterRange { start, end });
            }
        }
        Ok(())
    }

    pub fn matches_plate(&self, plate: &str) -> bool {
        self.plates.is_empty() || self.plates.iter().any(|p| p == plate)
    }

    /// Ambos extremos del rango son inclusivos
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Consumo promedio de un vehículo dentro del filtro aplicado.
/// El orden de entrada se preserva: el ranking depende de él para desempates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleEconomy {
    pub license_plate: String,
    pub display_name: String,
    /// km/L promedio de los registros con consumo definido; None si no hay ninguno
    pub average_economy: Option<f64>,
}

/// Resumen de flota para el dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetMetrics {
    pub total_vehicles: usize,
    pub total_fuel_cost: Decimal,
    /// Promedio de los promedios por vehículo; None cuando ningún vehículo
    /// tiene consumo definido (nunca 0, nunca NaN)
    pub fleet_average_economy: Option<f64>,
    pub per_vehicle_economy: Vec<VehicleEconomy>,
    /// Registros excluidos por datos inválidos (litros o precio no positivos)
    pub skipped_records: usize,
}

/// Vehículo posicionado en el ranking de consumo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVehicle {
    pub license_plate: String,
    pub display_name: String,
    pub economy: f64,
}

/// Extremos del ranking de consumo; ambos None en el estado "sin datos"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyRanking {
    pub most_economical: Option<RankedVehicle>,
    pub least_economical: Option<RankedVehicle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_validate_inverted_range() {
        let filter = FleetFilter::new(Some(date("2025-08-01")), Some(date("2025-07-01")), vec![]);
        assert!(matches!(
            filter.validate(),
            Err(AppError::InvalidFilterRange { .. })
        ));
    }

    #[test]
    fn test_validate_equal_bounds() {
        let filter = FleetFilter::new(Some(date("2025-07-01")), Some(date("2025-07-01")), vec![]);
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_contains_date_inclusive_bounds() {
        let filter = FleetFilter::new(Some(date("2025-07-01")), Some(date("2025-07-31")), vec![]);
        assert!(filter.contains_date(date("2025-07-01")));
        assert!(filter.contains_date(date("2025-07-31")));
        assert!(!filter.contains_date(date("2025-06-30")));
        assert!(!filter.contains_date(date("2025-08-01")));
    }

    #[test]
    fn test_empty_plate_set_matches_all() {
        let filter = FleetFilter::default();
        assert!(filter.matches_plate("ABC-1234"));

        let filter = FleetFilter::new(None, None, vec!["XYZ-5678".to_string()]);
        assert!(filter.matches_plate("XYZ-5678"));
        assert!(!filter.matches_plate("ABC-1234"));
    }
}
