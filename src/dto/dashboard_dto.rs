//! DTOs del dashboard de flota

use serde::{Deserialize, Serialize};

use crate::models::alert::Alert;
use crate::models::metrics::{EconomyRanking, FleetMetrics};

/// Query params del dashboard: rango de fechas y subconjunto de placas
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// YYYY-MM-DD, inclusivo
    pub start_date: Option<String>,
    /// YYYY-MM-DD, inclusivo
    pub end_date: Option<String>,
    /// Placas separadas por coma; ausente significa toda la flota
    pub plates: Option<String>,
}

/// Response del dashboard: métricas, ranking y alertas del snapshot actual
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: FleetMetrics,
    pub ranking: EconomyRanking,
    pub alerts: Vec<Alert>,
}

/// Response del listado de alertas
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    /// Registros descartados por datos inválidos durante la clasificación
    pub skipped_records: usize,
}
