use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dashboard_dto::{AlertsResponse, DashboardQuery, DashboardResponse};
use crate::models::metrics::FleetFilter;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::refuel_repository::RefuelRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_service::{classify_alerts, AlertThresholds};
use crate::services::fleet_metrics_service::{compute_fleet_metrics, rank_economy};
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_date;

pub struct DashboardController {
    vehicles: VehicleRepository,
    refuels: RefuelRepository,
    maintenance: MaintenanceRepository,
    thresholds: AlertThresholds,
}

impl DashboardController {
    pub fn new(pool: PgPool, thresholds: AlertThresholds) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            refuels: RefuelRepository::new(pool.clone()),
            maintenance: MaintenanceRepository::new(pool),
            thresholds,
        }
    }

    /// Resumen del dashboard: métricas, ranking y alertas sobre un snapshot
    /// fresco de la flota. Invocaciones concurrentes no se coordinan entre
    /// sí; cada una calcula sobre su propia copia.
    pub async fn summary(
        &self,
        fleet_id: Uuid,
        query: DashboardQuery,
    ) -> Result<DashboardResponse, AppError> {
        let filter = parse_filter(&query)?;

        let vehicles = self.vehicles.find_by_fleet(fleet_id).await?;
        let refuels = self.refuels.find_by_fleet(fleet_id).await?;
        let maintenance = self.maintenance.find_by_fleet(fleet_id).await?;

        let metrics = compute_fleet_metrics(&vehicles, &refuels, &filter)?;
        let ranking = rank_economy(&metrics.per_vehicle_economy);
        let report = classify_alerts(&vehicles, &refuels, &maintenance, &self.thresholds);

        log::info!(
            "📊 Dashboard calculado para flota {}: {} vehículos, {} alertas",
            fleet_id,
            metrics.total_vehicles,
            report.alerts.len()
        );

        Ok(DashboardResponse {
            metrics,
            ranking,
            alerts: report.alerts,
        })
    }

    /// Solo las alertas, con el conteo de registros descartados
    pub async fn alerts(&self, fleet_id: Uuid) -> Result<AlertsResponse, AppError> {
        let vehicles = self.vehicles.find_by_fleet(fleet_id).await?;
        let refuels = self.refuels.find_by_fleet(fleet_id).await?;
        let maintenance = self.maintenance.find_by_fleet(fleet_id).await?;

        let report = classify_alerts(&vehicles, &refuels, &maintenance, &self.thresholds);

        Ok(AlertsResponse {
            alerts: report.alerts,
            skipped_records: report.skipped_records,
        })
    }
}

fn parse_filter(query: &DashboardQuery) -> Result<FleetFilter, AppError> {
    let start_date = match &query.start_date {
        Some(value) => Some(
            validate_date(value)
                .map_err(|_| bad_request_error("Formato de fecha inválido (YYYY-MM-DD)"))?,
        ),
        None => None,
    };
    let end_date = match &query.end_date {
        Some(value) => Some(
            validate_date(value)
                .map_err(|_| bad_request_error("Formato de fecha inválido (YYYY-MM-DD)"))?,
        ),
        None => None,
    };
    let plates = query
        .plates
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(FleetFilter::new(start_date, end_date, plates))
}
