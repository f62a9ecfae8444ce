//! Servicio de alertas operacionales
//!
//! Clasifica abastecimientos y mantenimientos contra umbrales configurables
//! y produce las alertas del dashboard. Igual que el servicio de métricas,
//! es un cálculo puro sobre un snapshot: las reglas se evalúan de forma
//! independiente y un mismo vehículo puede generar varias alertas.

use num_traits::ToPrimitive;

use crate::config::environment::EnvironmentConfig;
use crate::models::alert::{Alert, AlertKind, AlertSeverity};
use crate::models::maintenance::{MaintenanceRecord, MaintenanceStatus};
use crate::models::refuel::RefuelRecord;
use crate::models::vehicle::Vehicle;
use crate::services::fleet_metrics_service::{average_economy, economy_series, moving_average};

/// Umbrales de clasificación de alertas
#[derive(Debug, Clone)]
pub struct AlertThresholds {
    /// Piso fijo de km/L cuando el vehículo no tiene historial suficiente
    pub low_economy_floor_km_l: f64,
    /// Fracción por debajo del promedio histórico que dispara la alerta
    pub low_economy_deviation: f64,
    /// Factor sobre la línea base de costos recientes que marca un
    /// abastecimiento como sospechoso
    pub suspicious_cost_factor: f64,
    /// Cantidad de abastecimientos recientes usados como línea base
    pub recent_refuel_window: usize,
    /// Banda de proximidad del próximo servicio, en porcentaje del intervalo
    pub due_soon_lower_pct: f64,
    pub due_soon_upper_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_economy_floor_km_l: 8.0,
            low_economy_deviation: 0.10,
            suspicious_cost_factor: 2.0,
            recent_refuel_window: 10,
            due_soon_lower_pct: 70.0,
            due_soon_upper_pct: 90.0,
        }
    }
}

impl From<&EnvironmentConfig> for AlertThresholds {
    fn from(config: &EnvironmentConfig) -> Self {
        let defaults = Self::default();
        Self {
            low_economy_floor_km_l: config
                .alert_low_economy_floor
                .unwrap_or(defaults.low_economy_floor_km_l),
            low_economy_deviation: config
                .alert_low_economy_deviation
                .unwrap_or(defaults.low_economy_deviation),
            suspicious_cost_factor: config
                .alert_suspicious_cost_factor
                .unwrap_or(defaults.suspicious_cost_factor),
            recent_refuel_window: config
                .alert_recent_refuel_window
                .unwrap_or(defaults.recent_refuel_window),
            due_soon_lower_pct: config
                .alert_due_soon_lower_pct
                .unwrap_or(defaults.due_soon_lower_pct),
            due_soon_upper_pct: config
                .alert_due_soon_upper_pct
                .unwrap_or(defaults.due_soon_upper_pct),
        }
    }
}

/// Resultado de una pasada de clasificación
#[derive(Debug, Clone)]
pub struct AlertReport {
    pub alerts: Vec<Alert>,
    /// Registros descartados por datos inválidos (litros/precio no positivos
    /// o intervalos de mantenimiento degenerados)
    pub skipped_records: usize,
}

/// Evaluar todas las reglas de alerta sobre el snapshot actual de la flota
pub fn classify_alerts(
    vehicles: &[Vehicle],
    refuels: &[RefuelRecord],
    maintenance_records: &[MaintenanceRecord],
    thresholds: &AlertThresholds,
) -> AlertReport {
    let mut alerts = Vec::new();
    let mut skipped_records = 0usize;

    for vehicle in vehicles {
        let mut records: Vec<&RefuelRecord> = refuels
            .iter()
            .filter(|r| r.license_plate == vehicle.license_plate)
            .collect();
        skipped_records += records.iter().filter(|r| !r.is_valid()).count();
        records.retain(|r| r.is_valid());
        records.sort_by_key(|r| r.timestamp_key());

        check_low_economy(vehicle, &records, thresholds, &mut alerts);
        check_suspicious_refuels(vehicle, &records, thresholds, &mut alerts);

        for record in maintenance_records
            .iter()
            .filter(|m| m.license_plate == vehicle.license_plate)
        {
            let Some(progress) = record.progress_pct(vehicle.current_km) else {
                // Intervalo degenerado: se reporta y se sigue con el resto
                skipped_records += 1;
                log::warn!(
                    "🔧 Intervalo de mantenimiento inválido para {}: {} -> {} km",
                    record.license_plate,
                    record.km_last_service,
                    record.km_next_service
                );
                continue;
            };

            // Vencido antes que próximo: progreso > 100 nunca cae en la banda
            if vehicle.current_km >= record.km_next_service {
                alerts.push(Alert::new(
                    &vehicle.license_plate,
                    AlertKind::MaintenanceOverdue,
                    AlertSeverity::Warning,
                    "Manutenção atrasada",
                ));
            } else if progress >= thresholds.due_soon_lower_pct
                && progress < thresholds.due_soon_upper_pct
            {
                alerts.push(Alert::new(
                    &vehicle.license_plate,
                    AlertKind::MaintenanceDueSoon,
                    AlertSeverity::Info,
                    format!("Manutenção em {:.1}% do intervalo", progress),
                ));
            }
        }
    }

    AlertReport {
        alerts,
        skipped_records,
    }
}

/// Estado derivado de mantenimiento para las pantallas de listado
pub fn maintenance_status(
    record: &MaintenanceRecord,
    current_km: i64,
    thresholds: &AlertThresholds,
) -> Option<MaintenanceStatus> {
    let progress = record.progress_pct(current_km)?;
    if current_km >= record.km_next_service {
        Some(MaintenanceStatus::Overdue)
    } else if progress >= thresholds.due_soon_lower_pct && progress < thresholds.due_soon_upper_pct
    {
        Some(MaintenanceStatus::DueSoon)
    } else {
        Some(MaintenanceStatus::UpToDate)
    }
}

/// Regla de consumo: la última lectura definida se compara contra el
/// promedio histórico del vehículo, o contra el piso fijo si el historial
/// no alcanza para un promedio significativo.
fn check_low_economy(
    vehicle: &Vehicle,
    records: &[&RefuelRecord],
    thresholds: &AlertThresholds,
    alerts: &mut Vec<Alert>,
) {
    let series = economy_series(records);
    let defined: Vec<f64> = series.iter().flatten().copied().collect();

    let Some(latest) = defined.last().copied() else {
        return;
    };

    let below = if defined.len() >= 2 {
        match average_economy(&series) {
            Some(avg) => latest < avg * (1.0 - thresholds.low_economy_deviation),
            None => false,
        }
    } else {
        latest < thresholds.low_economy_floor_km_l
    };

    if below {
        alerts.push(Alert::new(
            &vehicle.license_plate,
            AlertKind::LowEconomy,
            AlertSeverity::Warning,
            format!("{} - consumo maior que o normal", vehicle.license_plate),
        ));
    }
}

/// Regla de abastecimiento sospechoso: litros por encima de la capacidad
/// del tanque, o costo total muy por encima de la línea base reciente.
fn check_suspicious_refuels(
    vehicle: &Vehicle,
    records: &[&RefuelRecord],
    thresholds: &AlertThresholds,
    alerts: &mut Vec<Alert>,
) {
    let mut recent_totals: Vec<f64> = Vec::with_capacity(records.len());

    for record in records {
        let total = record.total_cost.to_f64().unwrap_or(0.0);

        let over_capacity = vehicle
            .fuel_capacity
            .map_or(false, |capacity| record.liters > capacity);
        let cost_outlier = moving_average(&recent_totals, thresholds.recent_refuel_window)
            .map_or(false, |baseline| {
                total > thresholds.suspicious_cost_factor * baseline
            });

        if over_capacity || cost_outlier {
            alerts.push(Alert::new(
                &vehicle.license_plate,
                AlertKind::SuspiciousRefuel,
                AlertSeverity::Warning,
                format!("{} - abastecimento suspeito", vehicle.license_plate),
            ));
        }

        recent_totals.push(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn vehicle(plate: &str, current_km: i64) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            brand: None,
            model: None,
            year: None,
            vehicle_type: "car".to_string(),
            vehicle_status: "active".to_string(),
            current_km,
            fuel_capacity: None,
            driver_id: None,
            maintenance_interval_km: None,
            km_next_service: None,
            created_at: Utc::now(),
        }
    }

    fn refuel(plate: &str, day: &str, odometer_km: i64, liters: i64, price_cents: i64, full_tank: bool) -> RefuelRecord {
        let liters = Decimal::from(liters);
        let price_per_liter = Decimal::new(price_cents, 2);
        RefuelRecord {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            refuel_date: date(day),
            refuel_time: NaiveTime::parse_from_str("08:00:00", "%H:%M:%S").unwrap(),
            odometer_km,
            liters,
            price_per_liter,
            total_cost: (liters * price_per_liter).round_dp(2),
            fuel_type: "gasolina".to_string(),
            station: None,
            full_tank,
            created_at: Utc::now(),
        }
    }

    fn maintenance(plate: &str, last: i64, next: i64) -> MaintenanceRecord {
        MaintenanceRecord {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            km_last_service: last,
            km_next_service: next,
            oil_change: true,
            oil_filter: true,
            fuel_filter: false,
            air_filter: false,
            lubrication: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn kinds(report: &AlertReport) -> Vec<AlertKind> {
        report.alerts.iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_maintenance_past_schedule_is_overdue() {
        // 76000 km actuales, servicio a los 74000: progreso 114.3%
        let vehicles = vec![vehicle("ABC-1234", 76_000)];
        let records = vec![maintenance("ABC-1234", 60_000, 74_000)];

        let report = classify_alerts(&vehicles, &[], &records, &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceOverdue]);
        assert_eq!(report.alerts[0].message, "Manutenção atrasada");
        assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_progress_over_100_never_due_soon_even_with_wide_band() {
        let vehicles = vec![vehicle("ABC-1234", 76_000)];
        let records = vec![maintenance("ABC-1234", 60_000, 74_000)];
        let thresholds = AlertThresholds {
            due_soon_lower_pct: 70.0,
            due_soon_upper_pct: 150.0,
            ..AlertThresholds::default()
        };

        let report = classify_alerts(&vehicles, &[], &records, &thresholds);
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceOverdue]);
    }

    #[test]
    fn test_maintenance_within_band_is_due_soon_with_progress() {
        // 68000 de 60000..70000: 80% del intervalo
        let vehicles = vec![vehicle("ABC-1234", 68_000)];
        let records = vec![maintenance("ABC-1234", 60_000, 70_000)];

        let report = classify_alerts(&vehicles, &[], &records, &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceDueSoon]);
        assert_eq!(report.alerts[0].severity, AlertSeverity::Info);
        assert!(report.alerts[0].message.contains("80.0%"));
    }

    #[test]
    fn test_maintenance_band_edges() {
        // 69000 de 60000..70000: 90%, fuera de la banda [70, 90)
        let at_upper = vec![vehicle("ABC-1234", 69_000)];
        let records = vec![maintenance("ABC-1234", 60_000, 70_000)];
        let report = classify_alerts(&at_upper, &[], &records, &AlertThresholds::default());
        assert!(report.alerts.is_empty());

        // 67000: 70% exacto entra en la banda
        let at_lower = vec![vehicle("ABC-1234", 67_000)];
        let report = classify_alerts(&at_lower, &[], &records, &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceDueSoon]);

        // 70000: 100% exacto ya es atrasada
        let at_limit = vec![vehicle("ABC-1234", 70_000)];
        let report = classify_alerts(&at_limit, &[], &records, &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceOverdue]);
    }

    #[test]
    fn test_degenerate_interval_is_skipped_not_fatal() {
        let vehicles = vec![vehicle("ABC-1234", 76_000)];
        let records = vec![
            maintenance("ABC-1234", 60_000, 60_000),
            maintenance("ABC-1234", 60_000, 74_000),
        ];

        let report = classify_alerts(&vehicles, &[], &records, &AlertThresholds::default());
        // El registro degenerado se cuenta y el resto se evalúa normalmente
        assert_eq!(report.skipped_records, 1);
        assert_eq!(kinds(&report), vec![AlertKind::MaintenanceOverdue]);
    }

    #[test]
    fn test_low_economy_against_fixed_floor_without_history() {
        let vehicles = vec![vehicle("ABC-1234", 50_000)];
        // Una sola lectura definida: 210 km / 30 L = 7.0 km/L, bajo el piso de 8.0
        let refuels = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, true),
            refuel("ABC-1234", "2025-07-05", 10_210, 30, 599, true),
        ];

        let report = classify_alerts(&vehicles, &refuels, &[], &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::LowEconomy]);
        assert_eq!(report.alerts[0].message, "ABC-1234 - consumo maior que o normal");
    }

    #[test]
    fn test_low_economy_against_historical_average() {
        let vehicles = vec![vehicle("ABC-1234", 50_000)];
        // Historial 13.0, 13.0 y una caída a 9.0: bajo el 90% del promedio (11.67)
        let refuels = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, true),
            refuel("ABC-1234", "2025-07-05", 10_390, 30, 599, true),
            refuel("ABC-1234", "2025-07-10", 10_780, 30, 599, true),
            refuel("ABC-1234", "2025-07-15", 11_050, 30, 599, true),
        ];

        let report = classify_alerts(&vehicles, &refuels, &[], &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::LowEconomy]);
    }

    #[test]
    fn test_healthy_economy_raises_nothing() {
        let vehicles = vec![vehicle("ABC-1234", 50_000)];
        let refuels = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, true),
            refuel("ABC-1234", "2025-07-05", 10_390, 30, 599, true),
            refuel("ABC-1234", "2025-07-10", 10_780, 30, 599, true),
        ];

        let report = classify_alerts(&vehicles, &refuels, &[], &AlertThresholds::default());
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_refuel_over_tank_capacity_is_suspicious() {
        let mut v = vehicle("ABC-1234", 50_000);
        v.fuel_capacity = Some(Decimal::from(50));
        let refuels = vec![refuel("ABC-1234", "2025-07-01", 10_000, 60, 599, false)];

        let report = classify_alerts(&[v], &refuels, &[], &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::SuspiciousRefuel]);
        assert_eq!(report.alerts[0].message, "ABC-1234 - abastecimento suspeito");
    }

    #[test]
    fn test_refuel_cost_outlier_is_suspicious() {
        let vehicles = vec![vehicle("ABC-1234", 50_000)];
        // Línea base de 100.00 por carga; la última cuesta 300.00
        let refuels = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 20, 500, false),
            refuel("ABC-1234", "2025-07-05", 10_200, 20, 500, false),
            refuel("ABC-1234", "2025-07-10", 10_400, 20, 500, false),
            refuel("ABC-1234", "2025-07-15", 10_600, 20, 1_500, false),
        ];

        let report = classify_alerts(&vehicles, &refuels, &[], &AlertThresholds::default());
        assert_eq!(kinds(&report), vec![AlertKind::SuspiciousRefuel]);
    }

    #[test]
    fn test_invalid_refuels_are_counted_and_ignored() {
        let vehicles = vec![vehicle("ABC-1234", 50_000)];
        let mut bad = refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, true);
        bad.price_per_liter = Decimal::ZERO;

        let report = classify_alerts(&vehicles, &[bad], &[], &AlertThresholds::default());
        assert_eq!(report.skipped_records, 1);
        assert!(report.alerts.is_empty());
    }

    #[test]
    fn test_one_vehicle_can_raise_multiple_alerts() {
        let mut v = vehicle("ABC-1234", 76_000);
        v.fuel_capacity = Some(Decimal::from(50));
        let refuels = vec![refuel("ABC-1234", "2025-07-01", 75_900, 60, 599, false)];
        let records = vec![maintenance("ABC-1234", 60_000, 74_000)];

        let report = classify_alerts(&[v], &refuels, &records, &AlertThresholds::default());
        let mut found = kinds(&report);
        found.sort_by_key(|k| format!("{:?}", k));
        assert_eq!(
            found,
            vec![AlertKind::MaintenanceOverdue, AlertKind::SuspiciousRefuel]
        );
    }

    #[test]
    fn test_maintenance_status_derivation() {
        let thresholds = AlertThresholds::default();
        let record = maintenance("ABC-1234", 60_000, 70_000);

        assert_eq!(
            maintenance_status(&record, 62_000, &thresholds),
            Some(MaintenanceStatus::UpToDate)
        );
        assert_eq!(
            maintenance_status(&record, 68_000, &thresholds),
            Some(MaintenanceStatus::DueSoon)
        );
        assert_eq!(
            maintenance_status(&record, 71_000, &thresholds),
            Some(MaintenanceStatus::Overdue)
        );

        let degenerate = maintenance("ABC-1234", 60_000, 60_000);
        assert_eq!(maintenance_status(&degenerate, 62_000, &thresholds), None);
    }

    #[test]
    fn test_alerts_are_emitted_unresolved() {
        let vehicles = vec![vehicle("ABC-1234", 76_000)];
        let records = vec![maintenance("ABC-1234", 60_000, 74_000)];

        let report = classify_alerts(&vehicles, &[], &records, &AlertThresholds::default());
        assert!(report.alerts.iter().all(|a| !a.resolved));
    }
}
