//! Servicio de métricas de flota
//!
//! Agregación pura sobre snapshots de vehículos y abastecimientos: resumen
//! de flota, consumo promedio por vehículo y ranking de consumo. No toca
//! base de datos ni guarda estado entre invocaciones; cada llamada del
//! dashboard calcula sobre una copia fresca y descarta el resultado.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::metrics::{
    EconomyRanking, FleetFilter, FleetMetrics, RankedVehicle, VehicleEconomy,
};
use crate::models::refuel::RefuelRecord;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

/// Calcular las métricas agregadas de la flota bajo el filtro dado.
///
/// El filtro de placas restringe tanto el conteo de vehículos como los
/// abastecimientos considerados; el rango de fechas solo restringe los
/// abastecimientos. Registros con litros o precio no positivos se descartan
/// y se cuentan en `skipped_records`.
pub fn compute_fleet_metrics(
    vehicles: &[Vehicle],
    refuels: &[RefuelRecord],
    filter: &FleetFilter,
) -> Result<FleetMetrics, AppError> {
    filter.validate()?;

    let mut skipped_records = 0usize;
    let mut total_fuel_cost = Decimal::ZERO;

    // Costo total sobre todos los registros que pasan el filtro,
    // independiente del join con vehículos
    for record in refuels {
        if !filter.matches_plate(&record.license_plate) || !filter.contains_date(record.refuel_date)
        {
            continue;
        }
        if !record.is_valid() {
            skipped_records += 1;
            log::warn!(
                "⛽ Registro de abastecimiento inválido descartado: {} ({} L a {})",
                record.license_plate,
                record.liters,
                record.price_per_liter
            );
            continue;
        }
        total_fuel_cost += record.total_cost;
    }

    // Consumo promedio por vehículo, preservando el orden de entrada:
    // el ranking desempata por primera aparición
    let mut per_vehicle_economy = Vec::new();
    for vehicle in vehicles
        .iter()
        .filter(|v| filter.matches_plate(&v.license_plate))
    {
        let mut records: Vec<&RefuelRecord> = refuels
            .iter()
            .filter(|r| r.license_plate == vehicle.license_plate)
            .filter(|r| filter.contains_date(r.refuel_date))
            .filter(|r| r.is_valid())
            .collect();
        // sort estable: registros con el mismo timestamp conservan su orden
        records.sort_by_key(|r| r.timestamp_key());

        let series = economy_series(&records);
        per_vehicle_economy.push(VehicleEconomy {
            license_plate: vehicle.license_plate.clone(),
            display_name: vehicle.display_name(),
            average_economy: average_economy(&series),
        });
    }

    let defined: Vec<f64> = per_vehicle_economy
        .iter()
        .filter_map(|v| v.average_economy)
        .collect();

    Ok(FleetMetrics {
        total_vehicles: per_vehicle_economy.len(),
        total_fuel_cost,
        fleet_average_economy: mean(&defined),
        per_vehicle_economy,
        skipped_records,
    })
}

/// Consumo por registro de una secuencia cronológica de abastecimientos
/// de un mismo vehículo.
///
/// El consumo del registro i es la distancia recorrida desde la última
/// referencia de tanque lleno dividida por los litros despachados desde
/// entonces (incluyendo el registro i). Sin referencia previa, sin avance
/// de odómetro o sin litros acumulados el consumo queda indefinido.
pub fn economy_series(records: &[&RefuelRecord]) -> Vec<Option<f64>> {
    let mut reference_km: Option<i64> = None;
    let mut liters_since = Decimal::ZERO;
    let mut series = Vec::with_capacity(records.len());

    for record in records {
        let economy = match reference_km {
            Some(ref_km) => {
                liters_since += record.liters;
                let distance = record.odometer_km - ref_km;
                let liters = liters_since.to_f64().unwrap_or(0.0);
                if distance > 0 && liters > 0.0 {
                    Some(distance as f64 / liters)
                } else {
                    None
                }
            }
            None => None,
        };
        series.push(economy);

        // Un tanque lleno pasa a ser la nueva referencia
        if record.full_tank {
            reference_km = Some(record.odometer_km);
            liters_since = Decimal::ZERO;
        }
    }

    series
}

/// Promedio de los consumos definidos de la serie; None si no hay ninguno
pub fn average_economy(series: &[Option<f64>]) -> Option<f64> {
    let defined: Vec<f64> = series.iter().flatten().copied().collect();
    mean(&defined)
}

/// Promedio de las últimas `window` lecturas (o de todas si hay menos).
/// Los dashboards muestran el promedio de las últimas 10 lecturas de
/// consumo; el clasificador de alertas lo reutiliza para su línea base
/// de abastecimientos recientes.
pub fn moving_average(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 {
        return None;
    }
    let start = values.len().saturating_sub(window);
    mean(&values[start..])
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Ranking de consumo: el vehículo más económico y el que más consume.
///
/// Recorrido de primera coincidencia con comparación estricta: en empates
/// gana el vehículo que aparece primero en el orden de entrada. Con lista
/// vacía o sin consumos definidos ambos extremos quedan en None (estado
/// "sin datos", no un error).
pub fn rank_economy(per_vehicle: &[VehicleEconomy]) -> EconomyRanking {
    let mut best: Option<(&VehicleEconomy, f64)> = None;
    let mut worst: Option<(&VehicleEconomy, f64)> = None;

    for entry in per_vehicle {
        let Some(economy) = entry.average_economy else {
            continue;
        };
        match best {
            Some((_, current)) if economy <= current => {}
            _ => best = Some((entry, economy)),
        }
        match worst {
            Some((_, current)) if economy >= current => {}
            _ => worst = Some((entry, economy)),
        }
    }

    let ranked = |pair: Option<(&VehicleEconomy, f64)>| {
        pair.map(|(entry, economy)| RankedVehicle {
            license_plate: entry.license_plate.clone(),
            display_name: entry.display_name.clone(),
            economy,
        })
    };

    EconomyRanking {
        most_economical: ranked(best),
        least_economical: ranked(worst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, Utc};
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            brand: Some("Fiat".to_string()),
            model: Some("Strada".to_string()),
            year: Some(2021),
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

    fn refuel(
        plate: &str,
        day: &str,
        odometer_km: i64,
        liters: i64,
        price_cents: i64,
        full_tank: bool,
    ) -> RefuelRecord {
        let liters = Decimal::from(liters);
        let price_per_liter = Decimal::new(price_cents, 2);
        RefuelRecord {
            id: Uuid::new_v4(),
            fleet_id: Uuid::new_v4(),
            license_plate: plate.to_string(),
            refuel_date: date(day),
            refuel_time: time("08:00:00"),
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

    #[test]
    fn test_economy_series_needs_full_tank_reference() {
        let records = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, false),
            refuel("ABC-1234", "2025-07-05", 10_300, 30, 599, true),
            refuel("ABC-1234", "2025-07-10", 10_690, 30, 599, true),
        ];
        let refs: Vec<&RefuelRecord> = records.iter().collect();
        let series = economy_series(&refs);

        // Los dos primeros no tienen referencia previa de tanque lleno
        assert_eq!(series[0], None);
        assert_eq!(series[1], None);
        // 390 km con 30 L desde la referencia
        assert_eq!(series[2], Some(13.0));
    }

    #[test]
    fn test_economy_series_accumulates_partial_refuels() {
        let records = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 40, 599, true),
            refuel("ABC-1234", "2025-07-05", 10_260, 10, 599, false),
            refuel("ABC-1234", "2025-07-10", 10_520, 30, 599, true),
        ];
        let refs: Vec<&RefuelRecord> = records.iter().collect();
        let series = economy_series(&refs);

        assert_eq!(series[0], None);
        // 260 km / 10 L parciales
        assert_eq!(series[1], Some(26.0));
        // 520 km / 40 L acumulados desde la referencia
        assert_eq!(series[2], Some(13.0));
    }

    #[test]
    fn test_economy_series_odometer_regression_is_undefined() {
        let records = vec![
            refuel("ABC-1234", "2025-07-01", 10_000, 30, 599, true),
            refuel("ABC-1234", "2025-07-05", 9_900, 30, 599, false),
        ];
        let refs: Vec<&RefuelRecord> = records.iter().collect();
        let series = economy_series(&refs);
        assert_eq!(series[1], None);
    }

    #[test]
    fn test_average_economy_skips_undefined_readings() {
        // Una lectura sin referencia de tanque lleno no divide el promedio
        let series = vec![Some(13.1), None, Some(12.0)];
        let avg = average_economy(&series).unwrap();
        assert!((avg - 12.55).abs() < 1e-9);
    }

    #[test]
    fn test_moving_average_uses_last_window() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(moving_average(&values, 2), Some(3.5));
        assert_eq!(moving_average(&values, 10), Some(2.5));
        assert_eq!(moving_average(&[], 3), None);
        assert_eq!(moving_average(&values, 0), None);
    }

    #[test]
    fn test_total_vehicles_respects_plate_filter_only() {
        let vehicles = vec![vehicle("AAA-0001"), vehicle("BBB-0002"), vehicle("CCC-0003")];
        let refuels: Vec<RefuelRecord> = Vec::new();

        let all = compute_fleet_metrics(&vehicles, &refuels, &FleetFilter::default()).unwrap();
        assert_eq!(all.total_vehicles, 3);

        let filter = FleetFilter::new(
            Some(date("2025-07-01")),
            Some(date("2025-07-31")),
            vec!["AAA-0001".to_string(), "CCC-0003".to_string()],
        );
        let filtered = compute_fleet_metrics(&vehicles, &refuels, &filter).unwrap();
        // El rango de fechas no afecta el conteo de vehículos
        assert_eq!(filtered.total_vehicles, 2);
    }

    #[test]
    fn test_vehicle_without_refuels_has_undefined_economy() {
        let vehicles = vec![vehicle("AAA-0001")];
        let metrics = compute_fleet_metrics(&vehicles, &[], &FleetFilter::default()).unwrap();

        assert_eq!(metrics.total_vehicles, 1);
        assert_eq!(metrics.per_vehicle_economy[0].average_economy, None);
        // Indefinido, no cero ni NaN
        assert_eq!(metrics.fleet_average_economy, None);
    }

    #[test]
    fn test_invalid_records_are_excluded_and_counted() {
        let vehicles = vec![vehicle("AAA-0001")];
        let mut bad = refuel("AAA-0001", "2025-07-03", 10_100, 30, 599, true);
        bad.liters = Decimal::ZERO;
        let refuels = vec![
            refuel("AAA-0001", "2025-07-01", 10_000, 30, 599, true),
            bad,
            refuel("AAA-0001", "2025-07-05", 10_390, 30, 599, true),
        ];

        let metrics = compute_fleet_metrics(&vehicles, &refuels, &FleetFilter::default()).unwrap();
        assert_eq!(metrics.skipped_records, 1);
        // 390 km / 30 L: el registro inválido no participa en el consumo
        assert_eq!(metrics.per_vehicle_economy[0].average_economy, Some(13.0));

        // Quitar el registro inválido de la entrada no cambia el resultado
        let clean = vec![
            refuel("AAA-0001", "2025-07-01", 10_000, 30, 599, true),
            refuel("AAA-0001", "2025-07-05", 10_390, 30, 599, true),
        ];
        let clean_metrics =
            compute_fleet_metrics(&vehicles, &clean, &FleetFilter::default()).unwrap();
        assert_eq!(clean_metrics.total_fuel_cost, metrics.total_fuel_cost);
        assert_eq!(
            clean_metrics.per_vehicle_economy[0].average_economy,
            metrics.per_vehicle_economy[0].average_economy
        );
    }

    #[test]
    fn test_total_fuel_cost_respects_date_range_inclusive() {
        let vehicles = vec![vehicle("AAA-0001")];
        let refuels = vec![
            refuel("AAA-0001", "2025-06-30", 9_700, 10, 500, true),
            refuel("AAA-0001", "2025-07-01", 10_000, 10, 500, true),
            refuel("AAA-0001", "2025-07-31", 10_400, 10, 500, true),
            refuel("AAA-0001", "2025-08-01", 10_700, 10, 500, true),
        ];
        let filter = FleetFilter::new(Some(date("2025-07-01")), Some(date("2025-07-31")), vec![]);

        let metrics = compute_fleet_metrics(&vehicles, &refuels, &filter).unwrap();
        // 10 L × 5.00 en cada extremo inclusivo del rango
        assert_eq!(metrics.total_fuel_cost, Decimal::new(10_000, 2));
    }

    #[test]
    fn test_inverted_range_aborts_without_partial_metrics() {
        let vehicles = vec![vehicle("AAA-0001")];
        let refuels = vec![refuel("AAA-0001", "2025-07-01", 10_000, 30, 599, true)];
        let filter = FleetFilter::new(Some(date("2025-08-01")), Some(date("2025-07-01")), vec![]);

        let result = compute_fleet_metrics(&vehicles, &refuels, &filter);
        assert!(matches!(result, Err(AppError::InvalidFilterRange { .. })));
    }

    #[test]
    fn test_fleet_average_excludes_vehicles_without_economy() {
        let vehicles = vec![vehicle("AAA-0001"), vehicle("BBB-0002")];
        // Solo AAA-0001 tiene consumo definido
        let refuels = vec![
            refuel("AAA-0001", "2025-07-01", 10_000, 30, 599, true),
            refuel("AAA-0001", "2025-07-05", 10_390, 30, 599, true),
            refuel("BBB-0002", "2025-07-02", 20_000, 30, 599, false),
        ];

        let metrics = compute_fleet_metrics(&vehicles, &refuels, &FleetFilter::default()).unwrap();
        // Promedio de un solo vehículo, no dividido entre dos
        assert_eq!(metrics.fleet_average_economy, Some(13.0));
    }

    #[test]
    fn test_rank_economy_first_wins_on_tie() {
        let per_vehicle = vec![
            VehicleEconomy {
                license_plate: "AAA-0001".to_string(),
                display_name: "A".to_string(),
                average_economy: Some(13.1),
            },
            VehicleEconomy {
                license_plate: "BBB-0002".to_string(),
                display_name: "B".to_string(),
                average_economy: Some(13.1),
            },
        ];
        let ranking = rank_economy(&per_vehicle);

        assert_eq!(
            ranking.most_economical.as_ref().unwrap().license_plate,
            "AAA-0001"
        );
        assert_eq!(
            ranking.least_economical.as_ref().unwrap().license_plate,
            "AAA-0001"
        );
    }

    #[test]
    fn test_rank_economy_extremes() {
        let per_vehicle = vec![
            VehicleEconomy {
                license_plate: "AAA-0001".to_string(),
                display_name: "A".to_string(),
                average_economy: Some(11.4),
            },
            VehicleEconomy {
                license_plate: "BBB-0002".to_string(),
                display_name: "B".to_string(),
                average_economy: None,
            },
            VehicleEconomy {
                license_plate: "CCC-0003".to_string(),
                display_name: "C".to_string(),
                average_economy: Some(8.2),
            },
        ];
        let ranking = rank_economy(&per_vehicle);

        assert_eq!(
            ranking.most_economical.as_ref().unwrap().license_plate,
            "AAA-0001"
        );
        assert_eq!(
            ranking.least_economical.as_ref().unwrap().license_plate,
            "CCC-0003"
        );
    }

    #[test]
    fn test_rank_economy_empty_is_no_data_not_error() {
        let ranking = rank_economy(&[]);
        assert!(ranking.most_economical.is_none());
        assert!(ranking.least_economical.is_none());
    }
}
