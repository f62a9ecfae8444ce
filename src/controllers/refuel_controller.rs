use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::refuel_dto::{CreateRefuelRequest, RefuelFilters, RefuelResponse};
use crate::models::metrics::FleetFilter;
use crate::repositories::refuel_repository::RefuelRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{bad_request_error, AppError};
use crate::utils::validation::validate_date;

pub struct RefuelController {
    repository: RefuelRepository,
    vehicles: VehicleRepository,
}

impl RefuelController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RefuelRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Registrar un abastecimiento. El costo total se calcula en el servidor
    /// y el odómetro del vehículo avanza si la lectura es mayor a la actual.
    pub async fn create(
        &self,
        fleet_id: Uuid,
        request: CreateRefuelRequest,
    ) -> Result<ApiResponse<RefuelResponse>, AppError> {
        request.validate()?;

        if request.liters <= Decimal::ZERO {
            return Err(bad_request_error("Los litros deben ser positivos"));
        }
        if request.price_per_liter <= Decimal::ZERO {
            return Err(bad_request_error("El precio por litro debe ser positivo"));
        }
        if request.odometer_km < 0 {
            return Err(bad_request_error("El odómetro no puede ser negativo"));
        }

        let vehicle = self
            .vehicles
            .find_by_plate(fleet_id, &request.license_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let total_cost = (request.liters * request.price_per_liter).round_dp(2);

        let record = self
            .repository
            .create(
                fleet_id,
                request.license_plate,
                request.refuel_date,
                request.refuel_time,
                request.odometer_km,
                request.liters,
                request.price_per_liter,
                total_cost,
                request.fuel_type,
                request.station,
                request.full_tank,
            )
            .await?;

        if record.odometer_km > vehicle.current_km {
            self.vehicles
                .update_km(vehicle.id, record.odometer_km)
                .await?;
        }

        Ok(ApiResponse::success_with_message(
            record.into(),
            "Abastecimiento registrado exitosamente".to_string(),
        ))
    }

    /// Listar abastecimientos con filtro opcional de placa y rango de fechas
    pub async fn list(
        &self,
        fleet_id: Uuid,
        filters: RefuelFilters,
    ) -> Result<Vec<RefuelResponse>, AppError> {
        let filter = build_filter(&filters)?;
        filter.validate()?;

        let records = self.repository.find_by_fleet(fleet_id).await?;

        Ok(records
            .into_iter()
            .filter(|r| filter.matches_plate(&r.license_plate))
            .filter(|r| filter.contains_date(r.refuel_date))
            .map(Into::into)
            .collect())
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, fleet_id).await?;
        Ok(())
    }
}

fn build_filter(filters: &RefuelFilters) -> Result<FleetFilter, AppError> {
    let start_date = match &filters.start_date {
        Some(value) => Some(
            validate_date(value)
                .map_err(|_| bad_request_error("Formato de fecha inválido (YYYY-MM-DD)"))?,
        ),
        None => None,
    };
    let end_date = match &filters.end_date {
        Some(value) => Some(
            validate_date(value)
                .map_err(|_| bad_request_error("Formato de fecha inválido (YYYY-MM-DD)"))?,
        ),
        None => None,
    };
    let plates = filters
        .license_plate
        .iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    Ok(FleetFilter::new(start_date, end_date, plates))
}
