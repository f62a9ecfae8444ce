use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::models::maintenance::MaintenanceRecord;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_service::{maintenance_status, AlertThresholds};
use crate::utils::errors::{bad_request_error, AppError};

pub struct MaintenanceController {
    repository: MaintenanceRepository,
    vehicles: VehicleRepository,
    thresholds: AlertThresholds,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, thresholds: AlertThresholds) -> Self {
        Self {
            repository: MaintenanceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            thresholds,
        }
    }

    /// Registrar un mantenimiento. El intervalo degenerado se rechaza al
    /// escribir para que nunca llegue al clasificador de alertas.
    pub async fn create(
        &self,
        fleet_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        if request.km_next_service <= request.km_last_service {
            return Err(bad_request_error(
                "Intervalo de mantenimiento inválido: el próximo servicio debe ser mayor al último",
            ));
        }
        if request.km_last_service < 0 {
            return Err(bad_request_error("El odómetro no puede ser negativo"));
        }

        let vehicle = self
            .vehicles
            .find_by_plate(fleet_id, &request.license_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let record = self
            .repository
            .create(
                fleet_id,
                request.license_plate,
                request.km_last_service,
                request.km_next_service,
                request.oil_change,
                request.oil_filter,
                request.fuel_filter,
                request.air_filter,
                request.lubrication,
                request.notes,
            )
            .await?;

        // El próximo servicio programado del vehículo avanza con el registro
        let interval = request.km_next_service - request.km_last_service;
        self.vehicles
            .update_next_service(vehicle.id, Some(interval), request.km_next_service)
            .await?;

        let response = self.with_status(record, Some(vehicle.current_km));

        Ok(ApiResponse::success_with_message(
            response,
            "Mantenimiento registrado exitosamente".to_string(),
        ))
    }

    pub async fn list_by_fleet(
        &self,
        fleet_id: Uuid,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let records = self.repository.find_by_fleet(fleet_id).await?;
        let vehicles = self.vehicles.find_by_fleet(fleet_id).await?;
        let km_by_plate: HashMap<String, i64> = vehicles
            .into_iter()
            .map(|v| (v.license_plate, v.current_km))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| {
                let current_km = km_by_plate.get(&record.license_plate).copied();
                self.with_status(record, current_km)
            })
            .collect())
    }

    pub async fn list_by_plate(
        &self,
        fleet_id: Uuid,
        license_plate: &str,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        let records = self.repository.find_by_plate(fleet_id, license_plate).await?;
        let current_km = self
            .vehicles
            .find_by_plate(fleet_id, license_plate)
            .await?
            .map(|v| v.current_km);

        Ok(records
            .into_iter()
            .map(|record| self.with_status(record, current_km))
            .collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        request.validate()?;

        if let Some(km_next_service) = request.km_next_service {
            let current = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;
            if km_next_service <= current.km_last_service {
                return Err(bad_request_error(
                    "Intervalo de mantenimiento inválido: el próximo servicio debe ser mayor al último",
                ));
            }
        }

        let record = self
            .repository
            .update(
                id,
                fleet_id,
                request.km_next_service,
                request.oil_change,
                request.oil_filter,
                request.fuel_filter,
                request.air_filter,
                request.lubrication,
                request.notes,
            )
            .await?;

        let current_km = self
            .vehicles
            .find_by_plate(fleet_id, &record.license_plate)
            .await?
            .map(|v| v.current_km);
        let response = self.with_status(record, current_km);

        Ok(ApiResponse::success_with_message(
            response,
            "Mantenimiento actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, fleet_id).await?;
        Ok(())
    }

    /// Adjuntar el estado derivado contra el odómetro actual del vehículo
    fn with_status(
        &self,
        record: MaintenanceRecord,
        current_km: Option<i64>,
    ) -> MaintenanceResponse {
        let (status, progress) = match current_km {
            Some(km) => (
                maintenance_status(&record, km, &self.thresholds),
                record.progress_pct(km),
            ),
            None => (None, None),
        };
        MaintenanceResponse::from_record(record, status, progress)
    }
}
