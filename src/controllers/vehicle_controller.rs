use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    AssignDriverRequest, CreateVehicleRequest, UpdateKmRequest, UpdateVehicleRequest,
    VehicleResponse,
};
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{bad_request_error, conflict_error, AppError};
use crate::utils::validation::validate_license_plate;

pub struct VehicleController {
    repository: VehicleRepository,
    users: UserRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        fleet_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if validate_license_plate(&request.license_plate).is_err() {
            return Err(bad_request_error("Formato de matrícula inválido"));
        }

        // Verificar que la matrícula no exista para esta flota
        if self
            .repository
            .license_plate_exists(&request.license_plate, fleet_id)
            .await?
        {
            return Err(conflict_error(
                "Vehicle",
                "license_plate",
                &request.license_plate,
            ));
        }

        let current_km = request.current_km.unwrap_or(0);
        if current_km < 0 {
            return Err(bad_request_error("El odómetro no puede ser negativo"));
        }

        // El conductor asignado debe existir en la flota
        if let Some(driver_id) = request.driver_id {
            self.users
                .find_by_id(driver_id, fleet_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;
        }

        let vehicle = self
            .repository
            .create(
                fleet_id,
                request.license_plate,
                request.brand,
                request.model,
                request.year,
                request.vehicle_type.unwrap_or_else(|| "car".to_string()),
                current_km,
                request.fuel_capacity,
                request.driver_id,
                request.maintenance_interval_km,
                request.km_next_service,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, fleet_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self.owned_by_fleet(id, fleet_id).await?;
        Ok(vehicle.into())
    }

    pub async fn list_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_fleet(fleet_id).await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(
                id,
                fleet_id,
                request.brand,
                request.model,
                request.year,
                request.vehicle_type,
                request.vehicle_status,
                request.fuel_capacity,
                request.maintenance_interval_km,
                request.km_next_service,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    /// Actualizar el odómetro. La lectura nunca puede retroceder.
    pub async fn update_km(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        request: UpdateKmRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let vehicle = self.owned_by_fleet(id, fleet_id).await?;

        if request.current_km < vehicle.current_km {
            return Err(bad_request_error(
                "El odómetro no puede retroceder respecto a la lectura actual",
            ));
        }

        let updated = self.repository.update_km(id, request.current_km).await?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Odómetro actualizado exitosamente".to_string(),
        ))
    }

    pub async fn assign_driver(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        request: AssignDriverRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        self.owned_by_fleet(id, fleet_id).await?;

        if let Some(driver_id) = request.driver_id {
            self.users
                .find_by_id(driver_id, fleet_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;
        }

        let vehicle = self.repository.update_driver(id, request.driver_id).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Conductor asignado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, fleet_id).await?;
        Ok(())
    }

    async fn owned_by_fleet(
        &self,
        id: Uuid,
        fleet_id: Uuid,
    ) -> Result<crate::models::vehicle::Vehicle, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "No tienes permiso para acceder a este vehículo".to_string(),
            ));
        }

        Ok(vehicle)
    }
}
