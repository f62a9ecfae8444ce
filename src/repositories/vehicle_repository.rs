use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        fleet_id: Uuid,
        license_plate: String,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        vehicle_type: String,
        current_km: i64,
        fuel_capacity: Option<Decimal>,
        driver_id: Option<Uuid>,
        maintenance_interval_km: Option<i64>,
        km_next_service: Option<i64>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, fleet_id, license_plate, brand, model, year, vehicle_type,
                vehicle_status, current_km, fuel_capacity, driver_id,
                maintenance_interval_km, km_next_service, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(license_plate)
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(vehicle_type)
        .bind(current_km)
        .bind(fuel_capacity)
        .bind(driver_id)
        .bind(maintenance_interval_km)
        .bind(km_next_service)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_plate(
        &self,
        fleet_id: Uuid,
        license_plate: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE fleet_id = $1 AND license_plate = $2",
        )
        .bind(fleet_id)
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Listado en orden estable de registro; el ranking de consumo
    /// desempata por este orden
    pub async fn find_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE fleet_id = $1 ORDER BY created_at, license_plate",
        )
        .bind(fleet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        fleet_id: Uuid,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND fleet_id = $2)",
        )
        .bind(license_plate)
        .bind(fleet_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
        vehicle_type: Option<String>,
        vehicle_status: Option<String>,
        fuel_capacity: Option<Decimal>,
        maintenance_interval_km: Option<i64>,
        km_next_service: Option<i64>,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // Verificar que pertenece a la flota
        if current.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta flota".to_string(),
            ));
        }

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, year = $4, vehicle_type = $5,
                vehicle_status = $6, fuel_capacity = $7,
                maintenance_interval_km = $8, km_next_service = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(brand.or(current.brand))
        .bind(model.or(current.model))
        .bind(year.or(current.year))
        .bind(vehicle_type.unwrap_or(current.vehicle_type))
        .bind(vehicle_status.unwrap_or(current.vehicle_status))
        .bind(fuel_capacity.or(current.fuel_capacity))
        .bind(maintenance_interval_km.or(current.maintenance_interval_km))
        .bind(km_next_service.or(current.km_next_service))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update_km(&self, id: Uuid, current_km: i64) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET current_km = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(current_km)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update_driver(
        &self,
        id: Uuid,
        driver_id: Option<Uuid>,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET driver_id = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(driver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update_next_service(
        &self,
        id: Uuid,
        maintenance_interval_km: Option<i64>,
        km_next_service: i64,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET maintenance_interval_km = COALESCE($2, maintenance_interval_km),
                km_next_service = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(maintenance_interval_km)
        .bind(km_next_service)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        // Verificar que pertenece a la flota
        let vehicle = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece a esta flota".to_string(),
            ));
        }

        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
