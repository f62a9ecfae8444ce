use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceRecord;
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        fleet_id: Uuid,
        license_plate: String,
        km_last_service: i64,
        km_next_service: i64,
        oil_change: bool,
        oil_filter: bool,
        fuel_filter: bool,
        air_filter: bool,
        lubrication: bool,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError> {
        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            INSERT INTO maintenance_records (
                id, fleet_id, license_plate, km_last_service, km_next_service,
                oil_change, oil_filter, fuel_filter, air_filter, lubrication,
                notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(license_plate)
        .bind(km_last_service)
        .bind(km_next_service)
        .bind(oil_change)
        .bind(oil_filter)
        .bind(fuel_filter)
        .bind(air_filter)
        .bind(lubrication)
        .bind(notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRecord>, AppError> {
        let record =
            sqlx::query_as::<_, MaintenanceRecord>("SELECT * FROM maintenance_records WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(record)
    }

    pub async fn find_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE fleet_id = $1 ORDER BY created_at DESC",
        )
        .bind(fleet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn find_by_plate(
        &self,
        fleet_id: Uuid,
        license_plate: &str,
    ) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            SELECT * FROM maintenance_records
            WHERE fleet_id = $1 AND license_plate = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(fleet_id)
        .bind(license_plate)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        km_next_service: Option<i64>,
        oil_change: Option<bool>,
        oil_filter: Option<bool>,
        fuel_filter: Option<bool>,
        air_filter: Option<bool>,
        lubrication: Option<bool>,
        notes: Option<String>,
    ) -> Result<MaintenanceRecord, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        if current.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "El mantenimiento no pertenece a esta flota".to_string(),
            ));
        }

        let record = sqlx::query_as::<_, MaintenanceRecord>(
            r#"
            UPDATE maintenance_records
            SET km_next_service = $2, oil_change = $3, oil_filter = $4,
                fuel_filter = $5, air_filter = $6, lubrication = $7, notes = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(km_next_service.unwrap_or(current.km_next_service))
        .bind(oil_change.unwrap_or(current.oil_change))
        .bind(oil_filter.unwrap_or(current.oil_filter))
        .bind(fuel_filter.unwrap_or(current.fuel_filter))
        .bind(air_filter.unwrap_or(current.air_filter))
        .bind(lubrication.unwrap_or(current.lubrication))
        .bind(notes.or(current.notes))
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mantenimiento no encontrado".to_string()))?;

        if record.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "El mantenimiento no pertenece a esta flota".to_string(),
            ));
        }

        sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
