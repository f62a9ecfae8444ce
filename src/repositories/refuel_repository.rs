use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::refuel::RefuelRecord;
use crate::utils::errors::AppError;

pub struct RefuelRepository {
    pool: PgPool,
}

impl RefuelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        fleet_id: Uuid,
        license_plate: String,
        refuel_date: NaiveDate,
        refuel_time: NaiveTime,
        odometer_km: i64,
        liters: Decimal,
        price_per_liter: Decimal,
        total_cost: Decimal,
        fuel_type: String,
        station: Option<String>,
        full_tank: bool,
    ) -> Result<RefuelRecord, AppError> {
        let record = sqlx::query_as::<_, RefuelRecord>(
            r#"
            INSERT INTO refuel_records (
                id, fleet_id, license_plate, refuel_date, refuel_time, odometer_km,
                liters, price_per_liter, total_cost, fuel_type, station, full_tank,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(license_plate)
        .bind(refuel_date)
        .bind(refuel_time)
        .bind(odometer_km)
        .bind(liters)
        .bind(price_per_liter)
        .bind(total_cost)
        .bind(fuel_type)
        .bind(station)
        .bind(full_tank)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RefuelRecord>, AppError> {
        let record = sqlx::query_as::<_, RefuelRecord>("SELECT * FROM refuel_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    /// Listado cronológico; el cálculo de consumo requiere orden
    /// no decreciente de timestamps
    pub async fn find_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<RefuelRecord>, AppError> {
        let records = sqlx::query_as::<_, RefuelRecord>(
            r#"
            SELECT * FROM refuel_records
            WHERE fleet_id = $1
            ORDER BY refuel_date, refuel_time, created_at
            "#,
        )
        .bind(fleet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Abastecimiento no encontrado".to_string()))?;

        if record.fleet_id != fleet_id {
            return Err(AppError::Forbidden(
                "El abastecimiento no pertenece a esta flota".to_string(),
            ));
        }

        sqlx::query("DELETE FROM refuel_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
