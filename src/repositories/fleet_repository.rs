use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::fleet::Fleet;
use crate::utils::errors::AppError;

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String) -> Result<Fleet, AppError> {
        let fleet = sqlx::query_as::<_, Fleet>(
            "INSERT INTO fleets (id, name, created_at) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(fleet)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Fleet>, AppError> {
        let fleet = sqlx::query_as::<_, Fleet>("SELECT * FROM fleets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(fleet)
    }
}
