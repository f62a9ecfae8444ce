use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::User;
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        fleet_id: Uuid,
        full_name: String,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, fleet_id, full_name, email, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(fleet_id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid, fleet_id: Uuid) -> Result<Option<User>, AppError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND fleet_id = $2")
                .bind(id)
                .bind(fleet_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE fleet_id = $1 ORDER BY created_at",
        )
        .bind(fleet_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        full_name: Option<String>,
        email: Option<String>,
        password_hash: Option<String>,
        role: Option<String>,
    ) -> Result<User, AppError> {
        let current = self
            .find_by_id(id, fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = $2, email = $3, password_hash = $4, role = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name.unwrap_or(current.full_name))
        .bind(email.unwrap_or(current.email))
        .bind(password_hash.unwrap_or(current.password_hash))
        .bind(role.unwrap_or(current.role))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        self.find_by_id(id, fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
