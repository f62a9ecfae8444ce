use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{ApiResponse, AuthUserResponse};
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{bad_request_error, conflict_error, AppError};

const VALID_ROLES: &[&str] = &["admin", "driver"];

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        fleet_id: Uuid,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<AuthUserResponse>, AppError> {
        request.validate()?;

        let role = request.role.unwrap_or_else(|| "driver".to_string());
        if !VALID_ROLES.contains(&role.as_str()) {
            return Err(bad_request_error("El rol debe ser 'admin' o 'driver'"));
        }

        if self.repository.email_exists(&request.email).await? {
            return Err(conflict_error("User", "email", &request.email));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .repository
            .create(fleet_id, request.full_name, request.email, password_hash, role)
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        id: Uuid,
        fleet_id: Uuid,
    ) -> Result<AuthUserResponse, AppError> {
        let user = self
            .repository
            .find_by_id(id, fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }

    pub async fn list_by_fleet(&self, fleet_id: Uuid) -> Result<Vec<AuthUserResponse>, AppError> {
        let users = self.repository.find_by_fleet(fleet_id).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        fleet_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<AuthUserResponse>, AppError> {
        request.validate()?;

        if let Some(role) = &request.role {
            if !VALID_ROLES.contains(&role.as_str()) {
                return Err(bad_request_error("El rol debe ser 'admin' o 'driver'"));
            }
        }

        if let Some(email) = &request.email {
            // El email solo entra en conflicto si pertenece a otro usuario
            if let Some(existing) = self.repository.find_by_email(email).await? {
                if existing.id != id {
                    return Err(conflict_error("User", "email", email));
                }
            }
        }

        let password_hash = match request.password {
            Some(password) => Some(
                bcrypt::hash(&password, bcrypt::DEFAULT_COST)
                    .map_err(|e| AppError::Hash(e.to_string()))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(
                id,
                fleet_id,
                request.full_name,
                request.email,
                password_hash,
                request.role,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Usuario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, fleet_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, fleet_id).await?;
        Ok(())
    }
}
