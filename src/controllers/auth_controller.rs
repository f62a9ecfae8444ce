use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::{
    ApiResponse, AuthUserResponse, LoginRequest, LoginResponse, RegisterFleetRequest,
};
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    fleets: FleetRepository,
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            fleets: FleetRepository::new(pool.clone()),
            users: UserRepository::new(pool),
            jwt: JwtConfig::from(config),
        }
    }

    /// Registrar una flota nueva con su usuario administrador
    pub async fn register(
        &self,
        request: RegisterFleetRequest,
    ) -> Result<ApiResponse<LoginResponse>, AppError> {
        request.validate()?;

        if self.users.email_exists(&request.admin_email).await? {
            return Err(conflict_error("User", "email", &request.admin_email));
        }

        let fleet = self.fleets.create(request.fleet_name).await?;

        let password_hash = bcrypt::hash(&request.admin_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        let user = self
            .users
            .create(
                fleet.id,
                request.admin_full_name,
                request.admin_email,
                password_hash,
                "admin".to_string(),
            )
            .await?;

        let token = generate_token(user.id, user.fleet_id, &self.jwt)?;
        log::info!("🏁 Flota registrada: {} ({})", fleet.name, fleet.id);

        Ok(ApiResponse::success_with_message(
            LoginResponse {
                token,
                user: user.into(),
            },
            "Flota registrada exitosamente".to_string(),
        ))
    }

    /// Login con email y contraseña
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;
        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, user.fleet_id, &self.jwt)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Perfil del usuario autenticado
    pub async fn me(&self, user_id: Uuid, fleet_id: Uuid) -> Result<AuthUserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id, fleet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(user.into())
    }
}
