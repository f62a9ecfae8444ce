//! DTOs de autenticación y respuesta genérica de la API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::user::User;

/// Request para registrar una flota con su usuario administrador
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFleetRequest {
    #[validate(length(min = 2, max = 100))]
    pub fleet_name: String,

    #[validate(length(min = 2, max = 100))]
    pub admin_full_name: String,

    #[validate(email)]
    pub admin_email: String,

    #[validate(length(min = 6, max = 100))]
    pub admin_password: String,
}

/// Request de login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

/// Usuario autenticado (sin password)
#[derive(Debug, Serialize)]
pub struct AuthUserResponse {
    pub id: Uuid,
    pub fleet_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AuthUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            fleet_id: user.fleet_id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Response de login/registro con el token de sesión
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: AuthUserResponse,
}

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
