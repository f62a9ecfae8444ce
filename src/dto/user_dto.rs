//! DTOs de User (gestores y conductores)

use serde::Deserialize;
use validator::Validate;

/// Request para crear un nuevo usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    /// "admin" o "driver"; por defecto "driver"
    pub role: Option<String>,
}

/// Request para actualizar un usuario existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub full_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,

    pub role: Option<String>,
}
