//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! y verificación de usuarios autenticados.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    repositories::user_repository::UserRepository,
    state::AppState,
    utils::errors::AppError,
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub fleet_id: Uuid,
    pub role: String,
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extraer token del header Authorization
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;

    // Decodificar y validar JWT
    let claims = verify_token(token, &JwtConfig::from(&state.config))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;
    let fleet_id = Uuid::parse_str(&claims.fleet_id)
        .map_err(|_| AppError::Unauthorized("ID de flota inválido".to_string()))?;

    // Verificar que el usuario existe en la base de datos
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(user_id, fleet_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        fleet_id: user.fleet_id,
        role: user.role,
    });

    Ok(next.run(request).await)
}
