use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::user_controller::UserController;
use crate::dto::auth_dto::{ApiResponse, AuthUserResponse};
use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/", get(list_users))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/:id", delete(delete_user))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<AuthUserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.create(user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuthUserResponse>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.get_by_id(id, user.fleet_id).await?;
    Ok(Json(response))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<AuthUserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.list_by_fleet(user.fleet_id).await?;
    Ok(Json(response))
}

async fn update_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<AuthUserResponse>>, AppError> {
    let controller = UserController::new(state.pool.clone());
    let response = controller.update(id, user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn delete_user(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = UserController::new(state.pool.clone());
    controller.delete(id, user.fleet_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Usuario eliminado exitosamente"
    })))
}
