use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::alert_service::AlertThresholds;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_maintenance))
        .route("/", get(list_maintenance))
        .route("/plate/:plate", get(list_maintenance_by_plate))
        .route("/:id", put(update_maintenance))
        .route("/:id", delete(delete_maintenance))
}

fn controller(state: &AppState) -> MaintenanceController {
    MaintenanceController::new(state.pool.clone(), AlertThresholds::from(&state.config))
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let response = controller(&state).create(user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let response = controller(&state).list_by_fleet(user.fleet_id).await?;
    Ok(Json(response))
}

async fn list_maintenance_by_plate(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(plate): Path<String>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let response = controller(&state)
        .list_by_plate(user.fleet_id, &plate)
        .await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let response = controller(&state)
        .update(id, user.fleet_id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id, user.fleet_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Mantenimiento eliminado exitosamente"
    })))
}
