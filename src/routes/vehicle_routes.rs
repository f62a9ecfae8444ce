use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    AssignDriverRequest, CreateVehicleRequest, UpdateKmRequest, UpdateVehicleRequest,
    VehicleResponse,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/km", put(update_km))
        .route("/:id/driver", put(assign_driver))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id, user.fleet_id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list_by_fleet(user.fleet_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn update_km(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateKmRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update_km(id, user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn assign_driver(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignDriverRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.assign_driver(id, user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id, user.fleet_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehículo eliminado exitosamente"
    })))
}
