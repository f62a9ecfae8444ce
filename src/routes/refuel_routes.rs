use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::refuel_controller::RefuelController;
use crate::dto::auth_dto::ApiResponse;
use crate::dto::refuel_dto::{CreateRefuelRequest, RefuelFilters, RefuelResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_refuel_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_refuel))
        .route("/", get(list_refuels))
        .route("/:id", delete(delete_refuel))
}

async fn create_refuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRefuelRequest>,
) -> Result<Json<ApiResponse<RefuelResponse>>, AppError> {
    let controller = RefuelController::new(state.pool.clone());
    let response = controller.create(user.fleet_id, request).await?;
    Ok(Json(response))
}

async fn list_refuels(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<RefuelFilters>,
) -> Result<Json<Vec<RefuelResponse>>, AppError> {
    let controller = RefuelController::new(state.pool.clone());
    let response = controller.list(user.fleet_id, filters).await?;
    Ok(Json(response))
}

async fn delete_refuel(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RefuelController::new(state.pool.clone());
    controller.delete(id, user.fleet_id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Abastecimiento eliminado exitosamente"
    })))
}
