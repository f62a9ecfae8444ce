use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::{AlertsResponse, DashboardQuery, DashboardResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::alert_service::AlertThresholds;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/alerts", get(get_alerts))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let controller =
        DashboardController::new(state.pool.clone(), AlertThresholds::from(&state.config));
    let response = controller.summary(user.fleet_id, query).await?;
    Ok(Json(response))
}

async fn get_alerts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<AlertsResponse>, AppError> {
    let controller =
        DashboardController::new(state.pool.clone(), AlertThresholds::from(&state.config));
    let response = controller.alerts(user.fleet_id).await?;
    Ok(Json(response))
}
