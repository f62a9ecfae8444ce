use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{
    ApiResponse, AuthUserResponse, LoginRequest, LoginResponse, RegisterFleetRequest,
};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
        .route("/register", post(register))
        .route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterFleetRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.register(request).await?;
    Ok(Json(response))
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.login(request).await?;
    Ok(Json(response))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<AuthUserResponse>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.me(user.user_id, user.fleet_id).await?;
    Ok(Json(response))
}
