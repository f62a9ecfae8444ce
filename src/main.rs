mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::cors_middleware;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Management - API de gestión de flota");
    info!("=============================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let app_state = AppState::new(pool, EnvironmentConfig::default());

    // Rutas protegidas por JWT
    let protected = Router::new()
        .nest("/api/user", routes::user_routes::create_user_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/refuel", routes::refuel_routes::create_refuel_router())
        .nest(
            "/api/maintenance",
            routes::maintenance_routes::create_maintenance_router(),
        )
        .nest(
            "/api/dashboard",
            routes::dashboard_routes::create_dashboard_router(),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::auth_middleware,
        ));

    let app = Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/auth",
            routes::auth_routes::create_auth_router(app_state.clone()),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(app_state);

    // Puerto del servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Registrar flota");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("👤 Endpoints - User:");
    info!("   POST /api/user - Crear usuario");
    info!("   GET  /api/user - Listar usuarios");
    info!("   GET  /api/user/:id - Obtener usuario");
    info!("   PUT  /api/user/:id - Actualizar usuario");
    info!("   DELETE /api/user/:id - Eliminar usuario");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   PUT  /api/vehicle/:id/km - Actualizar odómetro");
    info!("   PUT  /api/vehicle/:id/driver - Asignar conductor");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("⛽ Endpoints - Refuel:");
    info!("   POST /api/refuel - Registrar abastecimiento");
    info!("   GET  /api/refuel - Listar abastecimientos (filtros: placa, fechas)");
    info!("   DELETE /api/refuel/:id - Eliminar abastecimiento");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/maintenance - Registrar mantenimiento");
    info!("   GET  /api/maintenance - Listar mantenimientos");
    info!("   GET  /api/maintenance/plate/:plate - Mantenimientos por placa");
    info!("   PUT  /api/maintenance/:id - Actualizar mantenimiento");
    info!("   DELETE /api/maintenance/:id - Eliminar mantenimiento");
    info!("📊 Endpoints - Dashboard:");
    info!("   GET  /api/dashboard - Métricas, ranking y alertas de la flota");
    info!("   GET  /api/dashboard/alerts - Solo alertas");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
