//! Controladores de recursos
//!
//! Orquestan repositorios y servicios para cada recurso de la API.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod maintenance_controller;
pub mod refuel_controller;
pub mod user_controller;
pub mod vehicle_controller;
