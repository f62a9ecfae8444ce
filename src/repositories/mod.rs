//! Repositorios de acceso a datos
//!
//! Cada repositorio encapsula las consultas SQLx de una tabla.

pub mod fleet_repository;
pub mod maintenance_repository;
pub mod refuel_repository;
pub mod user_repository;
pub mod vehicle_repository;
