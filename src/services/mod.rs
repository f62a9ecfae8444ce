//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: la agregación
//! de métricas de flota, el ranking de consumo y la clasificación de alertas.
//! Los servicios son funciones puras sobre snapshots ya cargados; no tocan
//! la base de datos ni cachean resultados entre invocaciones.

pub mod alert_service;
pub mod fleet_metrics_service;
