//! Modelo de Alert
//!
//! Las alertas son entidades derivadas: se regeneran en cada invocación
//! a partir del estado actual de vehículos, abastecimientos y mantenimientos.

use serde::{Deserialize, Serialize};

/// Severidad de una alerta operacional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
}

/// Tipo de alerta operacional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowEconomy,
    SuspiciousRefuel,
    MaintenanceDueSoon,
    MaintenanceOverdue,
}

/// Alerta operacional derivada del estado de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub license_plate: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    /// El flag resolved pertenece a la capa de persistencia/API;
    /// el clasificador siempre lo emite en false y nunca lo lee.
    pub resolved: bool,
}

impl Alert {
    pub fn new(
        license_plate: impl Into<String>,
        kind: AlertKind,
        severity: AlertSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            kind,
            severity,
            message: message.into(),
            resolved: false,
        }
    }
}
