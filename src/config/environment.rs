//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    // Umbrales de alertas de flota (opcionales, con defaults de producto)
    pub alert_low_economy_floor: Option<f64>,
    pub alert_low_economy_deviation: Option<f64>,
    pub alert_suspicious_cost_factor: Option<f64>,
    pub alert_recent_refuel_window: Option<usize>,
    pub alert_due_soon_lower_pct: Option<f64>,
    pub alert_due_soon_upper_pct: Option<f64>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            port: env::var("PORT")
                .expect("PORT must be set")
                .parse()
                .expect("PORT must be a valid number"),
            host: env::var("HOST").expect("HOST must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .expect("JWT_EXPIRATION must be set")
                .parse()
                .expect("JWT_EXPIRATION must be a valid number"),
            cors_origins: env::var("CORS_ORIGINS")
                .expect("CORS_ORIGINS must be set")
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            alert_low_economy_floor: parse_env("ALERT_LOW_ECONOMY_FLOOR"),
            alert_low_economy_deviation: parse_env("ALERT_LOW_ECONOMY_DEVIATION"),
            alert_suspicious_cost_factor: parse_env("ALERT_SUSPICIOUS_COST_FACTOR"),
            alert_recent_refuel_window: parse_env("ALERT_RECENT_REFUEL_WINDOW"),
            alert_due_soon_lower_pct: parse_env("ALERT_DUE_SOON_LOWER_PCT"),
            alert_due_soon_upper_pct: parse_env("ALERT_DUE_SOON_UPPER_PCT"),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
