//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validar y convertir string a tiempo
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").map_err(|_| {
        let mut error = ValidationError::new("time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM:SS".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + serde::Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    // Formato básico: ABC-1234 o Mercosur ABC1D23
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        let valid_date = "2025-01-15";
        assert!(validate_date(valid_date).is_ok());

        let invalid_date = "2025/01/15";
        assert!(validate_date(invalid_date).is_err());
    }

    #[test]
    fn test_validate_time() {
        assert!(validate_time("08:30:00").is_ok());
        assert!(validate_time("8h30").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("abc").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC-1234").is_ok());
        assert!(validate_license_plate("A").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }
}
