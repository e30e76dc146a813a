//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de fechas de inspección.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
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

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Formatos con hora aceptados, además de RFC 3339
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Interpretar la fecha de una inspección con su hora.
///
/// Acepta `YYYY-MM-DD` (medianoche), RFC 3339, `YYYY-MM-DDTHH:MM:SS` y
/// `YYYY-MM-DD HH:MM:SS`. Devuelve `None` si nada encaja; esas inspecciones
/// se ordenan al final.
pub fn parse_inspection_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = validate_date(value) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
