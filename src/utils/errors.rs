//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del cliente.
//! Solo existen dos familias de fallo: validación (antes de cualquier
//! llamada de red) y fallo de petición (red, HTTP no-2xx o `success:false`).

use thiserror::Error;

/// Fallos de validación corregibles por el usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Please select a vehicle first!")]
    NoVehicleSelected,

    #[error("Please fill in Inspector Name and ID!")]
    MissingInspectorInfo,

    #[error("Please fill in Supervisor Name and ID!")]
    MissingSupervisorInfo,

    #[error("Please enter door number and plate number")]
    MissingVehicleIdentity,
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationFailure),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationFailure> for AppError {
    fn from(failure: ValidationFailure) -> Self {
        AppError::Validation(failure)
    }
}

impl AppError {
    /// Verdadero si el fallo ocurrió antes de cualquier llamada de red
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Texto que se muestra al usuario en la notificación
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(failure) => failure.to_string(),
            AppError::Request(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, value: &str) -> AppError {
    AppError::Config(format!("{} has an invalid value '{}'", variable, value))
}
