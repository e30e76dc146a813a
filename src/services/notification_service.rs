//! Notificaciones transitorias
//!
//! Éxitos y errores se muestran como avisos que se auto-descartan. No hay
//! distinción visual entre un rechazo del backend y un fallo de red.

use serde::Serialize;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub dismiss_after_ms: u64,
}

impl Notification {
    pub fn success(message: impl Into<String>, config: &EnvironmentConfig) -> Self {
        Self::build(NotificationKind::Success, message.into(), config.success_notification)
    }

    pub fn error(message: impl Into<String>, config: &EnvironmentConfig) -> Self {
        Self::build(NotificationKind::Error, message.into(), config.error_notification)
    }

    /// Aviso de error para un fallo; `prefix` se antepone salvo en validaciones
    pub fn for_error(prefix: &str, err: &AppError, config: &EnvironmentConfig) -> Self {
        if err.is_validation() || prefix.is_empty() {
            Self::error(err.user_message(), config)
        } else {
            Self::error(format!("{}{}", prefix, err.user_message()), config)
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }

    fn build(kind: NotificationKind, message: String, after: Duration) -> Self {
        Self {
            kind,
            message,
            dismiss_after_ms: after.as_millis() as u64,
        }
    }
}
