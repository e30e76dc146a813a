//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URL del backend de
//! inspecciones, ventana de actividad reciente y tiempos de la interfaz.

use std::env;
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_RECENT_ACTIVITY_LIMIT: usize = 5;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    /// `None` = sin timeout; una llamada colgada nunca reanuda su handler
    pub request_timeout: Option<Duration>,
    pub recent_activity_limit: usize,
    pub success_notification: Duration,
    pub error_notification: Duration,
    pub dashboard_redirect_delay: Duration,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            recent_activity_limit: DEFAULT_RECENT_ACTIVITY_LIMIT,
            success_notification: Duration::from_millis(3000),
            error_notification: Duration::from_millis(5000),
            dashboard_redirect_delay: Duration::from_millis(1500),
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una fuente arbitraria de claves
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = read("INSPECTION_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = match read("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECS", &raw)?)),
            None => None,
        };

        let recent_activity_limit = match read("RECENT_ACTIVITY_LIMIT") {
            Some(raw) => parse_number("RECENT_ACTIVITY_LIMIT", &raw)? as usize,
            None => defaults.recent_activity_limit,
        };

        let millis = |key: &str, fallback: Duration| -> AppResult<Duration> {
            match read(key) {
                Some(raw) => Ok(Duration::from_millis(parse_number(key, &raw)?)),
                None => Ok(fallback),
            }
        };

        let log_level = match read("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<tracing::Level>()
                .map_err(|_| config_error("LOG_LEVEL", &raw))?,
            None => defaults.log_level,
        };

        Ok(Self {
            api_base_url,
            request_timeout,
            recent_activity_limit,
            success_notification: millis("SUCCESS_NOTIFICATION_MS", defaults.success_notification)?,
            error_notification: millis("ERROR_NOTIFICATION_MS", defaults.error_notification)?,
            dashboard_redirect_delay: millis("DASHBOARD_REDIRECT_MS", defaults.dashboard_redirect_delay)?,
            log_level,
        })
    }

    /// Construir la URL completa de un endpoint del backend
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_number(key: &str, raw: &str) -> AppResult<u64> {
    raw.parse::<u64>().map_err(|_| config_error(key, raw))
}
