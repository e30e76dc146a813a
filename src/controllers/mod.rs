//! Controladores
//!
//! Cada controlador traduce una interacción del usuario en mutaciones del
//! `AppState` y llamadas al backend, y devuelve un `ActionOutcome` con las
//! notificaciones y la navegación que la vista debe aplicar.

pub mod dashboard_controller;
pub mod inspection_controller;
pub mod vehicle_controller;

use serde::Serialize;
use std::time::Duration;

use crate::dto::api_dto::ApiResponse;
use crate::services::notification_service::Notification;
use crate::state::Tab;

pub use dashboard_controller::DashboardController;
pub use inspection_controller::InspectionController;
pub use vehicle_controller::{Confirm, VehicleController};

/// Cambio de pestaña diferido (affordance de UX)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNavigation {
    pub tab: Tab,
    pub delay_ms: u64,
}

impl ScheduledNavigation {
    pub fn after(tab: Tab, delay: Duration) -> Self {
        Self {
            tab,
            delay_ms: delay.as_millis() as u64,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Resultado de una acción completada (o cancelada por el usuario)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub notifications: Vec<Notification>,
    pub navigation: Option<ScheduledNavigation>,
    pub response: Option<ApiResponse>,
    pub cancelled: bool,
}

impl ActionOutcome {
    pub fn completed(response: ApiResponse, notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            response: Some(response),
            ..Default::default()
        }
    }

    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            ..Default::default()
        }
    }
}
