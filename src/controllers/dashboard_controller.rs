//! Controlador del dashboard
//!
//! Arranque de la aplicación, selección de vehículo, filtro por división y
//! cambio de pestaña.

use std::sync::Arc;
use tracing::{error, info};

use crate::client::InspectionApi;
use crate::config::environment::EnvironmentConfig;
use crate::services::notification_service::Notification;
use crate::services::render_service::{dashboard_view, DashboardView};
use crate::state::{AppState, Tab};
use crate::utils::errors::{AppError, AppResult};

use super::vehicle_controller::VEHICLES_LOAD_FAILED;

/// Alternar la división seleccionada: misma división = limpiar filtro
pub fn toggle_division(state: &mut AppState, division: &str) {
    if state.selected_division.as_deref() == Some(division) {
        state.selected_division = None;
    } else {
        state.selected_division = Some(division.to_string());
    }
}

pub fn clear_division_filter(state: &mut AppState) {
    state.selected_division = None;
}

pub fn switch_tab(state: &mut AppState, tab: Tab) {
    state.active_tab = tab;
}

/// Quitar el vehículo seleccionado y vaciar su bloque del formulario
pub fn clear_vehicle_selection(state: &mut AppState) {
    state.selected_vehicle_id = None;
    state.inspection_form.clear_vehicle();
}

pub struct DashboardController {
    api: Arc<dyn InspectionApi>,
    config: EnvironmentConfig,
}

impl DashboardController {
    pub fn new(api: Arc<dyn InspectionApi>, config: EnvironmentConfig) -> Self {
        Self { api, config }
    }

    /// Arranque: sin vehículos no hay dashboard; inspecciones y analytics son opcionales
    pub async fn initialize(&self) -> AppResult<AppState> {
        info!("🚀 Inicializando dashboard de inspecciones");
        let mut state = AppState::new();
        state.reload_vehicles(self.api.as_ref()).await?;
        state.reload_inspections(self.api.as_ref()).await;
        state.reload_analytics(self.api.as_ref()).await;
        info!("✅ Dashboard inicializado");
        Ok(state)
    }

    pub fn startup_failure_notification(&self, err: &AppError) -> Notification {
        error!("❌ Arranque abortado: {}", err);
        Notification::error(VEHICLES_LOAD_FAILED, &self.config)
    }

    /// Seleccionar vehículo para inspección. `None` o un id desconocido limpian/ignoran.
    pub fn select_vehicle(&self, state: &mut AppState, vehicle_id: Option<i64>) -> Option<Notification> {
        let Some(vehicle_id) = vehicle_id.filter(|id| *id != 0) else {
            clear_vehicle_selection(state);
            return None;
        };
        let vehicle = state.find_vehicle(vehicle_id)?.clone();

        state.inspection_form.apply_vehicle(&vehicle);
        state.selected_vehicle_id = Some(vehicle_id);
        Some(Notification::success("Vehicle details loaded!", &self.config))
    }

    pub fn render(&self, state: &AppState) -> DashboardView {
        dashboard_view(state, self.config.recent_activity_limit)
    }
}
