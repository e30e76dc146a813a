//! Controlador de vehículos
//!
//! Alta, edición y baja de vehículos. Cada mutación correcta recarga las tres
//! colecciones; la baja exige confirmación explícita.

use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use super::ActionOutcome;
use crate::client::InspectionApi;
use crate::config::environment::EnvironmentConfig;
use crate::dto::vehicle_dto::VehicleRequest;
use crate::services::notification_service::Notification;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult, ValidationFailure};

pub const VEHICLES_LOAD_FAILED: &str = "Failed to load vehicles";

/// Confirmación explícita del usuario antes de una acción destructiva
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Operación CRUD, para elegir el texto de error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleOperation {
    Add,
    Update,
    Delete,
}

/// Texto de confirmación que nombra al vehículo
pub fn delete_prompt(state: &AppState, vehicle_id: i64) -> String {
    let label = state
        .find_vehicle(vehicle_id)
        .map(|v| v.display_name())
        .unwrap_or_else(|| vehicle_id.to_string());
    format!(
        "Are you sure you want to delete \"{}\"?\n\nThis action cannot be undone!",
        label
    )
}

fn check_identity(request: &VehicleRequest) -> AppResult<()> {
    request
        .validate()
        .map_err(|_| AppError::Validation(ValidationFailure::MissingVehicleIdentity))
}

pub struct VehicleController {
    api: Arc<dyn InspectionApi>,
    config: EnvironmentConfig,
}

impl VehicleController {
    pub fn new(api: Arc<dyn InspectionApi>, config: EnvironmentConfig) -> Self {
        Self { api, config }
    }

    /// Alta de vehículo con valores por defecto para división y tipo
    pub async fn add(&self, state: &mut AppState, request: VehicleRequest) -> AppResult<ActionOutcome> {
        check_identity(&request)?;
        let request = request.with_creation_defaults();

        let response = self.api.add_vehicle(&request).await.into_result()?;
        info!("🚗 Vehículo creado: {} ({:?})", request.door_no, response.vehicle_id);

        let mut outcome = ActionOutcome::completed(
            response,
            Notification::success("✅ Vehicle added successfully!", &self.config),
        );
        self.reload_after_mutation(state, &mut outcome).await;
        state.new_vehicle_form = VehicleRequest::default();
        Ok(outcome)
    }

    pub async fn update(
        &self,
        state: &mut AppState,
        vehicle_id: i64,
        request: VehicleRequest,
    ) -> AppResult<ActionOutcome> {
        check_identity(&request)?;

        let response = self.api.update_vehicle(vehicle_id, &request).await.into_result()?;
        info!("✏️ Vehículo {} actualizado", vehicle_id);

        let mut outcome = ActionOutcome::completed(
            response,
            Notification::success("✅ Vehicle updated successfully!", &self.config),
        );
        self.reload_after_mutation(state, &mut outcome).await;
        Ok(outcome)
    }

    /// Baja de vehículo; sin confirmación no hay llamada de red
    pub async fn delete(
        &self,
        state: &mut AppState,
        vehicle_id: i64,
        confirm: &dyn Confirm,
    ) -> AppResult<ActionOutcome> {
        if !confirm.confirm(&delete_prompt(state, vehicle_id)) {
            info!("🚫 Borrado del vehículo {} cancelado", vehicle_id);
            return Ok(ActionOutcome::cancelled());
        }

        let response = self.api.delete_vehicle(vehicle_id).await.into_result()?;
        info!("🗑️ Vehículo {} eliminado", vehicle_id);

        if state.selected_vehicle_id == Some(vehicle_id) {
            state.selected_vehicle_id = None;
            state.inspection_form.clear_vehicle();
        }

        let mut outcome = ActionOutcome::completed(
            response,
            Notification::success("✅ Vehicle deleted successfully!", &self.config),
        );
        self.reload_after_mutation(state, &mut outcome).await;
        Ok(outcome)
    }

    pub fn failure_notification(&self, operation: VehicleOperation, err: &AppError) -> Notification {
        error!("❌ Operación {:?} fallida: {}", operation, err);
        match operation {
            VehicleOperation::Add => Notification::for_error("❌ Error adding vehicle: ", err, &self.config),
            VehicleOperation::Update => {
                Notification::for_error("❌ Error updating vehicle: ", err, &self.config)
            }
            VehicleOperation::Delete if err.is_validation() => {
                Notification::error(err.user_message(), &self.config)
            }
            VehicleOperation::Delete => Notification::error("❌ Error deleting vehicle", &self.config),
        }
    }

    /// Recarga completa; si los vehículos no cargan se avisa pero la mutación ya ocurrió
    async fn reload_after_mutation(&self, state: &mut AppState, outcome: &mut ActionOutcome) {
        if let Err(e) = state.reload_all(self.api.as_ref()).await {
            error!("❌ Recarga tras mutación fallida: {}", e);
            outcome
                .notifications
                .push(Notification::error(VEHICLES_LOAD_FAILED, &self.config));
        }
    }
}
