//! Controlador de inspecciones
//!
//! Valida el formulario en curso, lo normaliza en un registro de inspección y
//! lo envía al backend. Tras un envío correcto recarga inspecciones y analytics.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{error, info};

use super::{ActionOutcome, ScheduledNavigation};
use crate::client::InspectionApi;
use crate::config::environment::EnvironmentConfig;
use crate::dto::inspection_form::InspectionForm;
use crate::models::{Inspection, InspectionStatus};
use crate::services::notification_service::Notification;
use crate::state::{AppState, Tab};
use crate::utils::errors::{AppError, AppResult, ValidationFailure};

pub const SUBMITTED_MESSAGE: &str = "✅ Inspection submitted successfully!";
pub const SUBMIT_FAILURE_PREFIX: &str = "❌ Failed: ";

/// Validar en orden; se corta en el primer fallo
pub fn validate_submission(
    selected_vehicle_id: Option<i64>,
    form: &InspectionForm,
) -> Result<i64, ValidationFailure> {
    let vehicle_id = selected_vehicle_id.ok_or(ValidationFailure::NoVehicleSelected)?;

    if form.inspector_name.trim().is_empty() || form.inspector_id.trim().is_empty() {
        return Err(ValidationFailure::MissingInspectorInfo);
    }
    if form.supervisor_name.trim().is_empty() || form.supervisor_id.trim().is_empty() {
        return Err(ValidationFailure::MissingSupervisorInfo);
    }

    Ok(vehicle_id)
}

/// Normalizar el formulario en un registro de inspección con los campos derivados
pub fn build_inspection(vehicle_id: i64, form: &InspectionForm, date: NaiveDate) -> Inspection {
    let has_action = form.checklist.has_action_required();
    let issues = form.checklist.issue_names();
    let overall = if has_action {
        InspectionStatus::ActionRequired
    } else {
        InspectionStatus::Passed
    };

    Inspection {
        inspection_id: String::new(),
        vehicle_id,
        door_no: form.vehicle.door_no.clone(),
        plate_no: form.vehicle.plate_no.clone(),
        inspection_date: date.format("%Y-%m-%d").to_string(),
        inspector_name: form.inspector_name.trim().to_string(),
        inspector_id: form.inspector_id.trim().to_string(),
        supervisor_name: form.supervisor_name.trim().to_string(),
        supervisor_id: form.supervisor_id.trim().to_string(),
        overall_status: overall.as_str().to_string(),
        issues_found: if issues.is_empty() {
            "0".to_string()
        } else {
            issues.join(", ")
        },
        action_required: if has_action { "True" } else { "False" }.to_string(),
        vehicle_inside: form.inside_joined(),
        vehicle_outside: form.outside_joined(),
        vehicle_observation: form.vehicle_observation.clone(),
        safety_equipment: String::new(),
        checklist: form.checklist.clone(),
    }
}

pub struct InspectionController {
    api: Arc<dyn InspectionApi>,
    config: EnvironmentConfig,
}

impl InspectionController {
    pub fn new(api: Arc<dyn InspectionApi>, config: EnvironmentConfig) -> Self {
        Self { api, config }
    }

    /// Enviar el formulario en curso con la fecha de hoy
    pub async fn submit(&self, state: &mut AppState) -> AppResult<ActionOutcome> {
        let today = Utc::now().date_naive();
        self.submit_on(state, today).await
    }

    /// Enviar el formulario en curso sellado con `date`.
    ///
    /// En fallo el formulario y la selección quedan intactos para reintentar.
    pub async fn submit_on(&self, state: &mut AppState, date: NaiveDate) -> AppResult<ActionOutcome> {
        let vehicle_id = validate_submission(state.selected_vehicle_id, &state.inspection_form)?;
        let record = build_inspection(vehicle_id, &state.inspection_form, date);

        info!(
            "📝 Enviando inspección del vehículo {} ({})",
            vehicle_id, record.overall_status
        );
        let response = self.api.add_inspection(&record).await.into_result()?;
        info!("✅ Inspección creada: {:?}", response.inspection_id);

        state.reload_inspections(self.api.as_ref()).await;
        state.reload_analytics(self.api.as_ref()).await;

        state.inspection_form.reset();
        state.selected_vehicle_id = None;

        let mut outcome =
            ActionOutcome::completed(response, Notification::success(SUBMITTED_MESSAGE, &self.config));
        outcome.navigation = Some(ScheduledNavigation::after(
            Tab::Dashboard,
            self.config.dashboard_redirect_delay,
        ));
        Ok(outcome)
    }

    pub fn failure_notification(&self, err: &AppError) -> Notification {
        error!("❌ Envío de inspección fallido: {}", err);
        Notification::for_error(SUBMIT_FAILURE_PREFIX, err, &self.config)
    }
}
