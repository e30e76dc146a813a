//! Modelos de Analytics
//!
//! Este módulo contiene el snapshot de métricas calculado por el backend
//! (`/get_analytics`). Se reemplaza entero en cada recarga, nunca se mezcla.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::vehicle::InspectionStatus;

/// Snapshot de analytics del dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSnapshot {
    pub total_vehicles: u64,
    pub total_inspections: u64,
    pub passed_inspections: u64,
    pub action_required_inspections: u64,
    pub total_vehicles_inspected: u64,
    pub total_vehicles_not_inspected: u64,
    /// División -> número de vehículos
    pub division_data: BTreeMap<String, u64>,
    /// Estado -> número de vehículos según su última inspección
    pub inspection_status: BTreeMap<String, u64>,
    /// `YYYY-MM` -> número de inspecciones
    pub monthly_inspections: BTreeMap<String, u64>,
    pub vehicle_type_data: BTreeMap<String, u64>,
}

impl AnalyticsSnapshot {
    /// Conteo de un estado; claves ausentes valen 0
    pub fn status_count(&self, status: InspectionStatus) -> u64 {
        self.inspection_status
            .get(status.as_str())
            .copied()
            .unwrap_or(0)
    }
}
