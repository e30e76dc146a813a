//! Motor de agregación
//!
//! Funciones puras sobre las colecciones cacheadas: estado efectivo de un
//! vehículo, conteos por división, conteos por estado (globales o filtrados por
//! división) y actividad reciente. Colecciones vacías producen agregados en
//! cero, nunca errores.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{AnalyticsSnapshot, Inspection, InspectionStatus, Vehicle};
use crate::state::AppState;

/// Clave de agrupación de un vehículo por división
pub fn division_key(vehicle: &Vehicle) -> &str {
    vehicle.division.trim()
}

/// Orden descendente por fecha; fechas no interpretables van al final
fn compare_dates_desc(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Inspecciones ordenadas de la más reciente a la más antigua (orden estable)
pub fn sort_by_date_desc<'a, I>(inspections: I) -> Vec<&'a Inspection>
where
    I: IntoIterator<Item = &'a Inspection>,
{
    let mut sorted: Vec<&Inspection> = inspections.into_iter().collect();
    sorted.sort_by(|a, b| compare_dates_desc(a.timestamp(), b.timestamp()));
    sorted
}

/// Última inspección de un vehículo; empates se resuelven por orden de colección
pub fn latest_inspection(vehicle_id: i64, inspections: &[Inspection]) -> Option<&Inspection> {
    sort_by_date_desc(inspections.iter().filter(|i| i.vehicle_id == vehicle_id))
        .into_iter()
        .next()
}

/// Estado efectivo: `overallStatus` de la última inspección o, sin inspecciones,
/// el estado propio del vehículo (`Not Inspected` si falta).
pub fn resolve_status(vehicle: &Vehicle, inspections: &[Inspection]) -> InspectionStatus {
    match latest_inspection(vehicle.id, inspections) {
        Some(inspection) => inspection.status(),
        None => vehicle.fallback_status(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionCount {
    /// Clave cruda; vacía para vehículos sin división
    pub division: String,
    pub count: usize,
}

/// Vehículos por división, en orden de primera aparición
pub fn count_by_division(vehicles: &[Vehicle]) -> Vec<DivisionCount> {
    let mut counts: Vec<DivisionCount> = Vec::new();
    for vehicle in vehicles {
        let key = division_key(vehicle);
        match counts.iter_mut().find(|c| c.division == key) {
            Some(bucket) => bucket.count += 1,
            None => counts.push(DivisionCount {
                division: key.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Conteo de los tres estados del gráfico de dona
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub passed: u64,
    pub action_required: u64,
    pub not_inspected: u64,
}

impl StatusCounts {
    pub fn get(&self, status: InspectionStatus) -> u64 {
        match status {
            InspectionStatus::Passed => self.passed,
            InspectionStatus::ActionRequired => self.action_required,
            InspectionStatus::NotInspected => self.not_inspected,
        }
    }

    pub fn add(&mut self, status: InspectionStatus) {
        match status {
            InspectionStatus::Passed => self.passed += 1,
            InspectionStatus::ActionRequired => self.action_required += 1,
            InspectionStatus::NotInspected => self.not_inspected += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.passed + self.action_required + self.not_inspected
    }
}

/// Conteo sin filtro, tomado tal cual del snapshot del backend
pub fn status_counts_from_snapshot(snapshot: &AnalyticsSnapshot) -> StatusCounts {
    StatusCounts {
        passed: snapshot.status_count(InspectionStatus::Passed),
        action_required: snapshot.status_count(InspectionStatus::ActionRequired),
        not_inspected: snapshot.status_count(InspectionStatus::NotInspected),
    }
}

/// Conteo derivado: estado efectivo de cada vehículo de la división
pub fn count_status_for_division(
    division: &str,
    vehicles: &[Vehicle],
    inspections: &[Inspection],
) -> StatusCounts {
    let division = division.trim();
    let mut counts = StatusCounts::default();
    for vehicle in vehicles.iter().filter(|v| division_key(v) == division) {
        counts.add(resolve_status(vehicle, inspections));
    }
    counts
}

/// Conteo que alimenta el gráfico de dona según la selección actual
pub fn status_counts(state: &AppState) -> StatusCounts {
    match &state.selected_division {
        Some(division) => count_status_for_division(division, &state.vehicles, &state.inspections),
        None => status_counts_from_snapshot(&state.analytics),
    }
}

/// Las `n` inspecciones más recientes, de la más nueva a la más vieja
pub fn recent_inspections(inspections: &[Inspection], n: usize) -> Vec<&Inspection> {
    let mut sorted = sort_by_date_desc(inspections);
    sorted.truncate(n);
    sorted
}

/// Porcentaje redondeado; 0 si el total es 0
pub fn percentage(count: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u64
}
