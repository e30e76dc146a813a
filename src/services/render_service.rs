//! Capa de render
//!
//! Proyecta el estado y los agregados en view models serializables que
//! consume la capa de vista declarativa. Sin estado propio: cada función es
//! pura respecto de `AppState`.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::aggregation_service::{
    count_by_division, percentage, recent_inspections, resolve_status, sort_by_date_desc,
    status_counts,
};
use crate::models::{Condition, Inspection, InspectionStatus};
use crate::state::AppState;
use crate::utils::validation::parse_inspection_date;

pub const DIVISION_PALETTE: [&str; 6] = ["#0f766e", "#14b8a6", "#06b6d4", "#3b82f6", "#8b5cf6", "#ec4899"];
/// Sufijo alfa de las barras atenuadas
pub const DIMMED_ALPHA: &str = "40";
pub const EMPTY_DIVISION_LABEL: &str = "N/A";
pub const PLACEHOLDER: &str = "-";

const PASSED_COLOR: &str = "#00843D";
const ACTION_COLOR: &str = "#f59e0b";
const NOT_INSPECTED_COLOR: &str = "#94a3b8";

pub fn status_color(status: InspectionStatus) -> &'static str {
    match status {
        InspectionStatus::Passed => PASSED_COLOR,
        InspectionStatus::ActionRequired => ACTION_COLOR,
        InspectionStatus::NotInspected => NOT_INSPECTED_COLOR,
    }
}

/// Gráfico listo o estado explícito de "sin datos"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ChartView<T> {
    NoData { message: String },
    Ready(T),
}

impl<T> ChartView<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ChartView::Ready(chart) => Some(chart),
            ChartView::NoData { .. } => None,
        }
    }
}

/// Tabla con filas o mensaje de vacío
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TableView<T> {
    Empty { message: String },
    Rows { rows: Vec<T> },
}

impl<T> TableView<T> {
    fn from_rows(rows: Vec<T>, empty_message: &str) -> Self {
        if rows.is_empty() {
            TableView::Empty {
                message: empty_message.to_string(),
            }
        } else {
            TableView::Rows { rows }
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            TableView::Rows { rows } => rows,
            TableView::Empty { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionBar {
    /// Clave cruda usada para la selección
    pub division: String,
    pub label: String,
    pub count: usize,
    pub percent: u64,
    /// `count (pct%)`
    pub data_label: String,
    pub color: String,
    pub dimmed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionChart {
    pub bars: Vec<DivisionBar>,
    pub total: usize,
    pub selected: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSegment {
    pub status: InspectionStatus,
    pub count: u64,
    pub percent: u64,
    /// Vacío para segmentos en cero
    pub data_label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChart {
    pub segments: Vec<StatusSegment>,
    pub total: u64,
    pub filtered_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterIndicator {
    pub division: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBadge {
    pub status: InspectionStatus,
    pub text: &'static str,
    pub color: &'static str,
}

impl StatusBadge {
    pub fn new(status: InspectionStatus) -> Self {
        Self {
            status,
            text: status.as_str(),
            color: status_color(status),
        }
    }

    /// Variante corta de la tabla de vehículos del dashboard
    pub fn compact(status: InspectionStatus) -> Self {
        let text = match status {
            InspectionStatus::ActionRequired => "Action",
            other => other.as_str(),
        };
        Self {
            status,
            text,
            color: status_color(status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusRow {
    pub vehicle_id: i64,
    pub door_no: String,
    pub plate_no: String,
    pub division: String,
    pub vehicle_type: String,
    pub badge: StatusBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRow {
    pub inspection_id: String,
    pub date: String,
    pub vehicle: String,
    pub inspector_name: String,
    pub badge: StatusBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub inspection_id: String,
    pub date: String,
    pub door_no: String,
    pub plate_no: String,
    pub inspector_name: String,
    pub inspector_id: String,
    pub badge: StatusBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementRow {
    pub vehicle_id: i64,
    pub door_no: String,
    pub plate_no: String,
    pub division: String,
    pub vehicle_type: String,
    pub vehicle_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOption {
    pub vehicle_id: i64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRow {
    pub label: &'static str,
    pub condition: String,
    pub observation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuesBlock {
    pub issues_found: Option<String>,
    pub action_required: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionDetail {
    pub inspection_id: String,
    pub door_no: String,
    pub plate_no: String,
    pub date: String,
    pub overall: StatusBadge,
    pub inspector_name: String,
    pub inspector_id: String,
    pub supervisor_name: String,
    pub supervisor_id: String,
    pub inside_condition: String,
    pub outside_condition: String,
    pub general_observation: Option<String>,
    pub equipment: Vec<EquipmentRow>,
    pub issues_count: usize,
    pub issues: Option<IssuesBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub vehicles: TableView<VehicleStatusRow>,
    pub status_chart: ChartView<StatusChart>,
    pub division_chart: ChartView<DivisionChart>,
    pub filter_indicator: Option<FilterIndicator>,
    pub recent_activity: TableView<ActivityRow>,
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

/// Etiqueta visible de una división (las vacías se muestran como `N/A`)
pub fn division_label(division: &str) -> String {
    if division.trim().is_empty() {
        EMPTY_DIVISION_LABEL.to_string()
    } else {
        division.to_string()
    }
}

fn format_date(raw: &str, pattern: &str) -> String {
    parse_inspection_date(raw)
        .map(|date: NaiveDateTime| date.format(pattern).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// `1/5/2024`
pub fn format_short_date(raw: &str) -> String {
    format_date(raw, "%-m/%-d/%Y")
}

/// `Jan 5, 2024`
pub fn format_long_date(raw: &str) -> String {
    format_date(raw, "%b %-d, %Y")
}

/// Gráfico de barras por división
pub fn division_chart(state: &AppState) -> ChartView<DivisionChart> {
    let counts = count_by_division(&state.vehicles);
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return ChartView::NoData {
            message: "No vehicles found".to_string(),
        };
    }

    let bars = counts
        .into_iter()
        .enumerate()
        .map(|(idx, bucket)| {
            let base = DIVISION_PALETTE[idx % DIVISION_PALETTE.len()];
            let dimmed = state
                .selected_division
                .as_deref()
                .is_some_and(|selected| selected != bucket.division);
            let percent = percentage(bucket.count as u64, total as u64);
            DivisionBar {
                label: division_label(&bucket.division),
                data_label: format!("{} ({}%)", bucket.count, percent),
                color: if dimmed {
                    format!("{}{}", base, DIMMED_ALPHA)
                } else {
                    base.to_string()
                },
                division: bucket.division,
                count: bucket.count,
                percent,
                dimmed,
            }
        })
        .collect();

    ChartView::Ready(DivisionChart {
        bars,
        total,
        selected: state.selected_division.clone(),
    })
}

/// Gráfico de dona de estados, filtrado si hay división seleccionada
pub fn status_chart(state: &AppState) -> ChartView<StatusChart> {
    let counts = status_counts(state);
    let total = counts.total();
    if total == 0 {
        return ChartView::NoData {
            message: "No inspection data".to_string(),
        };
    }

    let segments = InspectionStatus::ALL
        .iter()
        .map(|&status| {
            let count = counts.get(status);
            let percent = percentage(count, total);
            StatusSegment {
                status,
                count,
                percent,
                data_label: if count == 0 {
                    String::new()
                } else {
                    format!("{} ({}%)", count, percent)
                },
                color: status_color(status),
            }
        })
        .collect();

    ChartView::Ready(StatusChart {
        segments,
        total,
        filtered_by: state.selected_division.clone(),
    })
}

pub fn filter_indicator(state: &AppState) -> Option<FilterIndicator> {
    state.selected_division.as_ref().map(|division| FilterIndicator {
        division: division.clone(),
        text: format!("📊 Filtered: {}", division_label(division)),
    })
}

/// Tabla de vehículos del dashboard con el estado efectivo
pub fn dashboard_vehicle_rows(state: &AppState) -> TableView<VehicleStatusRow> {
    let rows = state
        .vehicles
        .iter()
        .map(|v| VehicleStatusRow {
            vehicle_id: v.id,
            door_no: or_placeholder(&v.door_no),
            plate_no: or_placeholder(&v.plate_no),
            division: or_placeholder(&v.division),
            vehicle_type: or_placeholder(&v.vehicle_type),
            badge: StatusBadge::compact(resolve_status(v, &state.inspections)),
        })
        .collect();
    TableView::from_rows(rows, "No vehicles found")
}

pub fn recent_activity_rows(state: &AppState, limit: usize) -> TableView<ActivityRow> {
    let rows = recent_inspections(&state.inspections, limit)
        .into_iter()
        .map(|i| ActivityRow {
            inspection_id: i.inspection_id.clone(),
            date: format_short_date(&i.inspection_date),
            vehicle: format!("{} - {}", i.door_no, i.plate_no),
            inspector_name: i.inspector_name.clone(),
            badge: StatusBadge::new(i.status()),
        })
        .collect();
    TableView::from_rows(rows, "No recent activities")
}

/// Historial completo, de la inspección más nueva a la más vieja
pub fn history_rows(state: &AppState) -> TableView<HistoryRow> {
    let rows = sort_by_date_desc(&state.inspections)
        .into_iter()
        .map(|i| HistoryRow {
            inspection_id: i.inspection_id.clone(),
            date: format_long_date(&i.inspection_date),
            door_no: i.door_no.clone(),
            plate_no: i.plate_no.clone(),
            inspector_name: i.inspector_name.clone(),
            inspector_id: i.inspector_id.clone(),
            badge: StatusBadge::new(i.status()),
        })
        .collect();
    TableView::from_rows(rows, "No Inspection History")
}

pub fn management_rows(state: &AppState) -> TableView<ManagementRow> {
    let rows = state
        .vehicles
        .iter()
        .map(|v| ManagementRow {
            vehicle_id: v.id,
            door_no: or_placeholder(&v.door_no),
            plate_no: or_placeholder(&v.plate_no),
            division: or_placeholder(&v.division),
            vehicle_type: or_placeholder(&v.vehicle_type),
            vehicle_size: or_placeholder(v.vehicle_size.as_str()),
        })
        .collect();
    TableView::from_rows(rows, "No vehicles available")
}

pub fn vehicle_options(state: &AppState) -> Vec<VehicleOption> {
    state
        .vehicles
        .iter()
        .map(|v| VehicleOption {
            vehicle_id: v.id,
            label: format!("{} ({})", v.display_name(), division_label(&v.division)),
        })
        .collect()
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn or_no_notes(value: &str) -> String {
    non_blank(value).unwrap_or_else(|| "No notes".to_string())
}

/// Panel de detalle de una inspección
pub fn inspection_detail(inspection: &Inspection) -> InspectionDetail {
    let equipment: Vec<EquipmentRow> = inspection
        .checklist
        .iter()
        .filter(|(_, check)| check.condition.is_reported())
        .map(|(item, check)| EquipmentRow {
            label: item.label,
            condition: check.condition.to_string(),
            observation: or_placeholder(&check.observation),
        })
        .collect();
    let issues_count = inspection
        .checklist
        .iter()
        .filter(|(_, check)| check.condition == Condition::ActionRequired)
        .count();

    let issues_found = non_blank(&inspection.issues_found);
    let action_required = non_blank(&inspection.action_required);
    let issues = if issues_found.is_some() || action_required.is_some() {
        Some(IssuesBlock {
            issues_found,
            action_required,
        })
    } else {
        None
    };

    InspectionDetail {
        inspection_id: inspection.inspection_id.clone(),
        door_no: or_placeholder(&inspection.door_no),
        plate_no: or_placeholder(&inspection.plate_no),
        date: format_long_date(&inspection.inspection_date),
        overall: StatusBadge::new(inspection.status()),
        inspector_name: or_placeholder(&inspection.inspector_name),
        inspector_id: or_placeholder(&inspection.inspector_id),
        supervisor_name: or_placeholder(&inspection.supervisor_name),
        supervisor_id: or_placeholder(&inspection.supervisor_id),
        inside_condition: or_no_notes(&inspection.vehicle_inside),
        outside_condition: or_no_notes(&inspection.vehicle_outside),
        general_observation: non_blank(&inspection.vehicle_observation),
        equipment,
        issues_count,
        issues,
    }
}

/// Vista completa del dashboard
pub fn dashboard_view(state: &AppState, recent_limit: usize) -> DashboardView {
    DashboardView {
        vehicles: dashboard_vehicle_rows(state),
        status_chart: status_chart(state),
        division_chart: division_chart(state),
        filter_indicator: filter_indicator(state),
        recent_activity: recent_activity_rows(state, recent_limit),
    }
}
