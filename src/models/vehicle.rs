//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como lo entrega `/get_vehicles`,
//! el tamaño de vehículo tipado y el estado de inspección.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Estado de inspección de un vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InspectionStatus {
    Passed,
    #[serde(rename = "Action Required")]
    ActionRequired,
    #[serde(rename = "Not Inspected")]
    NotInspected,
}

impl InspectionStatus {
    /// Orden fijo de los tres buckets del gráfico de estado
    pub const ALL: [InspectionStatus; 3] = [
        InspectionStatus::Passed,
        InspectionStatus::ActionRequired,
        InspectionStatus::NotInspected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Passed => "Passed",
            InspectionStatus::ActionRequired => "Action Required",
            InspectionStatus::NotInspected => "Not Inspected",
        }
    }

    /// Interpretar una etiqueta del backend; `None` si no es reconocida
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Passed" => Some(InspectionStatus::Passed),
            "Action Required" => Some(InspectionStatus::ActionRequired),
            "Not Inspected" => Some(InspectionStatus::NotInspected),
            _ => None,
        }
    }

    /// Igual que `from_label` pero cae en `NotInspected`
    pub fn from_label_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or(InspectionStatus::NotInspected)
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tamaño del vehículo. Los vehículos `4x4-offroad` llevan equipo extra.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum VehicleSize {
    #[default]
    FourByTwo,
    FourByFour,
    FourByFourOffroad,
    Other(String),
}

impl VehicleSize {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleSize::FourByTwo => "4x2",
            VehicleSize::FourByFour => "4x4",
            VehicleSize::FourByFourOffroad => "4x4-offroad",
            VehicleSize::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_offroad(&self) -> bool {
        matches!(self, VehicleSize::FourByFourOffroad)
    }
}

impl From<String> for VehicleSize {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "" | "4x2" => VehicleSize::FourByTwo,
            "4x4" => VehicleSize::FourByFour,
            "4x4-offroad" => VehicleSize::FourByFourOffroad,
            other => VehicleSize::Other(other.to_string()),
        }
    }
}

impl From<&str> for VehicleSize {
    fn from(raw: &str) -> Self {
        VehicleSize::from(raw.to_string())
    }
}

impl From<VehicleSize> for String {
    fn from(size: VehicleSize) -> Self {
        size.as_str().to_string()
    }
}

impl fmt::Display for VehicleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle principal - mapea exactamente a la hoja `Vehicles` del backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default)]
    pub door_no: String,
    #[serde(default)]
    pub plate_no: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub vehicle_size: VehicleSize,
    #[serde(default)]
    pub odometer: String,
    #[serde(default)]
    pub inspection_sticker_mileage: String,
    #[serde(default)]
    pub inspection_sticker_date: String,
    #[serde(default)]
    pub restricted_area_sticker: String,
    #[serde(default)]
    pub sticker_expiry_date: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub assigned_date: String,
    /// Estado desnormalizado; solo cuenta si el vehículo no tiene inspecciones
    #[serde(default)]
    pub status: String,
}

impl Vehicle {
    /// Etiqueta corta `puerta - matrícula`
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.door_no, self.plate_no)
    }

    /// Estado propio del vehículo, `NotInspected` si falta o no es reconocido
    pub fn fallback_status(&self) -> InspectionStatus {
        InspectionStatus::from_label_or_default(&self.status)
    }
}

/// Acepta ids numéricos o strings numéricos (`"7"`, `"7.0"`); cualquier otra cosa es 0
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}
