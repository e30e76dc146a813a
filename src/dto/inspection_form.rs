//! Formulario de inspección
//!
//! Recoge los campos crudos del formulario (`inspName`, `eq_wipers`,
//! `eq_wipers_note`, `inside[]`, ...) en un registro tipado. La traducción de
//! claves del equipamiento sale de la tabla `EQUIPMENT`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use crate::models::inspection::{Checklist, Condition, EQUIPMENT};
use crate::models::vehicle::{Vehicle, VehicleSize};
use crate::utils::errors::AppResult;

/// Campos crudos del formulario: texto simple o listas para checkboxes (`inside[]`)
pub type RawFormFields = Map<String, Value>;

pub const INSPECTOR_NAME_FIELD: &str = "inspName";
pub const INSPECTOR_ID_FIELD: &str = "inspId";
pub const SUPERVISOR_NAME_FIELD: &str = "supName";
pub const SUPERVISOR_ID_FIELD: &str = "supId";
pub const INSIDE_FIELD: &str = "inside[]";
pub const OUTSIDE_FIELD: &str = "outside[]";
pub const VEHICLE_OBSERVATION_FIELD: &str = "vehicleObs";

/// Bloque de datos del vehículo, rellenado al seleccionar un vehículo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleBlock {
    pub division: String,
    pub door_no: String,
    pub plate_no: String,
    pub vehicle_type: String,
    pub vehicle_size: Option<VehicleSize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionForm {
    pub vehicle: VehicleBlock,
    pub inspector_name: String,
    pub inspector_id: String,
    pub supervisor_name: String,
    pub supervisor_id: String,
    pub inside: Vec<String>,
    pub outside: Vec<String>,
    pub vehicle_observation: String,
    pub checklist: Checklist,
}

impl InspectionForm {
    /// Poblar el formulario desde los campos crudos.
    ///
    /// El bloque de vehículo no viene del formulario: lo fija la selección.
    pub fn from_fields(fields: &RawFormFields) -> Self {
        let mut checklist = Checklist::default();
        for item in EQUIPMENT {
            let condition = Condition::from_label(&text(fields, item.form_key));
            let observation = text(fields, &item.note_form_key());
            checklist.set(item.key, condition, observation);
        }

        Self {
            vehicle: VehicleBlock::default(),
            inspector_name: text(fields, INSPECTOR_NAME_FIELD),
            inspector_id: text(fields, INSPECTOR_ID_FIELD),
            supervisor_name: text(fields, SUPERVISOR_NAME_FIELD),
            supervisor_id: text(fields, SUPERVISOR_ID_FIELD),
            inside: list(fields, INSIDE_FIELD),
            outside: list(fields, OUTSIDE_FIELD),
            vehicle_observation: text(fields, VEHICLE_OBSERVATION_FIELD),
            checklist,
        }
    }

    /// Leer los campos crudos de un fichero JSON (objeto plano) y poblar el formulario
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let fields: RawFormFields = serde_json::from_str(&raw)?;
        Ok(Self::from_fields(&fields))
    }

    /// Copiar los datos del vehículo seleccionado al formulario
    pub fn apply_vehicle(&mut self, vehicle: &Vehicle) {
        self.vehicle = VehicleBlock {
            division: vehicle.division.clone(),
            door_no: vehicle.door_no.clone(),
            plate_no: vehicle.plate_no.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            vehicle_size: None,
        };
        self.set_vehicle_size(vehicle.vehicle_size.clone());
    }

    /// Cambiar el tamaño; fuera de `4x4-offroad` se vacían los ítems off-road
    pub fn set_vehicle_size(&mut self, size: VehicleSize) {
        if !size.is_offroad() {
            self.checklist.clear_offroad_items();
        }
        self.vehicle.vehicle_size = Some(size);
    }

    /// Vaciar el bloque de vehículo
    pub fn clear_vehicle(&mut self) {
        self.vehicle = VehicleBlock::default();
        self.checklist.clear_offroad_items();
    }

    /// Equivalente a resetear el formulario completo
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn inside_joined(&self) -> String {
        self.inside.join(",")
    }

    pub fn outside_joined(&self) -> String {
        self.outside.join(",")
    }
}

fn text(fields: &RawFormFields, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(Value::Array(values)) => values
            .first()
            .map(value_to_text)
            .unwrap_or_default(),
        Some(other) => value_to_text(other),
    }
}

fn list(fields: &RawFormFields, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .map(value_to_text)
            .filter(|v| !v.is_empty())
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            let single = value_to_text(other);
            if single.is_empty() {
                Vec::new()
            } else {
                vec![single]
            }
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
