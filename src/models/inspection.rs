//! Modelo de Inspection
//!
//! Este módulo contiene el registro plano de inspección que intercambia el
//! backend (`/get_inspections`, `/add_inspection`) y el checklist tipado de
//! equipamiento. La tabla `EQUIPMENT` es la única fuente de verdad sobre los
//! ítems: claves del registro, claves del formulario, etiquetas y si el ítem
//! solo aplica a vehículos off-road.

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::vehicle::{lenient_id, InspectionStatus};
use crate::utils::validation::parse_inspection_date;

/// Un ítem del checklist de equipamiento
#[derive(Debug, PartialEq, Eq)]
pub struct Equipment {
    /// Prefijo en el registro (`<key>_condition`, `<key>_observation`)
    pub key: &'static str,
    /// Nombre del campo en el formulario (`<form_key>`, `<form_key>_note`)
    pub form_key: &'static str,
    pub label: &'static str,
    pub offroad_only: bool,
}

impl Equipment {
    /// Nombre legible usado en `issuesFound`: clave de formulario sin `eq_` y sin guiones bajos
    pub fn issue_name(&self) -> String {
        self.form_key.trim_start_matches("eq_").replace('_', " ")
    }

    pub fn condition_field(&self) -> String {
        format!("{}_condition", self.key)
    }

    pub fn observation_field(&self) -> String {
        format!("{}_observation", self.key)
    }

    pub fn note_form_key(&self) -> String {
        format!("{}_note", self.form_key)
    }
}

pub const EQUIPMENT: &[Equipment] = &[
    Equipment { key: "windshieldWipers", form_key: "eq_wipers", label: "Windshield Wipers", offroad_only: false },
    Equipment { key: "reflectiveTriangles", form_key: "eq_triangles", label: "Reflective Triangles", offroad_only: false },
    Equipment { key: "footBrakes", form_key: "eq_footbrakes", label: "Foot Brakes", offroad_only: false },
    Equipment { key: "emergencyBrakes", form_key: "eq_emergencybrakes", label: "Emergency Brakes", offroad_only: false },
    Equipment { key: "horn", form_key: "eq_horn", label: "Horn", offroad_only: false },
    Equipment { key: "tireChangingKit", form_key: "eq_jack", label: "Tire Changing Kit", offroad_only: false },
    Equipment { key: "tires", form_key: "eq_tires", label: "Tires", offroad_only: false },
    Equipment { key: "spareTire", form_key: "eq_spare", label: "Spare Tire", offroad_only: false },
    Equipment { key: "wheels", form_key: "eq_wheels", label: "Wheels", offroad_only: false },
    Equipment { key: "jmFlyer", form_key: "eq_jm_flyer", label: "JM \"What to Do\" Flyer", offroad_only: false },
    Equipment { key: "emergencyContactList", form_key: "eq_contact_list", label: "Emergency Contact List", offroad_only: false },
    Equipment { key: "shovel", form_key: "eq_shovel", label: "Two Shovels", offroad_only: true },
    Equipment { key: "sandBoards", form_key: "eq_sand_boards", label: "Two Sand Boards", offroad_only: true },
    Equipment { key: "towingCable", form_key: "eq_towing", label: "Towing Cable/Strap", offroad_only: true },
    Equipment { key: "shackles", form_key: "eq_shackles", label: "Two Soft Shackles", offroad_only: true },
    Equipment { key: "tireGauge", form_key: "eq_tire_gauge", label: "Tire Gauge", offroad_only: true },
    Equipment { key: "airCompressor", form_key: "eq_air_compressor", label: "12V Air Compressor", offroad_only: true },
    Equipment { key: "flashlight", form_key: "eq_flash", label: "Flashlight", offroad_only: false },
];

pub const EQUIPMENT_COUNT: usize = EQUIPMENT.len();

/// Buscar un ítem por su clave de registro
pub fn equipment_by_key(key: &str) -> Option<&'static Equipment> {
    EQUIPMENT.iter().find(|item| item.key == key)
}

/// Estado de un ítem del checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    Ok,
    ActionRequired,
    NotApplicable,
    #[default]
    Unset,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Ok => "OK",
            Condition::ActionRequired => "Action Required",
            Condition::NotApplicable => "N/A",
            Condition::Unset => "",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "OK" => Condition::Ok,
            "Action Required" => Condition::ActionRequired,
            "N/A" => Condition::NotApplicable,
            _ => Condition::Unset,
        }
    }

    /// Ítems `N/A` o vacíos no aparecen en el detalle
    pub fn is_reported(&self) -> bool {
        matches!(self, Condition::Ok | Condition::ActionRequired)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condición + observación de un ítem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentCheck {
    pub condition: Condition,
    pub observation: String,
}

/// Checklist completo, un `EquipmentCheck` por fila de `EQUIPMENT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    checks: [EquipmentCheck; EQUIPMENT_COUNT],
}

impl Default for Checklist {
    fn default() -> Self {
        Self {
            checks: std::array::from_fn(|_| EquipmentCheck::default()),
        }
    }
}

impl Checklist {
    fn index_of(key: &str) -> Option<usize> {
        EQUIPMENT.iter().position(|item| item.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&EquipmentCheck> {
        Self::index_of(key).map(|idx| &self.checks[idx])
    }

    /// Fijar condición y observación; `false` si la clave no existe
    pub fn set(&mut self, key: &str, condition: Condition, observation: impl Into<String>) -> bool {
        match Self::index_of(key) {
            Some(idx) => {
                self.checks[idx] = EquipmentCheck {
                    condition,
                    observation: observation.into(),
                };
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static Equipment, &EquipmentCheck)> {
        EQUIPMENT.iter().zip(self.checks.iter())
    }

    pub fn has_action_required(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.condition == Condition::ActionRequired)
    }

    /// Nombres legibles de los ítems en `Action Required`, en orden de tabla
    pub fn issue_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, check)| check.condition == Condition::ActionRequired)
            .map(|(item, _)| item.issue_name())
            .collect()
    }

    pub fn action_required_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|check| check.condition == Condition::ActionRequired)
            .count()
    }

    /// Vaciar los ítems que solo aplican a vehículos off-road
    pub fn clear_offroad_items(&mut self) {
        for (item, check) in EQUIPMENT.iter().zip(self.checks.iter_mut()) {
            if item.offroad_only {
                *check = EquipmentCheck::default();
            }
        }
    }
}

impl Serialize for Checklist {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(EQUIPMENT_COUNT * 2))?;
        for (item, check) in self.iter() {
            map.serialize_entry(&item.condition_field(), check.condition.as_str())?;
            map.serialize_entry(&item.observation_field(), &check.observation)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Checklist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, serde_json::Value> = HashMap::deserialize(deserializer)?;
        let text = |field: String| -> String {
            match raw.get(&field) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        };

        let mut checklist = Checklist::default();
        for (item, check) in EQUIPMENT.iter().zip(checklist.checks.iter_mut()) {
            check.condition = Condition::from_label(&text(item.condition_field()));
            check.observation = text(item.observation_field());
        }
        Ok(checklist)
    }
}

/// Registro de inspección. Inmutable una vez creado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    /// Asignado por el backend; vacío en inspecciones nuevas
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub inspection_id: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub vehicle_id: i64,
    #[serde(default)]
    pub door_no: String,
    #[serde(default)]
    pub plate_no: String,
    #[serde(default)]
    pub inspection_date: String,
    #[serde(default)]
    pub inspector_name: String,
    #[serde(default)]
    pub inspector_id: String,
    #[serde(default)]
    pub supervisor_name: String,
    #[serde(default)]
    pub supervisor_id: String,
    #[serde(default)]
    pub overall_status: String,
    /// Nombres de ítems separados por coma, o `"0"`
    #[serde(default)]
    pub issues_found: String,
    /// `"True"` | `"False"`
    #[serde(default)]
    pub action_required: String,
    #[serde(default, rename = "vehicle_inside")]
    pub vehicle_inside: String,
    #[serde(default, rename = "vehicle_outside")]
    pub vehicle_outside: String,
    #[serde(default, rename = "vehicle_observation")]
    pub vehicle_observation: String,
    #[serde(default)]
    pub safety_equipment: String,
    #[serde(flatten)]
    pub checklist: Checklist,
}

impl Inspection {
    pub fn status(&self) -> InspectionStatus {
        InspectionStatus::from_label_or_default(&self.overall_status)
    }

    /// Fecha y hora de la inspección; las fechas sin hora valen medianoche
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        parse_inspection_date(&self.inspection_date)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp().map(|dt| dt.date())
    }
}
