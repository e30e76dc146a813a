use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleSize};
use crate::utils::validation::validate_not_empty;

pub const DEFAULT_DIVISION: &str = "General";
pub const DEFAULT_VEHICLE_TYPE: &str = "N/A";

// Request para crear o actualizar un vehículo (`/add_vehicle`, `/update_vehicle/{id}`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub door_no: String,

    #[validate(custom = "validate_not_empty")]
    pub plate_no: String,

    pub division: String,
    pub vehicle_type: String,
    pub vehicle_size: VehicleSize,
}

impl VehicleRequest {
    /// Construir desde los campos del formulario, recortando espacios
    pub fn new(
        door_no: &str,
        plate_no: &str,
        division: &str,
        vehicle_type: &str,
        vehicle_size: &str,
    ) -> Self {
        Self {
            door_no: door_no.trim().to_string(),
            plate_no: plate_no.trim().to_string(),
            division: division.trim().to_string(),
            vehicle_type: vehicle_type.trim().to_string(),
            vehicle_size: VehicleSize::from(vehicle_size),
        }
    }

    /// Prellenar el modal de edición con un vehículo existente
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            door_no: vehicle.door_no.clone(),
            plate_no: vehicle.plate_no.clone(),
            division: vehicle.division.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            vehicle_size: vehicle.vehicle_size.clone(),
        }
    }

    /// Valores por defecto al dar de alta: división `General`, tipo `N/A`
    pub fn with_creation_defaults(mut self) -> Self {
        if self.division.is_empty() {
            self.division = DEFAULT_DIVISION.to_string();
        }
        if self.vehicle_type.is_empty() {
            self.vehicle_type = DEFAULT_VEHICLE_TYPE.to_string();
        }
        self
    }
}
