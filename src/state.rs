//! Estado de la aplicación
//!
//! Este módulo define el estado explícito que sustituye a las variables
//! globales del dashboard: las tres colecciones del backend, la selección
//! volátil de la interfaz y los formularios en curso. Todo se muta en un único
//! hilo lógico; las recargas terminan antes de cualquier re-render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use crate::client::InspectionApi;
use crate::dto::inspection_form::InspectionForm;
use crate::dto::vehicle_dto::VehicleRequest;
use crate::models::{AnalyticsSnapshot, Inspection, Vehicle};
use crate::utils::errors::AppResult;

/// Pestañas de la interfaz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Inspection,
    History,
    Vehicles,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tab::Dashboard => "dashboard",
            Tab::Inspection => "inspection",
            Tab::History => "history",
            Tab::Vehicles => "vehicles",
        };
        f.write_str(name)
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Tab::Dashboard),
            "inspection" => Ok(Tab::Inspection),
            "history" => Ok(Tab::History),
            "vehicles" => Ok(Tab::Vehicles),
            other => Err(format!("unknown tab '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub vehicles: Vec<Vehicle>,
    pub inspections: Vec<Inspection>,
    pub analytics: AnalyticsSnapshot,
    pub selected_vehicle_id: Option<i64>,
    /// Clave cruda de la división seleccionada en el gráfico de barras
    pub selected_division: Option<String>,
    pub active_tab: Tab,
    pub inspection_form: InspectionForm,
    pub new_vehicle_form: VehicleRequest,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_vehicle(&self, vehicle_id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }

    pub fn find_inspection(&self, inspection_id: &str) -> Option<&Inspection> {
        self.inspections
            .iter()
            .find(|i| i.inspection_id == inspection_id)
    }

    /// Recargar vehículos. Un fallo deja el snapshot previo intacto y se propaga.
    pub async fn reload_vehicles(&mut self, api: &dyn InspectionApi) -> AppResult<()> {
        let vehicles = api.get_vehicles().await?;
        info!("🚗 {} vehículos cargados", vehicles.len());
        self.vehicles = vehicles;
        Ok(())
    }

    /// Recargar inspecciones. Los fallos se toleran y conservan el snapshot previo.
    pub async fn reload_inspections(&mut self, api: &dyn InspectionApi) -> bool {
        match api.get_inspections().await {
            Ok(inspections) => {
                info!("📋 {} inspecciones cargadas", inspections.len());
                self.inspections = inspections;
                true
            }
            Err(e) => {
                warn!("⚠️ No se pudieron cargar las inspecciones: {}", e);
                false
            }
        }
    }

    /// Recargar analytics. Los fallos se toleran y conservan el snapshot previo.
    pub async fn reload_analytics(&mut self, api: &dyn InspectionApi) -> bool {
        match api.get_analytics().await {
            Ok(analytics) => {
                info!("📊 Analytics cargado");
                self.analytics = analytics;
                true
            }
            Err(e) => {
                warn!("⚠️ No se pudo cargar analytics: {}", e);
                false
            }
        }
    }

    /// Recarga completa de las tres colecciones, en orden.
    ///
    /// Las tres cargas se ejecutan siempre; un fallo de vehículos se devuelve al final.
    pub async fn reload_all(&mut self, api: &dyn InspectionApi) -> AppResult<()> {
        let vehicles = self.reload_vehicles(api).await;
        self.reload_inspections(api).await;
        self.reload_analytics(api).await;
        vehicles
    }
}
