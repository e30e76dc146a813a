//! Cliente HTTP para el backend de inspecciones
//!
//! Este módulo contiene el gateway hacia el backend: tres lecturas que
//! devuelven colecciones completas y cuatro mutaciones que devuelven
//! `{success, message?}`. Cualquier status no-2xx o cuerpo que no sea JSON
//! válido se traduce en un fallo genérico (`success:false`).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::environment::EnvironmentConfig;
use crate::dto::api_dto::ApiResponse;
use crate::dto::vehicle_dto::VehicleRequest;
use crate::models::{AnalyticsSnapshot, Inspection, Vehicle};
use crate::utils::errors::{AppError, AppResult};

pub const GET_VEHICLES: &str = "/get_vehicles";
pub const GET_INSPECTIONS: &str = "/get_inspections";
pub const GET_ANALYTICS: &str = "/get_analytics";
pub const ADD_INSPECTION: &str = "/add_inspection";
pub const ADD_VEHICLE: &str = "/add_vehicle";
pub const UPDATE_VEHICLE: &str = "/update_vehicle";
pub const DELETE_VEHICLE: &str = "/delete_vehicle";

/// Operaciones que el cliente consume del backend
#[async_trait]
pub trait InspectionApi: Send + Sync {
    async fn get_vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn get_inspections(&self) -> AppResult<Vec<Inspection>>;
    async fn get_analytics(&self) -> AppResult<AnalyticsSnapshot>;

    async fn add_inspection(&self, inspection: &Inspection) -> ApiResponse;
    async fn add_vehicle(&self, request: &VehicleRequest) -> ApiResponse;
    async fn update_vehicle(&self, vehicle_id: i64, request: &VehicleRequest) -> ApiResponse;
    async fn delete_vehicle(&self, vehicle_id: i64) -> ApiResponse;
}

/// Cliente HTTP basado en reqwest
pub struct InspectionApiClient {
    pub client: Client,
    pub config: EnvironmentConfig,
}

impl InspectionApiClient {
    /// Crear nuevo cliente HTTP. Sin `request_timeout` no se impone timeout.
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let url = self.url(path);
        log::debug!("🌐 GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::error!("❌ GET {} respondió {}", url, status);
            return Err(AppError::Request(format!("Error HTTP: {}", status)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_mutation(&self, request: RequestBuilder) -> ApiResponse {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("❌ Error de red: {}", e);
                return ApiResponse::failure(format!("Error de red: {}", e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return ApiResponse::failure(format!("Error leyendo respuesta: {}", e)),
        };
        let parsed = serde_json::from_str::<ApiResponse>(&body);

        if !status.is_success() {
            log::error!("❌ Mutación respondió {}: {}", status, body);
            let message = parsed
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| format!("Error HTTP: {}", status));
            return ApiResponse::failure(message);
        }

        match parsed {
            Ok(api_response) => api_response,
            Err(e) => {
                log::error!("❌ Respuesta no es JSON válido: {}", e);
                ApiResponse::failure(format!("Error parsing JSON: {}", e))
            }
        }
    }
}

#[async_trait]
impl InspectionApi for InspectionApiClient {
    async fn get_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.fetch_json(GET_VEHICLES).await
    }

    async fn get_inspections(&self) -> AppResult<Vec<Inspection>> {
        self.fetch_json(GET_INSPECTIONS).await
    }

    async fn get_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        self.fetch_json(GET_ANALYTICS).await
    }

    async fn add_inspection(&self, inspection: &Inspection) -> ApiResponse {
        let request = self.client.post(self.url(ADD_INSPECTION)).json(inspection);
        self.send_mutation(request).await
    }

    async fn add_vehicle(&self, request: &VehicleRequest) -> ApiResponse {
        let request = self.client.post(self.url(ADD_VEHICLE)).json(request);
        self.send_mutation(request).await
    }

    async fn update_vehicle(&self, vehicle_id: i64, request: &VehicleRequest) -> ApiResponse {
        let url = format!("{}/{}", self.url(UPDATE_VEHICLE), vehicle_id);
        let request = self.client.put(url).json(request);
        self.send_mutation(request).await
    }

    async fn delete_vehicle(&self, vehicle_id: i64) -> ApiResponse {
        let url = format!("{}/{}", self.url(DELETE_VEHICLE), vehicle_id);
        let request = self.client.delete(url);
        self.send_mutation(request).await
    }
}
