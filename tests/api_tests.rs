//! Tests end-to-end contra un backend stub en axum
//!
//! El stub guarda las colecciones en memoria y cuenta las llamadas por
//! endpoint, para verificar qué recargas dispara cada acción.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use vehicle_inspection_dashboard::client::{InspectionApi, InspectionApiClient};
use vehicle_inspection_dashboard::config::environment::EnvironmentConfig;
use vehicle_inspection_dashboard::controllers::vehicle_controller::VehicleOperation;
use vehicle_inspection_dashboard::controllers::{
    DashboardController, InspectionController, VehicleController,
};
use vehicle_inspection_dashboard::dto::VehicleRequest;
use vehicle_inspection_dashboard::models::{Condition, InspectionStatus, EQUIPMENT};
use vehicle_inspection_dashboard::services::aggregation_service::resolve_status;
use vehicle_inspection_dashboard::services::notification_service::NotificationKind;
use vehicle_inspection_dashboard::state::{AppState, Tab};
use vehicle_inspection_dashboard::utils::errors::{AppError, ValidationFailure};

const MODE_OK: u8 = 0;
const MODE_SERVER_ERROR: u8 = 1;
const MODE_INVALID_JSON: u8 = 2;
const MODE_REJECTED: u8 = 3;

#[derive(Default)]
struct Hits {
    vehicles: AtomicUsize,
    inspections: AtomicUsize,
    analytics: AtomicUsize,
    add_inspection: AtomicUsize,
    add_vehicle: AtomicUsize,
    update_vehicle: AtomicUsize,
    delete_vehicle: AtomicUsize,
}

struct Stub {
    vehicles: Mutex<Vec<Value>>,
    inspections: Mutex<Vec<Value>>,
    last_body: Mutex<Option<Value>>,
    hits: Hits,
    mutation_mode: AtomicU8,
    vehicles_down: AtomicBool,
    analytics_down: AtomicBool,
}

type Shared = Arc<Stub>;

impl Stub {
    fn seeded() -> Shared {
        Arc::new(Self {
            vehicles: Mutex::new(vec![
                json!({
                    "id": 1, "doorNo": "D-1", "plateNo": "P-1", "division": "North",
                    "vehicleType": "Pickup", "vehicleSize": "4x2", "status": "Passed"
                }),
                json!({
                    "id": 2, "doorNo": "D-2", "plateNo": "P-2", "division": "South",
                    "vehicleType": "SUV", "vehicleSize": "4x4-offroad"
                }),
            ]),
            inspections: Mutex::new(vec![json!({
                "inspectionId": "INS-1", "vehicleId": 1, "doorNo": "D-1", "plateNo": "P-1",
                "inspectionDate": "2024-05-01", "inspectorName": "Ana", "inspectorId": "I-1",
                "supervisorName": "Luis", "supervisorId": "S-1",
                "overallStatus": "Action Required", "issuesFound": "horn", "actionRequired": "True",
                "horn_condition": "Action Required", "horn_observation": "silent"
            })]),
            last_body: Mutex::new(None),
            hits: Hits::default(),
            mutation_mode: AtomicU8::new(MODE_OK),
            vehicles_down: AtomicBool::new(false),
            analytics_down: AtomicBool::new(false),
        })
    }

    fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn last_body(&self) -> Value {
        self.last_body.lock().unwrap().clone().unwrap_or(Value::Null)
    }

    /// Respuesta de mutación según el modo configurado; `None` = continuar normalmente
    fn failure_response(&self) -> Option<Response> {
        match self.mutation_mode.load(Ordering::SeqCst) {
            MODE_SERVER_ERROR => Some(
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "db down" })),
                )
                    .into_response(),
            ),
            MODE_INVALID_JSON => Some((StatusCode::OK, "<html>oops</html>").into_response()),
            MODE_REJECTED => Some(
                Json(json!({ "success": false, "message": "Duplicate door number" })).into_response(),
            ),
            _ => None,
        }
    }
}

async fn get_vehicles(State(stub): State<Shared>) -> Response {
    stub.hits.vehicles.fetch_add(1, Ordering::SeqCst);
    if stub.vehicles_down.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    let vehicles = stub.vehicles.lock().unwrap().clone();
    Json(Value::Array(vehicles)).into_response()
}

async fn get_inspections(State(stub): State<Shared>) -> Json<Value> {
    stub.hits.inspections.fetch_add(1, Ordering::SeqCst);
    Json(Value::Array(stub.inspections.lock().unwrap().clone()))
}

async fn get_analytics(State(stub): State<Shared>) -> Response {
    stub.hits.analytics.fetch_add(1, Ordering::SeqCst);
    if stub.analytics_down.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let total_inspections = stub.inspections.lock().unwrap().len();
    Json(json!({
        "totalVehicles": stub.vehicles.lock().unwrap().len(),
        "totalInspections": total_inspections,
        "divisionData": { "North": 1, "South": 1 },
        "inspectionStatus": { "Action Required": 1, "Not Inspected": 1 }
    }))
    .into_response()
}

async fn add_inspection(State(stub): State<Shared>, Json(body): Json<Value>) -> Response {
    stub.hits.add_inspection.fetch_add(1, Ordering::SeqCst);
    *stub.last_body.lock().unwrap() = Some(body.clone());
    if let Some(response) = stub.failure_response() {
        return response;
    }

    let mut inspections = stub.inspections.lock().unwrap();
    let inspection_id = format!("INS-{}", inspections.len() + 1);
    let mut record = body;
    record["inspectionId"] = json!(inspection_id);
    inspections.push(record);
    Json(json!({ "success": true, "inspectionId": inspection_id })).into_response()
}

async fn add_vehicle(State(stub): State<Shared>, Json(body): Json<Value>) -> Response {
    stub.hits.add_vehicle.fetch_add(1, Ordering::SeqCst);
    *stub.last_body.lock().unwrap() = Some(body.clone());
    if let Some(response) = stub.failure_response() {
        return response;
    }

    let mut vehicles = stub.vehicles.lock().unwrap();
    let id = vehicles.len() as i64 + 1;
    let mut record = body;
    record["id"] = json!(id);
    vehicles.push(record);
    Json(json!({ "success": true, "vehicleId": id })).into_response()
}

async fn update_vehicle(
    State(stub): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    stub.hits.update_vehicle.fetch_add(1, Ordering::SeqCst);
    *stub.last_body.lock().unwrap() = Some(body.clone());
    if let Some(response) = stub.failure_response() {
        return response;
    }

    let mut vehicles = stub.vehicles.lock().unwrap();
    match vehicles.iter_mut().find(|v| v["id"] == json!(id)) {
        Some(vehicle) => {
            let mut record = body;
            record["id"] = json!(id);
            *vehicle = record;
            Json(json!({ "success": true })).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Vehicle not found" })),
        )
            .into_response(),
    }
}

async fn delete_vehicle(State(stub): State<Shared>, Path(id): Path<i64>) -> Response {
    stub.hits.delete_vehicle.fetch_add(1, Ordering::SeqCst);
    if let Some(response) = stub.failure_response() {
        return response;
    }
    stub.vehicles.lock().unwrap().retain(|v| v["id"] != json!(id));
    Json(json!({ "success": true })).into_response()
}

async fn spawn_backend(stub: Shared) -> EnvironmentConfig {
    let app = Router::new()
        .route("/get_vehicles", get(get_vehicles))
        .route("/get_inspections", get(get_inspections))
        .route("/get_analytics", get(get_analytics))
        .route("/add_inspection", post(add_inspection))
        .route("/add_vehicle", post(add_vehicle))
        .route("/update_vehicle/:id", put(update_vehicle))
        .route("/delete_vehicle/:id", delete(delete_vehicle))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    EnvironmentConfig {
        api_base_url: format!("http://{}", addr),
        ..Default::default()
    }
}

async fn create_test_app() -> (Shared, Arc<dyn InspectionApi>, EnvironmentConfig) {
    let stub = Stub::seeded();
    let config = spawn_backend(stub.clone()).await;
    let api: Arc<dyn InspectionApi> = Arc::new(InspectionApiClient::new(&config).unwrap());
    (stub, api, config)
}

async fn started(api: &Arc<dyn InspectionApi>, config: &EnvironmentConfig) -> AppState {
    DashboardController::new(api.clone(), config.clone())
        .initialize()
        .await
        .unwrap()
}

fn fill_people_and_checklist(state: &mut AppState) {
    let form = &mut state.inspection_form;
    form.inspector_name = "Ana".into();
    form.inspector_id = "I-1".into();
    form.supervisor_name = "Luis".into();
    form.supervisor_id = "S-1".into();
    for item in EQUIPMENT.iter().filter(|item| !item.offroad_only) {
        form.checklist.set(item.key, Condition::Ok, "");
    }
}

#[tokio::test]
async fn test_startup_loads_all_collections() {
    let (stub, api, config) = create_test_app().await;
    let state = started(&api, &config).await;

    assert_eq!(state.vehicles.len(), 2);
    assert_eq!(state.inspections.len(), 1);
    assert_eq!(state.analytics.total_inspections, 1);
    assert_eq!(Stub::count(&stub.hits.vehicles), 1);
    assert_eq!(Stub::count(&stub.hits.inspections), 1);
    assert_eq!(Stub::count(&stub.hits.analytics), 1);

    // La última inspección manda sobre el estado propio del vehículo
    assert_eq!(
        resolve_status(&state.vehicles[0], &state.inspections),
        InspectionStatus::ActionRequired
    );
    assert_eq!(
        resolve_status(&state.vehicles[1], &state.inspections),
        InspectionStatus::NotInspected
    );
    assert_eq!(
        state.inspections[0].checklist.get("horn").unwrap().observation,
        "silent"
    );
}

#[tokio::test]
async fn test_startup_aborts_when_vehicles_fail() {
    let (stub, api, config) = create_test_app().await;
    stub.vehicles_down.store(true, Ordering::SeqCst);

    let dashboard = DashboardController::new(api.clone(), config.clone());
    let err = dashboard.initialize().await.unwrap_err();
    let notification = dashboard.startup_failure_notification(&err);

    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.message, "Failed to load vehicles");
}

#[tokio::test]
async fn test_startup_tolerates_missing_analytics() {
    let (stub, api, config) = create_test_app().await;
    stub.analytics_down.store(true, Ordering::SeqCst);

    let state = started(&api, &config).await;
    assert_eq!(state.vehicles.len(), 2);
    assert_eq!(state.analytics.total_vehicles, 0);
}

#[tokio::test]
async fn test_submit_inspection_reloads_once_and_resets() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let dashboard = DashboardController::new(api.clone(), config.clone());
    let loaded = dashboard.select_vehicle(&mut state, Some(1)).unwrap();
    assert_eq!(loaded.message, "Vehicle details loaded!");
    fill_people_and_checklist(&mut state);

    let controller = InspectionController::new(api.clone(), config.clone());
    let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let outcome = controller.submit_on(&mut state, date).await.unwrap();

    assert_eq!(outcome.notifications[0].message, "✅ Inspection submitted successfully!");
    let navigation = outcome.navigation.unwrap();
    assert_eq!(navigation.tab, Tab::Dashboard);
    assert_eq!(navigation.delay_ms, 1500);

    assert_eq!(Stub::count(&stub.hits.add_inspection), 1);
    assert_eq!(Stub::count(&stub.hits.inspections), 2);
    assert_eq!(Stub::count(&stub.hits.analytics), 2);
    assert_eq!(Stub::count(&stub.hits.vehicles), 1);

    let body = stub.last_body();
    assert_eq!(body["vehicleId"], 1);
    assert_eq!(body["doorNo"], "D-1");
    assert_eq!(body["inspectionDate"], "2024-06-02");
    assert_eq!(body["overallStatus"], "Passed");
    assert_eq!(body["issuesFound"], "0");
    assert_eq!(body["windshieldWipers_condition"], "OK");

    assert_eq!(state.selected_vehicle_id, None);
    assert_eq!(state.inspections.len(), 2);
    assert!(state.inspection_form.inspector_name.is_empty());
    assert_eq!(
        resolve_status(&state.vehicles[0], &state.inspections),
        InspectionStatus::Passed
    );
}

#[tokio::test]
async fn test_submit_without_vehicle_makes_no_request() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    fill_people_and_checklist(&mut state);

    let controller = InspectionController::new(api.clone(), config.clone());
    let err = controller.submit(&mut state).await.unwrap_err();

    assert!(matches!(
        err,
        AppError::Validation(ValidationFailure::NoVehicleSelected)
    ));
    assert_eq!(
        controller.failure_notification(&err).message,
        "Please select a vehicle first!"
    );
    assert_eq!(Stub::count(&stub.hits.add_inspection), 0);
}

#[tokio::test]
async fn test_submit_server_error_keeps_form() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    DashboardController::new(api.clone(), config.clone()).select_vehicle(&mut state, Some(1));
    fill_people_and_checklist(&mut state);
    stub.mutation_mode.store(MODE_SERVER_ERROR, Ordering::SeqCst);

    let controller = InspectionController::new(api.clone(), config.clone());
    let err = controller.submit(&mut state).await.unwrap_err();

    assert_eq!(controller.failure_notification(&err).message, "❌ Failed: db down");
    assert_eq!(state.selected_vehicle_id, Some(1));
    assert_eq!(state.inspection_form.inspector_name, "Ana");
    assert_eq!(Stub::count(&stub.hits.inspections), 1);
    assert_eq!(Stub::count(&stub.hits.analytics), 1);
}

#[tokio::test]
async fn test_invalid_json_reply_is_failure() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    DashboardController::new(api.clone(), config.clone()).select_vehicle(&mut state, Some(1));
    fill_people_and_checklist(&mut state);
    stub.mutation_mode.store(MODE_INVALID_JSON, Ordering::SeqCst);

    let controller = InspectionController::new(api.clone(), config.clone());
    let err = controller.submit(&mut state).await.unwrap_err();

    assert!(!err.is_validation());
    assert!(controller
        .failure_notification(&err)
        .message
        .starts_with("❌ Failed: "));
    assert_eq!(state.inspections.len(), 1);
}

#[tokio::test]
async fn test_add_vehicle_applies_defaults_and_reloads_everything() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let controller = VehicleController::new(api.clone(), config.clone());
    let outcome = controller
        .add(&mut state, VehicleRequest::new(" D-9 ", "P-9", "", "", ""))
        .await
        .unwrap();

    assert_eq!(outcome.notifications[0].message, "✅ Vehicle added successfully!");
    assert_eq!(outcome.response.unwrap().vehicle_id, Some(3));

    let body = stub.last_body();
    assert_eq!(body["doorNo"], "D-9");
    assert_eq!(body["division"], "General");
    assert_eq!(body["vehicleType"], "N/A");
    assert_eq!(body["vehicleSize"], "4x2");

    assert_eq!(Stub::count(&stub.hits.vehicles), 2);
    assert_eq!(Stub::count(&stub.hits.inspections), 2);
    assert_eq!(Stub::count(&stub.hits.analytics), 2);
    assert_eq!(state.vehicles.len(), 3);
}

#[tokio::test]
async fn test_add_vehicle_without_plate_makes_no_request() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let controller = VehicleController::new(api.clone(), config.clone());
    let err = controller
        .add(&mut state, VehicleRequest::new("D-9", "  ", "", "", ""))
        .await
        .unwrap_err();

    assert_eq!(
        controller.failure_notification(VehicleOperation::Add, &err).message,
        "Please enter door number and plate number"
    );
    assert_eq!(Stub::count(&stub.hits.add_vehicle), 0);
}

#[tokio::test]
async fn test_add_vehicle_rejected_by_backend() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    stub.mutation_mode.store(MODE_REJECTED, Ordering::SeqCst);

    let controller = VehicleController::new(api.clone(), config.clone());
    let err = controller
        .add(&mut state, VehicleRequest::new("D-1", "P-1", "North", "", ""))
        .await
        .unwrap_err();

    assert_eq!(
        controller.failure_notification(VehicleOperation::Add, &err).message,
        "❌ Error adding vehicle: Duplicate door number"
    );
    assert_eq!(state.vehicles.len(), 2);
}

#[tokio::test]
async fn test_update_vehicle_round_trip() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let mut request = VehicleRequest::from_vehicle(state.find_vehicle(2).unwrap());
    request.division = "East".into();

    let controller = VehicleController::new(api.clone(), config.clone());
    let outcome = controller.update(&mut state, 2, request).await.unwrap();

    assert_eq!(outcome.notifications[0].message, "✅ Vehicle updated successfully!");
    assert_eq!(Stub::count(&stub.hits.update_vehicle), 1);
    assert_eq!(stub.last_body()["vehicleSize"], "4x4-offroad");
    assert_eq!(state.find_vehicle(2).unwrap().division, "East");
}

#[tokio::test]
async fn test_update_unknown_vehicle_reports_backend_message() {
    let (_stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let controller = VehicleController::new(api.clone(), config.clone());
    let err = controller
        .update(&mut state, 99, VehicleRequest::new("D-99", "P-99", "", "", ""))
        .await
        .unwrap_err();

    assert_eq!(
        controller.failure_notification(VehicleOperation::Update, &err).message,
        "❌ Error updating vehicle: Vehicle not found"
    );
}

#[tokio::test]
async fn test_declined_delete_makes_no_request() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;

    let prompts = Mutex::new(Vec::new());
    let decline = |prompt: &str| {
        prompts.lock().unwrap().push(prompt.to_string());
        false
    };

    let controller = VehicleController::new(api.clone(), config.clone());
    let outcome = controller.delete(&mut state, 1, &decline).await.unwrap();

    assert!(outcome.cancelled);
    assert!(outcome.notifications.is_empty());
    assert_eq!(Stub::count(&stub.hits.delete_vehicle), 0);
    assert_eq!(
        prompts.lock().unwrap()[0],
        "Are you sure you want to delete \"D-1 - P-1\"?\n\nThis action cannot be undone!"
    );
    assert_eq!(state.vehicles.len(), 2);
}

#[tokio::test]
async fn test_confirmed_delete_clears_selection() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    DashboardController::new(api.clone(), config.clone()).select_vehicle(&mut state, Some(2));

    let controller = VehicleController::new(api.clone(), config.clone());
    let outcome = controller
        .delete(&mut state, 2, &|_: &str| true)
        .await
        .unwrap();

    assert_eq!(outcome.notifications[0].message, "✅ Vehicle deleted successfully!");
    assert_eq!(Stub::count(&stub.hits.delete_vehicle), 1);
    assert_eq!(state.selected_vehicle_id, None);
    assert_eq!(state.vehicles.len(), 1);
}

#[tokio::test]
async fn test_failed_delete_uses_fixed_message() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    stub.mutation_mode.store(MODE_SERVER_ERROR, Ordering::SeqCst);

    let controller = VehicleController::new(api.clone(), config.clone());
    let err = controller
        .delete(&mut state, 1, &|_: &str| true)
        .await
        .unwrap_err();

    assert_eq!(
        controller.failure_notification(VehicleOperation::Delete, &err).message,
        "❌ Error deleting vehicle"
    );
    assert_eq!(state.vehicles.len(), 2);
}

#[tokio::test]
async fn test_delete_reloads_everything_even_when_vehicles_fail() {
    let (stub, api, config) = create_test_app().await;
    let mut state = started(&api, &config).await;
    stub.vehicles_down.store(true, Ordering::SeqCst);

    let controller = VehicleController::new(api.clone(), config.clone());
    let outcome = controller
        .delete(&mut state, 2, &|_: &str| true)
        .await
        .unwrap();

    assert_eq!(Stub::count(&stub.hits.delete_vehicle), 1);
    assert_eq!(Stub::count(&stub.hits.vehicles), 2);
    assert_eq!(Stub::count(&stub.hits.inspections), 2);
    assert_eq!(Stub::count(&stub.hits.analytics), 2);

    let messages: Vec<&str> = outcome.notifications.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["✅ Vehicle deleted successfully!", "Failed to load vehicles"]
    );
    // El snapshot de vehículos anterior se conserva
    assert_eq!(state.vehicles.len(), 2);
}
