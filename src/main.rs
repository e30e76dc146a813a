use anyhow::Result;
use dotenvy::dotenv;
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{error, info};

use vehicle_inspection_dashboard::client::{InspectionApi, InspectionApiClient};
use vehicle_inspection_dashboard::config::environment::EnvironmentConfig;
use vehicle_inspection_dashboard::controllers::dashboard_controller::{switch_tab, toggle_division};
use vehicle_inspection_dashboard::controllers::vehicle_controller::VehicleOperation;
use vehicle_inspection_dashboard::controllers::{
    ActionOutcome, DashboardController, InspectionController, VehicleController,
};
use vehicle_inspection_dashboard::dto::{InspectionForm, VehicleRequest};
use vehicle_inspection_dashboard::services::render_service::{
    history_rows, inspection_detail, management_rows, vehicle_options,
};
use vehicle_inspection_dashboard::state::{AppState, Tab};
use vehicle_inspection_dashboard::utils::errors::{not_found_error, AppError};

const USAGE: &str = "Uso: inspection-dashboard [comando]

Comandos:
  dashboard                                   Vista del dashboard (por defecto)
  history                                     Historial de inspecciones
  vehicles                                    Tabla de gestión de vehículos
  options                                     Opciones del selector de vehículo
  show <inspectionId>                         Detalle de una inspección
  division <nombre>                           Dashboard filtrado por división
  inspect <vehicleId> <form.json>             Enviar inspección desde un formulario JSON
  add-vehicle <door> <plate> [div] [type] [size]
  update-vehicle <id> <door> <plate> [div] [type] [size]
  delete-vehicle <id> [--yes]";

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();

    info!("🚗 Vehicle Inspection Dashboard");
    info!("================================");
    info!("🌐 Backend: {}", config.api_base_url);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("dashboard");
    if matches!(command, "help" | "--help" | "-h") {
        println!("{}", USAGE);
        return Ok(());
    }

    let api: Arc<dyn InspectionApi> = Arc::new(InspectionApiClient::new(&config)?);
    let dashboard = DashboardController::new(api.clone(), config.clone());

    let mut state = match dashboard.initialize().await {
        Ok(state) => state,
        Err(e) => {
            print_json(&dashboard.startup_failure_notification(&e))?;
            return Err(e.into());
        }
    };

    match command {
        "dashboard" => print_json(&dashboard.render(&state))?,
        "history" => {
            switch_tab(&mut state, Tab::History);
            print_json(&history_rows(&state))?
        }
        "vehicles" => {
            switch_tab(&mut state, Tab::Vehicles);
            print_json(&management_rows(&state))?
        }
        "options" => {
            switch_tab(&mut state, Tab::Inspection);
            print_json(&vehicle_options(&state))?
        }
        "show" => {
            let inspection_id = arg(&args, 1, "inspectionId")?;
            let inspection = state
                .find_inspection(inspection_id)
                .ok_or_else(|| not_found_error("Inspection", inspection_id))?;
            print_json(&inspection_detail(inspection))?
        }
        "division" => {
            toggle_division(&mut state, arg(&args, 1, "division")?);
            print_json(&dashboard.render(&state))?
        }
        "inspect" => {
            let vehicle_id = parse_id(arg(&args, 1, "vehicleId")?)?;
            let form = InspectionForm::from_json_file(arg(&args, 2, "form.json")?)?;

            switch_tab(&mut state, Tab::Inspection);
            state.inspection_form = form;
            if let Some(notification) = dashboard.select_vehicle(&mut state, Some(vehicle_id)) {
                print_json(&notification)?;
            }

            let controller = InspectionController::new(api.clone(), config.clone());
            match controller.submit(&mut state).await {
                Ok(outcome) => finish(&mut state, outcome).await?,
                Err(e) => print_json(&controller.failure_notification(&e))?,
            }
        }
        "add-vehicle" => {
            let request = vehicle_request(&args, 1)?;
            let controller = VehicleController::new(api.clone(), config.clone());
            match controller.add(&mut state, request).await {
                Ok(outcome) => finish(&mut state, outcome).await?,
                Err(e) => print_json(&controller.failure_notification(VehicleOperation::Add, &e))?,
            }
        }
        "update-vehicle" => {
            let vehicle_id = parse_id(arg(&args, 1, "id")?)?;
            let request = vehicle_request(&args, 2)?;
            let controller = VehicleController::new(api.clone(), config.clone());
            match controller.update(&mut state, vehicle_id, request).await {
                Ok(outcome) => finish(&mut state, outcome).await?,
                Err(e) => print_json(&controller.failure_notification(VehicleOperation::Update, &e))?,
            }
        }
        "delete-vehicle" => {
            let vehicle_id = parse_id(arg(&args, 1, "id")?)?;
            let assume_yes = args.iter().any(|a| a == "--yes");
            let controller = VehicleController::new(api.clone(), config.clone());

            let result = if assume_yes {
                controller.delete(&mut state, vehicle_id, &|_: &str| true).await
            } else {
                controller.delete(&mut state, vehicle_id, &confirm_on_stdin).await
            };
            match result {
                Ok(outcome) => finish(&mut state, outcome).await?,
                Err(e) => print_json(&controller.failure_notification(VehicleOperation::Delete, &e))?,
            }
        }
        other => {
            error!("❌ Comando desconocido: {}", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

/// Imprimir el resultado y aplicar la navegación diferida
async fn finish(state: &mut AppState, outcome: ActionOutcome) -> Result<()> {
    print_json(&outcome)?;
    if let Some(navigation) = outcome.navigation {
        tokio::time::sleep(navigation.delay()).await;
        switch_tab(state, navigation.tab);
        info!("↪️ Pestaña activa: {}", state.active_tab);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str, AppError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| AppError::Config(format!("falta el argumento <{}>\n\n{}", name, USAGE)))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("id inválido '{}'", raw)))
}

fn vehicle_request(args: &[String], start: usize) -> Result<VehicleRequest, AppError> {
    let field = |offset: usize| args.get(start + offset).map(String::as_str).unwrap_or("");
    Ok(VehicleRequest::new(
        arg(args, start, "door")?,
        arg(args, start + 1, "plate")?,
        field(2),
        field(3),
        field(4),
    ))
}

fn confirm_on_stdin(prompt: &str) -> bool {
    eprint!("{}\n[y/N]: ", prompt);
    if io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
