//! Vehicle Inspection Dashboard
//!
//! Cliente del backend de inspecciones de flota: carga vehículos,
//! inspecciones y analytics, agrega el estado efectivo de cada vehículo,
//! proyecta los view models del dashboard y gestiona el envío de
//! inspecciones y el CRUD de vehículos.

pub mod client;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
