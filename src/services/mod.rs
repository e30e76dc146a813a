//! Services module
//!
//! Este módulo contiene la lógica de negocio del dashboard: el motor de
//! agregación, la proyección a view models y las notificaciones.

pub mod aggregation_service;
pub mod notification_service;
pub mod render_service;

pub use aggregation_service::*;
pub use notification_service::*;
