//! Modelos del sistema
//!
//! Este módulo contiene los registros que entrega el backend de inspecciones:
//! vehículos, inspecciones y el snapshot de analytics.

pub mod analytics;
pub mod inspection;
pub mod vehicle;

pub use analytics::AnalyticsSnapshot;
pub use inspection::{Checklist, Condition, Equipment, EquipmentCheck, Inspection, EQUIPMENT};
pub use vehicle::{InspectionStatus, Vehicle, VehicleSize};
