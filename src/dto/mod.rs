pub mod api_dto;
pub mod inspection_form;
pub mod vehicle_dto;

pub use api_dto::ApiResponse;
pub use inspection_form::{InspectionForm, RawFormFields, VehicleBlock};
pub use vehicle_dto::VehicleRequest;
