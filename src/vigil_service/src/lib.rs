pub mod telemetry;
mod vigil_service;

pub use vigil_service::VigilService;
