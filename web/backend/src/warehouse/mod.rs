pub mod queries;
pub mod service;

pub use queries::WarehouseSchema;
pub use service::{ProfileReport, ProfilingService, SnowflakeClient, WarehouseBackend};
