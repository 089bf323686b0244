pub mod aggregate;
pub mod controller;
pub mod fixture;
pub mod models;
pub mod source;

pub use controller::{ResourceController, ResourceState};
pub use fixture::Fixture;
pub use models::{
    DashboardKpis, DashboardSnapshot, EtlExecution, ExecutionStatus, StatusSlice, TimeSeriesPoint,
    TriggerReceipt,
};
pub use source::{DataSource, SourceError};
