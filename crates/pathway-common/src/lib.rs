pub mod api;
pub mod execution_context;
pub mod telemetry;

pub use api::{
    json_type_name, Envelope, ErrorBody, HealthStatus, ProcessRequest, ProcessResult,
    QueryRequest, QueryResult, ServiceMode,
};
pub use execution_context::ExecutionContext;
