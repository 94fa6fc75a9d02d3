pub mod metrics;
pub mod tracing;

pub use metrics::metrics_middleware;
pub use tracing::{REQUEST_ID_HEADER, extract_request_id, request_id_middleware};
