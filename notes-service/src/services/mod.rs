pub mod metrics;
pub mod probe;
pub mod store;

pub use metrics::{get_metrics, init_metrics, record_note_created, record_notes_listed};
pub use probe::{ProbeReport, StoreAvailability};
pub use store::{DocumentStore, StoreError};
