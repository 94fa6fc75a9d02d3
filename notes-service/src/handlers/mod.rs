//! HTTP handlers for notes-service.

pub mod general;
pub mod health;
pub mod notes;
pub mod probe;

pub use general::{hello, read_root};
pub use health::{health_check, metrics_endpoint, readiness_check};
pub use notes::{create_note, list_notes};
pub use probe::test_database;
