use serde::{Deserialize, Serialize};

/// Collection holding notes.
pub const NOTE_COLLECTION: &str = "note";

/// A note as submitted by clients and persisted by the store.
///
/// The store adds `_id`, `created_at` and `updated_at` on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}
