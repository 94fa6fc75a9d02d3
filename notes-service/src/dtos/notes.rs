use crate::services::store::id_to_string;
use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for ListNotesQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// A stored note as returned by `GET /notes`.
///
/// `author` and `created_at` serialize as `null` when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteResponse {
    pub id: String,
    pub text: String,
    pub author: Option<String>,
    pub created_at: Option<String>,
}

impl NoteResponse {
    /// Shape a raw document, defaulting fields that are missing or of the
    /// wrong type.
    pub fn from_document(document: &Document) -> Self {
        let id = document.get("_id").map(id_to_string).unwrap_or_default();

        let text = match document.get("text") {
            Some(Bson::String(s)) => s.clone(),
            _ => String::new(),
        };

        let author = match document.get("author") {
            Some(Bson::String(s)) => Some(s.clone()),
            _ => None,
        };

        let created_at = match document.get("created_at") {
            Some(Bson::DateTime(dt)) => Some(format_timestamp(dt.to_chrono())),
            _ => None,
        };

        Self {
            id,
            text,
            author,
            created_at,
        }
    }
}

/// ISO-8601 without offset; microseconds only when non-zero.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
    match dt.timestamp_subsec_micros() {
        0 => base,
        micros => format!("{}.{:06}", base, micros),
    }
}

/// Newest first by the `created_at` string; notes without one sort last.
///
/// The comparison is lexical on the rendered timestamp and the sort is stable.
pub fn sort_newest_first(notes: &mut [NoteResponse]) {
    notes.sort_by(|a, b| {
        let a = a.created_at.as_deref().unwrap_or("");
        let b = b.created_at.as_deref().unwrap_or("");
        b.cmp(a)
    });
}
