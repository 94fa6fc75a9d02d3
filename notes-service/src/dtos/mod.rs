pub mod general;
pub mod notes;

pub use general::MessageResponse;
pub use notes::{sort_newest_first, CreateNoteResponse, ListNotesQuery, NoteResponse};
