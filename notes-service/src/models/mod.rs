pub mod note;

pub use note::{Note, NOTE_COLLECTION};
