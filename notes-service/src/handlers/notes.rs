use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use mongodb::bson::doc;

use crate::dtos::{sort_newest_first, CreateNoteResponse, ListNotesQuery, NoteResponse};
use crate::models::{Note, NOTE_COLLECTION};
use crate::services::{record_note_created, record_notes_listed};
use crate::startup::AppState;
use service_core::error::AppError;

/// Malformed bodies are answered with 422 and a JSON `detail`.
#[tracing::instrument(skip(state, payload))]
pub async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<Note>, JsonRejection>,
) -> Result<Json<CreateNoteResponse>, AppError> {
    let Json(note) = payload?;
    let id = state.store.create_document(NOTE_COLLECTION, &note).await?;

    record_note_created();
    tracing::info!(note_id = %id, "Note created");

    Ok(Json(CreateNoteResponse { id }))
}

#[tracing::instrument(skip(state))]
pub async fn list_notes(
    State(state): State<AppState>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let Query(query) = query?;
    let documents = state
        .store
        .get_documents(NOTE_COLLECTION, doc! {}, query.limit)
        .await?;

    let mut notes: Vec<NoteResponse> = documents.iter().map(NoteResponse::from_document).collect();
    sort_newest_first(&mut notes);

    record_notes_listed(notes.len());

    Ok(Json(notes))
}
