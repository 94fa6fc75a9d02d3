use axum::{extract::State, Json};

use crate::services::{ProbeReport, StoreAvailability};
use crate::startup::AppState;

/// Report whether the store is reachable. Always answers 200; failures are
/// folded into the report.
#[tracing::instrument(skip(state))]
pub async fn test_database(State(state): State<AppState>) -> Json<ProbeReport> {
    let availability = StoreAvailability::check(&state.store).await;
    Json(ProbeReport::new(&availability, &state.config.database))
}
