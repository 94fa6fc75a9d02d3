use axum::Json;

use crate::dtos::MessageResponse;

pub async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from FastAPI Backend!"))
}

pub async fn hello() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the backend API!"))
}
