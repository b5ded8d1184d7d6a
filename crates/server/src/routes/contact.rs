use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::{
    error::AppError,
    services::contact::{ContactError, ContactRequest},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(send_message))
}

async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Response {
    match state.contact.save_message(body).await {
        Ok(saved) => {
            tracing::info!(message_id = %saved.id, "Contact message saved");
            Json(saved).into_response()
        }
        Err(ContactError::Invalid(errors)) => AppError::Fields(errors).into_response(),
        Err(ContactError::Database(e)) => {
            tracing::error!("Error saving contact message: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": format!("Failed to save message: {e}") })),
            )
                .into_response()
        }
    }
}
