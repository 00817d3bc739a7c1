use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use portfolio_contact::{ContactResponse, ContactSubmission};

use crate::{error::AppError, routes::AppState};

/// POST /api/send-contact
pub async fn send_contact(
    State(app_state): State<AppState>,
    input: Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(submission) = input?;
    let outcome = app_state.relay.relay(&submission).await?;

    Ok(Json(ContactResponse::success(outcome.message())))
}
