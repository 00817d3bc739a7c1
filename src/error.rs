use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portfolio_contact::ContactResponse;
use portfolio_notification::MailError;
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields.";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] portfolio_contact::Error),

    #[error("Delivery error: {0}")]
    Delivery(#[from] MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            AppError::InvalidBody(rejection) => {
                tracing::warn!(error = %rejection, "Rejected contact body");
                (StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE)
            }
            AppError::Validation(e) => {
                tracing::warn!(missing = ?e.missing_fields(), "Contact form incomplete");
                (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
            }
            AppError::Delivery(e) => {
                tracing::error!(error = %e, "Error while sending email");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
        };

        (status_code, Json(ContactResponse::failure(message))).into_response()
    }
}
