use actix_web::{http::StatusCode, HttpResponse};
use registration::{ErrorMap, ErrorResponse};
use tracing::{error, info};
use uuid::Uuid;

/// Helper function for bad request errors
pub fn handle_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorBadRequest(format!("{}: {}", msg, e))
}

/// Helper function for server errors
pub fn handle_server_error<E: std::fmt::Display>(msg: &str, e: E) -> actix_web::Error {
    error!("{}: {}", msg, e);
    actix_web::error::ErrorInternalServerError(format!("{}: {}", msg, e))
}

/// Helper function for unknown draft ids
pub fn draft_not_found(id: &Uuid) -> actix_web::Error {
    info!(draft_id = %id, "Draft not found");
    actix_web::error::ErrorNotFound(format!("Draft {} not found", id))
}

/// 422 with the field messages as JSON
pub fn validation_failed(errors: ErrorMap) -> HttpResponse {
    HttpResponse::build(StatusCode::UNPROCESSABLE_ENTITY).json(ErrorResponse { errors })
}
