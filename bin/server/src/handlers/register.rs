use crate::handlers::error::{handle_error, handle_server_error, validation_failed};
use crate::handlers::registration_form::RegistrationForm;
use crate::state::AppState;
use actix_multipart::form::MultipartForm;
use actix_web::{post, web, HttpResponse, Result as ActixResult};
use common::SubmissionReceipt;
use registration::{validate_record, ErrorMap, RegistrationDraft, RegistrationRecord};
use tracing::info;

/// Result of running a complete draft through validation and the sink
pub enum Outcome {
    Accepted(SubmissionReceipt, RegistrationRecord),
    Rejected(ErrorMap),
}

/// Validate the draft and forward it to the sink when nothing is wrong
pub async fn process_registration(
    state: &AppState,
    draft: &RegistrationDraft,
) -> ActixResult<Outcome> {
    let record = match validate_record(draft, &state.directory) {
        Ok(record) => record,
        Err(errors) => {
            info!(errors = errors.len(), "Registration rejected by validation");
            return Ok(Outcome::Rejected(errors));
        }
    };

    let receipt = state
        .sink
        .submit(&record)
        .await
        .map_err(|e| handle_server_error("Failed to submit registration", e))?;

    info!(
        registration_id = %receipt.registration_id,
        email = ?record.email,
        "Registration accepted"
    );

    Ok(Outcome::Accepted(receipt, record))
}

/// Submit a complete registration form (multipart/form-data)
#[post("/register")]
pub async fn register(
    form: MultipartForm<RegistrationForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let draft = form
        .into_inner()
        .into_draft()
        .map_err(|e| handle_error("Malformed registration form", e))?;

    info!(
        email = ?draft.email,
        image = ?draft.image.as_ref().map(|i| i.file_name.as_str()),
        "POST /register - Request received"
    );

    match process_registration(&state, &draft).await? {
        Outcome::Accepted(receipt, _) => Ok(HttpResponse::Created().json(receipt)),
        Outcome::Rejected(errors) => Ok(validation_failed(errors)),
    }
}
