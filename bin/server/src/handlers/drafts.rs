//! Draft sessions: the form state held server-side while the user edits it

use crate::handlers::error::{draft_not_found, handle_error, handle_server_error, validation_failed};
use crate::handlers::registration_form::{image_ref, ImageUpload};
use crate::state::AppState;
use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web, HttpResponse, Result as ActixResult};
use common::{CourseToggle, FieldUpdate, SubmissionReceipt};
use registration::{
    Course, DraftView, ErrorMap, Field, FormStatus, ImageSelection, RegistrationRecord,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// A draft together with its id
#[derive(Serialize, Deserialize, Debug)]
pub struct DraftResponse {
    pub draft_id: Uuid,
    #[serde(flatten)]
    pub view: DraftView,
}

fn respond(draft_id: Uuid, view: DraftView) -> HttpResponse {
    HttpResponse::Ok().json(DraftResponse { draft_id, view })
}

#[post("/drafts")]
pub async fn create_draft(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let (draft_id, form) = state.create_draft();
    info!(draft_id = %draft_id, open = state.draft_count(), "POST /drafts - Draft created");

    Ok(HttpResponse::Created().json(DraftResponse {
        draft_id,
        view: form.view(),
    }))
}

#[get("/drafts/{id}")]
pub async fn get_draft(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let view = state
        .with_draft(&id, |form| form.view())
        .ok_or_else(|| draft_not_found(&id))?;
    Ok(respond(id, view))
}

/// Text, select and radio changes
#[put("/drafts/{id}/fields/{field}")]
pub async fn set_field(
    path: web::Path<(Uuid, String)>,
    body: web::Json<FieldUpdate>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (id, field) = path.into_inner();
    let field: Field = field
        .parse()
        .map_err(|e| handle_error("Cannot update draft", e))?;

    let view = state
        .with_draft(&id, |form| {
            form.set_text(field, &body.value)
                .map(|()| form.view())
        })
        .ok_or_else(|| draft_not_found(&id))?
        .map_err(|e| handle_error("Cannot update draft", e))?;

    Ok(respond(id, view))
}

/// Checkbox changes
#[put("/drafts/{id}/courses/{course}")]
pub async fn toggle_course(
    path: web::Path<(Uuid, String)>,
    body: web::Json<CourseToggle>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (id, course) = path.into_inner();
    let course: Course = course
        .parse()
        .map_err(|e| handle_error("Cannot update draft", e))?;

    let view = state
        .with_draft(&id, |form| {
            form.toggle_course(course, body.checked);
            form.view()
        })
        .ok_or_else(|| draft_not_found(&id))?;

    Ok(respond(id, view))
}

/// File picker changes. A rejected file still answers 200; the message is in `errors.image`.
#[put("/drafts/{id}/image")]
pub async fn select_image(
    path: web::Path<Uuid>,
    form: MultipartForm<ImageUpload>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let image = image_ref(&form.image)
        .map_err(|e| handle_error("Invalid image upload", e))?
        .ok_or_else(|| actix_web::error::ErrorBadRequest("No image file was uploaded"))?;
    let file_name = image.file_name.clone();

    let (selection, view) = state
        .with_draft(&id, |draft| {
            let selection = draft.select_image(image);
            (selection, draft.view())
        })
        .ok_or_else(|| draft_not_found(&id))?;

    match selection {
        ImageSelection::Accepted => {
            info!(draft_id = %id, image = ?file_name, "PUT /drafts/image - Image accepted")
        }
        ImageSelection::Rejected(reason) => {
            info!(draft_id = %id, image = ?file_name, reason, "PUT /drafts/image - Image rejected")
        }
    }

    Ok(respond(id, view))
}

/// Result of submitting a draft session
pub enum SessionSubmit {
    Accepted(SubmissionReceipt, RegistrationRecord),
    Rejected(ErrorMap),
    /// The draft was already handed to the sink; nothing was sent again
    AlreadySubmitted,
}

/// Validate the session's draft and, when clean, hand the record to the sink.
///
/// The draft is marked submitted under the lock, so a concurrent or repeated
/// submit sees `AlreadySubmitted` instead of registering twice.
pub async fn submit_session(state: &AppState, id: &Uuid) -> ActixResult<SessionSubmit> {
    let outcome = state
        .with_draft(id, |form| {
            if form.status() == FormStatus::Submitted {
                None
            } else {
                Some(form.submit(&state.directory))
            }
        })
        .ok_or_else(|| draft_not_found(id))?;

    let record = match outcome {
        None => return Ok(SessionSubmit::AlreadySubmitted),
        Some(Ok(record)) => record,
        Some(Err(errors)) => return Ok(SessionSubmit::Rejected(errors)),
    };

    // the draft lock is released before handing off to the sink
    match state.sink.submit(&record).await {
        Ok(receipt) => Ok(SessionSubmit::Accepted(receipt, record)),
        Err(e) => {
            state.with_draft(id, |form| form.reopen());
            Err(handle_server_error("Failed to submit registration", e))
        }
    }
}

#[post("/drafts/{id}/submit")]
pub async fn submit_draft(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    match submit_session(&state, &id).await? {
        SessionSubmit::Accepted(receipt, _) => {
            info!(
                draft_id = %id,
                registration_id = %receipt.registration_id,
                "POST /drafts/submit - Registration accepted"
            );
            Ok(HttpResponse::Created().json(receipt))
        }
        SessionSubmit::Rejected(errors) => {
            info!(draft_id = %id, errors = errors.len(), "POST /drafts/submit - Validation failed");
            Ok(validation_failed(errors))
        }
        SessionSubmit::AlreadySubmitted => {
            info!(draft_id = %id, "POST /drafts/submit - Draft already submitted");
            Err(actix_web::error::ErrorConflict(format!(
                "Draft {} was already submitted",
                id
            )))
        }
    }
}

/// Remove the picked image
#[delete("/drafts/{id}/image")]
pub async fn clear_image(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let view = state
        .with_draft(&id, |form| {
            form.clear_image();
            form.view()
        })
        .ok_or_else(|| draft_not_found(&id))?;
    info!(draft_id = %id, "DELETE /drafts/image - Image cleared");
    Ok(respond(id, view))
}

#[delete("/drafts/{id}")]
pub async fn discard_draft(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    if !state.remove_draft(&id) {
        return Err(draft_not_found(&id));
    }
    info!(draft_id = %id, "DELETE /drafts - Draft discarded");
    Ok(HttpResponse::NoContent().finish())
}
