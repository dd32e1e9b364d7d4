//! Browser-facing registration page
//!
//! The page keeps its values in a draft session, carried between posts in a
//! hidden `draft_id` input, so a re-rendered form never loses the stored image.

use crate::handlers::drafts::{submit_session, SessionSubmit};
use crate::handlers::error::{handle_error, handle_server_error};
use crate::handlers::registration_form::RegistrationForm;
use crate::state::AppState;
use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse, Result as ActixResult};
use common::SubmissionReceipt;
use minijinja::{context, Environment};
use registration::{
    Course, Designation, DraftView, FormState, Gender, ImageSelection, RegistrationRecord,
};
use std::sync::OnceLock;
use tracing::info;
use uuid::Uuid;

static TEMPLATES: OnceLock<Environment<'static>> = OnceLock::new();

fn templates() -> &'static Environment<'static> {
    TEMPLATES.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template("layout.html", include_str!("templates/layout.html"))
            .expect("layout template should be valid");
        env.add_template("form.html", include_str!("templates/form.html"))
            .expect("form template should be valid");
        env.add_template("registered.html", include_str!("templates/registered.html"))
            .expect("registered template should be valid");
        env
    })
}

/// The form with the entered values and any messages
pub fn render_form(draft_id: Option<Uuid>, view: &DraftView) -> Result<String, minijinja::Error> {
    templates().get_template("form.html")?.render(context! {
        draft_id => draft_id.map(|id| id.to_string()),
        draft => &view.draft,
        errors => &view.errors,
        designations => Designation::ALL,
        genders => Gender::ALL,
        courses => Course::ALL,
    })
}

pub fn render_success(
    receipt: &SubmissionReceipt,
    record: &RegistrationRecord,
) -> Result<String, minijinja::Error> {
    templates()
        .get_template("registered.html")?
        .render(context! { receipt, record })
}

fn html(status: StatusCode, body: Result<String, minijinja::Error>) -> ActixResult<HttpResponse> {
    let body = body.map_err(|e| handle_server_error("Failed to render page", e))?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[get("/")]
pub async fn form_page() -> ActixResult<HttpResponse> {
    html(StatusCode::OK, render_form(None, &FormState::new().view()))
}

/// Browser form submission; invalid input re-renders the form with messages
#[post("/")]
pub async fn submit_page(
    form: MultipartForm<RegistrationForm>,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let form = form.into_inner();
    let requested = form
        .draft_id()
        .map_err(|e| handle_error("Malformed registration form", e))?;

    // an expired or unknown session starts over with what this post carries
    let id = match requested.filter(|id| state.with_draft(id, |_| ()).is_some()) {
        Some(id) => id,
        None => state.create_draft().0,
    };
    info!(draft_id = %id, resumed = (requested == Some(id)), "POST / - Form submitted");

    let picked = state
        .with_draft(&id, |session| form.apply_to(session))
        .ok_or_else(|| actix_web::error::ErrorGone("Draft expired while submitting"))?
        .map_err(|e| handle_error("Malformed registration form", e))?;

    // a refused file is never registered, even when an earlier image is still stored
    if let Some((image, ImageSelection::Rejected(reason))) = picked {
        info!(draft_id = %id, image = ?image.file_name, reason, "POST / - Image rejected");
        let view = state
            .with_draft(&id, |session| {
                session.validate(&state.directory);
                session.select_image(image);
                session.view()
            })
            .ok_or_else(|| actix_web::error::ErrorGone("Draft expired while submitting"))?;
        return html(StatusCode::UNPROCESSABLE_ENTITY, render_form(Some(id), &view));
    }

    match submit_session(&state, &id).await? {
        SessionSubmit::Accepted(receipt, record) => {
            state.remove_draft(&id);
            info!(
                draft_id = %id,
                registration_id = %receipt.registration_id,
                "POST / - Registration accepted"
            );
            html(StatusCode::OK, render_success(&receipt, &record))
        }
        SessionSubmit::Rejected(errors) => {
            info!(draft_id = %id, errors = errors.len(), "POST / - Validation failed");
            let view = state
                .with_draft(&id, |session| session.view())
                .ok_or_else(|| actix_web::error::ErrorGone("Draft expired while submitting"))?;
            html(StatusCode::UNPROCESSABLE_ENTITY, render_form(Some(id), &view))
        }
        SessionSubmit::AlreadySubmitted => Err(actix_web::error::ErrorConflict(format!(
            "Draft {} was already submitted",
            id
        ))),
    }
}
