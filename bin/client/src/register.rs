use crate::constants::REGISTER_ENDPOINT;
use anyhow::{Context, Result};
use common::file_utils;
use common::SubmissionReceipt;
use log::{debug, info};
use registration::{
    image_extension_error, Course, Designation, ErrorMap, ErrorResponse, Field, Gender, ImageRef,
};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the registration form asks for, as given on the command line.
///
/// Missing values are sent as empty so the server reports them with its own messages.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: Option<Designation>,
    pub gender: Option<Gender>,
    pub course: Vec<Course>,
    pub image: Option<PathBuf>,
}

/// What the server made of a registration
#[derive(Debug)]
pub enum RegisterOutcome {
    Accepted(SubmissionReceipt),
    Rejected(ErrorMap),
}

fn content_type_for(file_name: &str) -> &'static str {
    let image = ImageRef::named(file_name);
    match image.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        Some(ext) if ext.eq_ignore_ascii_case("jpg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

fn image_file_name(path: &Path) -> Result<String> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .unwrap_or_default();
    file_utils::validate_upload_name(&name)
        .map_err(|e| anyhow::anyhow!("{}: {}", e.message(), path.display()))?;
    Ok(name)
}

impl RegistrationRequest {
    /// The image type rule applied before anything is sent
    pub fn precheck(&self) -> Result<ErrorMap> {
        let mut errors = ErrorMap::new();
        if let Some(path) = &self.image {
            let name = image_file_name(path)?;
            if let Some(message) = image_extension_error(&ImageRef::named(name)) {
                errors.insert(Field::Image, message);
            }
        }
        Ok(errors)
    }

    fn build_multipart_form(&self) -> Result<multipart::Form> {
        let mut form = multipart::Form::new()
            .text("name", self.name.clone())
            .text("email", self.email.clone())
            .text("mobile", self.mobile.clone())
            .text(
                "designation",
                self.designation.map(|d| d.as_str()).unwrap_or_default(),
            )
            .text("gender", self.gender.map(|g| g.as_str()).unwrap_or_default());

        for course in &self.course {
            form = form.text("course", course.as_str());
        }

        if let Some(path) = &self.image {
            let name = image_file_name(path)?;
            let content =
                fs::read(path).with_context(|| format!("Failed to read image: {:?}", path))?;
            debug!("Attaching {} ({} bytes)", name, content.len());
            let part = multipart::Part::bytes(content)
                .file_name(name.clone())
                .mime_str(content_type_for(&name))?;
            form = form.part("image", part);
        }

        Ok(form)
    }

    /// Send the form to the server
    pub fn submit(&self, server: &str) -> Result<RegisterOutcome> {
        let errors = self.precheck()?;
        if !errors.is_empty() {
            info!("Image rejected before upload");
            return Ok(RegisterOutcome::Rejected(errors));
        }

        let form = self.build_multipart_form()?;
        let url = format!("{}{}", server.trim_end_matches('/'), REGISTER_ENDPOINT);
        info!("Submitting registration for {} to {}", self.email, url);

        let response = Client::new()
            .post(&url)
            .multipart(form)
            .send()
            .context("Failed to connect to server")?;

        let status = response.status();
        let body = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        interpret_response(status, &body)
    }
}

/// 201 carries a receipt, 422 the per-field messages; anything else is an error
pub fn interpret_response(status: StatusCode, body: &str) -> Result<RegisterOutcome> {
    match status {
        StatusCode::CREATED => {
            let receipt: SubmissionReceipt =
                serde_json::from_str(body).context("Failed to parse submission receipt")?;
            Ok(RegisterOutcome::Accepted(receipt))
        }
        StatusCode::UNPROCESSABLE_ENTITY => {
            let rejected: ErrorResponse =
                serde_json::from_str(body).context("Failed to parse validation errors")?;
            Ok(RegisterOutcome::Rejected(rejected.errors))
        }
        _ => anyhow::bail!("Registration failed: {} - {}", status, body),
    }
}
