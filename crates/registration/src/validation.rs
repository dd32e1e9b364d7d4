//! Field validation rules
//!
//! Every rule runs on every pass; one field's failure never hides another
//! field's message. At most one message is reported per field.

use crate::directory::EmailDirectory;
use crate::draft::{Field, ImageRef, RegistrationDraft, RegistrationRecord};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email is invalid";
pub const EMAIL_TAKEN: &str = "This email is already registered";
pub const MOBILE_REQUIRED: &str = "Mobile number is required";
pub const MOBILE_INVALID: &str = "Mobile number must be 10 digits";
pub const DESIGNATION_REQUIRED: &str = "Designation is required";
pub const GENDER_REQUIRED: &str = "Gender is required";
pub const COURSE_REQUIRED: &str = "Select at least one course";
pub const IMAGE_REQUIRED: &str = "Image is required";
pub const IMAGE_TYPE_INVALID: &str = "Only JPG and PNG files are allowed";

/// Accepted image extensions, compared case-insensitively
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    // Unanchored: somewhere in the value there must be `x@y.z` without whitespace
    EMAIL_REGEX.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

fn mobile_regex() -> &'static Regex {
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("mobile pattern compiles"))
}

/// Field name to human-readable message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|s| s.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<(Field, String)> for ErrorMap {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Body of a rejected submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: ErrorMap,
}

/// The image type rule, shared by file selection and full validation.
pub fn image_extension_error(image: &ImageRef) -> Option<&'static str> {
    let allowed = image.extension().is_some_and(|ext| {
        ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    });
    (!allowed).then_some(IMAGE_TYPE_INVALID)
}

fn email_error(email: &str, directory: &dyn EmailDirectory) -> Option<&'static str> {
    if email.is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !email_regex().is_match(email) {
        Some(EMAIL_INVALID)
    } else if directory.email_exists(email) {
        Some(EMAIL_TAKEN)
    } else {
        None
    }
}

fn mobile_error(mobile: &str) -> Option<&'static str> {
    if mobile.is_empty() {
        Some(MOBILE_REQUIRED)
    } else if !mobile_regex().is_match(mobile) {
        Some(MOBILE_INVALID)
    } else {
        None
    }
}

/// Compute every applicable message for the draft
pub fn validate(draft: &RegistrationDraft, directory: &dyn EmailDirectory) -> ErrorMap {
    let checks = [
        (Field::Name, draft.name.is_empty().then_some(NAME_REQUIRED)),
        (Field::Email, email_error(&draft.email, directory)),
        (Field::Mobile, mobile_error(&draft.mobile)),
        (
            Field::Designation,
            draft.designation.is_none().then_some(DESIGNATION_REQUIRED),
        ),
        (Field::Gender, draft.gender.is_none().then_some(GENDER_REQUIRED)),
        (Field::Course, draft.course.is_empty().then_some(COURSE_REQUIRED)),
        (
            Field::Image,
            match &draft.image {
                None => Some(IMAGE_REQUIRED),
                Some(image) => image_extension_error(image),
            },
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(field, message)| message.map(|m| (field, m.to_string())))
        .collect()
}

pub fn is_submittable(errors: &ErrorMap) -> bool {
    errors.is_empty()
}

/// Validate and, when nothing is wrong, resolve the draft into a record
pub fn validate_record(
    draft: &RegistrationDraft,
    directory: &dyn EmailDirectory,
) -> Result<RegistrationRecord, ErrorMap> {
    let errors = validate(draft, directory);
    match (
        is_submittable(&errors),
        draft.designation,
        draft.gender,
        &draft.image,
    ) {
        (true, Some(designation), Some(gender), Some(image)) => Ok(RegistrationRecord {
            name: draft.name.clone(),
            email: draft.email.clone(),
            mobile: draft.mobile.clone(),
            designation,
            gender,
            course: draft.course.iter().copied().collect(),
            image: image.clone(),
        }),
        _ => Err(errors),
    }
}
