use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use common::file_utils::{self, UploadNameError};
use registration::{
    parse_selection, Course, Designation, Field, FormError, FormState, Gender, ImageRef,
    ImageSelection, RegistrationDraft,
};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

/// Why a submitted form could not even be turned into a draft
#[derive(Debug, Error)]
pub enum FormRequestError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("{0}")]
    UploadName(#[from] UploadNameError),
    #[error("Invalid draft id: {0}")]
    DraftId(#[from] uuid::Error),
}

/// Multipart body of the registration form.
///
/// Every control is optional on the wire: a browser omits an unchecked radio
/// group, and missing values are reported by validation, not here.
#[derive(MultipartForm)]
pub struct RegistrationForm {
    pub name: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub mobile: Option<Text<String>>,
    pub designation: Option<Text<String>>,
    pub gender: Option<Text<String>>,

    /// One part per checked course
    pub course: Vec<Text<String>>,

    /// The picked image
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,

    /// Set by the HTML page so a re-rendered form keeps its session
    pub draft_id: Option<Text<String>>,
}

/// Multipart body of a draft image change
#[derive(MultipartForm)]
pub struct ImageUpload {
    #[multipart(limit = "10MB")]
    pub image: TempFile,
}

fn text(field: Option<Text<String>>) -> String {
    field.map(Text::into_inner).unwrap_or_default()
}

/// Turn an uploaded file into an image reference.
///
/// Browsers send an empty, nameless part when no file was picked; that is `None`.
pub fn image_ref(file: &TempFile) -> Result<Option<ImageRef>, UploadNameError> {
    let name = file.file_name.as_deref().unwrap_or_default();
    if name.is_empty() && file.size == 0 {
        return Ok(None);
    }
    file_utils::validate_upload_name(name)?;

    Ok(Some(ImageRef {
        file_name: name.to_string(),
        content_type: file.content_type.as_ref().map(|mime| mime.to_string()),
        size_bytes: file.size as u64,
    }))
}

fn parse_courses(parts: Vec<Text<String>>) -> Result<BTreeSet<Course>, FormError> {
    parts
        .into_iter()
        .map(|c| c.into_inner().parse::<Course>())
        .collect()
}

impl RegistrationForm {
    /// The session this submission continues, if the page sent one
    pub fn draft_id(&self) -> Result<Option<Uuid>, FormRequestError> {
        match self.draft_id.as_ref().map(|id| id.as_str()) {
            None | Some("") => Ok(None),
            Some(id) => Ok(Some(Uuid::parse_str(id)?)),
        }
    }

    fn picked_image(&self) -> Result<Option<ImageRef>, FormRequestError> {
        match &self.image {
            Some(file) => Ok(image_ref(file)?),
            None => Ok(None),
        }
    }

    /// Values exactly as entered, for echoing back next to the messages
    pub fn into_draft(self) -> Result<RegistrationDraft, FormRequestError> {
        let image = self.picked_image()?;
        let designation = text(self.designation);
        let gender = text(self.gender);
        let course = parse_courses(self.course)?;

        Ok(RegistrationDraft {
            name: text(self.name),
            email: text(self.email),
            mobile: text(self.mobile),
            designation: parse_selection(&designation)?,
            gender: parse_selection(&gender)?,
            course,
            image,
        })
    }

    /// Replay a browser submission onto a session, control by control.
    ///
    /// Every value is checked before the session is touched. A part with no file
    /// leaves the stored image alone; a picked file goes through image selection.
    pub fn apply_to(
        self,
        form: &mut FormState,
    ) -> Result<Option<(ImageRef, ImageSelection)>, FormRequestError> {
        let image = self.picked_image()?;
        let designation = text(self.designation);
        let gender = text(self.gender);
        parse_selection::<Designation>(&designation)?;
        parse_selection::<Gender>(&gender)?;
        let course = parse_courses(self.course)?;

        form.set_text(Field::Name, &text(self.name))?;
        form.set_text(Field::Email, &text(self.email))?;
        form.set_text(Field::Mobile, &text(self.mobile))?;
        form.set_text(Field::Designation, &designation)?;
        form.set_text(Field::Gender, &gender)?;
        for choice in Course::ALL {
            form.toggle_course(choice, course.contains(&choice));
        }

        Ok(image.map(|image| {
            let selection = form.select_image(image.clone());
            (image, selection)
        }))
    }
}
