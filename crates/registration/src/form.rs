//! Form state holder: the draft being edited and its current messages

use crate::directory::EmailDirectory;
use crate::draft::{Course, Field, ImageRef, RegistrationDraft, RegistrationRecord};
use crate::error::FormError;
use crate::validation::{image_extension_error, validate, validate_record, ErrorMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    #[default]
    Editing,
    Submitted,
}

/// Outcome of picking an image file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSelection {
    Accepted,
    Rejected(&'static str),
}

/// Snapshot of a form for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftView {
    pub draft: RegistrationDraft,
    pub errors: ErrorMap,
    pub status: FormStatus,
}

/// One form-filling session.
///
/// Messages are replaced wholesale by [`FormState::validate`] and
/// [`FormState::submit`]; image selection is the only operation that touches a
/// single entry.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: RegistrationDraft,
    errors: ErrorMap,
    status: FormStatus,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            draft: self.draft.clone(),
            errors: self.errors.clone(),
            status: self.status,
        }
    }

    /// Replace a text, select or radio value. An empty value clears a selection.
    pub fn set_text(&mut self, field: Field, value: &str) -> Result<(), FormError> {
        match field {
            Field::Name => self.draft.name = value.to_string(),
            Field::Email => self.draft.email = value.to_string(),
            Field::Mobile => self.draft.mobile = value.to_string(),
            Field::Designation => {
                self.draft.designation = parse_selection(value)?;
            }
            Field::Gender => {
                self.draft.gender = parse_selection(value)?;
            }
            Field::Course | Field::Image => return Err(FormError::NotATextField(field)),
        }
        self.status = FormStatus::Editing;
        Ok(())
    }

    /// Checkbox change: add the course when checked, remove it when unchecked
    pub fn toggle_course(&mut self, course: Course, checked: bool) {
        if checked {
            self.draft.course.insert(course);
        } else {
            self.draft.course.remove(&course);
        }
        self.status = FormStatus::Editing;
    }

    pub fn is_course_checked(&self, course: Course) -> bool {
        self.draft.course.contains(&course)
    }

    /// File picker change. A rejected file leaves the previously stored image in place.
    pub fn select_image(&mut self, image: ImageRef) -> ImageSelection {
        self.status = FormStatus::Editing;
        match image_extension_error(&image) {
            Some(message) => {
                self.errors.insert(Field::Image, message);
                ImageSelection::Rejected(message)
            }
            None => {
                self.draft.image = Some(image);
                self.errors.remove(Field::Image);
                ImageSelection::Accepted
            }
        }
    }

    pub fn clear_image(&mut self) {
        self.draft.image = None;
        self.status = FormStatus::Editing;
    }

    /// Back to editing with values untouched, e.g. when the sink refused a submitted record
    pub fn reopen(&mut self) {
        self.status = FormStatus::Editing;
    }

    /// Recompute every message for the current draft
    pub fn validate(&mut self, directory: &dyn EmailDirectory) -> &ErrorMap {
        self.errors = validate(&self.draft, directory);
        &self.errors
    }

    /// Validate and, if nothing is wrong, mark the form submitted and hand back
    /// the record for the submission sink.
    pub fn submit(
        &mut self,
        directory: &dyn EmailDirectory,
    ) -> Result<RegistrationRecord, ErrorMap> {
        match validate_record(&self.draft, directory) {
            Ok(record) => {
                self.errors = ErrorMap::new();
                self.status = FormStatus::Submitted;
                Ok(record)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.status = FormStatus::Editing;
                Err(errors)
            }
        }
    }
}

/// Parse a select or radio value; the empty string means nothing is selected
pub fn parse_selection<T>(value: &str) -> Result<Option<T>, FormError>
where
    T: std::str::FromStr<Err = FormError>,
{
    if value.is_empty() {
        Ok(None)
    } else {
        value.parse().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticEmailDirectory;
    use crate::draft::{Designation, Gender};
    use crate::validation::{EMAIL_TAKEN, IMAGE_REQUIRED, IMAGE_TYPE_INVALID, NAME_REQUIRED};

    fn filled_form() -> FormState {
        let mut form = FormState::new();
        form.set_text(Field::Name, "Ravi Kumar").unwrap();
        form.set_text(Field::Email, "ravi@corp.in").unwrap();
        form.set_text(Field::Mobile, "9876543210").unwrap();
        form.set_text(Field::Designation, "Sales").unwrap();
        form.set_text(Field::Gender, "Male").unwrap();
        form.toggle_course(Course::BCA, true);
        assert_eq!(
            form.select_image(ImageRef::named("ravi.jpg")),
            ImageSelection::Accepted
        );
        form
    }

    #[test]
    fn test_set_text_fields() {
        let form = filled_form();
        let draft = form.draft();
        assert_eq!(draft.name, "Ravi Kumar");
        assert_eq!(draft.designation, Some(Designation::Sales));
        assert_eq!(draft.gender, Some(Gender::Male));
    }

    #[test]
    fn test_empty_selection_clears() {
        let mut form = filled_form();
        form.set_text(Field::Designation, "").unwrap();
        assert_eq!(form.draft().designation, None);
    }

    #[test]
    fn test_unknown_option_is_rejected_without_change() {
        let mut form = filled_form();
        let err = form.set_text(Field::Gender, "Other").unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownOption {
                field: Field::Gender,
                value: "Other".to_string()
            }
        );
        assert_eq!(form.draft().gender, Some(Gender::Male));
    }

    #[test]
    fn test_course_and_image_are_not_text_fields() {
        let mut form = FormState::new();
        assert_eq!(
            form.set_text(Field::Course, "MCA"),
            Err(FormError::NotATextField(Field::Course))
        );
        assert_eq!(
            form.set_text(Field::Image, "a.png"),
            Err(FormError::NotATextField(Field::Image))
        );
    }

    #[test]
    fn test_toggle_course_twice_restores_membership() {
        let mut form = filled_form();
        let before = form.draft().course.clone();

        form.toggle_course(Course::MCA, true);
        assert!(form.is_course_checked(Course::MCA));
        form.toggle_course(Course::MCA, false);
        assert!(!form.is_course_checked(Course::MCA));

        assert_eq!(form.draft().course, before);
    }

    #[test]
    fn test_toggle_course_is_idempotent() {
        let mut form = FormState::new();
        form.toggle_course(Course::BSC, true);
        form.toggle_course(Course::BSC, true);
        assert_eq!(form.draft().course.len(), 1);
        form.toggle_course(Course::MCA, false);
        assert_eq!(form.draft().course.len(), 1);
    }

    #[test]
    fn test_rejected_image_is_not_stored() {
        let mut form = FormState::new();
        assert_eq!(
            form.select_image(ImageRef::named("photo.gif")),
            ImageSelection::Rejected(IMAGE_TYPE_INVALID)
        );
        assert_eq!(form.draft().image, None);
        assert_eq!(form.errors().get(Field::Image), Some(IMAGE_TYPE_INVALID));
    }

    #[test]
    fn test_rejected_image_keeps_previous_one() {
        let mut form = filled_form();
        form.select_image(ImageRef::named("photo.bmp"));
        assert_eq!(
            form.draft().image.as_ref().map(|i| i.file_name.as_str()),
            Some("ravi.jpg")
        );
    }

    #[test]
    fn test_accepted_image_clears_only_image_error() {
        let mut form = FormState::new();
        form.validate(&StaticEmailDirectory::default());
        assert_eq!(form.errors().get(Field::Image), Some(IMAGE_REQUIRED));

        assert_eq!(
            form.select_image(ImageRef::named("photo.png")),
            ImageSelection::Accepted
        );
        assert!(!form.errors().contains(Field::Image));
        assert_eq!(form.errors().get(Field::Name), Some(NAME_REQUIRED));
        assert_eq!(
            form.draft().image.as_ref().map(|i| i.file_name.as_str()),
            Some("photo.png")
        );
    }

    #[test]
    fn test_submit_valid_form() {
        let mut form = filled_form();
        let record = form.submit(&StaticEmailDirectory::default()).unwrap();
        assert_eq!(record.email, "ravi@corp.in");
        assert_eq!(record.course, vec![Course::BCA]);
        assert_eq!(form.status(), FormStatus::Submitted);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_submit_invalid_form_stays_editing() {
        let mut form = filled_form();
        form.set_text(Field::Email, "test@example.com").unwrap();
        let errors = form.submit(&StaticEmailDirectory::default()).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(EMAIL_TAKEN));
        assert_eq!(errors.len(), 1);
        assert_eq!(form.errors(), &errors);
        assert_eq!(form.status(), FormStatus::Editing);
    }

    #[test]
    fn test_edit_after_submit_returns_to_editing() {
        let mut form = filled_form();
        form.submit(&StaticEmailDirectory::default()).unwrap();
        form.toggle_course(Course::MCA, true);
        assert_eq!(form.status(), FormStatus::Editing);
    }

    #[test]
    fn test_submit_replaces_stale_messages() {
        let mut form = filled_form();
        form.select_image(ImageRef::named("x.gif"));
        assert!(form.errors().contains(Field::Image));
        // the stored image is still the earlier jpg, so the full pass is clean
        assert!(form.submit(&StaticEmailDirectory::default()).is_ok());
        assert!(form.errors().is_empty());
    }
}
