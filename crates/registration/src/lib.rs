//! Employee registration form: draft state, field validation and the
//! collaborators a submission is checked against.

pub mod directory;
pub mod draft;
pub mod error;
pub mod form;
pub mod validation;

pub use directory::{DirectoryChain, EmailDirectory, StaticEmailDirectory};
pub use draft::{
    Course, Designation, Field, Gender, ImageRef, RegistrationDraft, RegistrationRecord,
};
pub use error::FormError;
pub use form::{parse_selection, DraftView, FormState, FormStatus, ImageSelection};
pub use validation::{
    image_extension_error, is_submittable, validate, validate_record, ErrorMap, ErrorResponse,
};
