use crate::draft::Field;
use thiserror::Error;

/// Errors raised when a form update cannot be applied at all.
///
/// These are distinct from field validation messages: a validation message
/// describes a value the user can correct, while a `FormError` means the
/// request named something the form does not offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: Field, value: String },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field {0} cannot be set from text")]
    NotATextField(Field),
}
