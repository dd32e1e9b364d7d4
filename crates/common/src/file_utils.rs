use std::path::Path;

/// Longest accepted upload name, in bytes
pub const MAX_UPLOAD_NAME_LEN: usize = 255;

/// Why an uploaded file name was refused before any form rule looked at it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadNameError {
    Missing,
    TooLong,
    ContainsControlCharacter,
    ContainsPathSeparator,
    IsSpecialDirectory,
    NotAPlainFileName,
}

impl UploadNameError {
    pub fn message(&self) -> &'static str {
        match self {
            UploadNameError::Missing => "Uploaded file has no name",
            UploadNameError::TooLong => "Uploaded file name is longer than 255 bytes",
            UploadNameError::ContainsControlCharacter => {
                "Uploaded file name cannot contain control characters"
            }
            UploadNameError::ContainsPathSeparator => {
                "Uploaded file name cannot contain path separators (/ or \\)"
            }
            UploadNameError::IsSpecialDirectory => "Uploaded file name cannot be '.' or '..'",
            UploadNameError::NotAPlainFileName => "Uploaded file name must be a plain file name",
        }
    }
}

impl std::fmt::Display for UploadNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UploadNameError {}

/// Check the name a browser or client sent for an uploaded file.
///
/// Only a bare file name is accepted: the form keeps the name as the image
/// reference and echoes it back, so nothing path-like may pass.
pub fn validate_upload_name(name: &str) -> Result<(), UploadNameError> {
    if name.is_empty() {
        return Err(UploadNameError::Missing);
    }

    if name.len() > MAX_UPLOAD_NAME_LEN {
        return Err(UploadNameError::TooLong);
    }

    if name.chars().any(char::is_control) {
        return Err(UploadNameError::ContainsControlCharacter);
    }

    if name.contains('/') || name.contains('\\') {
        return Err(UploadNameError::ContainsPathSeparator);
    }

    if name == "." || name == ".." {
        return Err(UploadNameError::IsSpecialDirectory);
    }

    // file_name() must give the input back unchanged
    if Path::new(name).file_name().and_then(|n| n.to_str()) != Some(name) {
        return Err(UploadNameError::NotAPlainFileName);
    }

    Ok(())
}
