pub mod file_utils;
pub mod utils;

pub use utils::get_current_timestamp_ms;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Returned when a registration is accepted by the submission sink
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub registration_id: Uuid,
    pub submitted_at_ms: u64, // milliseconds since Unix epoch
}

impl SubmissionReceipt {
    pub fn issue() -> Self {
        Self {
            registration_id: Uuid::new_v4(),
            submitted_at_ms: get_current_timestamp_ms(),
        }
    }
}

/// The id every draft endpoint response carries
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DraftCreated {
    pub draft_id: Uuid,
}

/// Body of a draft text update: `PUT /drafts/{id}/fields/{field}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FieldUpdate {
    pub value: String,
}

/// Body of a course checkbox change: `PUT /drafts/{id}/courses/{course}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CourseToggle {
    pub checked: bool,
}

/// Response from health check endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String, // "ok" when healthy
}
