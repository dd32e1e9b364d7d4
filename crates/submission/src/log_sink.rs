//! Sink that only records the submission in the log

use crate::SubmissionSink;
use anyhow::Result;
use async_trait::async_trait;
use common::SubmissionReceipt;
use registration::RegistrationRecord;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SubmissionSink for LogSink {
    async fn submit(&self, record: &RegistrationRecord) -> Result<SubmissionReceipt> {
        let receipt = SubmissionReceipt::issue();
        let courses: Vec<&str> = record.course.iter().map(|c| c.as_str()).collect();

        info!(
            registration_id = %receipt.registration_id,
            name = ?record.name,
            email = ?record.email,
            mobile = ?record.mobile,
            designation = %record.designation,
            gender = %record.gender,
            course = ?courses,
            image = ?record.image.file_name,
            image_bytes = record.image.size_bytes,
            "Registration submitted"
        );

        Ok(receipt)
    }
}
