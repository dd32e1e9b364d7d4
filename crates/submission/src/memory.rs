//! In-memory registry of accepted registrations

use crate::SubmissionSink;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use common::SubmissionReceipt;
use registration::{EmailDirectory, RegistrationRecord};
use std::sync::Mutex;
use tracing::info;

/// Keeps every accepted record for the life of the process.
///
/// Also acts as an [`EmailDirectory`], so an email registered here is
/// rejected on the next submission.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(SubmissionReceipt, RegistrationRecord)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted records in submission order
    pub fn records(&self) -> Vec<(SubmissionReceipt, RegistrationRecord)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn submit(&self, record: &RegistrationRecord) -> Result<SubmissionReceipt> {
        let receipt = SubmissionReceipt::issue();
        let total = {
            let mut records = self
                .records
                .lock()
                .map_err(|_| anyhow!("Registration store lock poisoned"))?;
            records.push((receipt.clone(), record.clone()));
            records.len()
        };

        info!(
            registration_id = %receipt.registration_id,
            email = ?record.email,
            total,
            "Registration stored in memory"
        );

        Ok(receipt)
    }
}

impl EmailDirectory for MemorySink {
    fn email_exists(&self, email: &str) -> bool {
        self.records
            .lock()
            .map(|records| records.iter().any(|(_, record)| record.email == email))
            .unwrap_or(false)
    }
}
