//! Where validated registrations go once the form is submitted

pub mod backend;
pub mod log_sink;
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use common::SubmissionReceipt;
use registration::RegistrationRecord;

pub use backend::SinkBackend;
pub use log_sink::LogSink;
pub use memory::MemorySink;

/// Receives every registration that passed validation.
///
/// Called once per accepted submission; there is no retry.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, record: &RegistrationRecord) -> Result<SubmissionReceipt>;
}
