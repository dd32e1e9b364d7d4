use crate::{LogSink, MemorySink, SubmissionSink};
use anyhow::{bail, Result};
use registration::EmailDirectory;
use std::str::FromStr;
use std::sync::Arc;

/// Sink type identifier for the log-only sink (also the default)
pub const SINK_TYPE_LOG: &str = "log";

/// Sink type identifier for the in-memory registry
pub const SINK_TYPE_MEMORY: &str = "memory";

/// Submission sink selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SinkBackend {
    #[default]
    Log,
    Memory,
}

/// An initialized sink plus the emails it already knows about, if it keeps any
pub struct InitializedSink {
    pub sink: Arc<dyn SubmissionSink>,
    pub directory: Option<Arc<dyn EmailDirectory>>,
}

impl SinkBackend {
    pub fn initialize(self) -> InitializedSink {
        match self {
            SinkBackend::Log => InitializedSink {
                sink: Arc::new(LogSink::new()),
                directory: None,
            },
            SinkBackend::Memory => {
                let memory = Arc::new(MemorySink::new());
                InitializedSink {
                    sink: memory.clone(),
                    directory: Some(memory as Arc<dyn EmailDirectory>),
                }
            }
        }
    }
}

impl FromStr for SinkBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            SINK_TYPE_LOG => Ok(SinkBackend::Log),
            SINK_TYPE_MEMORY => Ok(SinkBackend::Memory),
            other => bail!(
                "Invalid sink type: {}. Must be '{}' or '{}'",
                other,
                SINK_TYPE_LOG,
                SINK_TYPE_MEMORY
            ),
        }
    }
}
