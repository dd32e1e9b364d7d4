/// Default server host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_PORT: &str = "8080";

/// Environment variable overriding the host
pub const ENV_HOST: &str = "SERVER_HOST";

/// Environment variable overriding the port
pub const ENV_PORT: &str = "SERVER_PORT";

/// Environment variable selecting the submission sink
pub const ENV_SINK: &str = "SUBMISSION_SINK";

/// Environment variable replacing the rejected email list (comma separated)
pub const ENV_REJECTED_EMAILS: &str = "REJECTED_EMAILS";

/// Default idle lifetime of a draft session, in seconds
pub const DEFAULT_DRAFT_TTL_SECS: u64 = 30 * 60;

/// Default cap on open draft sessions
pub const DEFAULT_MAX_DRAFTS: usize = 10_000;

/// Environment variable overriding the draft idle lifetime (seconds)
pub const ENV_DRAFT_TTL: &str = "DRAFT_TTL_SECS";

/// Environment variable overriding the open draft cap
pub const ENV_MAX_DRAFTS: &str = "MAX_DRAFTS";
