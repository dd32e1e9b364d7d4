/// Default server URL
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// Environment variable overriding the server URL
pub const ENV_SERVER_URL: &str = "SERVER_URL";

/// One-shot registration endpoint path
pub const REGISTER_ENDPOINT: &str = "/register";

/// Health endpoint path
pub const HEALTH_ENDPOINT: &str = "/health";
