use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Root of the services directory REST API, without a trailing slash.
    pub api_base_url: String,
    pub log_level: String,
    /// Number of locations shown per page in list views.
    pub page_size: NonZeroUsize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after the first failure for transient HTTP errors.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
