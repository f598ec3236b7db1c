use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

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
    /// Listen address of the catalog server.
    pub bind_addr: SocketAddr,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Base URL the client uses to reach the catalog API.
    pub base_url: String,
    /// Directory holding the persisted key-value state.
    pub state_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_debounce_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
