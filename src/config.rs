use std::env;
use std::time::Duration;

/// Backend endpoint configuration, injected into the client at construction
/// time so tests can point it at a local mock server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the backend service, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path prefix the backend mounts its routes under, e.g. `/api`.
    /// Empty string for a prefixless deployment.
    pub api_prefix: String,
    /// Optional per-request timeout. `None` means wait indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            base_url: "http://127.0.0.1:8000".to_string(),
            api_prefix: "/api".to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        dotenvy::dotenv().ok(); // Load .env file if present
        Config {
            base_url: get_env_or_default("RAGWIRE_BASE_URL", "http://127.0.0.1:8000"),
            api_prefix: get_env_or_default("RAGWIRE_API_PREFIX", "/api"),
            request_timeout: env::var("RAGWIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }

    /// Full URL for one of the three operation routes.
    pub fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix,
            operation
        )
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
