/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the version prefix.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Total attempts for read operations (`list`, `get_by_id`). Writes are
    /// always attempted once.
    pub read_attempts: u32,
    /// Backoff between read attempts, multiplied by the attempt number.
    pub retry_backoff_ms: u64,
    /// Bearer token attached to every request when present.
    pub token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                        |
    /// |------------------------------|--------------------------------|
    /// | `PETCLINIC_API_URL`          | `http://localhost:3000/api/v1` |
    /// | `PETCLINIC_TIMEOUT_SECS`     | `10`                           |
    /// | `PETCLINIC_READ_ATTEMPTS`    | `3`                            |
    /// | `PETCLINIC_RETRY_BACKOFF_MS` | `250`                          |
    /// | `PETCLINIC_TOKEN`            | unset                          |
    pub fn from_env() -> Self {
        let api_url = std::env::var("PETCLINIC_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("PETCLINIC_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PETCLINIC_TIMEOUT_SECS must be a valid u64");

        let read_attempts: u32 = std::env::var("PETCLINIC_READ_ATTEMPTS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("PETCLINIC_READ_ATTEMPTS must be a valid u32");

        let retry_backoff_ms: u64 = std::env::var("PETCLINIC_RETRY_BACKOFF_MS")
            .unwrap_or_else(|_| "250".into())
            .parse()
            .expect("PETCLINIC_RETRY_BACKOFF_MS must be a valid u64");

        let token = std::env::var("PETCLINIC_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        Self {
            api_url,
            timeout_secs,
            read_attempts: read_attempts.max(1),
            retry_backoff_ms,
            token,
        }
    }
}
