//! Media store configuration.

/// Default per-upload timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the remote media store.
///
/// Constructed once at process start and passed by reference into the
/// uploader; component logic never reads the environment directly.
#[derive(Debug, Clone)]
pub struct MediaStoreConfig {
    /// Upload endpoint, e.g. `https://media.example.com/v1/upload`.
    pub upload_url: String,
    /// API key sent in the `X-Api-Key` header on every upload.
    pub api_key: String,
    /// Per-upload timeout in seconds (default: 120).
    pub timeout_secs: u64,
}

impl MediaStoreConfig {
    /// Load media store configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `MEDIA_STORE_URL`          | **yes**  | --      |
    /// | `MEDIA_STORE_API_KEY`      | **yes**  | --      |
    /// | `MEDIA_STORE_TIMEOUT_SECS` | no       | `120`   |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set, which is the desired
    /// behaviour -- we want misconfiguration to fail at startup.
    pub fn from_env() -> Self {
        let upload_url = std::env::var("MEDIA_STORE_URL")
            .expect("MEDIA_STORE_URL must be set in the environment");
        let api_key = std::env::var("MEDIA_STORE_API_KEY")
            .expect("MEDIA_STORE_API_KEY must be set in the environment");

        let timeout_secs: u64 = std::env::var("MEDIA_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("MEDIA_STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            upload_url,
            api_key,
            timeout_secs,
        }
    }
}
