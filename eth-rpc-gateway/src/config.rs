use ::config::{ConfigError, Environment, Source};
use serde::Deserialize;

/// Service configuration structure
///
/// Built once at startup and handed to the components that need it. Nothing
/// in the gateway reads the environment after this point.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Host address to bind the server to (default: 0.0.0.0)
    pub host: String,

    /// Port to listen on (default: 3000)
    pub port: u16,

    /// Number of HTTP worker threads (default: 4)
    pub workers: usize,

    /// Upstream JSON-RPC base URL; the API key is appended as a path segment
    pub upstream_url: String,

    /// Credential path segment for the upstream provider
    pub api_key: String,

    /// Minimum log level name (default: INFO)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Environment Variables
    ///
    /// * `HOST` - Server host address (default: "0.0.0.0")
    /// * `PORT` - Server port (default: 3000)
    /// * `WORKERS` - HTTP worker threads (default: 4)
    /// * `UPSTREAM_URL` - Upstream base URL (default: "https://mainnet.infura.io/v3")
    /// * `API_KEY` - Upstream credential (default: "TESTME", only useful against a mock)
    /// * `LOG_LEVEL` - Log level (default: "INFO")
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists (useful for development)
        let _ = dotenv::dotenv();

        Self::from_source(Environment::default())
    }

    /// Build configuration from an arbitrary source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        ::config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("workers", 4)?
            .set_default("upstream_url", "https://mainnet.infura.io/v3")?
            .set_default("api_key", "TESTME")?
            .set_default("log_level", "INFO")?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Full upstream endpoint, `{upstream_url}/{api_key}`
    pub fn rpc_endpoint(&self) -> String {
        format!("{}/{}", self.upstream_url.trim_end_matches('/'), self.api_key)
    }
}
