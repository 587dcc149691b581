//! API Config

use clap::Args;

/// Cart backend connection settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the storefront REST backend
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "STOREFRONT_HTTP_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub http_timeout_seconds: u64,
}
