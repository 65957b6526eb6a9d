use serde::Serialize;
use std::time::Duration;

/// Service configuration, read from flags or the environment
#[derive(Debug, Clone, clap::Args, Serialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:25000")]
    pub bind_addr: String,

    /// Base URL of the page renderer
    #[arg(long, env = "RENDERER_URL", default_value = "http://localhost:20010")]
    pub renderer_url: String,

    /// Base URL of the search API
    #[arg(long, env = "SEARCH_API_URL", default_value = "http://localhost:23900")]
    pub search_api_url: String,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long, env = "GRACEFUL_SHUTDOWN_TIMEOUT", default_value = "5")]
    pub graceful_shutdown_timeout: u64,

    /// Seconds between health check rounds
    #[arg(
        long,
        env = "HEALTHCHECK_INTERVAL",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub healthcheck_interval: u64,

    /// Seconds a failing dependency is tolerated before the service reports critical
    #[arg(long, env = "HEALTHCHECK_CRITICAL_TIMEOUT", default_value = "90")]
    pub healthcheck_critical_timeout: u64,

    /// Seconds before an incoming request is abandoned
    #[arg(long, env = "REQUEST_TIMEOUT", default_value = "10")]
    pub request_timeout: u64,
}

impl Config {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_timeout)
    }

    pub fn health_interval(&self) -> Duration {
        Duration::from_secs(self.healthcheck_interval)
    }

    pub fn health_critical_timeout(&self) -> Duration {
        Duration::from_secs(self.healthcheck_critical_timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
