//! Server Config

use std::time::Duration;

use clap::Args;

/// Listener and shutdown settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Address the storefront API binds to
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the storefront API listens on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    pub port: u16,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_GRACE_SECONDS", default_value_t = 10)]
    pub shutdown_grace_seconds: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Grace period handed to the server on shutdown; zero waits indefinitely.
    #[must_use]
    pub fn shutdown_grace(&self) -> Option<Duration> {
        (self.shutdown_grace_seconds > 0).then(|| Duration::from_secs(self.shutdown_grace_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime(shutdown_grace_seconds: u64) -> ServerRuntimeConfig {
        ServerRuntimeConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            shutdown_grace_seconds,
        }
    }

    #[test]
    fn zero_grace_waits_for_every_request() {
        assert_eq!(runtime(0).shutdown_grace(), None);
        assert_eq!(runtime(5).shutdown_grace(), Some(Duration::from_secs(5)));
    }
}
