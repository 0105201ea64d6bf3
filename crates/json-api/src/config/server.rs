//! Server Config

use clap::Args;

/// Listening address for the HTTP server.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Interface to bind
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SERVER_PORT", default_value = "8698")]
    pub port: u16,
}

impl ServerRuntimeConfig {
    /// `host:port` for the listener.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use crate::config::ServerConfig;

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "brix-json",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--admin-login",
            "admin",
            "--admin-secret",
            "admin123",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");
        assert_eq!(config.bootstrap.admin_login.as_deref(), Some("admin"));

        Ok(())
    }

    #[test]
    fn admin_login_requires_secret() {
        let config = ServerConfig::try_parse_from(["brix-json", "--admin-login", "admin"]);

        assert!(config.is_err(), "expected a missing secret to be rejected");
    }
}
