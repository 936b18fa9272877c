//! Application configuration

use std::env;
use std::fmt;
use std::str::FromStr;

/// How the process receives events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Poll the AWS Lambda runtime API
    Lambda,
    /// Length-prefixed JSON over stdin/stdout
    Ipc,
    /// Local HTTP server translating requests into events
    Serve,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lambda" => Ok(RunMode::Lambda),
            "ipc" | "stdio" => Ok(RunMode::Ipc),
            "serve" | "http" => Ok(RunMode::Serve),
            other => Err(format!("unknown run mode: {}", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Lambda => "lambda",
            RunMode::Ipc => "ipc",
            RunMode::Serve => "serve",
        };
        f.write_str(name)
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Event source
    pub mode: RunMode,

    /// Interface the local server binds to
    pub bind_addr: String,

    /// Port for the local server
    pub port: u16,

    /// Largest request body the local server will buffer
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // The Lambda runtime always exports its API endpoint
        let default_mode = if lookup("AWS_LAMBDA_RUNTIME_API").is_some() {
            RunMode::Lambda
        } else {
            RunMode::Serve
        };

        let mode = match lookup("LAMBDA_ECHO_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!("{}, falling back to {}", err, default_mode);
                default_mode
            }),
            None => default_mode,
        };

        Self {
            mode,

            bind_addr: lookup("LAMBDA_ECHO_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("LAMBDA_ECHO_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),

            max_body_bytes: lookup("LAMBDA_ECHO_MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
        }
    }

    /// Socket address string for the local server
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_outside_lambda() {
        let config = config_from(&[]);
        assert_eq!(config.mode, RunMode::Serve);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_lambda_environment_detected() {
        let config = config_from(&[("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001")]);
        assert_eq!(config.mode, RunMode::Lambda);
    }

    #[test]
    fn test_explicit_mode_wins() {
        let config = config_from(&[
            ("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001"),
            ("LAMBDA_ECHO_MODE", "IPC"),
        ]);
        assert_eq!(config.mode, RunMode::Ipc);
    }

    #[test]
    fn test_unknown_mode_falls_back() {
        let config = config_from(&[("LAMBDA_ECHO_MODE", "carrier-pigeon")]);
        assert_eq!(config.mode, RunMode::Serve);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("LAMBDA_ECHO_BIND_ADDR", "127.0.0.1"),
            ("LAMBDA_ECHO_PORT", "3000"),
            ("LAMBDA_ECHO_MAX_BODY_BYTES", "512"),
        ]);
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
        assert_eq!(config.max_body_bytes, 512);
    }

    #[test]
    fn test_unparseable_port_uses_default() {
        let config = config_from(&[("LAMBDA_ECHO_PORT", "eighty")]);
        assert_eq!(config.port, 8080);
    }
}
