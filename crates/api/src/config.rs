//! Application configuration from command-line flags with environment fallbacks.

use clap::{Parser, ValueEnum};

/// Deployment environment reported by the healthcheck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API server configuration.
///
/// Every flag can also be supplied through the environment variable named in
/// its help text; the database DSN is usually passed that way so it stays out
/// of the process list.
#[derive(Debug, Clone, Parser)]
#[command(name = "api", version, about = "Reading list JSON API")]
pub struct Config {
    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// API server port
    #[arg(long, env = "PORT", default_value_t = 4000)]
    pub port: u16,

    /// Environment
    #[arg(
        long = "env",
        env = "READINGLIST_ENV",
        value_enum,
        default_value_t = Environment::Development
    )]
    pub environment: Environment,

    /// PostgreSQL DSN; books are kept in memory when unset
    #[arg(long, env = "READINGLIST_DB_DSN", hide_env_values = true)]
    pub dsn: Option<String>,

    /// Maximum open database connections
    #[arg(long, env = "READINGLIST_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Apply database migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

impl Config {
    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            environment: Environment::Development,
            dsn: None,
            db_max_connections: 10,
            migrate: false,
        }
    }
}
