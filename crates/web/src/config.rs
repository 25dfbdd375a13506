//! Front-end configuration from command-line flags with environment fallbacks.

use clap::Parser;

/// Web server configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "web", version, about = "Reading list web front end")]
pub struct Config {
    /// HTTP network address; a bare ":port" listens on all interfaces
    #[arg(long, env = "READINGLIST_WEB_ADDR", default_value = "0.0.0.0:80")]
    pub addr: String,

    /// Endpoint for the reading list web service
    #[arg(
        long,
        env = "READINGLIST_API_ENDPOINT",
        default_value = "http://localhost:4000/v1/books"
    )]
    pub endpoint: String,
}

impl Config {
    /// Returns the bind address, expanding ":port" to "0.0.0.0:port".
    pub fn addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:80".to_string(),
            endpoint: "http://localhost:4000/v1/books".to_string(),
        }
    }
}
