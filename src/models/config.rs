use serde::Deserialize;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Configuration options for the catalog server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// SQLite database location.
    pub database_url: String,
    /// Secret used to verify bearer tokens.
    pub jwt_secret: String,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}
