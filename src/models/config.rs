//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_items_per_page() -> usize {
    10
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Shared secret used to verify session tokens and sign cookies.
    pub secret: String,
    /// External identity provider that issues session tokens.
    pub auth_service_url: String,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}
