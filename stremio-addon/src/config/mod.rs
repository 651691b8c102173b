pub mod loader;
pub mod sources;

pub use loader::{ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use sources::{EnvConfig, FileConfig};

use crate::middleware::DEFAULT_CACHE_MAX_AGE;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Effective settings for running an addon server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonServerConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// `Cache-Control: public, max-age=<seconds>` on every response
    pub cache_max_age: u64,
}

impl Default for AddonServerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            http: HttpConfig {
                cache_max_age: DEFAULT_CACHE_MAX_AGE,
            },
        }
    }
}
