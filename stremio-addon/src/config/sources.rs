use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub http: FileHttpConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileHttpConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_max_age: Option<u64>,
}

/// Values picked up from the process environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cache_max_age: Option<u64>,
    pub config_path: Option<PathBuf>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build from explicit `(name, value)` pairs; unparsable numbers are
    /// ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env_config = Self::default();

        for (key, value) in vars {
            let value = value.into();
            match key.as_ref() {
                "HOST" => env_config.host = non_empty(value),
                "PORT" => env_config.port = value.trim().parse().ok(),
                "CACHE_MAX_AGE" => {
                    env_config.cache_max_age = value.trim().parse().ok()
                }
                "STREMIO_ADDON_CONFIG" => {
                    env_config.config_path = non_empty(value).map(PathBuf::from)
                }
                _ => {}
            }
        }

        env_config
    }
}

fn non_empty(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
