use once_cell::sync::Lazy;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

use super::{
    AddonServerConfig,
    sources::{EnvConfig, FileConfig},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("stremio-addon.toml"),
        PathBuf::from("config/stremio-addon.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Skip `.env` and the process environment entirely.
    pub ignore_env: bool,
}

/// Resolves [`AddonServerConfig`] from defaults, an optional TOML file and
/// the environment, in increasing order of precedence.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn ignore_env(mut self) -> Self {
        self.options.ignore_env = true;
        self
    }

    pub fn load(&self) -> Result<AddonServerConfig, ConfigLoadError> {
        let env_config = if self.options.ignore_env {
            EnvConfig::default()
        } else {
            if self.load_env_file()? {
                debug!("loaded .env file");
            }
            EnvConfig::gather()
        };

        self.load_with_env(env_config)
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment snapshot.
    pub fn load_with_env(
        &self,
        env_config: EnvConfig,
    ) -> Result<AddonServerConfig, ConfigLoadError> {
        let file_config = self.load_file_config(&env_config)?;
        Ok(compose(file_config, env_config))
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true),
            None => dotenvy::dotenv().map(|_| true),
        };

        match loaded {
            Ok(loaded) => Ok(loaded),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env_config: &EnvConfig,
    ) -> Result<Option<FileConfig>, ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env_config.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(candidate) => candidate.clone(),
                None => return Ok(None),
            },
        };

        read_file_config(&path).map(Some)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(
    file_config: Option<FileConfig>,
    env_config: EnvConfig,
) -> AddonServerConfig {
    let mut config = AddonServerConfig::default();

    if let Some(file) = file_config {
        if let Some(host) = file.server.host {
            config.server.host = host;
        }
        if let Some(port) = file.server.port {
            config.server.port = port;
        }
        if let Some(max_age) = file.http.cache_max_age {
            config.http.cache_max_age = max_age;
        }
    }

    if let Some(host) = env_config.host {
        config.server.host = host;
    }
    if let Some(port) = env_config.port {
        config.server.port = port;
    }
    if let Some(max_age) = env_config.cache_max_age {
        config.http.cache_max_age = max_age;
    }

    config
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}
