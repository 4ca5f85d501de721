//! API keys and HTTP settings, loaded once at startup.
//!
//! Priority: environment variables > config file > built-in defaults.

use std::path::{Path, PathBuf};

use steam_stats_core::fetcher::DEFAULT_USER_AGENT;
use steam_stats_giantbomb::GiantBombConfig;
use steam_stats_steam::SteamConfig;

pub(crate) const STEAM_API_KEY_VAR: &str = "STEAM_API_KEY";
pub(crate) const STEAM_ID_VAR: &str = "STEAM_ID";
pub(crate) const GIANTBOMB_API_KEY_VAR: &str = "GIANTBOMB_API_KEY";

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Missing {field}. Set {var} env var or add it to {}", path_hint())]
    Missing { field: &'static str, var: &'static str },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConfigSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// A configuration value together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sourced<T> {
    pub value: Option<T>,
    pub source: ConfigSource,
}

/// TOML config file format.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ConfigFile {
    steam: Option<SteamSection>,
    giantbomb: Option<GiantBombSection>,
    http: Option<HttpSection>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct SteamSection {
    api_key: Option<String>,
    steam_id: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct GiantBombSection {
    api_key: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct HttpSection {
    user_agent: Option<String>,
}

/// Effective configuration for one process.
#[derive(Debug)]
pub(crate) struct AppConfig {
    pub steam_api_key: Sourced<String>,
    pub steam_id: Sourced<String>,
    pub giantbomb_api_key: Sourced<String>,
    pub user_agent: String,
}

impl AppConfig {
    /// Load from the process environment and the default config file.
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let file = match config_path() {
            Some(path) => read_config_file(&path)?,
            None => None,
        };
        Ok(Self::resolve(file, |var| std::env::var(var).ok()))
    }

    /// Combine a parsed config file with environment lookups.
    pub(crate) fn resolve(file: Option<ConfigFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let steam = file.steam.unwrap_or_default();
        let giantbomb = file.giantbomb.unwrap_or_default();
        let http = file.http.unwrap_or_default();

        Self {
            steam_api_key: pick(&env, STEAM_API_KEY_VAR, steam.api_key),
            steam_id: pick(&env, STEAM_ID_VAR, steam.steam_id),
            giantbomb_api_key: pick(&env, GIANTBOMB_API_KEY_VAR, giantbomb.api_key),
            user_agent: http
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Steam credentials; both the API key and the account id are required.
    pub(crate) fn steam_config(&self) -> Result<SteamConfig, ConfigError> {
        Ok(SteamConfig {
            api_key: require(&self.steam_api_key, "Steam API key", STEAM_API_KEY_VAR)?,
            steam_id: require(&self.steam_id, "Steam id", STEAM_ID_VAR)?,
        })
    }

    pub(crate) fn giantbomb_config(&self) -> Result<GiantBombConfig, ConfigError> {
        Ok(GiantBombConfig {
            api_key: require(&self.giantbomb_api_key, "GiantBomb API key", GIANTBOMB_API_KEY_VAR)?,
        })
    }
}

fn pick(
    env: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    from_file: Option<String>,
) -> Sourced<String> {
    if let Some(value) = env(var).filter(|v| !v.is_empty()) {
        return Sourced {
            value: Some(value),
            source: ConfigSource::EnvVar(var),
        };
    }
    match from_file.filter(|v| !v.is_empty()) {
        Some(value) => Sourced {
            value: Some(value),
            source: ConfigSource::ConfigFile,
        },
        None => Sourced {
            value: None,
            source: ConfigSource::Missing,
        },
    }
}

fn require(
    value: &Sourced<String>,
    field: &'static str,
    var: &'static str,
) -> Result<String, ConfigError> {
    value
        .value
        .clone()
        .ok_or(ConfigError::Missing { field, var })
}

/// Return the path to the config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("steam-stats").join("config.toml"))
}

fn path_hint() -> String {
    config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "the config file".to_string())
}

/// Parse the config file at `path`. A missing file is not an error.
pub(crate) fn read_config_file(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}
