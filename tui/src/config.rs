//! `~/.anuncios/config.toml` plus environment and command-line overrides.
//!
//! Precedence, highest first: CLI flags, `ANUNCIOS_BASE_URL`, the config
//! file, built-in defaults.

use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anuncios_backend_client::ClientSettings;
use anuncios_backend_client::DEFAULT_BASE_URL;
use anuncios_backend_client::DEFAULT_LISTINGS_PATH;
use serde::Deserialize;
use thiserror::Error;

use crate::style::Platform;

pub const CONFIG_PATH_ENV: &str = "ANUNCIOS_CONFIG";
pub const BASE_URL_ENV: &str = "ANUNCIOS_BASE_URL";
pub const DEFAULT_TICK_MILLIS: u64 = 80;
const APP_DIR: &str = ".anuncios";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for `{key}`: {message}")]
    Invalid { key: &'static str, message: String },
}

/// On-disk shape. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigToml {
    pub base_url: Option<String>,
    pub listings_path: Option<String>,
    pub platform: Option<Platform>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub tick_millis: Option<u64>,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub platform: Option<Platform>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client: ClientSettings,
    pub platform: Platform,
    pub log_dir: PathBuf,
    /// Spinner frame interval.
    pub tick: Duration,
    /// File the values came from, if one was read.
    pub source_path: Option<PathBuf>,
}

impl Config {
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(overrides: ConfigOverrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An explicitly named file must exist; the default one may not.
        let (path, required) = match overrides
            .config_path
            .clone()
            .or_else(|| env(CONFIG_PATH_ENV).map(PathBuf::from))
        {
            Some(path) => (Some(path), true),
            None => (default_config_path(), false),
        };

        let (file, source_path) = match path {
            Some(path) => match read_config_file(&path, required)? {
                Some(file) => (file, Some(path)),
                None => (ConfigToml::default(), None),
            },
            None => (ConfigToml::default(), None),
        };

        let mut config = Self::from_toml(file, overrides, env)?;
        config.source_path = source_path;
        Ok(config)
    }

    pub fn from_toml<F>(
        file: ConfigToml,
        overrides: ConfigOverrides,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tick_millis = file.tick_millis.unwrap_or(DEFAULT_TICK_MILLIS);
        if tick_millis == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_millis",
                message: "must be greater than zero".to_string(),
            });
        }

        let base_url = overrides
            .base_url
            .or_else(|| env(BASE_URL_ENV).filter(|v| !v.trim().is_empty()))
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client: ClientSettings {
                base_url,
                listings_path: file
                    .listings_path
                    .unwrap_or_else(|| DEFAULT_LISTINGS_PATH.to_string()),
                request_timeout: positive_secs(file.request_timeout_secs),
                connect_timeout: positive_secs(file.connect_timeout_secs),
            },
            platform: overrides.platform.or(file.platform).unwrap_or_default(),
            log_dir: file.log_dir.unwrap_or_else(default_log_dir),
            tick: Duration::from_millis(tick_millis),
            source_path: None,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientSettings::default(),
            platform: Platform::default(),
            log_dir: default_log_dir(),
            tick: Duration::from_millis(DEFAULT_TICK_MILLIS),
            source_path: None,
        }
    }
}

/// Zero means "no timeout".
fn positive_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|s| *s > 0).map(Duration::from_secs)
}

fn read_config_file(path: &Path, required: bool) -> Result<Option<ConfigToml>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound && !required => {
            tracing::debug!("no config file at {}; using defaults", path.display());
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn app_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_DIR))
}

pub fn default_config_path() -> Option<PathBuf> {
    app_home().map(|dir| dir.join(CONFIG_FILE))
}

pub fn default_log_dir() -> PathBuf {
    app_home()
        .unwrap_or_else(|| std::env::temp_dir().join("anuncios"))
        .join("log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file: ConfigToml = toml::from_str("").unwrap();
        let config = Config::from_toml(file, ConfigOverrides::default(), no_env).unwrap();

        assert_eq!(config.client, ClientSettings::default());
        assert_eq!(config.platform, Platform::Terminal);
        assert_eq!(config.tick, Duration::from_millis(80));
    }

    #[test]
    fn file_values_are_applied() {
        let file: ConfigToml = toml::from_str(
            r#"
base_url = "http://192.168.1.20:3000"
listings_path = "api/anuncios"
platform = "ios"
request_timeout_secs = 10
connect_timeout_secs = 0
log_dir = "/tmp/anuncios-logs"
tick_millis = 120
"#,
        )
        .unwrap();

        let config = Config::from_toml(file, ConfigOverrides::default(), no_env).unwrap();

        assert_eq!(config.client.base_url, "http://192.168.1.20:3000");
        assert_eq!(config.client.listings_path, "api/anuncios");
        assert_eq!(config.client.request_timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.client.connect_timeout, None);
        assert_eq!(config.platform, Platform::Ios);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/anuncios-logs"));
        assert_eq!(config.tick, Duration::from_millis(120));
    }

    #[test]
    fn cli_beats_env_beats_file() {
        let file = ConfigToml {
            base_url: Some("http://file:3000".to_string()),
            platform: Some(Platform::Web),
            ..ConfigToml::default()
        };
        let env = |key: &str| (key == BASE_URL_ENV).then(|| "http://env:3000".to_string());

        let from_env = Config::from_toml(file.clone(), ConfigOverrides::default(), env).unwrap();
        assert_eq!(from_env.client.base_url, "http://env:3000");
        assert_eq!(from_env.platform, Platform::Web);

        let overrides = ConfigOverrides {
            base_url: Some("http://cli:3000".to_string()),
            platform: Some(Platform::Android),
            ..ConfigOverrides::default()
        };
        let from_cli = Config::from_toml(file, overrides, env).unwrap();
        assert_eq!(from_cli.client.base_url, "http://cli:3000");
        assert_eq!(from_cli.platform, Platform::Android);
    }

    #[test]
    fn zero_tick_is_rejected() {
        let file = ConfigToml {
            tick_millis: Some(0),
            ..ConfigToml::default()
        };
        let err = Config::from_toml(file, ConfigOverrides::default(), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "tick_millis", .. }));
    }

    #[test]
    fn unknown_platform_is_a_parse_error() {
        let result: Result<ConfigToml, _> = toml::from_str(r#"platform = "windows""#);
        assert!(result.is_err());
    }
}
