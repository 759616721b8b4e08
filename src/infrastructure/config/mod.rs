mod dto;

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

pub use dto::SettingsDto;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_PORT: u16 = 9843;
pub const DEFAULT_TEMPLATE_DIR: &str = "/compose-templates";
pub const DEFAULT_OUTPUT_DIR: &str = "/tmp/compose-output";
pub const DEFAULT_ENV_FILE: &str = "/environment";
pub const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid stop_timeout '{value}': {source}")]
    InvalidDuration {
        value: String,
        source: humantime::DurationError,
    },
}

/// Resolved server settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub port: u16,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
    pub env_file: PathBuf,
    /// Remote engine, e.g. `ssh://user@host:22`. Local engine when `None`.
    pub docker_host: Option<String>,
    pub stop_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            docker_host: None,
            stop_timeout: DEFAULT_STOP_TIMEOUT,
        }
    }
}

impl Settings {
    fn from_dto(dto: SettingsDto) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let port = dto.port.filter(|p| *p != 0).unwrap_or_else(|| {
            info!("port not supplied, using default `{}`", defaults.port);
            defaults.port
        });

        let template_dir = non_empty(dto.template_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                info!(
                    "template_dir not supplied, using default `{}`",
                    defaults.template_dir.display()
                );
                defaults.template_dir
            });

        let output_dir = non_empty(dto.output_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                info!(
                    "output_dir not supplied, using default `{}`",
                    defaults.output_dir.display()
                );
                defaults.output_dir
            });

        let env_file = non_empty(dto.env_file)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                info!(
                    "env_file not supplied, using default `{}`",
                    defaults.env_file.display()
                );
                defaults.env_file
            });

        let docker_host = non_empty(dto.docker_host);
        if docker_host.is_none() {
            info!("docker_host not supplied, using local docker");
        }

        let stop_timeout = match non_empty(dto.stop_timeout) {
            Some(value) => humantime::parse_duration(&value)
                .map_err(|source| ConfigError::InvalidDuration { value, source })?,
            None => defaults.stop_timeout,
        };

        Ok(Self {
            port,
            template_dir,
            output_dir,
            env_file,
            docker_host,
            stop_timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let dto: SettingsDto = toml::from_str(&content)?;
        Settings::from_dto(dto)
    }

    /// Load settings, falling back to the defaults when the file is
    /// unreadable or malformed.
    pub fn load_or_default(&self) -> Settings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Using default config values");
                Settings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(content: &str) -> (TempDir, ConfigStore) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (dir, ConfigStore::new(path))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nope.toml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let (_dir, store) = store_with("port = 8080\ndocker_host = \"ssh://me@box\"\n");
        let settings = store.load().unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.template_dir, PathBuf::from(DEFAULT_TEMPLATE_DIR));
        assert_eq!(settings.docker_host.as_deref(), Some("ssh://me@box"));
    }

    #[test]
    fn test_zero_port_and_blank_strings_use_defaults() {
        let (_dir, store) = store_with("port = 0\nenv_file = \"\"\ndocker_host = \" \"\n");
        let settings = store.load().unwrap();

        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.env_file, PathBuf::from(DEFAULT_ENV_FILE));
        assert_eq!(settings.docker_host, None);
    }

    #[test]
    fn test_stop_timeout_is_humantime() {
        let (_dir, store) = store_with("stop_timeout = \"1m 30s\"\n");
        assert_eq!(store.load().unwrap().stop_timeout, Duration::from_secs(90));

        let (_dir, store) = store_with("stop_timeout = \"soon\"\n");
        assert!(matches!(
            store.load(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let (_dir, store) = store_with("port = \"not a number\"");
        assert!(matches!(store.load(), Err(ConfigError::ParseError(_))));
        assert_eq!(store.load_or_default(), Settings::default());
    }
}
