use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pixels per terminal row when the CLI measures line heights
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid layout in config file at {config_path}: {field} must be positive, got {value}")]
    InvalidLayout {
        config_path: PathBuf,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub screenplays_path: PathBuf,
    #[serde(default)]
    pub layout: Layout,
}

/// Page geometry used for pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Unset means the editor's own default page height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f64>,
    pub row_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            page_height: None,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Layout {
    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let page_height = self.page_height.map(|value| ("page_height", value));
        for (field, value) in page_height.into_iter().chain([("row_height", self.row_height)]) {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidLayout {
                    config_path: config_path.to_path_buf(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Config {
    pub fn new(screenplays_path: PathBuf) -> Self {
        Self {
            screenplays_path,
            layout: Layout::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.layout.validate(config_path)?;

        // Expand shell variables and tilde in the loaded path
        config.screenplays_path =
            Self::expand_path(&config.screenplays_path).unwrap_or(config.screenplays_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/scriptline");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
