use log::info;
use markdown_strata_engine::{Extensions, Options};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown extension `{name}`")]
    UnknownExtension { name: String },

    #[error("max_nesting must be at least 1")]
    InvalidNesting,
}

/// Parser settings as stored in `parser.toml`:
///
/// ```toml
/// extensions = ["tables", "fenced_code", "footnotes"]
/// max_nesting = 16
/// ```
///
/// Extension names are the engine's flag names in snake case. `"common"`
/// selects the default set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub extensions: Vec<String>,
    pub max_nesting: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extensions: vec![Self::COMMON.to_string()],
            max_nesting: Options::DEFAULT_MAX_NESTING,
        }
    }
}

impl ParserConfig {
    const COMMON: &'static str = "common";

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = Self::expand_path(config_path.as_ref());
        if !config_path.exists() {
            info!("No parser config at {}", config_path.display());
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.clone(),
                source,
            })?;

        let config: ParserConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                config_path: config_path.clone(),
                source,
            })?;

        info!("Loaded parser config from {}", config_path.display());
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
        info!("Saved parser config to {}", config_path.display());
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-strata");
        PathBuf::from(config_dir.as_ref()).join("parser.toml")
    }

    /// Engine options for this config.
    pub fn to_options(&self) -> Result<Options, ConfigError> {
        if self.max_nesting == 0 {
            return Err(ConfigError::InvalidNesting);
        }
        let mut extensions = Extensions::empty();
        for name in &self.extensions {
            extensions |= Self::extension(name)?;
        }
        Ok(Options::new(extensions).with_max_nesting(self.max_nesting))
    }

    /// The config that reproduces `options`.
    pub fn from_options(options: &Options) -> Self {
        let extensions = if options.extensions == Extensions::COMMON {
            vec![Self::COMMON.to_string()]
        } else {
            options
                .extensions
                .iter_names()
                .map(|(name, _)| name.to_ascii_lowercase())
                .collect()
        };
        Self {
            extensions,
            max_nesting: options.max_nesting,
        }
    }

    fn extension(name: &str) -> Result<Extensions, ConfigError> {
        Extensions::from_name(&name.to_ascii_uppercase()).ok_or_else(|| {
            ConfigError::UnknownExtension {
                name: name.to_string(),
            }
        })
    }

    fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }
}
