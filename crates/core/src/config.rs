use crate::adapters::{CachingDirectory, MemoryDirectory};
use crate::error::{JbindError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use jbind_api::TypeDirectory;

pub const CONFIG_ENV: &str = "JBIND_CONFIG";
pub const UNIVERSE_ENV: &str = "JBIND_UNIVERSE";

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Log file directory. Defaults to `~/.jbind/logs`.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            directory: None,
            stderr: false,
        }
    }
}

impl LogConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".jbind/logs")
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JbindConfig {
    /// JSON type universe loaded on top of the bootstrap types.
    #[serde(default)]
    pub universe: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub bootstrap_java_lang: bool,
    #[serde(default = "default_true")]
    pub cache_lookups: bool,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for JbindConfig {
    fn default() -> Self {
        Self {
            universe: None,
            bootstrap_java_lang: true,
            cache_lookups: true,
            log: LogConfig::default(),
        }
    }
}

impl JbindConfig {
    /// Load configuration from `explicit`, `$JBIND_CONFIG` or
    /// `~/.jbind/config.json`, in that order, falling back to defaults.
    /// `$JBIND_UNIVERSE` overrides the universe path.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidate = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match candidate {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Some(universe) = std::env::var_os(UNIVERSE_ENV) {
            config.universe = Some(PathBuf::from(universe));
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JbindError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = serde_json::from_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".jbind/config.json"))
    }

    /// Build the directory this configuration describes.
    pub fn build_directory(&self) -> Result<Arc<dyn TypeDirectory>> {
        let mut directory = if self.bootstrap_java_lang {
            MemoryDirectory::with_java_lang()
        } else {
            MemoryDirectory::new()
        };
        if let Some(path) = &self.universe {
            directory.merge(MemoryDirectory::from_json_file(path)?);
        }
        tracing::info!("Type universe ready with {} types", directory.len());

        let directory: Arc<dyn TypeDirectory> = if self.cache_lookups {
            Arc::new(CachingDirectory::new(directory))
        } else {
            Arc::new(directory)
        };
        Ok(directory)
    }
}
