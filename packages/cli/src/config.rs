use pagemap_editor::LayoutDirection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "pagemap.config.json";

/// Pagemap configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the saved document
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Where `export` writes structure.json
    #[serde(default = "default_export_dir")]
    pub export_dir: String,

    #[serde(default)]
    pub direction: LayoutDirection,
}

fn default_store_dir() -> String {
    ".pagemap".to_string()
}

fn default_export_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn store_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.store_dir)
    }

    pub fn export_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.export_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            export_dir: default_export_dir(),
            direction: LayoutDirection::default(),
        }
    }
}
