//! Knowledge-source locations.
//!
//! Precedence: `SWM__*` environment variables > config file (`SWM_CONFIG` path, or
//! `config/knowledge.{toml,json,...}`) > defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data/knowledge";
pub const TERMINOLOGY_FILE: &str = "terminology.json";
pub const STANDARDS_FILE: &str = "standards.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Root directory holding every source file unless overridden below.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory with `waste_classification.json` and `treatment_methods.json`.
    #[serde(default)]
    pub taxonomy_dir: Option<PathBuf>,
    #[serde(default)]
    pub terminology_file: Option<PathBuf>,
    #[serde(default)]
    pub standards_file: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            taxonomy_dir: None,
            terminology_file: None,
            standards_file: None,
        }
    }
}

impl KnowledgeConfig {
    /// All sources under one directory, with the default file names.
    pub fn with_data_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("SWM_CONFIG").unwrap_or_else(|_| "config/knowledge".to_string());
        let built = config::Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)?
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("SWM").separator("__"))
            .build()?;
        built.try_deserialize()
    }

    pub fn taxonomy_dir(&self) -> PathBuf {
        self.taxonomy_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.clone())
    }

    pub fn terminology_path(&self) -> PathBuf {
        self.terminology_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(TERMINOLOGY_FILE))
    }

    pub fn standards_path(&self) -> PathBuf {
        self.standards_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(STANDARDS_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_default_under_data_dir() {
        let cfg = KnowledgeConfig::with_data_dir("/srv/kb");
        assert_eq!(cfg.taxonomy_dir(), PathBuf::from("/srv/kb"));
        assert_eq!(cfg.terminology_path(), PathBuf::from("/srv/kb/terminology.json"));
        assert_eq!(cfg.standards_path(), PathBuf::from("/srv/kb/standards.json"));
    }

    #[test]
    fn explicit_paths_win() {
        let cfg = KnowledgeConfig {
            standards_file: Some(PathBuf::from("/etc/swm/gb.json")),
            ..KnowledgeConfig::default()
        };
        assert_eq!(cfg.standards_path(), PathBuf::from("/etc/swm/gb.json"));
        assert_eq!(cfg.taxonomy_dir(), PathBuf::from(DEFAULT_DATA_DIR));
    }
}
