use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{
    DEFAULT_COOL_DOWN_SECS, DEFAULT_REST_SECS, DEFAULT_ROUNDS, DEFAULT_WORK_SECS,
};

/// persisted user preferences; command-line flags override these per run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub work_secs: u32,
    pub rest_secs: u32,
    pub rounds: u32,
    pub category: String,
    pub cool_down_secs: u32,
    pub skip_warm_up: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            rest_secs: DEFAULT_REST_SECS,
            rounds: DEFAULT_ROUNDS,
            category: "strength".to_string(),
            cool_down_secs: DEFAULT_COOL_DOWN_SECS,
            skip_warm_up: false,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "rondo") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("rondo_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
