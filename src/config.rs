use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    app_dirs::AppDirs,
    error::GameResult,
    words::{BuiltinWordList, WordList},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_list: String,
    pub word_file: Option<PathBuf>,
    pub score_increase: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_list: BuiltinWordList::English.to_string().to_lowercase(),
            word_file: None,
            score_increase: None,
        }
    }
}

impl Config {
    /// Loads the configured words. A word file wins over the built-in list name.
    pub fn load_word_list(&self) -> GameResult<WordList> {
        let list = match &self.word_file {
            Some(path) => WordList::from_path(path)?,
            None => WordList::from_name(&self.word_list)?,
        };

        Ok(match self.score_increase {
            Some(points) => list.with_score_increase(points),
            None => list,
        })
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
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
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
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => warn!("ignoring unreadable config {}: {e}", self.path.display()),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).map_err(std::io::Error::other)?;
        fs::write(&self.path, data)
    }
}
