//! Runtime configuration, resolved once at startup and passed
//! explicitly into constructors. There are no process-wide globals.

use std::env;
use std::path::PathBuf;

use super::error::{Result, TrainerError};
use super::Level;

/// Name of the store directory inside the user's home.
const STORE_DIR_NAME: &str = ".voctrain";

/// Editor used when `$EDITOR` is not set.
const DEFAULT_EDITOR: &str = "vi";

/// Dictionary consulted when `VOCTRAIN_DICT` is not set. Ding format,
/// as shipped by the `trans-de-en` dictionary packages.
const DEFAULT_DICT: &str = "/usr/share/trans/de-en";

/// Configuration for a training session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory of the level store, one subdirectory per level.
    pub root: PathBuf,
    /// Bilingual dictionary consulted when adding words.
    pub dict_path: PathBuf,
    /// Editor command, spawned with a word file as its only argument.
    pub editor: String,
    /// Lowest (least proficient) level. New words start here.
    pub min_level: Level,
    /// Highest (most proficient) level.
    pub max_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(STORE_DIR_NAME),
            dict_path: PathBuf::from(DEFAULT_DICT),
            editor: DEFAULT_EDITOR.to_string(),
            min_level: 1,
            max_level: 7,
        }
    }
}

impl Config {
    /// Resolve the configuration from the environment:
    ///
    /// - store root: `.voctrain` under the user's home directory
    /// - dictionary: `$VOCTRAIN_DICT`, else a system-wide Ding file
    /// - editor: `$EDITOR`, else `vi`
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            TrainerError::Config("home directory could not be determined".to_string())
        })?;
        let dict_path = env::var_os("VOCTRAIN_DICT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT));
        let editor = env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());

        let config = Self {
            root: home.join(STORE_DIR_NAME),
            dict_path,
            editor,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the level bounds. Levels double as single-digit menu keys,
    /// so the range must fit into 0..=9 and must not be inverted.
    pub fn validate(&self) -> Result<()> {
        if self.min_level > self.max_level {
            return Err(TrainerError::Config(format!(
                "min_level {} exceeds max_level {}",
                self.min_level, self.max_level
            )));
        }
        if self.max_level > 9 {
            return Err(TrainerError::Config(format!(
                "max_level {} does not fit a single menu digit",
                self.max_level
            )));
        }
        Ok(())
    }

    /// All configured levels, lowest first.
    pub fn levels(&self) -> impl Iterator<Item = Level> {
        self.min_level..=self.max_level
    }
}
