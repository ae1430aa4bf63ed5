//! Filesystem-backed Leitner level store.
//!
//! Each word is a plain text file named after the word, stored inside
//! the directory of the level it currently sits at:
//!
//! ```text
//! <root>/
//! ├── 01/
//! │   ├── gehen
//! │   └── laufen
//! ├── 02/
//! │   └── Haus
//! ...
//! └── 07/
//! ```
//!
//! A word exists at exactly one level at any time. Moving a word is a
//! single `rename` on the same filesystem, so there is no intermediate
//! state in which the word is visible at two levels or at none.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use log::debug;

use super::config::Config;
use super::error::{Result, TrainerError};
use super::Level;

/// How `write` treats an existing entry file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Fail if the word already has a file at this level.
    Create,
    /// Replace any existing content.
    Overwrite,
    /// Add to the end of existing content, creating the file if absent.
    Append,
}

/// Persistence for words across proficiency levels.
#[derive(Debug, Clone)]
pub struct LevelStore {
    root: PathBuf,
    min_level: Level,
    max_level: Level,
}

impl LevelStore {
    /// Build a store over `config.root` with the configured level bounds.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            root: config.root.clone(),
            min_level: config.min_level,
            max_level: config.max_level,
        })
    }

    /// Lowest level, where new words start.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Highest level; [`promote`](Self::promote) saturates here.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Directory holding the files of one level, named with two digits
    /// (`01`, `02`, ...) so listings sort in level order.
    fn level_dir(&self, level: Level) -> PathBuf {
        self.root.join(format!("{:02}", level))
    }

    /// Path of a word's entry file, without validity checks.
    fn entry_file(&self, level: Level, word: &str) -> PathBuf {
        self.level_dir(level).join(word)
    }

    /// Path of a word's entry file at a level, for handing to the
    /// editor. The file need not exist yet.
    pub fn entry_path(&self, level: Level, word: &str) -> Result<PathBuf> {
        self.check_level(level)?;
        check_word(word)?;
        Ok(self.entry_file(level, word))
    }

    fn check_level(&self, level: Level) -> Result<()> {
        if level < self.min_level || level > self.max_level {
            return Err(TrainerError::InvalidLevel {
                level,
                min: self.min_level,
                max: self.max_level,
            });
        }
        Ok(())
    }

    /// Create the root and every level directory. Idempotent.
    pub fn ensure_layout(&self) -> Result<()> {
        for level in self.min_level..=self.max_level {
            fs::create_dir_all(self.level_dir(level))?;
        }
        debug!("store layout ensured under {}", self.root.display());
        Ok(())
    }

    /// All words currently stored at `level`, in directory order.
    ///
    /// The order carries no meaning; review sessions shuffle it anyway.
    pub fn words(&self, level: Level) -> Result<Vec<String>> {
        self.check_level(level)?;
        let mut words = Vec::new();
        for entry in fs::read_dir(self.level_dir(level))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => words.push(name),
                Err(name) => debug!("ignoring non-unicode entry {:?}", name),
            }
        }
        Ok(words)
    }

    /// Number of words stored at `level`.
    pub fn word_count(&self, level: Level) -> Result<usize> {
        Ok(self.words(level)?.len())
    }

    /// Find the level currently holding `word` by scanning the fixed
    /// range of level directories, lowest first.
    pub fn locate(&self, word: &str) -> Result<Option<Level>> {
        check_word(word)?;
        for level in self.min_level..=self.max_level {
            if self.entry_file(level, word).is_file() {
                return Ok(Some(level));
            }
        }
        Ok(None)
    }

    /// Read the entry content of `word` at `level`.
    pub fn read(&self, level: Level, word: &str) -> Result<String> {
        self.check_level(level)?;
        check_word(word)?;
        match fs::read_to_string(self.entry_file(level, word)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(TrainerError::WordNotFound {
                word: word.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Write entry content for `word` at `level` according to `mode`.
    pub fn write(&self, level: Level, word: &str, content: &str, mode: WriteMode) -> Result<()> {
        self.check_level(level)?;
        check_word(word)?;
        let path = self.entry_file(level, word);
        let mut options = OpenOptions::new();
        options.write(true);
        match mode {
            WriteMode::Create => {
                options.create_new(true);
            }
            WriteMode::Overwrite => {
                options.create(true).truncate(true);
            }
            WriteMode::Append => {
                options.create(true).append(true);
            }
        }
        let mut file = options.open(&path)?;
        file.write_all(content.as_bytes())?;
        debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }

    /// Move `word` between levels with a single rename. A level outside
    /// the configured bounds is an error, never clamped.
    pub fn move_word(&self, word: &str, from: Level, to: Level) -> Result<()> {
        self.check_level(from)?;
        self.check_level(to)?;
        check_word(word)?;
        let source = self.entry_file(from, word);
        let target = self.entry_file(to, word);
        match fs::rename(&source, &target) {
            Ok(()) => {
                debug!("moved {:?} from level {} to {}", word, from, to);
                Ok(())
            }
            // The rename reports NotFound for either end; only a missing
            // source means the word is absent. A missing target directory
            // stays an I/O fault.
            Err(e) if e.kind() == ErrorKind::NotFound && !source.is_file() => {
                Err(TrainerError::WordNotFound {
                    word: word.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move `word` up one level after a correct answer, saturating at
    /// the top. Returns the level the word ends up at.
    pub fn promote(&self, word: &str, level: Level) -> Result<Level> {
        self.check_level(level)?;
        if level == self.max_level {
            debug!("{:?} already at top level {}", word, level);
            return Ok(level);
        }
        self.move_word(word, level, level + 1)?;
        Ok(level + 1)
    }

    /// Move `word` down one level after an incorrect answer, saturating
    /// at the bottom. Returns the level the word ends up at.
    pub fn demote(&self, word: &str, level: Level) -> Result<Level> {
        self.check_level(level)?;
        if level == self.min_level {
            debug!("{:?} already at bottom level {}", word, level);
            return Ok(level);
        }
        self.move_word(word, level, level - 1)?;
        Ok(level - 1)
    }
}

/// Reject words that cannot serve as filenames inside a level directory.
fn check_word(word: &str) -> Result<()> {
    let reason = if word.is_empty() {
        Some("empty")
    } else if word == "." || word == ".." {
        Some("reserved directory name")
    } else if word.chars().any(std::path::is_separator) || word.contains('\0') {
        Some("contains a path separator or NUL")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(TrainerError::InvalidWord {
            word: word.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
