//! Interactive session controller.
//!
//! Drives the menu state machine (render, block for one keystroke,
//! dispatch) and the two workflows built on top of it: reviewing the
//! words of a level and adding a new word. Menus are rebuilt from
//! scratch before every render so displayed word counts are current.

use log::info;
use rand::seq::SliceRandom;

use super::config::Config;
use super::dict::Dictionary;
use super::editor;
use super::error::{Result, TrainerError};
use super::menu::{Flow, Menu};
use super::store::{LevelStore, WriteMode};
use super::term::Console;
use super::Level;

/// Width of the divider lines framing a displayed entry.
const DIVIDER_WIDTH: usize = 80;

/// Choices on the main menu.
#[derive(Debug, Clone, Copy)]
enum MainAction {
    SelectLevel,
    AddWord,
    Quit,
}

/// Choices on the level-selection menu.
#[derive(Debug, Clone, Copy)]
enum LevelAction {
    Train(Level),
    Quit,
}

/// Choices on the per-word `correct?` menu.
#[derive(Debug, Clone, Copy)]
enum ReviewAction {
    Promote,
    Demote,
    Edit,
    Quit,
}

/// Choices offered when an added word already exists somewhere.
#[derive(Debug, Clone, Copy)]
enum ExistsAction {
    Edit,
    MoveToFirst,
    Merge,
    Quit,
}

/// Choices offered when an added word is new.
#[derive(Debug, Clone, Copy)]
enum CreateAction {
    Create,
    Quit,
}

/// One interactive training session over a level store and dictionary.
///
/// The session holds no mutable state of its own; all durable state
/// lives in the store. The console is passed into each entry point so
/// tests can drive a session with scripted input.
pub struct Session {
    config: Config,
    store: LevelStore,
    dict: Dictionary,
}

impl Session {
    /// Build a session from `config`, creating the store layout if it
    /// does not exist yet.
    pub fn new(config: Config) -> Result<Self> {
        let store = LevelStore::new(&config)?;
        store.ensure_layout()?;
        let dict = Dictionary::new(config.dict_path.clone());
        Ok(Self {
            config,
            store,
            dict,
        })
    }

    /// Run the main menu until the user quits.
    pub fn run<C: Console>(&self, console: &mut C) -> Result<()> {
        loop {
            let menu = main_menu()?;
            let Some(action) = prompt(console, &menu)? else {
                continue;
            };
            match action {
                MainAction::SelectLevel => self.select_level(console)?,
                MainAction::AddWord => self.add_word(console)?,
                MainAction::Quit => return Ok(()),
            }
        }
    }

    /// Run the level-selection menu; quitting it returns to the caller.
    fn select_level<C: Console>(&self, console: &mut C) -> Result<()> {
        loop {
            let menu = self.level_menu()?;
            let Some(action) = prompt(console, &menu)? else {
                continue;
            };
            match action {
                LevelAction::Train(level) => self.review(console, level)?,
                LevelAction::Quit => return Ok(()),
            }
        }
    }

    /// Build the level menu fresh so the word counts are current.
    fn level_menu(&self) -> Result<Menu<LevelAction>> {
        let mut menu = Menu::with_layout("select level", "\n", "\n> ");
        for level in self.config.levels() {
            let count = self.store.word_count(level)?;
            let key = char::from_digit(level, 10).ok_or_else(|| {
                TrainerError::MenuConfig(format!("level {} does not fit a single digit key", level))
            })?;
            menu.add_option(
                format!("level {} [{} words]", level, count),
                key,
                LevelAction::Train(level),
            )?;
        }
        menu.add_quit_option(LevelAction::Quit)?;
        Ok(menu)
    }

    /// Review every word of `level` once, in fresh shuffled order.
    ///
    /// Each word is shown bare first; Enter flips it over to reveal the
    /// stored entry, then the `correct?` menu decides where it goes.
    pub fn review<C: Console>(&self, console: &mut C, level: Level) -> Result<()> {
        let mut words = self.store.words(level)?;
        words.shuffle(&mut rand::thread_rng());
        let total = words.len();
        info!("reviewing {} words at level {}", total, level);
        for (index, word) in words.iter().enumerate() {
            console.write(&format!("[{:4}/{:4}] {}", index + 1, total, word))?;
            // The flip: recall first, reveal on Enter.
            console.read_line()?;
            self.display(console, level, word)?;
            if self.review_word(console, level, word)? == Flow::Quit {
                info!("review aborted at word {} of {}", index + 1, total);
                return Ok(());
            }
        }
        Ok(())
    }

    /// Ask `correct?` for one word until a choice settles it.
    fn review_word<C: Console>(&self, console: &mut C, level: Level, word: &str) -> Result<Flow> {
        loop {
            let menu = correct_menu()?;
            let Some(action) = prompt(console, &menu)? else {
                continue;
            };
            let flow = match action {
                ReviewAction::Promote => {
                    self.store.promote(word, level)?;
                    Flow::NextWord
                }
                ReviewAction::Demote => {
                    self.store.demote(word, level)?;
                    Flow::NextWord
                }
                ReviewAction::Edit => {
                    editor::edit_file(&self.config.editor, &self.store.entry_path(level, word)?)?;
                    Flow::Continue
                }
                ReviewAction::Quit => Flow::Quit,
            };
            if flow != Flow::Continue {
                return Ok(flow);
            }
        }
    }

    /// Print the stored entry of `word`, framed by divider lines.
    fn display<C: Console>(&self, console: &mut C, level: Level, word: &str) -> Result<()> {
        let content = self.store.read(level, word)?;
        let divider = "-".repeat(DIVIDER_WIDTH);
        let mut out = String::with_capacity(content.len() + 2 * (DIVIDER_WIDTH + 1));
        out.push_str(&divider);
        out.push('\n');
        out.push_str(&content);
        if !content.is_empty() && !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&divider);
        out.push('\n');
        console.write(&out)
    }

    /// Add a word: seed it from the dictionary at the lowest level, or
    /// offer repairs when it already exists somewhere in the store.
    pub fn add_word<C: Console>(&self, console: &mut C) -> Result<()> {
        console.write("enter new word: ")?;
        let line = console.read_line()?;
        let word = line.trim();
        if word.is_empty() {
            console.write("no word entered\n")?;
            return Ok(());
        }
        match self.store.locate(word) {
            // Unusable words are reported on the console, not propagated.
            Err(TrainerError::InvalidWord { reason, .. }) => {
                console.write(&format!("cannot use {:?} as a word: {}\n", word, reason))?;
                Ok(())
            }
            Err(e) => Err(e),
            Ok(Some(level)) => self.add_existing(console, level, word),
            Ok(None) => self.add_new(console, word),
        }
    }

    /// The added word is already stored at `level`.
    fn add_existing<C: Console>(&self, console: &mut C, level: Level, word: &str) -> Result<()> {
        console.write(&format!("word already exists in level {}\n", level))?;
        self.display(console, level, word)?;
        loop {
            let menu = self.exists_menu(level)?;
            let Some(action) = prompt(console, &menu)? else {
                continue;
            };
            match action {
                ExistsAction::Edit => {
                    editor::edit_file(&self.config.editor, &self.store.entry_path(level, word)?)?;
                    return Ok(());
                }
                ExistsAction::MoveToFirst => {
                    let first = self.store.min_level();
                    self.store.move_word(word, level, first)?;
                    console.write(&format!("moved to level {}\n", first))?;
                    return Ok(());
                }
                ExistsAction::Merge => {
                    let fresh = self.dict.lookup(word)?;
                    // One blank line between old and new content, whether
                    // or not the entry ends with a newline.
                    let current = self.store.read(level, word)?;
                    let separator = if current.is_empty() {
                        ""
                    } else if current.ends_with('\n') {
                        "\n"
                    } else {
                        "\n\n"
                    };
                    self.store
                        .write(level, word, &format!("{}{}", separator, fresh), WriteMode::Append)?;
                    editor::edit_file(&self.config.editor, &self.store.entry_path(level, word)?)?;
                    return Ok(());
                }
                ExistsAction::Quit => return Ok(()),
            }
        }
    }

    fn exists_menu(&self, level: Level) -> Result<Menu<ExistsAction>> {
        let mut menu = Menu::new("word exists");
        menu.add_option("edit", 'e', ExistsAction::Edit)?;
        if level != self.store.min_level() {
            menu.add_option(
                format!("move to level {}", self.store.min_level()),
                'm',
                ExistsAction::MoveToFirst,
            )?;
        }
        menu.add_option("merge translations", 'g', ExistsAction::Merge)?;
        menu.add_quit_option(ExistsAction::Quit)?;
        Ok(menu)
    }

    /// The added word is new: look it up and offer to create it at the
    /// lowest level. Creation is offered even when the dictionary had
    /// no match; the entry then starts empty and is filled in by hand
    /// in the editor.
    fn add_new<C: Console>(&self, console: &mut C, word: &str) -> Result<()> {
        let content = self.dict.lookup(word)?;
        if content.is_empty() {
            console.write("no match found in dictionary\n")?;
        } else {
            console.write(&content)?;
        }
        loop {
            let menu = create_menu()?;
            let Some(action) = prompt(console, &menu)? else {
                continue;
            };
            match action {
                CreateAction::Create => {
                    let first = self.store.min_level();
                    self.store.write(first, word, &content, WriteMode::Create)?;
                    info!("created {:?} at level {}", word, first);
                    editor::edit_file(&self.config.editor, &self.store.entry_path(first, word)?)?;
                    return Ok(());
                }
                CreateAction::Quit => return Ok(()),
            }
        }
    }
}

/// One pass of the menu state machine: render, block for one key,
/// resolve. Returns `None` after an unmatched keystroke; the caller
/// loops, which rebuilds and re-renders the menu.
fn prompt<C: Console, A: Copy>(console: &mut C, menu: &Menu<A>) -> Result<Option<A>> {
    console.write(&menu.render())?;
    let key = console.read_key()?;
    // Echo the keystroke that raw mode swallowed.
    if key == '\r' || key == '\n' {
        console.write("\n")?;
    } else {
        console.write(&format!("{}\n", key))?;
    }
    match menu.resolve(key) {
        Some(action) => Ok(Some(*action)),
        None => {
            console.write("invalid choice\n")?;
            Ok(None)
        }
    }
}

fn main_menu() -> Result<Menu<MainAction>> {
    let mut menu = Menu::new("main menu");
    menu.add_option("select level", 's', MainAction::SelectLevel)?;
    menu.add_option("add word", 'a', MainAction::AddWord)?;
    menu.add_quit_option(MainAction::Quit)?;
    Ok(menu)
}

fn correct_menu() -> Result<Menu<ReviewAction>> {
    let mut menu = Menu::new("correct?");
    menu.add_option("yes", 'y', ReviewAction::Promote)?;
    menu.add_option("no", 'n', ReviewAction::Demote)?;
    menu.add_option("edit", 'e', ReviewAction::Edit)?;
    menu.add_quit_option(ReviewAction::Quit)?;
    menu.set_default('n')?;
    Ok(menu)
}

fn create_menu() -> Result<Menu<CreateAction>> {
    let mut menu = Menu::new("create entry?");
    menu.add_option("create", 'c', CreateAction::Create)?;
    menu.add_quit_option(CreateAction::Quit)?;
    menu.set_default('c')?;
    Ok(menu)
}
