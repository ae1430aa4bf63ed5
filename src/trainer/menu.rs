//! Menu data model: a header, ordered single-key options, and an
//! optional default accepted by bare Enter.
//!
//! A menu is inert data plus rendering and key resolution. Reading the
//! keystroke and acting on the resolved choice stay with the session
//! loop; the action attached to an option is a plain tag (a small enum
//! per menu) that the owning workflow matches exhaustively.

use super::error::{Result, TrainerError};

/// Outcome of dispatching one menu choice, consumed by the loop that
/// owns the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Stay on the current item and ask again.
    Continue,
    /// Done with the current item; the sequence advances.
    NextWord,
    /// Abort the enclosing workflow.
    Quit,
}

/// One selectable menu entry.
#[derive(Debug)]
struct MenuOption<A> {
    text: String,
    key: char,
    action: A,
}

/// An interactive single-keystroke menu.
#[derive(Debug)]
pub struct Menu<A> {
    header: String,
    delim: &'static str,
    footer: &'static str,
    options: Vec<MenuOption<A>>,
    default: Option<char>,
}

impl<A> Menu<A> {
    /// Menu with the standard single-line layout: options joined by
    /// `", "`, prompt `": "`.
    pub fn new(header: impl Into<String>) -> Self {
        Self::with_layout(header, ", ", ": ")
    }

    /// Menu with a custom option delimiter and footer prompt.
    pub fn with_layout(header: impl Into<String>, delim: &'static str, footer: &'static str) -> Self {
        Self {
            header: header.into(),
            delim,
            footer,
            options: Vec::new(),
            default: None,
        }
    }

    /// Register an option under `key`.
    ///
    /// Keys must be ASCII lowercase letters or digits and unique within
    /// the menu; a violation is a construction bug and fails fast.
    pub fn add_option(&mut self, text: impl Into<String>, key: char, action: A) -> Result<()> {
        if !(key.is_ascii_lowercase() || key.is_ascii_digit()) {
            return Err(TrainerError::MenuConfig(format!(
                "key {:?} is not a lowercase letter or digit",
                key
            )));
        }
        if self.options.iter().any(|option| option.key == key) {
            return Err(TrainerError::MenuConfig(format!(
                "key {:?} registered twice",
                key
            )));
        }
        self.options.push(MenuOption {
            text: text.into(),
            key,
            action,
        });
        Ok(())
    }

    /// Register the conventional `quit` option on `q`.
    pub fn add_quit_option(&mut self, action: A) -> Result<()> {
        self.add_option("quit", 'q', action)
    }

    /// Mark the option registered under `key` as the default accepted
    /// by bare Enter. At most one default per menu.
    pub fn set_default(&mut self, key: char) -> Result<()> {
        if self.default.is_some() {
            return Err(TrainerError::MenuConfig("default key set twice".to_string()));
        }
        if !self.options.iter().any(|option| option.key == key) {
            return Err(TrainerError::MenuConfig(format!(
                "default key {:?} has no registered option",
                key
            )));
        }
        self.default = Some(key);
        Ok(())
    }

    /// Render the menu: header line, options joined by the delimiter,
    /// then the footer prompt (no trailing newline, input follows it).
    ///
    /// Each option shows its key inline. The first occurrence of the
    /// key inside the option text is parenthesized (`(e)dit`), or the
    /// parenthesized key is appended when the text does not contain it
    /// (`save(x)`). The default option's key is shown upper-case.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64);
        out.push_str(&self.header);
        out.push('\n');
        let choices: Vec<String> = self
            .options
            .iter()
            .map(|option| self.render_option(option))
            .collect();
        out.push_str(&choices.join(self.delim));
        out.push_str(self.footer);
        out
    }

    fn render_option(&self, option: &MenuOption<A>) -> String {
        let shown = if self.default == Some(option.key) {
            option.key.to_ascii_uppercase()
        } else {
            option.key
        };
        let marker = format!("({})", shown);
        if option.text.contains(option.key) {
            option.text.replacen(option.key, &marker, 1)
        } else {
            format!("{}{}", option.text, marker)
        }
    }

    /// Resolve one keystroke to the action of the option it selects.
    ///
    /// Carriage return or newline accepts the default option if one is
    /// set; any other key matches case-insensitively against registered
    /// keys. `None` means the keystroke selects nothing and the caller
    /// should re-render and ask again.
    pub fn resolve(&self, key: char) -> Option<&A> {
        let key = match key {
            '\r' | '\n' => self.default?,
            other => other.to_ascii_lowercase(),
        };
        self.options
            .iter()
            .find(|option| option.key == key)
            .map(|option| &option.action)
    }
}
