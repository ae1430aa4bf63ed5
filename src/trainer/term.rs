//! Terminal I/O behind the `Console` seam.
//!
//! The session controller only talks to a `Console`, so tests can
//! script keystrokes and capture output. The production implementation
//! wraps stdin/stdout, entering raw mode just long enough to read one
//! keystroke without line buffering.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::error::Result;

/// Blocking, strictly sequential terminal I/O used by the session.
pub trait Console {
    /// Print `text` and flush, so prompts appear before input blocks.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Block for exactly one keystroke, unbuffered and unechoed.
    /// Enter is reported as `'\r'`.
    fn read_key(&mut self) -> Result<char>;

    /// Block for one line of input, trailing newline included.
    fn read_line(&mut self) -> Result<String>;
}

/// The real terminal on stdin/stdout.
#[derive(Debug, Default)]
pub struct Terminal;

/// Restores cooked mode when dropped, also on the error paths.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Console for Terminal {
    fn write(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<char> {
        let _guard = RawModeGuard::enter()?;
        loop {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Enter => return Ok('\r'),
                    // Raw mode swallows SIGINT; surface Ctrl-C as an error.
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted").into())
                    }
                    KeyCode::Char(c) => return Ok(c),
                    // Function and navigation keys select nothing; keep waiting.
                    _ => {}
                }
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    }
}
