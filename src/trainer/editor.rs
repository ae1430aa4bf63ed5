//! External editor collaborator.

use std::path::Path;
use std::process::Command;

use log::{debug, warn};

use super::error::Result;

/// Open `path` in `editor` and block until the editor exits.
///
/// The editor inherits the terminal and gets the file path as its only
/// argument. A non-zero exit status is logged as a warning and the
/// session continues; failing to spawn the editor at all is an error.
pub fn edit_file(editor: &str, path: &Path) -> Result<()> {
    debug!("editing {} with {:?}", path.display(), editor);
    let status = Command::new(editor).arg(path).status()?;
    if !status.success() {
        warn!("editor {:?} exited with {}", editor, status);
    }
    Ok(())
}
