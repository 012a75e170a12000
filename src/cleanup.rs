use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::Path;

use crate::members::TopLevelItems;

pub const CONFIRM_PROMPT: &str = "Delete these files and directories? (y/N): ";

/// Outcome of removing one top-level item.
#[derive(Debug)]
pub struct DeletionReport {
    pub name: String,
    pub result: io::Result<()>,
}

impl DeletionReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Whether `path` names any kind of filesystem entry. Lookup errors other
/// than "not found" count as present, so the item is still offered.
fn entry_exists(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            tracing::debug!(path = %path.display(), "lookup failed, treating as present: {e}");
            true
        }
    }
}

/// Keeps the names from `items` that exist directly under `root`.
pub fn existing_items(items: &TopLevelItems, root: &Path) -> Vec<String> {
    items
        .iter()
        .filter(|name| entry_exists(&root.join(name)))
        .map(str::to_string)
        .collect()
}

/// `y` or `yes` in any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    answer == "y" || answer == "yes"
}

/// Prompts once and reads a single line. EOF counts as "no".
pub fn confirm<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<bool> {
    output.write_all(CONFIRM_PROMPT.as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        // Keep the terminal tidy when stdin closes without a newline.
        writeln!(output)?;
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

fn remove_entry(root: &Path, name: &str) -> io::Result<()> {
    // "." and ".." would resolve to the root or its parent, not an archive item.
    if name == "." || name == ".." {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("refusing to remove '{name}'"),
        ));
    }

    let path = root.join(name);
    // symlink_metadata so a link to a directory removes the link, not the target.
    let metadata = fs::symlink_metadata(&path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(&path)
    } else {
        fs::remove_file(&path)
    }
}

/// Removes every name under `root`. A failure is recorded and the next name
/// is still attempted.
pub fn delete_items<S: AsRef<str>>(names: &[S], root: &Path) -> Vec<DeletionReport> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let result = remove_entry(root, name);
            match &result {
                Ok(()) => tracing::debug!(name, "deleted"),
                Err(e) => tracing::warn!(name, "deletion failed: {e}"),
            }
            DeletionReport {
                name: name.to_string(),
                result,
            }
        })
        .collect()
}
