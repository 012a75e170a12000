use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::archive;
use crate::cleanup::{confirm, delete_items, existing_items};
use crate::error::{CleanupError, Result};

/// How a cleanup run ended. Every variant is a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanOutcome {
    EmptyArchive,
    NothingToClean,
    Declined,
    Cleaned { deleted: usize, failed: usize },
}

/// Removes whatever an archive left behind in a directory, after asking.
pub struct ArchiveCleaner {
    archive_path: PathBuf,
    root: PathBuf,
    xz_program: OsString,
}

impl ArchiveCleaner {
    pub fn new(archive_path: &Path) -> Self {
        Self {
            archive_path: archive_path.to_path_buf(),
            root: PathBuf::from("."),
            xz_program: OsString::from("xz"),
        }
    }

    /// Directory whose entries are matched against the archive.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Program used to decompress `.tar.xz` archives.
    pub fn with_xz_program(mut self, program: impl AsRef<OsStr>) -> Self {
        self.xz_program = program.as_ref().to_os_string();
        self
    }

    /// Runs the whole cleanup: validate, enumerate, filter, confirm, delete.
    ///
    /// Status messages go to `output` and the confirmation answer is read from
    /// `input`. Errors abort before anything is deleted; per-item deletion
    /// failures are printed and counted in [`CleanOutcome::Cleaned`].
    pub fn clean<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<CleanOutcome> {
        self.run(input, &mut output).map_err(|e| match e {
            RunError::Cleanup(e) => e,
            RunError::Console(e) => CleanupError::Console(e),
        })
    }

    fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<CleanOutcome, RunError> {
        if !archive_exists(&self.archive_path) {
            return Err(CleanupError::NotFound(self.archive_path.clone()).into());
        }

        let items = archive::top_level_items(&self.archive_path, &self.xz_program)?;
        if items.is_empty() {
            writeln!(output, "Archive is empty")?;
            return Ok(CleanOutcome::EmptyArchive);
        }

        let existing = existing_items(&items, &self.root);
        tracing::info!(
            top_level = items.len(),
            existing = existing.len(),
            root = %self.root.display(),
            "filtered against directory"
        );
        if existing.is_empty() {
            writeln!(output, "No files or directories from the archive were found")?;
            return Ok(CleanOutcome::NothingToClean);
        }

        writeln!(output, "The following files/directories may have come from the archive:")?;
        for name in &existing {
            writeln!(output, "  - {name}")?;
        }

        if !confirm(input, &mut *output)? {
            writeln!(output, "Deletion cancelled")?;
            return Ok(CleanOutcome::Declined);
        }

        let reports = delete_items(&existing, &self.root);
        let mut failed = 0;
        for report in &reports {
            match &report.result {
                Ok(()) => writeln!(output, "Deleted: {}", report.name)?,
                Err(e) => {
                    failed += 1;
                    writeln!(output, "Failed to delete '{}': {e}", report.name)?;
                }
            }
        }
        writeln!(output, "Cleanup complete")?;

        Ok(CleanOutcome::Cleaned {
            deleted: reports.len() - failed,
            failed,
        })
    }
}

/// Anything other than a clean "not found" means the path is there and the
/// real problem will surface when it is opened.
fn archive_exists(path: &Path) -> bool {
    !matches!(fs::metadata(path), Err(e) if e.kind() == ErrorKind::NotFound)
}

enum RunError {
    Cleanup(CleanupError),
    Console(io::Error),
}

impl From<CleanupError> for RunError {
    fn from(e: CleanupError) -> Self {
        RunError::Cleanup(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Console(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::fixtures::{write_tar_gz, write_tar_gz_verbatim, write_zip, ENTRIES};
    use std::io::Cursor;

    struct Run {
        outcome: Result<CleanOutcome>,
        output: String,
    }

    fn run(cleaner: &ArchiveCleaner, answer: &str) -> Run {
        let mut output = Vec::new();
        let outcome = cleaner.clean(Cursor::new(answer.to_string()), &mut output);
        Run {
            outcome,
            output: String::from_utf8(output).unwrap(),
        }
    }

    fn workspace() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("extracted");
        fs::create_dir(&root).unwrap();
        (dir, root)
    }

    #[test]
    fn missing_archive_is_not_found() {
        let (dir, root) = workspace();
        let cleaner = ArchiveCleaner::new(&dir.path().join("absent.zip")).with_root(&root);
        let run = run(&cleaner, "y\n");
        assert!(matches!(run.outcome, Err(CleanupError::NotFound(_))));
        assert!(run.output.is_empty());
    }

    #[test]
    fn unsupported_archive_is_rejected() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.rar");
        fs::write(&path, b"Rar!").unwrap();

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "y\n");
        assert!(matches!(run.outcome, Err(CleanupError::UnsupportedFormat(_))));
    }

    #[test]
    fn empty_archive_stops_before_prompting() {
        let (dir, root) = workspace();
        let path = dir.path().join("empty.zip");
        write_zip(&path, &[]);

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "y\n");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::EmptyArchive);
        assert_eq!(run.output, "Archive is empty\n");
    }

    #[test]
    fn nothing_on_disk_means_nothing_to_clean() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.tar.gz");
        write_tar_gz(&path, ENTRIES);

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "y\n");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::NothingToClean);
        assert!(!run.output.contains("(y/N)"));
    }

    #[test]
    fn declining_leaves_everything_in_place() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, ENTRIES);
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "n\n");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::Declined);
        assert!(run.output.contains("  - a\n"));
        assert!(run.output.contains("  - b.txt\n"));
        assert!(run.output.ends_with("Deletion cancelled\n"));
        assert!(root.join("a").exists());
        assert!(root.join("b.txt").exists());
    }

    #[test]
    fn confirming_deletes_only_archive_items() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, ENTRIES);
        fs::create_dir_all(root.join("a/sub")).unwrap();
        fs::write(root.join("a/sub/y.txt"), b"y").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("unrelated.txt"), b"keep").unwrap();

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), " Yes \n");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::Cleaned { deleted: 2, failed: 0 });
        assert!(run.output.contains("Deleted: a\n"));
        assert!(run.output.contains("Deleted: b.txt\n"));
        assert!(run.output.ends_with("Cleanup complete\n"));
        assert!(!root.join("a").exists());
        assert!(!root.join("b.txt").exists());
        assert!(root.join("unrelated.txt").exists());
    }

    #[test]
    fn dot_prefixed_tar_never_empties_the_root() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.tar.gz");
        // Layout of `tar -czf bundle.tar.gz -C src .`
        write_tar_gz_verbatim(&path, &["./", "./a/", "./a/x.txt", "b.txt"]);
        fs::create_dir(root.join("a")).unwrap();
        fs::write(root.join("a/x.txt"), b"x").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("unrelated.txt"), b"keep").unwrap();

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "y\n");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::Cleaned { deleted: 1, failed: 1 });
        assert!(run.output.contains("  - .\n"));
        assert!(run.output.contains("Deleted: b.txt\n"));
        assert!(run.output.contains("Failed to delete '.'"));
        assert!(!root.join("b.txt").exists());
        assert!(root.join("a/x.txt").exists());
        assert!(root.join("unrelated.txt").exists());
    }

    #[test]
    fn eof_on_input_declines() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.zip");
        write_zip(&path, ENTRIES);
        fs::write(root.join("b.txt"), b"b").unwrap();

        let run = run(&ArchiveCleaner::new(&path).with_root(&root), "");
        assert_eq!(run.outcome.unwrap(), CleanOutcome::Declined);
        assert!(root.join("b.txt").exists());
    }

    #[test]
    fn missing_xz_decoder_is_a_decode_error() {
        let (dir, root) = workspace();
        let path = dir.path().join("bundle.tar.xz");
        fs::write(&path, b"").unwrap();

        let cleaner = ArchiveCleaner::new(&path)
            .with_root(&root)
            .with_xz_program("no-such-xz-decoder-on-path");
        let run = run(&cleaner, "y\n");
        assert!(matches!(
            run.outcome,
            Err(CleanupError::Decode(crate::error::DecodeError::DecoderSpawn { .. }))
        ));
    }
}
