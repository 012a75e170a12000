//! Finds the files and directories an archive left in a directory after it
//! was extracted, and removes them once the user agrees.
//!
//! Supported archives: `.zip`, `.tar`, `.tar.gz`/`.tgz`, `.tar.bz2` and
//! `.tar.xz` (through an external `xz` decoder).

pub mod archive;
pub mod archive_cleaner;
pub mod cleanup;
pub mod error;
pub mod format;
pub mod members;

pub use archive_cleaner::{ArchiveCleaner, CleanOutcome};
pub use error::{CleanupError, DecodeError};
pub use format::ArchiveFormat;
pub use members::TopLevelItems;
