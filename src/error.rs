use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Errors that abort a cleanup run before anything is deleted.
#[derive(Debug, thiserror::Error)]
pub enum CleanupError {
    #[error("archive '{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported archive format: '{}' (supported: .zip, .tar, .tar.gz, .tgz, .tar.bz2, .tar.xz)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("unable to read archive contents: {0}")]
    Decode(#[from] DecodeError),

    #[error("console I/O failed: {0}")]
    Console(#[source] io::Error),
}

/// Failures while opening or walking a container.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error("unable to start decoder '{program}': {source}")]
    DecoderSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("decoder '{program}' exited with {status}: {stderr}")]
    DecoderFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

pub type Result<T, E = CleanupError> = std::result::Result<T, E>;
