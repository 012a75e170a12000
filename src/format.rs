use std::fmt;
use std::path::Path;

/// Archive formats recognised by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGzip,
    TarBzip2,
    TarXz,
    Unknown,
}

impl ArchiveFormat {
    /// Detects the format from the base file name. The file is never opened,
    /// so a mislabeled archive only fails once it is decoded.
    pub fn detect(path: &Path) -> Self {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_lowercase(),
            None => return ArchiveFormat::Unknown,
        };

        // Longer suffixes first so `.tar.gz` never falls through to `.gz`.
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            ArchiveFormat::TarGzip
        } else if name.ends_with(".tar.bz2") {
            ArchiveFormat::TarBzip2
        } else if name.ends_with(".tar.xz") {
            ArchiveFormat::TarXz
        } else if name.ends_with(".tar") {
            ArchiveFormat::Tar
        } else if name.ends_with(".zip") {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::Unknown
        }
    }

    pub fn is_supported(self) -> bool {
        self != ArchiveFormat::Unknown
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGzip => "tar.gz",
            ArchiveFormat::TarBzip2 => "tar.bz2",
            ArchiveFormat::TarXz => "tar.xz",
            ArchiveFormat::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
