mod tar;
mod xz;
mod zip;

pub use self::tar::TarSource;
pub use self::xz::XzSource;
pub use self::zip::ZipSource;

use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;

use crate::error::{CleanupError, DecodeError, Result};
use crate::format::ArchiveFormat;
use crate::members::TopLevelItems;

/// Something that can walk the entry names of one opened archive.
pub trait MemberSource {
    /// Human readable format name, used in log output.
    fn format_name(&self) -> &'static str;

    /// Calls `visit` with every raw entry name, in archive order.
    fn for_each_name(&mut self, visit: &mut dyn FnMut(&str)) -> Result<(), DecodeError>;
}

/// Opens `path` with the adapter for `format`.
pub fn open(path: &Path, format: ArchiveFormat, xz_program: &OsStr) -> Result<Box<dyn MemberSource>> {
    let source: Box<dyn MemberSource> = match format {
        ArchiveFormat::Zip => Box::new(ZipSource::open(path)?),
        ArchiveFormat::Tar => Box::new(TarSource::new(open_file(path)?, "tar")),
        ArchiveFormat::TarGzip => Box::new(TarSource::new(GzDecoder::new(open_file(path)?), "tar.gz")),
        ArchiveFormat::TarBzip2 => Box::new(TarSource::new(BzDecoder::new(open_file(path)?), "tar.bz2")),
        ArchiveFormat::TarXz => Box::new(XzSource::spawn(xz_program, path)?),
        ArchiveFormat::Unknown => return Err(CleanupError::UnsupportedFormat(path.to_path_buf())),
    };
    Ok(source)
}

/// Detects the format of `path` and collects its top-level items.
pub fn top_level_items(path: &Path, xz_program: &OsStr) -> Result<TopLevelItems> {
    let format = ArchiveFormat::detect(path);
    if !format.is_supported() {
        return Err(CleanupError::UnsupportedFormat(path.to_path_buf()));
    }

    let mut source = open(path, format, xz_program)?;
    tracing::info!(path = %path.display(), format = source.format_name(), "reading archive");

    let mut items = TopLevelItems::new();
    let mut entries = 0usize;
    source.for_each_name(&mut |name| {
        entries += 1;
        items.insert_entry(name);
    })?;

    tracing::info!(entries, top_level = items.len(), "archive enumerated");
    Ok(items)
}

fn open_file(path: &Path) -> Result<File, DecodeError> {
    Ok(File::open(path)?)
}
