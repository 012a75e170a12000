use std::io::Read;

use tar::Archive;

use super::MemberSource;
use crate::error::DecodeError;

/// Walks tar headers over any byte stream, compressed or not.
pub struct TarSource<R: Read> {
    archive: Archive<R>,
    format_name: &'static str,
}

impl<R: Read> TarSource<R> {
    pub fn new(reader: R, format_name: &'static str) -> Self {
        Self {
            archive: Archive::new(reader),
            format_name,
        }
    }

    /// Hands back the underlying stream, e.g. to drain what follows the
    /// end-of-archive marker.
    pub fn into_inner(self) -> R {
        self.archive.into_inner()
    }
}

impl<R: Read> MemberSource for TarSource<R> {
    fn format_name(&self) -> &'static str {
        self.format_name
    }

    fn for_each_name(&mut self, visit: &mut dyn FnMut(&str)) -> Result<(), DecodeError> {
        for entry in self.archive.entries()? {
            let entry = entry?;
            // Raw bytes include GNU long names and PAX paths, and avoid failing
            // on names that are not valid UTF-8.
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            visit(&name);
        }
        Ok(())
    }
}
