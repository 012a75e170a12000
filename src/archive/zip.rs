use std::fs::File;
use std::path::Path;

use zip::ZipArchive;

use super::MemberSource;
use crate::error::DecodeError;

/// Reads entry names from a zip central directory.
pub struct ZipSource {
    archive: ZipArchive<File>,
}

impl ZipSource {
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;
        Ok(Self { archive })
    }
}

impl MemberSource for ZipSource {
    fn format_name(&self) -> &'static str {
        "zip"
    }

    fn for_each_name(&mut self, visit: &mut dyn FnMut(&str)) -> Result<(), DecodeError> {
        for i in 0..self.archive.len() {
            if let Some(name) = self.archive.name_for_index(i) {
                visit(name);
            }
        }
        Ok(())
    }
}
