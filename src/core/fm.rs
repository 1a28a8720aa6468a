//! Directory listing for llama.
//!
//! Provides the [FileEntry] struct which is used throughout llama and the
//! [browse_dir] function that reads a single directory into entries.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;

/// A single entry in a directory listing.
///
/// Holds the name and the attribute flags. Entries are immutable once listed;
/// the whole list is replaced when the current directory changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: Box<OsStr>,
    flags: u8,
}

impl FileEntry {
    // Flag bit definitions
    pub const IS_DIR: u8 = 1 << 0;
    pub const IS_HIDDEN: u8 = 1 << 1;
    pub const IS_SYMLINK: u8 = 1 << 2;

    pub fn new(name: impl Into<OsString>, flags: u8) -> Self {
        FileEntry {
            name: name.into().into_boxed_os_str(),
            flags,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }
}

/// Reads the contents of the provided directory into a vector of [FileEntry].
///
/// Entries are returned in the order the OS yields them; sorting happens in
/// [crate::core::Formatter]. Symlinks pointing at directories are flagged as
/// directories so they can be entered.
pub fn browse_dir(path: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let name = entry.file_name();
        let ft = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        let mut flags = 0u8;
        if ft.is_dir() {
            flags |= FileEntry::IS_DIR;
        }
        if ft.is_symlink() {
            flags |= FileEntry::IS_SYMLINK;
            if fs::metadata(entry.path()).is_ok_and(|md| md.is_dir()) {
                flags |= FileEntry::IS_DIR;
            }
        }

        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            if name.as_bytes().first() == Some(&b'.') {
                flags |= FileEntry::IS_HIDDEN;
            }
        }

        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            if let Ok(md) = entry.metadata()
                && md.file_attributes() & 0x2 != 0
            {
                flags |= FileEntry::IS_HIDDEN;
            }
        }

        entries.push(FileEntry::new(name, flags));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn file_entry_flags() {
        let fe_file = FileEntry::new("file.txt", 0);
        assert!(!fe_file.is_dir());
        assert_eq!(fe_file.name_str(), "file.txt");

        let fe_dir = FileEntry::new(".hidden_folder", FileEntry::IS_DIR | FileEntry::IS_HIDDEN);
        assert!(fe_dir.is_dir());
        assert!(fe_dir.is_hidden());
        assert!(!fe_dir.is_symlink());
    }

    #[test]
    fn browse_dir_flags_directories() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        File::create(dir.path().join("file.txt"))?;

        let entries = browse_dir(dir.path())?;
        assert_eq!(entries.len(), 2);

        let sub = entries
            .iter()
            .find(|e| e.name() == "sub")
            .ok_or("sub missing")?;
        assert!(sub.is_dir());

        let file = entries
            .iter()
            .find(|e| e.name() == "file.txt")
            .ok_or("file missing")?;
        assert!(!file.is_dir());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn browse_dir_symlinked_dir_is_dir() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let target = dir.path().join("target");
        fs::create_dir(&target)?;
        std::os::unix::fs::symlink(&target, dir.path().join("link"))?;

        let entries = browse_dir(dir.path())?;
        let link = entries
            .iter()
            .find(|e| e.name() == "link")
            .ok_or("link missing")?;
        assert!(link.is_symlink());
        assert!(link.is_dir());
        Ok(())
    }

    #[test]
    fn browse_nonexistent() {
        let path = PathBuf::from("/path/does/not/exist");
        assert!(browse_dir(&path).is_err());
    }
}
