//! File-system access used by the walkers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name, not the full path.
    pub name: String,
    /// True if the entry is a directory, or a symlink whose target is one.
    pub is_dir: bool,
    /// True if the entry itself is a symbolic link.
    pub is_symlink: bool,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, is_dir: bool, is_symlink: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
            is_symlink,
        }
    }
}

/// Minimal read-only file-system interface for the walkers.
///
/// Implement this to walk something other than the local disk (an archive,
/// an in-memory tree in tests, a remote listing).
pub trait FileSystem {
    /// List the entries of a directory, in any order.
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Read a whole text file. Used for ignore files.
    fn read_file(&self, path: &Path) -> io::Result<String>;

    /// Resolve symlinks, returning the real location of `path`.
    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        (**self).list_entries(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        (**self).read_file(path)
    }

    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf> {
        (**self).resolve_symlink(path)
    }
}

/// The local disk, via `std::fs`.
///
/// Names that are not valid UTF-8 are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let is_symlink = file_type.is_symlink();
            let is_dir = if is_symlink {
                // Broken links count as non-directories
                fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
            } else {
                file_type.is_dir()
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
                is_symlink,
            });
        }
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn resolve_symlink(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_fs_lists_types() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("file.txt"), "x").unwrap();

        let mut entries = LocalFs.list_entries(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![
                DirEntry::new("file.txt", false, false),
                DirEntry::new("sub", true, false),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_local_fs_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        symlink(dir.path().join("real"), dir.path().join("link")).unwrap();
        symlink(dir.path().join("nowhere"), dir.path().join("broken")).unwrap();

        let entries = LocalFs.list_entries(dir.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_dir && link.is_symlink);
        let broken = entries.iter().find(|e| e.name == "broken").unwrap();
        assert!(!broken.is_dir && broken.is_symlink);
    }

    #[test]
    fn test_local_fs_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = LocalFs.list_entries(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let err = LocalFs.read_file(&dir.path().join(".gitignore")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
