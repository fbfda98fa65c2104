//! The triple yielded for every visited directory.

use std::path::PathBuf;

use serde::Serialize;

/// One visited directory: its path plus the children that survived filtering.
///
/// Names are sorted. In a topdown walk driven through
/// [`Walk::advance`](super::Walk::advance), editing `dirnames` changes which
/// subdirectories are visited next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkEntry {
    pub dirpath: PathBuf,
    pub dirnames: Vec<String>,
    pub filenames: Vec<String>,
}

impl WalkEntry {
    /// Full paths of the surviving files.
    pub fn file_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.filenames.iter().map(|name| self.dirpath.join(name))
    }

    /// Full paths of the surviving subdirectories.
    pub fn dir_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.dirnames.iter().map(|name| self.dirpath.join(name))
    }
}

impl From<WalkEntry> for (PathBuf, Vec<String>, Vec<String>) {
    fn from(entry: WalkEntry) -> Self {
        (entry.dirpath, entry.dirnames, entry.filenames)
    }
}
