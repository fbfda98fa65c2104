//! Test utilities for building temporary directory trees.
//!
//! Compiled for unit tests and behind the `test-utils` feature for
//! integration tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::walk::WalkEntry;

/// A temporary directory tree, removed when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a (possibly empty) directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Write `dir/.gitignore`; `""` is the tree root.
    pub fn add_gitignore(&self, dir: &str, content: &str) -> PathBuf {
        let path = if dir.is_empty() {
            ".gitignore".to_string()
        } else {
            format!("{}/.gitignore", dir.trim_end_matches('/'))
        };
        self.add_file(&path, content)
    }

    /// Create a symlink at `link` pointing at `target` (relative to the root).
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let link_path = self.dir.path().join(link);
        std::os::unix::fs::symlink(self.dir.path().join(target), &link_path)
            .expect("Failed to create symlink");
        link_path
    }

    /// `/`-joined path of `path` relative to the root, `"."` for the root itself.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(self.dir.path()).unwrap_or(path);
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            ".".to_string()
        } else {
            parts.join("/")
        }
    }

    /// Entries as `(relative dirpath, dirnames, filenames)` for easy assertions.
    pub fn triples(&self, entries: &[WalkEntry]) -> Vec<(String, Vec<String>, Vec<String>)> {
        entries
            .iter()
            .map(|e| (self.relative(&e.dirpath), e.dirnames.clone(), e.filenames.clone()))
            .collect()
    }

    /// Every surviving file, relative and sorted.
    pub fn files(&self, entries: &[WalkEntry]) -> Vec<String> {
        let mut files: Vec<_> = entries
            .iter()
            .flat_map(|e| e.file_paths())
            .map(|p| self.relative(&p))
            .collect();
        files.sort();
        files
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
