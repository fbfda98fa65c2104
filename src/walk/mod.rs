//! Walk Driver: a lazy `os.walk`-style traversal filtered by ignore files.
//!
//! Each directory's ignore file is layered on the rules inherited from its
//! ancestors, children are filtered against the combined stack, and ignored
//! directories are never entered.
//!
//! ```no_run
//! use gitwalk::{WalkConfig, gitwalk};
//!
//! for entry in gitwalk(".", WalkConfig::default()) {
//!     for file in entry.file_paths() {
//!         println!("{}", file.display());
//!     }
//! }
//! ```

mod config;
mod entry;
mod explain;
mod fs;
mod parallel;
mod traversal;
mod walker;

use std::path::Path;

pub use config::{DEFAULT_IGNORE_FILE, ErrorHandler, WalkConfig};
pub use entry::WalkEntry;
pub use explain::{Culprit, Explanation, explain_path};
pub use fs::{DirEntry, FileSystem, LocalFs};
pub use parallel::{ParallelWalker, WalkReport};
pub use walker::{GitWalker, Walk};

/// Walk `root` on the local disk, skipping errors silently.
///
/// Shorthand for `GitWalker::new(config).walk(root)`.
pub fn gitwalk(root: impl AsRef<Path>, config: WalkConfig) -> Walk<'static, LocalFs> {
    GitWalker::new(config).walk(root)
}
