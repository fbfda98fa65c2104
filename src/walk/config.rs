//! Configuration types for the walkers

use std::ops::ControlFlow;

use crate::error::WalkError;

/// Default name of the per-directory ignore file.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Configuration for walking behavior.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Yield each directory before its children (true) or after them (false).
    pub topdown: bool,
    /// Descend into symlinks that point at directories.
    pub follow_links: bool,
    /// Levels below the root to descend into (None = unlimited).
    /// `Some(0)` yields only the root directory.
    pub max_depth: Option<usize>,
    /// File name read in every directory for ignore rules.
    pub ignore_file_name: String,
    /// Extra gitignore-syntax patterns applied at the root, below every ignore file.
    pub extra_patterns: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            topdown: true,
            follow_links: false,
            max_depth: None,
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
            extra_patterns: Vec::new(),
        }
    }
}

/// Callback for non-fatal walk errors.
///
/// Returning `ControlFlow::Break(())` ends the walk; the walk yields nothing
/// further.
pub type ErrorHandler<'a> = Box<dyn FnMut(WalkError) -> ControlFlow<()> + 'a>;
