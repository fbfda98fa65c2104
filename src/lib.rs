//! gitwalk - walk a directory tree like `os.walk`, minus everything the
//! `.gitignore` files along the way exclude

pub mod error;
pub mod output;
pub mod pattern;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{PatternError, WalkError};
pub use output::{JsonPrinter, OutputConfig, PathPrinter};
pub use pattern::{MatchDecision, Rule, RuleSet, RuleStack};
pub use walk::{
    Explanation, FileSystem, GitWalker, LocalFs, ParallelWalker, Walk, WalkConfig, WalkEntry,
    WalkReport, explain_path, gitwalk,
};
