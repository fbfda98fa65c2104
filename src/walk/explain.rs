//! Answer "why is this path (not) ignored?" without walking the whole tree.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::WalkError;
use crate::pattern::MatchedRule;

use super::config::WalkConfig;
use super::fs::FileSystem;
use super::traversal::Traversal;

/// The rule that decided a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Culprit {
    /// Ignore file the rule came from (`None` for in-memory sets).
    pub source: Option<PathBuf>,
    pub line: usize,
    pub pattern: String,
    pub negated: bool,
}

impl From<MatchedRule<'_>> for Culprit {
    fn from(m: MatchedRule<'_>) -> Self {
        Self {
            source: m.rules.source().map(Path::to_path_buf),
            line: m.rule.line(),
            pattern: m.rule.raw_pattern().to_string(),
            negated: m.rule.is_negated(),
        }
    }
}

/// Outcome of [`explain_path`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// The path asked about, relative to the walk root.
    pub path: PathBuf,
    pub ignored: bool,
    /// Set when an ancestor directory is what was ignored; the walk never
    /// reaches `path` in that case.
    pub ignored_ancestor: Option<PathBuf>,
    /// Rule behind the verdict. `None` if no rule matched at all.
    pub culprit: Option<Culprit>,
}

/// Decide whether `relative` (a path under `root`) would be skipped by a walk
/// with `config`, and name the rule responsible.
///
/// Ignore files are read only along the path from `root` down, exactly as
/// the walk would read them.
pub fn explain_path<F: FileSystem>(
    fs: &F,
    config: &WalkConfig,
    root: &Path,
    relative: &Path,
    is_dir: bool,
) -> Result<Explanation, WalkError> {
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let traversal = Traversal::new(config, fs);
    let mut stack = traversal.root_scope(root).stack;
    let mut dir = root.to_path_buf();

    for (i, name) in segments.iter().enumerate() {
        stack = traversal.load_rules(&dir, &segments[..i], &stack)?;

        let prefix: Vec<&str> = segments[..=i].iter().map(String::as_str).collect();
        let last = i + 1 == segments.len();
        let prefix_is_dir = !last || is_dir;
        let matched = stack.explain(&prefix, prefix_is_dir);
        let ignored = matched.is_some_and(|m| !m.rule.is_negated());

        if ignored && !last {
            return Ok(Explanation {
                path: relative.to_path_buf(),
                ignored: true,
                ignored_ancestor: Some(prefix.iter().collect()),
                culprit: matched.map(Culprit::from),
            });
        }
        if last {
            return Ok(Explanation {
                path: relative.to_path_buf(),
                ignored,
                ignored_ancestor: None,
                culprit: matched.map(Culprit::from),
            });
        }
        dir.push(name);
    }

    // The root itself is never filtered
    Ok(Explanation {
        path: relative.to_path_buf(),
        ignored: false,
        ignored_ancestor: None,
        culprit: None,
    })
}
