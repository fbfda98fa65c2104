//! Per-directory scanning shared by the sequential and parallel walkers.
//!
//! Both walkers drive the same two steps: [`Traversal::scan`] one directory
//! (list it, load its ignore file, filter the children) and
//! [`Traversal::child_scopes`] to decide where to go next. They differ only
//! in how they order and report the results.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::WalkError;
use crate::pattern::{RuleSet, RuleStack};

use super::config::WalkConfig;
use super::entry::WalkEntry;
use super::fs::FileSystem;

/// Source label for patterns supplied through [`WalkConfig::extra_patterns`].
const EXTRA_PATTERNS_SOURCE: &str = "<extra patterns>";

/// Where a directory sits in the walk, and the rules inherited from above it.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub dir: PathBuf,
    /// Segments from the walk root to `dir`.
    pub rel: Vec<String>,
    pub depth: usize,
    pub stack: RuleStack,
    /// Resolved ancestors, tracked only when following symlinks.
    pub ancestors: Vec<PathBuf>,
}

/// A listed and filtered directory.
#[derive(Debug)]
pub(crate) struct ScannedDir {
    pub entry: WalkEntry,
    /// `scope` with the directory's own ignore file pushed.
    pub scope: Scope,
}

/// Common traversal steps, borrowed from a walker for the duration of a call.
pub(crate) struct Traversal<'c, F> {
    config: &'c WalkConfig,
    fs: &'c F,
}

impl<'c, F: FileSystem> Traversal<'c, F> {
    pub fn new(config: &'c WalkConfig, fs: &'c F) -> Self {
        Self { config, fs }
    }

    pub fn topdown(&self) -> bool {
        self.config.topdown
    }

    /// Scope of the walk root, seeded with the configured extra patterns.
    pub fn root_scope(&self, root: &Path) -> Scope {
        let extra = RuleSet::from_lines(&self.config.extra_patterns)
            .with_source(EXTRA_PATTERNS_SOURCE);
        let ancestors = if self.config.follow_links {
            self.fs.resolve_symlink(root).into_iter().collect()
        } else {
            Vec::new()
        };
        Scope {
            dir: root.to_path_buf(),
            rel: Vec::new(),
            depth: 0,
            stack: RuleStack::new().push(extra),
            ancestors,
        }
    }

    /// Push the ignore file of `dir` (if any) onto `stack`.
    pub fn load_rules(
        &self,
        dir: &Path,
        rel: &[String],
        stack: &RuleStack,
    ) -> Result<RuleStack, WalkError> {
        let path = dir.join(&self.config.ignore_file_name);
        match self.fs.read_file(&path) {
            Ok(text) => {
                let rules = RuleSet::parse(&text)
                    .with_base(rel.iter().cloned())
                    .with_source(&path);
                debug!(path = %path.display(), rules = rules.len(), "loaded ignore file");
                Ok(stack.push(rules))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(stack.clone()),
            Err(source) => Err(WalkError::IgnoreFile { path, source }),
        }
    }

    /// List the directory, load its rules, and drop every ignored child.
    pub fn scan(&self, scope: Scope) -> Result<ScannedDir, WalkError> {
        let mut listing = self
            .fs
            .list_entries(&scope.dir)
            .map_err(|e| WalkError::io(&scope.dir, e))?;
        let stack = self.load_rules(&scope.dir, &scope.rel, &scope.stack)?;
        listing.sort_by(|a, b| a.name.cmp(&b.name));

        let mut dirnames = Vec::new();
        let mut filenames = Vec::new();
        {
            let mut segments: Vec<&str> = scope.rel.iter().map(String::as_str).collect();
            segments.push("");
            let last = segments.len() - 1;

            for item in &listing {
                // Symlinked directories are leaves unless links are followed
                let is_dir = item.is_dir && (!item.is_symlink || self.config.follow_links);
                segments[last] = item.name.as_str();
                if stack.decide(&segments, is_dir).ignored {
                    trace!(path = %scope.dir.join(&item.name).display(), "ignored");
                    continue;
                }
                if is_dir {
                    dirnames.push(item.name.clone());
                } else {
                    filenames.push(item.name.clone());
                }
            }
        }

        Ok(ScannedDir {
            entry: WalkEntry {
                dirpath: scope.dir.clone(),
                dirnames,
                filenames,
            },
            scope: Scope { stack, ..scope },
        })
    }

    /// Scopes for the subdirectories in `dirnames`, in the same order.
    ///
    /// Names below the depth limit are left out. A followed symlink that
    /// leads back to one of its own ancestors becomes an error entry.
    pub fn child_scopes(
        &self,
        parent: &Scope,
        dirnames: &[String],
    ) -> Vec<Result<Scope, WalkError>> {
        let depth = parent.depth + 1;
        if self.config.max_depth.is_some_and(|max| depth > max) {
            return Vec::new();
        }

        dirnames
            .iter()
            .map(|name| {
                let dir = parent.dir.join(name);
                let mut ancestors = Vec::new();
                if self.config.follow_links {
                    if let Ok(target) = self.fs.resolve_symlink(&dir) {
                        if parent.ancestors.contains(&target) {
                            return Err(WalkError::SymlinkLoop { path: dir, target });
                        }
                        ancestors = parent.ancestors.clone();
                        ancestors.push(target);
                    }
                }
                let mut rel = parent.rel.clone();
                rel.push(name.clone());
                Ok(Scope {
                    dir,
                    rel,
                    depth,
                    stack: parent.stack.clone(),
                    ancestors,
                })
            })
            .collect()
    }
}
