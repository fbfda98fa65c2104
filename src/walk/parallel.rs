//! Eager walk that scans sibling subtrees on the rayon pool.

use std::path::Path;

use rayon::prelude::*;
use tracing::warn;

use crate::error::WalkError;

use super::config::WalkConfig;
use super::entry::WalkEntry;
use super::fs::{FileSystem, LocalFs};
use super::traversal::{Scope, Traversal};

/// Everything a parallel walk produced.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Entries in the order the sequential walk would yield them.
    pub entries: Vec<WalkEntry>,
    /// Errors in traversal order.
    pub errors: Vec<WalkError>,
}

impl WalkReport {
    fn append(&mut self, mut other: WalkReport) {
        self.entries.append(&mut other.entries);
        self.errors.append(&mut other.errors);
    }
}

/// Collects a whole walk at once, scanning subtrees concurrently.
///
/// Unlike [`Walk`](super::Walk) this is not lazy and offers no pruning, but
/// the resulting entry order is identical for the same `topdown` setting.
pub struct ParallelWalker<F: FileSystem = LocalFs> {
    fs: F,
    config: WalkConfig,
    /// Worker count (0 = rayon's global pool).
    threads: usize,
}

impl ParallelWalker<LocalFs> {
    pub fn new(config: WalkConfig) -> Self {
        Self::with_fs(LocalFs, config)
    }
}

impl<F: FileSystem + Sync> ParallelWalker<F> {
    pub fn with_fs(fs: F, config: WalkConfig) -> Self {
        Self {
            fs,
            config,
            threads: 0,
        }
    }

    /// Run on a dedicated pool of `threads` workers (0 = auto-detect).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn collect(&self, root: impl AsRef<Path>) -> WalkReport {
        let traversal = Traversal::new(&self.config, &self.fs);
        let root = traversal.root_scope(root.as_ref());

        if self.threads == 0 {
            return walk_subtree(&traversal, Ok(root));
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(|| walk_subtree(&traversal, Ok(root))),
            Err(e) => {
                // Fall back to rayon's global pool if custom pool creation fails
                warn!(error = %e, threads = self.threads, "thread pool unavailable");
                walk_subtree(&traversal, Ok(root))
            }
        }
    }
}

fn walk_subtree<F: FileSystem + Sync>(
    traversal: &Traversal<'_, F>,
    scope: Result<Scope, WalkError>,
) -> WalkReport {
    let mut report = WalkReport::default();
    let scanned = match scope.and_then(|scope| traversal.scan(scope)) {
        Ok(scanned) => scanned,
        Err(e) => {
            report.errors.push(e);
            return report;
        }
    };

    let children: Vec<WalkReport> = traversal
        .child_scopes(&scanned.scope, &scanned.entry.dirnames)
        .into_par_iter()
        .map(|child| walk_subtree(traversal, child))
        .collect();

    if traversal.topdown() {
        report.entries.push(scanned.entry);
        children.into_iter().for_each(|child| report.append(child));
    } else {
        children.into_iter().for_each(|child| report.append(child));
        report.entries.push(scanned.entry);
    }
    report
}
