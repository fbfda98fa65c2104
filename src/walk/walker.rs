//! Walk - lazy, single-threaded directory walk that honors ignore files

use std::ops::ControlFlow;
use std::path::Path;

use tracing::debug;

use crate::error::WalkError;

use super::config::{ErrorHandler, WalkConfig};
use super::entry::WalkEntry;
use super::fs::{FileSystem, LocalFs};
use super::traversal::{ScannedDir, Scope, Traversal};

/// Builder for a [`Walk`].
pub struct GitWalker<'a, F: FileSystem = LocalFs> {
    fs: F,
    config: WalkConfig,
    on_error: Option<ErrorHandler<'a>>,
}

impl<'a> GitWalker<'a, LocalFs> {
    pub fn new(config: WalkConfig) -> Self {
        Self::with_fs(LocalFs, config)
    }
}

impl<'a, F: FileSystem> GitWalker<'a, F> {
    /// Walk through a custom file-system implementation.
    pub fn with_fs(fs: F, config: WalkConfig) -> Self {
        Self {
            fs,
            config,
            on_error: None,
        }
    }

    /// Receive errors instead of silently skipping the affected directories.
    pub fn with_error_handler(
        mut self,
        handler: impl FnMut(WalkError) -> ControlFlow<()> + 'a,
    ) -> Self {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn walk(self, root: impl AsRef<Path>) -> Walk<'a, F> {
        let root = Traversal::new(&self.config, &self.fs).root_scope(root.as_ref());
        Walk {
            fs: self.fs,
            config: self.config,
            on_error: self.on_error,
            pending: vec![Ok(root)],
            frames: Vec::new(),
            held: None,
            done: false,
        }
    }
}

/// A bottom-up frame: a scanned directory and the children still to visit.
struct Frame {
    scanned: ScannedDir,
    children: std::vec::IntoIter<String>,
}

/// Lazy directory walk yielding one [`WalkEntry`] per directory.
///
/// Nothing is read until the walk is advanced, and each directory listing is
/// read completely before its entry is returned, so dropping the walk early
/// never leaves a directory handle open.
///
/// Use it as an [`Iterator`] to visit everything, or drive it with
/// [`advance`](Self::advance) to prune `dirnames` in a topdown walk.
pub struct Walk<'a, F: FileSystem = LocalFs> {
    fs: F,
    config: WalkConfig,
    on_error: Option<ErrorHandler<'a>>,
    /// Directories still to scan, last one first.
    pending: Vec<Result<Scope, WalkError>>,
    /// Bottom-up ancestry of the directory being scanned.
    frames: Vec<Frame>,
    /// Entry lent out by `advance`, descended into on the next call.
    held: Option<ScannedDir>,
    done: bool,
}

impl<'a, F: FileSystem> Walk<'a, F> {
    /// Advance to the next directory and lend out its entry.
    ///
    /// In a topdown walk, `dirnames` of the returned entry may be edited
    /// (pruned, reordered, extended) before the next call; only the names left
    /// in it are descended into. Edits have no effect in a bottom-up walk,
    /// because its subdirectories were already visited.
    pub fn advance(&mut self) -> Option<&mut WalkEntry> {
        self.release_held();
        let scanned = self.next_scanned()?;
        self.held = Some(scanned);
        self.held.as_mut().map(|scanned| &mut scanned.entry)
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    fn release_held(&mut self) {
        if let Some(scanned) = self.held.take() {
            if self.config.topdown {
                self.schedule_children(&scanned);
            }
        }
    }

    fn next_scanned(&mut self) -> Option<ScannedDir> {
        if self.config.topdown {
            self.next_topdown()
        } else {
            self.next_bottom_up()
        }
    }

    fn next_topdown(&mut self) -> Option<ScannedDir> {
        while !self.done {
            let scanned = match self.pending.pop()? {
                Ok(scope) => Traversal::new(&self.config, &self.fs).scan(scope),
                Err(e) => Err(e),
            };
            match scanned {
                Ok(scanned) => return Some(scanned),
                Err(e) => self.report(e),
            }
        }
        None
    }

    fn next_bottom_up(&mut self) -> Option<ScannedDir> {
        while !self.done {
            let traversal = Traversal::new(&self.config, &self.fs);
            let next = match self.frames.last_mut() {
                Some(frame) => match frame.children.next() {
                    Some(name) => traversal
                        .child_scopes(&frame.scanned.scope, std::slice::from_ref(&name))
                        .pop(),
                    None => {
                        let finished = self.frames.pop().map(|frame| frame.scanned);
                        return finished;
                    }
                },
                // Only the root is ever pending in a bottom-up walk
                None => Some(self.pending.pop()?),
            };

            // Beyond the depth limit: nothing to visit
            let Some(next) = next else { continue };
            match next.and_then(|scope| traversal.scan(scope)) {
                Ok(scanned) => {
                    let children = scanned.entry.dirnames.clone().into_iter();
                    self.frames.push(Frame { scanned, children });
                }
                Err(e) => self.report(e),
            }
        }
        None
    }

    fn schedule_children(&mut self, scanned: &ScannedDir) {
        let children = Traversal::new(&self.config, &self.fs)
            .child_scopes(&scanned.scope, &scanned.entry.dirnames);
        self.pending.extend(children.into_iter().rev());
    }

    fn report(&mut self, error: WalkError) {
        match self.on_error.as_mut() {
            Some(handler) => {
                if handler(error).is_break() {
                    self.done = true;
                    self.pending.clear();
                    self.frames.clear();
                }
            }
            None => debug!(%error, "skipping directory"),
        }
    }
}

impl<F: FileSystem> Iterator for Walk<'_, F> {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        self.release_held();
        let scanned = self.next_scanned()?;
        if self.config.topdown {
            self.schedule_children(&scanned);
        }
        Some(scanned.entry)
    }
}
