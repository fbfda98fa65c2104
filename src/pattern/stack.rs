//! Layered rule sets from the walk root down to the current directory.

use std::sync::Arc;

use super::rule::Rule;
use super::ruleset::RuleSet;

/// Verdict for one candidate path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchDecision {
    pub ignored: bool,
}

impl MatchDecision {
    pub fn is_ignored(self) -> bool {
        self.ignored
    }
}

/// The rule that produced a [`MatchDecision`], with the set it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct MatchedRule<'a> {
    pub rules: &'a RuleSet,
    pub rule: &'a Rule,
}

#[derive(Debug)]
struct Frame {
    rules: RuleSet,
    parent: Option<Arc<Frame>>,
}

/// Persistent stack of [`RuleSet`]s.
///
/// [`push`](Self::push) returns a new stack that shares every existing frame
/// with `self`, so a directory's stack is simply dropped when its subtree is
/// done and sibling subtrees can hold their own stacks without copying the
/// common prefix. Cloning is a reference-count bump.
#[derive(Debug, Clone, Default)]
pub struct RuleStack {
    top: Option<Arc<Frame>>,
    depth: usize,
}

impl RuleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer `rules` on top of this stack. Empty sets are not stored.
    #[must_use]
    pub fn push(&self, rules: RuleSet) -> Self {
        if rules.is_empty() {
            return self.clone();
        }
        Self {
            top: Some(Arc::new(Frame {
                rules,
                parent: self.top.clone(),
            })),
            depth: self.depth + 1,
        }
    }

    /// Number of non-empty rule sets on the stack.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Rule sets from the deepest (highest precedence) to the root-most.
    pub fn iter(&self) -> impl Iterator<Item = &RuleSet> {
        std::iter::successors(self.top.as_deref(), |frame| frame.parent.as_deref())
            .map(|frame| &frame.rules)
    }

    /// Decide whether `path` (segments relative to the walk root) is ignored.
    ///
    /// Same result as replaying every set root-first and every rule in file
    /// order with the last match winning, but stops at the first hit scanning
    /// from the other end.
    pub fn decide(&self, path: &[&str], is_dir: bool) -> MatchDecision {
        MatchDecision {
            ignored: self
                .explain(path, is_dir)
                .is_some_and(|m| !m.rule.is_negated()),
        }
    }

    /// The rule that decides `path`, if any rule matches at all.
    pub fn explain(&self, path: &[&str], is_dir: bool) -> Option<MatchedRule<'_>> {
        self.iter().find_map(|rules| {
            rules
                .last_match(path, is_dir)
                .map(|rule| MatchedRule { rules, rule })
        })
    }
}
