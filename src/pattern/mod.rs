//! Gitignore pattern engine
//!
//! Turns ignore-file text into ordered rules and decides whether a path is
//! ignored given every rule set between the walk root and the path:
//!
//! - [`RuleSet::parse`] compiles one file
//! - [`RuleStack::push`] layers a directory's rules over its parent's
//! - [`RuleStack::decide`] produces the final [`MatchDecision`]
//!
//! Nothing in this module touches the file system.

mod glob;
mod rule;
mod ruleset;
mod stack;

pub use self::glob::{Segment, SegmentMatcher};
pub use rule::Rule;
pub use ruleset::{Diagnostic, RuleSet};
pub use stack::{MatchDecision, MatchedRule, RuleStack};
