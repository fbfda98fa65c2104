//! The rules of one ignore file.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::PatternError;

use super::rule::Rule;

/// A line that was skipped because it could not be compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// The offending line.
    pub text: String,
    pub error: PatternError,
}

/// Ordered rules parsed from one directory's ignore file.
///
/// `base` is the directory the file lives in, as path segments relative to
/// the walk root; rules only ever see paths below it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    base: Vec<String>,
    source: Option<PathBuf>,
    rules: Vec<Rule>,
    diagnostics: Vec<Diagnostic>,
}

impl RuleSet {
    /// Parse the text of an ignore file.
    ///
    /// Never fails: lines that do not compile are logged, recorded in
    /// [`diagnostics`](Self::diagnostics) and otherwise treated as absent.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Parse individual pattern lines, e.g. extra patterns given on the command line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            match Rule::parse(line, idx + 1) {
                Ok(Some(rule)) => set.rules.push(rule),
                Ok(None) => {}
                Err(error) => {
                    warn!(line = idx + 1, pattern = line, %error, "skipping ignore pattern");
                    set.diagnostics.push(Diagnostic {
                        line: idx + 1,
                        text: line.to_string(),
                        error,
                    });
                }
            }
        }
        set
    }

    /// Scope the rules to a directory below the walk root.
    pub fn with_base<I, S>(mut self, base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base = base.into_iter().map(Into::into).collect();
        self
    }

    /// Record which file the rules came from.
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn base(&self) -> &[String] {
        &self.base
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The last rule matching `path` (relative to the walk root), if any.
    ///
    /// Later rules override earlier ones, so the last match decides.
    pub fn last_match(&self, path: &[&str], is_dir: bool) -> Option<&Rule> {
        let relative = self.strip_base(path)?;
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(relative, is_dir))
    }

    fn strip_base<'p, 's>(&self, path: &'p [&'s str]) -> Option<&'p [&'s str]> {
        if path.len() <= self.base.len() {
            return None;
        }
        let (head, tail) = path.split_at(self.base.len());
        head.iter()
            .zip(&self.base)
            .all(|(a, b)| *a == b.as_str())
            .then_some(tail)
    }
}
