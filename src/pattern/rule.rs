//! A single compiled line of an ignore file.

use crate::error::PatternError;

use super::glob::SegmentMatcher;

/// One compiled ignore pattern.
///
/// Immutable once parsed. The position of a rule inside its [`RuleSet`]
/// decides precedence, so rules are only ever created by parsing a line.
///
/// [`RuleSet`]: super::RuleSet
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    raw_pattern: String,
    line: usize,
    negated: bool,
    directory_only: bool,
    anchored: bool,
    matcher: SegmentMatcher,
}

impl Rule {
    /// Parse one ignore-file line.
    ///
    /// Returns `Ok(None)` for blank lines and comments.
    pub fn parse(line: &str, line_no: usize) -> Result<Option<Self>, PatternError> {
        let trimmed = trim_trailing_whitespace(line);
        let leading = trimmed.trim_start();
        if leading.is_empty() || leading.starts_with('#') {
            return Ok(None);
        }

        let mut body = trimmed;
        let negated = body.starts_with('!');
        if negated {
            body = &body[1..];
        }

        let directory_only = ends_with_unescaped(body, '/');
        if directory_only {
            body = &body[..body.len() - 1];
        }

        // Any remaining unescaped `/` ties the pattern to its own directory
        let anchored = has_unescaped(body, '/');
        let body = body.strip_prefix('/').unwrap_or(body);

        let matcher = SegmentMatcher::compile(body).map_err(|e| match e {
            PatternError::Empty { .. } => PatternError::Empty {
                pattern: line.trim_end().to_string(),
            },
            other => other,
        })?;

        Ok(Some(Self {
            raw_pattern: trimmed.to_string(),
            line: line_no,
            negated,
            directory_only,
            anchored,
            matcher,
        }))
    }

    /// The line as written, minus trailing whitespace.
    pub fn raw_pattern(&self) -> &str {
        &self.raw_pattern
    }

    /// 1-based line number in the source file.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Check `path` (relative to the rule's directory) against this rule.
    ///
    /// A rule that names any ancestor directory of `path` matches too, which
    /// is how `build/` covers `build/out/app.o`. Negations only match the
    /// path itself: `!logs/` keeps `logs` but leaves its files to other rules.
    pub fn matches(&self, path: &[&str], is_dir: bool) -> bool {
        if path.is_empty() {
            return false;
        }
        if (!self.directory_only || is_dir) && self.matches_exact(path) {
            return true;
        }
        !self.negated && (1..path.len()).any(|end| self.matches_exact(&path[..end]))
    }

    fn matches_exact(&self, path: &[&str]) -> bool {
        if self.anchored {
            self.matcher.matches(path)
        } else {
            // Unanchored patterns have a single segment and only see the basename
            self.matcher.matches(&path[path.len() - 1..])
        }
    }
}

/// Strip trailing spaces and tabs, keeping one that is escaped with `\`.
fn trim_trailing_whitespace(line: &str) -> &str {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut end = line.len();
    while end > 0 {
        let last = line.as_bytes()[end - 1];
        if last != b' ' && last != b'\t' {
            break;
        }
        if preceding_backslashes(&line[..end - 1]) % 2 == 1 {
            break;
        }
        end -= 1;
    }
    &line[..end]
}

fn preceding_backslashes(s: &str) -> usize {
    s.bytes().rev().take_while(|&b| b == b'\\').count()
}

fn ends_with_unescaped(s: &str, c: char) -> bool {
    s.ends_with(c) && preceding_backslashes(&s[..s.len() - c.len_utf8()]) % 2 == 0
}

fn has_unescaped(s: &str, target: char) -> bool {
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == target {
            return true;
        }
    }
    false
}
