//! Segment-wise glob matching for gitignore patterns.
//!
//! A pattern body is split on unescaped `/` into segments:
//!
//! - `**` as a whole segment is [`Segment::AnyDepth`]
//! - a segment without wildcards is [`Segment::Literal`]
//! - anything else is [`Segment::Wildcard`], compiled by the `glob` crate
//!
//! Wildcards never cross a `/`, because each one only ever sees a single path
//! component.

use glob::{MatchOptions, Pattern};

use crate::error::PatternError;

const SEGMENT_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// One component of a compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Exact component name, escapes already removed.
    Literal(String),
    /// Component with `*`, `?` or `[...]`.
    Wildcard(Pattern),
    /// `**`: zero or more components (one or more when it ends the pattern).
    AnyDepth,
}

impl Segment {
    fn matches(&self, component: &str) -> bool {
        match self {
            Segment::Literal(lit) => lit == component,
            Segment::Wildcard(pat) => pat.matches_with(component, SEGMENT_OPTIONS),
            Segment::AnyDepth => true,
        }
    }
}

/// A pattern body compiled into segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentMatcher {
    segments: Vec<Segment>,
}

impl SegmentMatcher {
    /// Compile a pattern body. The body must already have its `!`, leading
    /// `/` and trailing `/` stripped; backslash escapes are still present.
    pub fn compile(body: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();

        for part in split_unescaped_slash(body) {
            if part.is_empty() {
                continue;
            }
            if part == "**" {
                // Consecutive globstars collapse to one
                if !matches!(segments.last(), Some(Segment::AnyDepth)) {
                    segments.push(Segment::AnyDepth);
                }
                continue;
            }
            segments.push(compile_segment(part, body)?);
        }

        if segments.is_empty() {
            return Err(PatternError::Empty {
                pattern: body.to_string(),
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Match the whole of `path` (one entry per component).
    pub fn matches(&self, path: &[&str]) -> bool {
        match_from(&self.segments, path)
    }
}

fn match_from(segments: &[Segment], path: &[&str]) -> bool {
    match segments.split_first() {
        None => path.is_empty(),
        Some((Segment::AnyDepth, rest)) => {
            // A trailing `**` matches everything inside, not the directory itself
            if rest.is_empty() {
                return !path.is_empty();
            }
            (0..=path.len()).any(|skip| match_from(rest, &path[skip..]))
        }
        Some((segment, rest)) => match path.split_first() {
            Some((first, tail)) => segment.matches(first) && match_from(rest, tail),
            None => false,
        },
    }
}

/// Split on `/` characters that are not preceded by an escaping backslash.
fn split_unescaped_slash(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '/' => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Translate one gitignore segment into either a literal or a `glob` pattern.
///
/// Gitignore escapes (`\*`) and `[^...]` classes have no direct `glob`
/// equivalent, so metacharacters that must stay literal are wrapped in a
/// one-character class and `^` negation is rewritten to `!`.
fn compile_segment(part: &str, body: &str) -> Result<Segment, PatternError> {
    let chars: Vec<char> = part.chars().collect();
    let mut literal = String::new();
    let mut glob_src = String::new();
    let mut wild = false;
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                // A lone trailing backslash stays literal
                let c = chars.get(i + 1).copied().unwrap_or('\\');
                push_literal(c, &mut literal, &mut glob_src);
                i += 2;
            }
            '*' => {
                wild = true;
                glob_src.push('*');
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
            }
            '?' => {
                wild = true;
                glob_src.push('?');
                i += 1;
            }
            '[' => {
                wild = true;
                let (class, next) = translate_class(&chars, i).ok_or_else(|| {
                    PatternError::UnterminatedClass {
                        pattern: body.to_string(),
                        position: i,
                    }
                })?;
                glob_src.push_str(&class);
                i = next;
            }
            c => {
                push_literal(c, &mut literal, &mut glob_src);
                i += 1;
            }
        }
    }

    if !wild {
        return Ok(Segment::Literal(literal));
    }

    Pattern::new(&glob_src)
        .map(Segment::Wildcard)
        .map_err(|e| PatternError::Invalid {
            pattern: body.to_string(),
            message: e.msg.to_string(),
        })
}

fn push_literal(c: char, literal: &mut String, glob_src: &mut String) {
    literal.push(c);
    if matches!(c, '*' | '?' | '[' | ']') {
        glob_src.push('[');
        glob_src.push(c);
        glob_src.push(']');
    } else {
        glob_src.push(c);
    }
}

/// Rewrite the bracket expression starting at `chars[start] == '['`.
///
/// Returns the `glob` spelling of the class and the index just past its
/// closing `]`, or `None` when the class is never closed.
fn translate_class(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut j = start + 1;
    let negated = matches!(chars.get(j), Some('!' | '^'));
    if negated {
        j += 1;
    }

    let mut members: Vec<char> = Vec::new();
    loop {
        let c = *chars.get(j)?;
        match c {
            // `]` right after the opening bracket is a member, not the end
            ']' if !members.is_empty() => {
                j += 1;
                break;
            }
            '\\' => {
                members.push(*chars.get(j + 1)?);
                j += 2;
            }
            _ => {
                members.push(c);
                j += 1;
            }
        }
    }

    // `glob` only reads `]` as a member in first position, and a leading `!`
    // would flip the class
    if !negated && members == ['!'] {
        return Some(("!".to_string(), j));
    }
    if let Some(pos) = members.iter().position(|&c| c == ']') {
        let bracket = members.remove(pos);
        members.insert(0, bracket);
    } else if !negated && members.first() == Some(&'!') && members.len() > 1 {
        members.rotate_left(1);
    }

    let mut out = String::from(if negated { "[!" } else { "[" });
    out.extend(members);
    out.push(']');
    Some((out, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(body: &str) -> SegmentMatcher {
        SegmentMatcher::compile(body).unwrap()
    }

    fn path(p: &str) -> Vec<&str> {
        p.split('/').collect()
    }

    #[test]
    fn test_literal_segments() {
        let m = matcher("src/main.rs");
        assert_eq!(
            m.segments(),
            &[
                Segment::Literal("src".to_string()),
                Segment::Literal("main.rs".to_string())
            ]
        );
        assert!(m.matches(&path("src/main.rs")));
        assert!(!m.matches(&path("src/lib.rs")));
        assert!(!m.matches(&path("main.rs")));
    }

    #[test]
    fn test_star_stays_within_segment() {
        let m = matcher("*.log");
        assert!(m.matches(&["error.log"]));
        assert!(m.matches(&[".log"]));
        assert!(!m.matches(&path("sub/error.log")));
        assert!(!m.matches(&["error.txt"]));
    }

    #[test]
    fn test_question_mark_and_classes() {
        let m = matcher("file?.[ch]");
        assert!(m.matches(&["file1.c"]));
        assert!(m.matches(&["fileX.h"]));
        assert!(!m.matches(&["file12.c"]));
        assert!(!m.matches(&["file1.o"]));

        let m = matcher("[a-c]*");
        assert!(m.matches(&["apple"]));
        assert!(!m.matches(&["dog"]));
    }

    #[test]
    fn test_negated_classes() {
        let caret = matcher("[^0-9]*");
        let bang = matcher("[!0-9]*");
        for m in [&caret, &bang] {
            assert!(m.matches(&["abc"]));
            assert!(!m.matches(&["1abc"]));
        }
    }

    #[test]
    fn test_case_sensitive() {
        let m = matcher("*.TXT");
        assert!(m.matches(&["A.TXT"]));
        assert!(!m.matches(&["a.txt"]));
    }

    #[test]
    fn test_globstar_leading() {
        let m = matcher("**/error.log");
        assert!(m.matches(&["error.log"]));
        assert!(m.matches(&path("a/error.log")));
        assert!(m.matches(&path("a/b/c/error.log")));
        assert!(!m.matches(&path("a/b/other.log")));
    }

    #[test]
    fn test_globstar_middle_matches_zero_or_more() {
        let m = matcher("a/**/z");
        assert!(m.matches(&path("a/z")));
        assert!(m.matches(&path("a/b/z")));
        assert!(m.matches(&path("a/b/c/z")));
        assert!(!m.matches(&path("b/z")));
    }

    #[test]
    fn test_globstar_trailing_needs_one_component() {
        let m = matcher("build/**");
        assert!(!m.matches(&["build"]));
        assert!(m.matches(&path("build/out")));
        assert!(m.matches(&path("build/a/b")));
    }

    #[test]
    fn test_consecutive_globstars_collapse() {
        let m = matcher("a/**/**/z");
        assert_eq!(m.segments().len(), 3);
        assert!(m.matches(&path("a/z")));
    }

    #[test]
    fn test_double_star_inside_segment_acts_like_star() {
        let m = matcher("foo**bar");
        assert!(m.matches(&["foobar"]));
        assert!(m.matches(&["foo_x_bar"]));
        assert!(!m.matches(&path("foo/bar")));
    }

    #[test]
    fn test_escapes_are_literal() {
        let m = matcher(r"\*.txt");
        assert_eq!(m.segments(), &[Segment::Literal("*.txt".to_string())]);
        assert!(m.matches(&["*.txt"]));
        assert!(!m.matches(&["a.txt"]));

        let m = matcher(r"a\?*");
        assert!(m.matches(&["a?b"]));
        assert!(!m.matches(&["ab"]));

        let m = matcher(r"\#notes");
        assert!(m.matches(&["#notes"]));
    }

    #[test]
    fn test_escaped_slash_is_part_of_segment() {
        let parts = split_unescaped_slash(r"a\/b/c");
        assert_eq!(parts, vec![r"a\/b", "c"]);
    }

    #[test]
    fn test_bracket_with_literal_close() {
        let m = matcher("[]a]x");
        assert!(m.matches(&["]x"]));
        assert!(m.matches(&["ax"]));
        assert!(!m.matches(&["bx"]));

        let m = matcher(r"[a\]]x");
        assert!(m.matches(&["]x"]));
    }

    #[test]
    fn test_unterminated_class_is_error() {
        let err = SegmentMatcher::compile("foo[abc").unwrap_err();
        assert!(matches!(
            err,
            PatternError::UnterminatedClass { position: 3, .. }
        ));
        assert!(SegmentMatcher::compile("[").is_err());
        assert!(SegmentMatcher::compile("[]").is_err());
    }

    #[test]
    fn test_empty_body_is_error() {
        assert!(matches!(
            SegmentMatcher::compile(""),
            Err(PatternError::Empty { .. })
        ));
        assert!(matches!(
            SegmentMatcher::compile("//"),
            Err(PatternError::Empty { .. })
        ));
    }
}
