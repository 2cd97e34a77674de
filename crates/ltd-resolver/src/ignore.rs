use regex::{Regex, RegexBuilder};
use std::path::Path;

use ltd_error::{Result, TypeLinkError};

/// Regular expressions, bare (`internal/`) or with flags (`/Legacy/i`),
/// matched anywhere in the absolute source path.
#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    patterns: Vec<Regex>,
}

impl IgnoreMatcher {
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let candidate = path.to_string_lossy();
        self.patterns.iter().any(|re| re.is_match(&candidate))
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    let (source, flags) = split_literal(pattern).unwrap_or((pattern, ""));

    RegexBuilder::new(source)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .build()
        .map_err(|e| TypeLinkError::InvalidPattern(pattern.to_string(), e.to_string()))
}

/// `/source/flags` -> `(source, flags)`. Flags outside `gimsuy` mean the
/// pattern is not in literal form.
fn split_literal(pattern: &str) -> Option<(&str, &str)> {
    let body = pattern.strip_prefix('/')?;
    let (source, flags) = body.rsplit_once('/')?;
    if source.is_empty() || !flags.chars().all(|c| "gimsuy".contains(c)) {
        return None;
    }
    Some((source, flags))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(patterns: &[&str]) -> IgnoreMatcher {
        let patterns: Vec<String> = patterns.iter().map(|p| (*p).to_string()).collect();
        IgnoreMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn test_bare_pattern() {
        let m = matcher(&["internal/"]);
        assert!(m.is_ignored(Path::new("/proj/node_modules/pkg/internal/a.d.ts")));
        assert!(!m.is_ignored(Path::new("/proj/node_modules/pkg/public/a.d.ts")));
    }

    #[test]
    fn test_literal_with_flags() {
        let m = matcher(&["/LEGACY/i"]);
        assert!(m.is_ignored(Path::new("/proj/legacy/a.d.ts")));
    }

    #[test]
    fn test_slash_delimited_path_is_literal_form() {
        let m = matcher(&["/internal/"]);
        assert!(m.is_ignored(Path::new("/pkg/internal/a.d.ts")));
    }

    #[test]
    fn test_anchored_pattern() {
        let m = matcher(&[r"\.test\.d\.ts$"]);
        assert!(m.is_ignored(Path::new("/pkg/a.test.d.ts")));
        assert!(!m.is_ignored(Path::new("/pkg/a.d.ts")));
    }

    #[test]
    fn test_empty_matcher() {
        let m = matcher(&[]);
        assert!(!m.is_ignored(Path::new("/anything.d.ts")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = IgnoreMatcher::new(&["(unclosed".to_string()]);
        assert!(matches!(result, Err(TypeLinkError::InvalidPattern(_, _))));
    }
}
