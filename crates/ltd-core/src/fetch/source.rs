//! Fragments: `#ref`, `#ref::sub/dir` or `#::sub/dir`.

use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Archive,
    Git,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl {
    pub base: String,
    pub clone_url: String,
    pub git_ref: Option<String>,
    pub subdir: Option<String>,
    pub filename: Option<String>,
    pub kind: SourceKind,
}

const GIT_SCHEMES: &[&str] = &["ssh", "git", "git+ssh", "git+https", "git+http", "git+file"];

impl SourceUrl {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (base, fragment) = raw.split_once('#').unwrap_or((raw, ""));
        let (git_ref, subdir) = parse_fragment(fragment);
        let path_part = base.split_once('?').map_or(base, |(path, _)| path);

        let scheme_is_git = base
            .split_once("://")
            .is_some_and(|(scheme, _)| GIT_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()));
        let is_git = scheme_is_git
            || raw.starts_with("git@")
            || path_part.trim_end_matches('/').ends_with(".git");

        Self {
            base: base.to_string(),
            clone_url: clone_url(base),
            git_ref,
            subdir,
            filename: filename(path_part),
            kind: if is_git {
                SourceKind::Git
            } else {
                SourceKind::Archive
            },
        }
    }
}

fn parse_fragment(fragment: &str) -> (Option<String>, Option<String>) {
    let (reference, subdir) = fragment.split_once("::").unwrap_or((fragment, ""));
    let reference = Some(reference.trim())
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    let subdir = Some(subdir.trim().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    (reference, subdir)
}

/// `git+https://host/repo?x` -> `https://host/repo`; scp-like and plain
/// paths only lose their query.
fn clone_url(base: &str) -> String {
    let without_prefix = base.strip_prefix("git+").unwrap_or(base);
    match Url::parse(without_prefix) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => without_prefix
            .split_once('?')
            .map_or(without_prefix, |(path, _)| path)
            .to_string(),
    }
}

fn filename(path_part: &str) -> Option<String> {
    let after_scheme = path_part
        .split_once("://")
        .map_or(path_part, |(_, rest)| rest);
    // Drop the host so `https://example.com/` has no filename.
    let path = if path_part.contains("://") {
        after_scheme.split_once('/').map_or("", |(_, path)| path)
    } else {
        after_scheme
    };

    path.rsplit(['/', ':'])
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
