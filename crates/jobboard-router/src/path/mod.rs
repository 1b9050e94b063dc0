/// Path utilities for splitting, validation and normalization
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

pub mod location;
pub use location::{parse_query, Location};

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`) unless `keep_trailing_slash` is set
///
/// # Examples
///
/// ```
/// use jobboard_router::path::is_canonical_path;
///
/// assert!(is_canonical_path("/", false));
/// assert!(is_canonical_path("/jobs/42", false));
///
/// assert!(!is_canonical_path("", false));
/// assert!(!is_canonical_path("jobs", false));
/// assert!(!is_canonical_path("/jobs/", false));
/// assert!(is_canonical_path("/jobs/", true));
/// assert!(!is_canonical_path("/jobs//42", false));
/// ```
pub fn is_canonical_path(path: &str, keep_trailing_slash: bool) -> bool {
    if !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || keep_trailing_slash || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// - Trailing slashes: `/jobs/` → `/jobs` (kept when `keep_trailing_slash` is set)
/// - Doubled slashes: `/jobs//42` → `/jobs/42`
/// - Backslashes: `\jobs\42` → `/jobs/42`
/// - Empty input: `""` → `/`
///
/// The input must already be free of query string and fragment, see [`Location::parse`].
///
/// # Examples
///
/// ```
/// use jobboard_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/jobs", false), Cow::Borrowed("/jobs")));
/// assert_eq!(normalize_path("/jobs/", false), "/jobs");
/// assert_eq!(normalize_path("/jobs/", true), "/jobs/");
/// assert_eq!(normalize_path("\\jobs\\edit\\7", false), "/jobs/edit/7");
/// assert_eq!(normalize_path("//jobs///add", false), "/jobs/add");
/// ```
pub fn normalize_path(path: &str, keep_trailing_slash: bool) -> Cow<'_, str> {
    if is_canonical_path(path, keep_trailing_slash) {
        return Cow::Borrowed(path);
    }

    let replaced = path.replace('\\', "/");
    let normalized = replaced
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        return Cow::Borrowed("/");
    }

    if keep_trailing_slash && replaced.ends_with('/') {
        Cow::Owned(format!("/{}/", normalized))
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a normalized path into its raw (still percent-encoded) segments
///
/// A trailing slash in strict mode shows up as a final empty segment, so `/jobs/`
/// never matches a pattern written as `/jobs`.
pub(crate) fn raw_segments(path: &str) -> Vec<&str> {
    match path.strip_prefix('/') {
        Some("") | None => Vec::new(),
        Some(rest) => rest.split('/').collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_canonical_path() {
        assert!(is_canonical_path("/", false));
        assert!(is_canonical_path("/jobs", false));
        assert!(is_canonical_path("/jobs/edit/3", false));

        assert!(!is_canonical_path("", false));
        assert!(!is_canonical_path("jobs", false));
        assert!(!is_canonical_path("/jobs/", false));
        assert!(!is_canonical_path("/jobs\\add", false));
    }

    #[test]
    fn test_normalize_path_borrowed_when_canonical() {
        assert!(matches!(normalize_path("/jobs", false), Cow::Borrowed("/jobs")));
        assert!(matches!(normalize_path("/", false), Cow::Borrowed("/")));
    }

    #[test]
    fn test_normalize_path_collapses_separators() {
        assert_eq!(normalize_path("/jobs//edit///9", false), "/jobs/edit/9");
        assert_eq!(normalize_path("jobs/add", false), "/jobs/add");
        assert_eq!(normalize_path("\\jobs", false), "/jobs");
    }

    #[test]
    fn test_normalize_path_trailing_slash() {
        assert_eq!(normalize_path("/jobs/", false), "/jobs");
        assert_eq!(normalize_path("/jobs//", true), "/jobs/");
        assert_eq!(normalize_path("///", true), "/");
    }

    #[test]
    fn test_normalize_path_empty() {
        assert_eq!(normalize_path("", false), "/");
    }

    #[test]
    fn test_raw_segments() {
        assert!(raw_segments("/").is_empty());
        assert_eq!(raw_segments("/jobs/42"), vec!["jobs", "42"]);
        assert_eq!(raw_segments("/jobs/"), vec!["jobs", ""]);
    }
}
