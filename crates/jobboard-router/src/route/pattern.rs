/// Pattern parsing for route paths
///
/// Turns a pattern such as `/jobs/edit/:id` into typed segments and ranks them
/// for specificity ordering.

use std::cmp::Ordering;
use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::RouteError;

/// Custom pattern that turns a parameter into a catch-all
const CATCH_ALL_SOURCE: &str = ".*";

/// One segment of a route pattern
///
/// # Examples
///
/// ```
/// use jobboard_router::route::pattern::{classify_segment, PatternSegment};
///
/// let seg = classify_segment("jobs", "/jobs", false).unwrap();
/// assert!(matches!(seg, PatternSegment::Static(_)));
///
/// let seg = classify_segment(":id", "/jobs/:id", false).unwrap();
/// assert!(matches!(seg, PatternSegment::Param(_)));
///
/// let seg = classify_segment(r":id(\d+)", r"/jobs/:id(\d+)", false).unwrap();
/// assert!(matches!(seg, PatternSegment::Constrained { .. }));
///
/// let seg = classify_segment(":catchAll(.*)", "/:catchAll(.*)", false).unwrap();
/// assert!(matches!(seg, PatternSegment::CatchAll(_)));
/// ```
#[derive(Clone)]
pub enum PatternSegment {
    /// Literal text that must match exactly
    Static(String),
    /// `:name`, any single non-empty segment
    Param(String),
    /// `:name(re)`, a single segment that fully matches `re`
    Constrained {
        name: String,
        source: String,
        regex: Regex,
    },
    /// `:name(.*)`, the remaining zero or more segments
    CatchAll(String),
}

impl PatternSegment {
    /// Name of the bound parameter, `None` for literals
    pub fn param_name(&self) -> Option<&str> {
        match self {
            PatternSegment::Static(_) => None,
            PatternSegment::Param(name)
            | PatternSegment::Constrained { name, .. }
            | PatternSegment::CatchAll(name) => Some(name),
        }
    }

    /// Specificity rank of this segment
    pub fn rank(&self) -> SegmentRank {
        match self {
            PatternSegment::Static(_) => SegmentRank::Static,
            PatternSegment::Constrained { .. } => SegmentRank::Constrained,
            PatternSegment::Param(_) => SegmentRank::Param,
            PatternSegment::CatchAll(_) => SegmentRank::CatchAll,
        }
    }
}

impl PartialEq for PatternSegment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PatternSegment::Static(a), PatternSegment::Static(b))
            | (PatternSegment::Param(a), PatternSegment::Param(b))
            | (PatternSegment::CatchAll(a), PatternSegment::CatchAll(b)) => a == b,
            (
                PatternSegment::Constrained { name: a, source: sa, .. },
                PatternSegment::Constrained { name: b, source: sb, .. },
            ) => a == b && sa == sb,
            _ => false,
        }
    }
}

impl fmt::Debug for PatternSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSegment::Static(text) => f.debug_tuple("Static").field(text).finish(),
            PatternSegment::Param(name) => f.debug_tuple("Param").field(name).finish(),
            PatternSegment::Constrained { name, source, .. } => f
                .debug_struct("Constrained")
                .field("name", name)
                .field("source", source)
                .finish(),
            PatternSegment::CatchAll(name) => f.debug_tuple("CatchAll").field(name).finish(),
        }
    }
}

/// Rank of a pattern position, weakest first
///
/// `End` stands for a position past the end of a shorter pattern, so an exact
/// pattern like `/` still outranks a catch-all that would also match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentRank {
    CatchAll,
    End,
    Param,
    Constrained,
    Static,
}

/// Per-position ranks of a pattern, ordered so that the more specific pattern is greater
///
/// Positions are compared left to right and the first difference decides.
///
/// # Examples
///
/// ```
/// use jobboard_router::route::pattern::parse_pattern;
///
/// let literal = parse_pattern("/jobs/add", false).unwrap();
/// let param = parse_pattern("/jobs/:id", false).unwrap();
/// assert!(literal.specificity() > param.specificity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specificity(Vec<SegmentRank>);

impl Specificity {
    pub fn ranks(&self) -> &[SegmentRank] {
        &self.0
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| {
                let a = self.0.get(i).copied().unwrap_or(SegmentRank::End);
                let b = other.0.get(i).copied().unwrap_or(SegmentRank::End);
                a.cmp(&b)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A fully parsed route pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPattern {
    pub segments: Vec<PatternSegment>,
    /// Parameter names in pattern order
    pub params: Vec<String>,
}

impl ParsedPattern {
    pub fn catch_all(&self) -> Option<&str> {
        match self.segments.last() {
            Some(PatternSegment::CatchAll(name)) => Some(name),
            _ => None,
        }
    }

    pub fn specificity(&self) -> Specificity {
        Specificity(self.segments.iter().map(PatternSegment::rank).collect())
    }
}

/// Classifies one raw pattern segment
///
/// `pattern` is only used for error reporting.
pub fn classify_segment(
    segment: &str,
    pattern: &str,
    case_insensitive: bool,
) -> Result<PatternSegment, RouteError> {
    let Some(param) = segment.strip_prefix(':') else {
        if segment.contains('(') || segment.contains(')') {
            return Err(invalid(pattern, format!("unexpected parenthesis in `{}`", segment)));
        }
        return Ok(PatternSegment::Static(segment.to_string()));
    };

    let (name, source) = match param.split_once('(') {
        Some((name, rest)) => {
            let source = rest
                .strip_suffix(')')
                .ok_or_else(|| invalid(pattern, format!("unclosed custom pattern in `{}`", segment)))?;
            (name, Some(source))
        }
        None => (param, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(pattern, format!("bad parameter name in `{}`", segment)));
    }

    match source {
        None => Ok(PatternSegment::Param(name.to_string())),
        Some(CATCH_ALL_SOURCE) => Ok(PatternSegment::CatchAll(name.to_string())),
        Some("") => Err(invalid(pattern, format!("empty custom pattern in `{}`", segment))),
        Some(source) => {
            let regex = RegexBuilder::new(&format!("^(?:{})$", source))
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| invalid(pattern, e.to_string()))?;
            Ok(PatternSegment::Constrained {
                name: name.to_string(),
                source: source.to_string(),
                regex,
            })
        }
    }
}

/// Parses a whole pattern
///
/// # Errors
///
/// [`RouteError::InvalidPattern`] when the pattern does not start with `/`, a parameter
/// name is empty or repeated, a custom pattern does not compile, or a catch-all is not
/// the final segment.
///
/// # Examples
///
/// ```
/// use jobboard_router::route::pattern::parse_pattern;
///
/// let parsed = parse_pattern("/jobs/edit/:id", false).unwrap();
/// assert_eq!(parsed.params, vec!["id"]);
/// assert_eq!(parsed.catch_all(), None);
///
/// let parsed = parse_pattern("/:catchAll(.*)", false).unwrap();
/// assert_eq!(parsed.catch_all(), Some("catchAll"));
/// ```
pub fn parse_pattern(pattern: &str, case_insensitive: bool) -> Result<ParsedPattern, RouteError> {
    let rest = pattern
        .strip_prefix('/')
        .ok_or_else(|| invalid(pattern, "pattern must start with `/`".to_string()))?;

    let segments = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| classify_segment(segment, pattern, case_insensitive))
        .collect::<Result<Vec<_>, _>>()?;

    let catch_all_pos = segments
        .iter()
        .position(|s| matches!(s, PatternSegment::CatchAll(_)));
    if let Some(pos) = catch_all_pos {
        if pos + 1 != segments.len() {
            return Err(invalid(pattern, "catch-all must be the last segment".to_string()));
        }
    }

    let mut params: Vec<String> = Vec::new();
    for name in segments.iter().filter_map(PatternSegment::param_name) {
        if params.iter().any(|p| p == name) {
            return Err(invalid(pattern, format!("parameter `{}` appears twice", name)));
        }
        params.push(name.to_string());
    }

    Ok(ParsedPattern { segments, params })
}

fn invalid(pattern: &str, reason: String) -> RouteError {
    RouteError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(pattern: &str) -> Specificity {
        parse_pattern(pattern, false).unwrap().specificity()
    }

    #[test]
    fn test_classify_static() {
        let seg = classify_segment("jobs", "/jobs", false).unwrap();
        assert_eq!(seg, PatternSegment::Static("jobs".to_string()));
    }

    #[test]
    fn test_classify_param() {
        let seg = classify_segment(":id", "/jobs/:id", false).unwrap();
        assert_eq!(seg, PatternSegment::Param("id".to_string()));
    }

    #[test]
    fn test_classify_catch_all() {
        let seg = classify_segment(":catchAll(.*)", "/:catchAll(.*)", false).unwrap();
        assert_eq!(seg, PatternSegment::CatchAll("catchAll".to_string()));
    }

    #[test]
    fn test_classify_constrained_is_anchored() {
        let seg = classify_segment(r":id(\d+)", "/jobs/:id", false).unwrap();
        let PatternSegment::Constrained { regex, .. } = seg else {
            panic!("expected constrained segment");
        };
        assert!(regex.is_match("42"));
        assert!(!regex.is_match("42a"));
    }

    #[test]
    fn test_classify_rejects_bad_names() {
        assert!(classify_segment(":", "/:", false).is_err());
        assert!(classify_segment(":(.*)", "/:(.*)", false).is_err());
        assert!(classify_segment(":id-x", "/:id-x", false).is_err());
        assert!(classify_segment(":id(\\d+", "/:id(\\d+", false).is_err());
        assert!(classify_segment("jobs(", "/jobs(", false).is_err());
    }

    #[test]
    fn test_parse_rejects_catch_all_in_middle() {
        let err = parse_pattern("/:rest(.*)/edit", false).unwrap_err();
        assert!(matches!(err, RouteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_parse_rejects_duplicate_params() {
        assert!(parse_pattern("/jobs/:id/copy/:id", false).is_err());
    }

    #[test]
    fn test_parse_requires_leading_slash() {
        assert!(parse_pattern("jobs", false).is_err());
    }

    #[test]
    fn test_parse_root() {
        let parsed = parse_pattern("/", false).unwrap();
        assert!(parsed.segments.is_empty());
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn test_literal_beats_param() {
        assert!(spec("/jobs/add") > spec("/jobs/:id"));
    }

    #[test]
    fn test_constrained_between_literal_and_param() {
        assert!(spec(r"/jobs/:id(\d+)") > spec("/jobs/:id"));
        assert!(spec("/jobs/add") > spec(r"/jobs/:id(\d+)"));
    }

    #[test]
    fn test_exact_root_beats_catch_all() {
        assert!(spec("/") > spec("/:catchAll(.*)"));
        assert!(spec("/jobs") > spec("/jobs/:rest(.*)"));
    }

    #[test]
    fn test_first_position_decides() {
        assert!(spec("/jobs/:id") > spec("/:section/add"));
    }

    #[test]
    fn test_equal_specificity() {
        assert_eq!(spec("/jobs/:id").cmp(&spec("/posts/:slug")), Ordering::Equal);
    }

    #[test]
    fn test_root_has_no_ranks() {
        assert!(spec("/").ranks().is_empty());
        assert_eq!(
            spec("/jobs/edit/:id").ranks(),
            [SegmentRank::Static, SegmentRank::Static, SegmentRank::Param]
        );
    }
}
