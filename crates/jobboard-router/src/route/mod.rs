/// Route entries and their compiled, matchable form
///
/// A [`RouteEntry`] is the declarative `(path, name, component)` triple an application
/// writes down. Registration compiles each one into a [`Route`] that knows how to match
/// path segments and how to rebuild a path from parameters.

pub mod pattern;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::path::location::decode_component;
use crate::RouteError;
use pattern::{parse_pattern, ParsedPattern, PatternSegment, Specificity};

/// Parameters bound by a match, keyed by parameter name
pub type Params = HashMap<String, String>;

/// A renderable view the router dispatches to
///
/// The router never looks inside a view; it only hands it out with the match.
pub trait View: fmt::Debug + Send + Sync {
    /// Stable component identifier, used in logs
    fn component_name(&self) -> &str;
}

/// Shared handle to a view
pub type ViewHandle = Arc<dyn View>;

/// One declared `(path, name, component)` association
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: String,
    pub name: String,
    pub component: ViewHandle,
}

impl RouteEntry {
    pub fn new(path: impl Into<String>, name: impl Into<String>, component: ViewHandle) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }
}

/// A registered route: the entry plus its parsed pattern
#[derive(Debug, Clone)]
pub struct Route {
    entry: RouteEntry,
    pattern: ParsedPattern,
    specificity: Specificity,
}

impl Route {
    /// Compiles an entry
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use jobboard_router::{Route, RouteEntry, View};
    ///
    /// #[derive(Debug)]
    /// struct JobView;
    /// impl View for JobView {
    ///     fn component_name(&self) -> &str { "JobView" }
    /// }
    ///
    /// let route = Route::compile(RouteEntry::new("/jobs/:id", "job", Arc::new(JobView)), false).unwrap();
    /// assert_eq!(route.params(), &["id".to_string()]);
    /// ```
    pub fn compile(entry: RouteEntry, case_insensitive: bool) -> Result<Self, RouteError> {
        let pattern = parse_pattern(&entry.path, case_insensitive)?;
        let specificity = pattern.specificity();
        Ok(Self {
            entry,
            pattern,
            specificity,
        })
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// The declared pattern, e.g. `/jobs/:id`
    pub fn path(&self) -> &str {
        &self.entry.path
    }

    pub fn component(&self) -> &ViewHandle {
        &self.entry.component
    }

    pub fn params(&self) -> &[String] {
        &self.pattern.params
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.pattern.segments
    }

    pub fn specificity(&self) -> &Specificity {
        &self.specificity
    }

    /// Name of the catch-all parameter, if this route ends in one
    pub fn catch_all(&self) -> Option<&str> {
        self.pattern.catch_all()
    }

    /// Matches raw (still percent-encoded) path segments against this route
    ///
    /// Bound values are percent-decoded.
    pub fn matches(&self, segments: &[&str], case_insensitive: bool) -> Option<Params> {
        match_segments(&self.pattern.segments, segments, Params::new(), case_insensitive)
    }

    /// Builds a concrete path from parameter bindings
    ///
    /// Values are percent-encoded; a catch-all value keeps its `/` separators.
    /// Bindings for names the pattern does not use are ignored.
    ///
    /// # Errors
    ///
    /// - [`RouteError::MissingParameter`] when a parameter has no binding, or a single-segment
    ///   parameter is bound to an empty string
    /// - [`RouteError::InvalidParameter`] when a value violates the parameter's custom pattern,
    ///   or a non-empty catch-all value has an empty piece (`a//b`, `/a`, `a/`)
    pub fn to_path(&self, params: &Params) -> Result<String, RouteError> {
        let pieces = self
            .pattern
            .segments
            .iter()
            .map(|segment| self.render_segment(segment, params))
            .collect::<Result<Vec<_>, _>>()?;

        let joined = pieces
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        Ok(format!("/{}", joined))
    }

    fn render_segment(&self, segment: &PatternSegment, params: &Params) -> Result<String, RouteError> {
        match segment {
            PatternSegment::Static(text) => Ok(text.clone()),
            PatternSegment::Param(name) => {
                let value = self.required(name, params)?;
                Ok(urlencoding::encode(value).into_owned())
            }
            PatternSegment::Constrained { name, regex, .. } => {
                let value = self.required(name, params)?;
                if !regex.is_match(value) {
                    return Err(RouteError::InvalidParameter {
                        route: self.entry.name.clone(),
                        param: name.clone(),
                        value: value.to_string(),
                    });
                }
                Ok(urlencoding::encode(value).into_owned())
            }
            PatternSegment::CatchAll(name) => {
                let value = params.get(name).ok_or_else(|| self.missing(name))?;
                // Empty pieces collapse on resolve, so they could never come back
                if !value.is_empty() && value.split('/').any(str::is_empty) {
                    return Err(RouteError::InvalidParameter {
                        route: self.entry.name.clone(),
                        param: name.clone(),
                        value: value.clone(),
                    });
                }
                Ok(value
                    .split('/')
                    .map(|piece| urlencoding::encode(piece).into_owned())
                    .collect::<Vec<_>>()
                    .join("/"))
            }
        }
    }

    fn required<'p>(&self, name: &str, params: &'p Params) -> Result<&'p str, RouteError> {
        params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| self.missing(name))
    }

    fn missing(&self, name: &str) -> RouteError {
        RouteError::MissingParameter {
            route: self.entry.name.clone(),
            param: name.to_string(),
        }
    }
}

/// Walks pattern and path segments together, binding parameters as it goes
fn match_segments(
    pattern: &[PatternSegment],
    path: &[&str],
    mut params: Params,
    case_insensitive: bool,
) -> Option<Params> {
    let Some((segment, pattern_rest)) = pattern.split_first() else {
        // Consumed the whole pattern, succeed only if the path is consumed too
        return path.is_empty().then_some(params);
    };

    if let PatternSegment::CatchAll(name) = segment {
        let rest = path
            .iter()
            .map(|raw| decode_component(raw))
            .collect::<Vec<_>>()
            .join("/");
        params.insert(name.clone(), rest);
        return Some(params);
    }

    let (raw, path_rest) = path.split_first()?;
    if raw.is_empty() {
        return None;
    }
    let value = decode_component(raw);

    match segment {
        PatternSegment::Static(text) => {
            let matches = if case_insensitive {
                text.eq_ignore_ascii_case(&value)
            } else {
                *text == value
            };
            if !matches {
                return None;
            }
        }
        PatternSegment::Param(name) => {
            params.insert(name.clone(), value.into_owned());
        }
        PatternSegment::Constrained { name, regex, .. } => {
            if !regex.is_match(&value) {
                return None;
            }
            params.insert(name.clone(), value.into_owned());
        }
        PatternSegment::CatchAll(_) => unreachable!("catch-all handled above"),
    }

    match_segments(pattern_rest, path_rest, params, case_insensitive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::pattern::SegmentRank;

    #[derive(Debug)]
    struct Stub;

    impl View for Stub {
        fn component_name(&self) -> &str {
            "Stub"
        }
    }

    fn route(path: &str) -> Route {
        Route::compile(RouteEntry::new(path, "r", Arc::new(Stub)), true).unwrap()
    }

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_static_match_ignores_case() {
        assert_eq!(route("/jobs").matches(&["JOBS"], true), Some(Params::new()));
        assert_eq!(route("/jobs").matches(&["JOBS"], false), None);
    }

    #[test]
    fn test_param_binds_decoded_value() {
        let bound = route("/jobs/:id").matches(&["jobs", "a%20b"], true).unwrap();
        assert_eq!(bound, params(&[("id", "a b")]));
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        assert_eq!(route("/jobs/:id").matches(&["jobs", ""], true), None);
        assert_eq!(route("/jobs/:id").matches(&["jobs"], true), None);
    }

    #[test]
    fn test_extra_segments_do_not_match() {
        assert_eq!(route("/jobs/:id").matches(&["jobs", "1", "2"], true), None);
    }

    #[test]
    fn test_constrained_param() {
        let r = route(r"/jobs/:id(\d+)");
        assert!(r.matches(&["jobs", "17"], true).is_some());
        assert!(r.matches(&["jobs", "seventeen"], true).is_none());
    }

    #[test]
    fn test_catch_all_binds_zero_or_more() {
        let r = route("/:catchAll(.*)");
        assert_eq!(r.matches(&[], true), Some(params(&[("catchAll", "")])));
        assert_eq!(
            r.matches(&["a", "b"], true),
            Some(params(&[("catchAll", "a/b")]))
        );
    }

    #[test]
    fn test_to_path_substitutes_and_encodes() {
        let r = route("/jobs/edit/:id");
        assert_eq!(r.to_path(&params(&[("id", "42")])).unwrap(), "/jobs/edit/42");
        assert_eq!(r.to_path(&params(&[("id", "a/b")])).unwrap(), "/jobs/edit/a%2Fb");
    }

    #[test]
    fn test_to_path_missing_and_empty() {
        let r = route("/jobs/:id");
        assert!(matches!(
            r.to_path(&Params::new()),
            Err(RouteError::MissingParameter { .. })
        ));
        assert!(matches!(
            r.to_path(&params(&[("id", "")])),
            Err(RouteError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_to_path_constrained_violation() {
        let r = route(r"/jobs/:id(\d+)");
        assert!(matches!(
            r.to_path(&params(&[("id", "abc")])),
            Err(RouteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_to_path_catch_all_keeps_separators() {
        let r = route("/:catchAll(.*)");
        assert_eq!(r.to_path(&params(&[("catchAll", "a/b c")])).unwrap(), "/a/b%20c");
        assert_eq!(r.to_path(&params(&[("catchAll", "")])).unwrap(), "/");
    }

    #[test]
    fn test_to_path_catch_all_rejects_empty_pieces() {
        let r = route("/:catchAll(.*)");
        for value in ["a//b", "/a", "a/", "/"] {
            assert!(matches!(
                r.to_path(&params(&[("catchAll", value)])),
                Err(RouteError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_compiled_segments() {
        let r = route(r"/jobs/:id(\d+)/:rest(.*)");
        let kinds: Vec<_> = r.segments().iter().map(PatternSegment::rank).collect();
        assert_eq!(
            kinds,
            vec![SegmentRank::Static, SegmentRank::Constrained, SegmentRank::CatchAll]
        );
        assert_eq!(r.params(), ["id", "rest"]);
        assert_eq!(r.catch_all(), Some("rest"));
    }

    #[test]
    fn test_to_path_root() {
        assert_eq!(route("/").to_path(&Params::new()).unwrap(), "/");
    }
}
