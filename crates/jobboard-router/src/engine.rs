/// Route registration and resolution
use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::path::{normalize_path, raw_segments, Location};
use crate::route::{Params, Route, RouteEntry, ViewHandle};
use crate::RouteError;

/// Matching options fixed at registration time
///
/// Defaults: literal segments compare exactly and a trailing slash is insignificant.
///
/// # Examples
///
/// ```
/// use jobboard_router::RouterOptions;
///
/// let options = RouterOptions::default()
///     .with_case_sensitivity(true)
///     .with_strict_trailing_slash(true);
/// assert!(options.case_insensitive);
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterOptions {
    pub case_insensitive: bool,
    /// When set, `/jobs/` and `/jobs` are different paths
    pub strict: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            strict: false,
        }
    }
}

impl RouterOptions {
    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_strict_trailing_slash(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Result of resolving a location
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The winning route
    pub route: &'a Route,
    /// Parameters bound by the route pattern, percent-decoded
    pub params: Params,
    /// The normalized path that was matched
    pub path: String,
    pub query: Vec<(String, String)>,
    pub hash: Option<String>,
}

impl RouteMatch<'_> {
    pub fn name(&self) -> &str {
        self.route.name()
    }

    pub fn component(&self) -> &ViewHandle {
        self.route.component()
    }

    /// True when the location fell through to the catch-all route
    pub fn is_not_found(&self) -> bool {
        self.route.catch_all().is_some()
    }

    /// First query value for `key`
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Registers a route table with default options
///
/// See [`register_with_options`].
pub fn register<I>(entries: I) -> Result<RoutingEngine, RouteError>
where
    I: IntoIterator<Item = RouteEntry>,
{
    register_with_options(entries, RouterOptions::default())
}

/// Validates and compiles an ordered route table into an immutable engine
///
/// # Errors
///
/// - [`RouteError::InvalidPattern`] for a malformed path pattern
/// - [`RouteError::DuplicateRouteName`] when two entries share a name
/// - [`RouteError::MultipleCatchAll`] / [`RouteError::MissingCatchAll`] unless exactly one
///   entry ends in a catch-all
/// - [`RouteError::CatchAllNotLast`] when the catch-all is not the final entry
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use jobboard_router::{register, RouteEntry, View};
///
/// #[derive(Debug)]
/// struct Page(&'static str);
/// impl View for Page {
///     fn component_name(&self) -> &str { self.0 }
/// }
///
/// let engine = register(vec![
///     RouteEntry::new("/", "home", Arc::new(Page("Home"))),
///     RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page("NotFound"))),
/// ])
/// .unwrap();
///
/// assert_eq!(engine.resolve("/").name(), "home");
/// assert_eq!(engine.resolve("/missing").name(), "not-found");
/// ```
pub fn register_with_options<I>(entries: I, options: RouterOptions) -> Result<RoutingEngine, RouteError>
where
    I: IntoIterator<Item = RouteEntry>,
{
    let routes = entries
        .into_iter()
        .map(|entry| Route::compile(entry, options.case_insensitive))
        .collect::<Result<Vec<_>, _>>()?;

    let mut by_name = HashMap::with_capacity(routes.len());
    for (idx, route) in routes.iter().enumerate() {
        if by_name.insert(route.name().to_string(), idx).is_some() {
            return Err(RouteError::DuplicateRouteName(route.name().to_string()));
        }
    }

    let mut catch_alls = routes.iter().enumerate().filter(|(_, r)| r.catch_all().is_some());
    let (fallback, fallback_route) = catch_alls.next().ok_or(RouteError::MissingCatchAll)?;
    if let Some((_, second)) = catch_alls.next() {
        return Err(RouteError::MultipleCatchAll {
            first: fallback_route.name().to_string(),
            second: second.name().to_string(),
        });
    }
    if fallback + 1 != routes.len() {
        return Err(RouteError::CatchAllNotLast(fallback_route.name().to_string()));
    }

    // Stable sort: declaration order decides among equally specific routes
    let mut order: Vec<usize> = (0..routes.len()).collect();
    order.sort_by(|&a, &b| routes[b].specificity().cmp(routes[a].specificity()));

    info!(
        routes = routes.len(),
        fallback = routes[fallback].name(),
        case_insensitive = options.case_insensitive,
        strict = options.strict,
        "registered route table"
    );

    Ok(RoutingEngine {
        routes,
        order,
        by_name,
        fallback,
        options,
    })
}

/// Immutable route table with specificity-ordered matching
///
/// Resolution is a total function: every location resolves, unmatched ones to the
/// catch-all route.
#[derive(Debug, Clone)]
pub struct RoutingEngine {
    /// Declaration order
    routes: Vec<Route>,
    /// Indices into `routes`, most specific first
    order: Vec<usize>,
    by_name: HashMap<String, usize>,
    fallback: usize,
    options: RouterOptions,
}

impl RoutingEngine {
    /// Resolves a location (path with optional query string and fragment)
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use jobboard_router::{register, RouteEntry, View};
    ///
    /// #[derive(Debug)]
    /// struct Page;
    /// impl View for Page {
    ///     fn component_name(&self) -> &str { "Page" }
    /// }
    ///
    /// let engine = register(vec![
    ///     RouteEntry::new("/jobs/:id", "job", Arc::new(Page)),
    ///     RouteEntry::new("/jobs/add", "add-job", Arc::new(Page)),
    ///     RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page)),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(engine.resolve("/jobs/add").name(), "add-job");
    ///
    /// let m = engine.resolve("/jobs/7?tab=apply");
    /// assert_eq!(m.name(), "job");
    /// assert_eq!(m.params["id"], "7");
    /// assert_eq!(m.query_value("tab"), Some("apply"));
    /// ```
    pub fn resolve(&self, location: &str) -> RouteMatch<'_> {
        let Location { path, query, hash } = Location::parse(location);
        let path = normalize_path(path, self.options.strict);
        let segments = raw_segments(&path);

        let found = self.order.iter().find_map(|&idx| {
            let route = &self.routes[idx];
            route
                .matches(&segments, self.options.case_insensitive)
                .map(|params| (route, params))
        });

        let (route, params) = found.unwrap_or_else(|| self.fallback_match(&segments));

        debug!(
            path = %path,
            route = route.name(),
            component = route.component().component_name(),
            "resolved location"
        );

        RouteMatch {
            route,
            params,
            path: path.into_owned(),
            query,
            hash,
        }
    }

    /// Binds the whole path to the catch-all route when even it did not match,
    /// which only happens for a catch-all below a literal prefix
    fn fallback_match(&self, segments: &[&str]) -> (&Route, Params) {
        let route = &self.routes[self.fallback];
        let mut params = Params::new();
        if let Some(name) = route.catch_all() {
            let rest = segments
                .iter()
                .map(|raw| crate::path::location::decode_component(raw))
                .collect::<Vec<_>>()
                .join("/");
            params.insert(name.to_string(), rest);
        }
        (route, params)
    }

    /// Reverse-resolves a route name and parameter bindings into a path
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownRouteName`] for an unregistered name, otherwise whatever
    /// [`Route::to_path`] reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use std::sync::Arc;
    /// use jobboard_router::{register, RouteEntry, RouteError, View};
    ///
    /// #[derive(Debug)]
    /// struct Page;
    /// impl View for Page {
    ///     fn component_name(&self) -> &str { "Page" }
    /// }
    ///
    /// let engine = register(vec![
    ///     RouteEntry::new("/jobs/edit/:id", "edit-job", Arc::new(Page)),
    ///     RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page)),
    /// ])
    /// .unwrap();
    ///
    /// let mut params = HashMap::new();
    /// params.insert("id".to_string(), "42".to_string());
    /// assert_eq!(engine.to_path("edit-job", &params).unwrap(), "/jobs/edit/42");
    ///
    /// assert!(matches!(
    ///     engine.to_path("edit-job", &HashMap::new()),
    ///     Err(RouteError::MissingParameter { .. })
    /// ));
    /// ```
    pub fn to_path(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let route = self
            .route(name)
            .ok_or_else(|| RouteError::UnknownRouteName(name.to_string()))?;

        route.to_path(params).inspect_err(|err| {
            warn!(route = name, error = %err, "reverse resolution rejected");
        })
    }

    /// Like [`to_path`](Self::to_path), taking parameters as `(name, value)` pairs
    pub fn to_path_params(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let param_map: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        self.to_path(name, &param_map)
    }

    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&idx| &self.routes[idx])
    }

    /// Routes in declaration order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Routes in the order they are tried, most specific first
    pub fn routes_by_specificity(&self) -> impl Iterator<Item = &Route> {
        self.order.iter().map(|&idx| &self.routes[idx])
    }

    /// The catch-all route
    pub fn not_found(&self) -> &Route {
        &self.routes[self.fallback]
    }

    pub fn options(&self) -> RouterOptions {
        self.options
    }
}
