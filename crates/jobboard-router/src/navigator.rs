/// History-driven navigation on top of a routing engine
///
/// The [`Navigator`] owns a [`History`], resolves every location change through a shared
/// [`RoutingEngine`] and stamps each change with a [`NavigationId`]. A host that mounts
/// views asynchronously compares the id it started with against
/// [`Navigator::is_current`] and drops the mount when a newer navigation won.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::engine::{RouteMatch, RoutingEngine};
use crate::history::History;
use crate::route::Params;
use crate::RouteError;

/// Monotonic identifier of a navigation; the initial location is id 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavigationId(u64);

impl NavigationId {
    pub fn value(self) -> u64 {
        self.0
    }
}

type Listener = Box<dyn FnMut(NavigationId, &RouteMatch<'_>)>;

/// State shared between the navigator and the callback it installs on its history
struct Dispatch {
    engine: Arc<RoutingEngine>,
    generation: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl Dispatch {
    fn notify(&self, location: &str) -> NavigationId {
        let id = NavigationId(self.generation.get() + 1);
        self.generation.set(id.0);

        let route_match = self.engine.resolve(location);
        debug!(id = id.0, location, route = route_match.name(), "navigation");

        // Listeners must not register further listeners while being notified
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener(id, &route_match);
        }
        id
    }
}

/// Navigation controller for a single application instance
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use jobboard_router::{register, MemoryHistory, Navigator, RouteEntry, View};
///
/// #[derive(Debug)]
/// struct Page;
/// impl View for Page {
///     fn component_name(&self) -> &str { "Page" }
/// }
///
/// let engine = Arc::new(register(vec![
///     RouteEntry::new("/", "home", Arc::new(Page)),
///     RouteEntry::new("/jobs/:id", "job", Arc::new(Page)),
///     RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page)),
/// ]).unwrap());
///
/// let mut nav = Navigator::new(engine, MemoryHistory::new("/"));
/// let first = nav.navigate_params("job", &[("id", "3")]).unwrap();
/// assert_eq!(nav.current().params["id"], "3");
///
/// nav.back();
/// assert_eq!(nav.current().name(), "home");
/// assert!(!nav.is_current(first));
/// ```
pub struct Navigator<H: History> {
    dispatch: Rc<Dispatch>,
    history: H,
}

impl<H: History> Navigator<H> {
    /// Wires the engine to the history; traversals performed on the history are resolved
    /// and reported like any other navigation
    pub fn new(engine: Arc<RoutingEngine>, mut history: H) -> Self {
        let dispatch = Rc::new(Dispatch {
            engine,
            generation: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        });

        let on_traversal = Rc::clone(&dispatch);
        history.on_navigate(Box::new(move |event| {
            on_traversal.notify(&event.to);
        }));

        Self { dispatch, history }
    }

    pub fn engine(&self) -> &Arc<RoutingEngine> {
        &self.dispatch.engine
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Resolves the location the history currently shows
    pub fn current(&self) -> RouteMatch<'_> {
        self.dispatch.engine.resolve(&self.history.current_path())
    }

    /// Id of the most recent navigation
    pub fn current_id(&self) -> NavigationId {
        NavigationId(self.dispatch.generation.get())
    }

    /// False once a newer navigation has started
    pub fn is_current(&self, id: NavigationId) -> bool {
        id == self.current_id()
    }

    /// Registers a callback run after every navigation with the resolved match
    pub fn on_navigate<F>(&mut self, callback: F)
    where
        F: FnMut(NavigationId, &RouteMatch<'_>) + 'static,
    {
        self.dispatch.listeners.borrow_mut().push(Box::new(callback));
    }

    /// Pushes a new location (path with optional query and fragment)
    pub fn push(&mut self, location: &str) -> NavigationId {
        let location = app_location(location);
        self.history.push(&location);
        self.dispatch.notify(&location)
    }

    /// Replaces the current history entry
    pub fn replace(&mut self, location: &str) -> NavigationId {
        let location = app_location(location);
        self.history.replace(&location);
        self.dispatch.notify(&location)
    }

    /// Reverse-resolves a named route and pushes it
    ///
    /// # Errors
    ///
    /// Same as [`RoutingEngine::to_path`]; the history is left untouched on error.
    pub fn navigate(&mut self, name: &str, params: &Params) -> Result<NavigationId, RouteError> {
        let path = self.dispatch.engine.to_path(name, params)?;
        Ok(self.push(&path))
    }

    /// Like [`navigate`](Self::navigate), taking parameters as `(name, value)` pairs
    pub fn navigate_params(
        &mut self,
        name: &str,
        params: &[(&str, &str)],
    ) -> Result<NavigationId, RouteError> {
        let path = self.dispatch.engine.to_path_params(name, params)?;
        Ok(self.push(&path))
    }

    /// Full href (base path included) for a named route
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let path = self.dispatch.engine.to_path(name, params)?;
        Ok(self.history.create_href(&path))
    }

    /// Moves through the history; `None` when already at the edge
    pub fn go(&mut self, delta: isize) -> Option<NavigationId> {
        self.history.go(delta).then(|| self.current_id())
    }

    pub fn back(&mut self) -> Option<NavigationId> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<NavigationId> {
        self.go(1)
    }
}

impl<H: History + fmt::Debug> fmt::Debug for Navigator<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("history", &self.history)
            .field("generation", &self.dispatch.generation.get())
            .finish()
    }
}

fn app_location(location: &str) -> String {
    if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{}", location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryHistory;
    use crate::route::{RouteEntry, View};
    use crate::register;

    #[derive(Debug)]
    struct Page;

    impl View for Page {
        fn component_name(&self) -> &str {
            "Page"
        }
    }

    fn navigator() -> Navigator<MemoryHistory> {
        let engine = register(vec![
            RouteEntry::new("/", "home", Arc::new(Page)),
            RouteEntry::new("/jobs", "jobs", Arc::new(Page)),
            RouteEntry::new("/jobs/:id", "job", Arc::new(Page)),
            RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page)),
        ])
        .unwrap();
        Navigator::new(Arc::new(engine), MemoryHistory::new("/board"))
    }

    #[test]
    fn test_initial_state() {
        let nav = navigator();
        assert_eq!(nav.current_id().value(), 0);
        assert_eq!(nav.current().name(), "home");
    }

    #[test]
    fn test_push_supersedes_previous_navigation() {
        let mut nav = navigator();
        let first = nav.push("/jobs");
        let second = nav.push("/jobs/9");
        assert!(first < second);
        assert!(!nav.is_current(first));
        assert!(nav.is_current(second));
    }

    #[test]
    fn test_push_adds_leading_slash() {
        let mut nav = navigator();
        nav.push("jobs");
        assert_eq!(nav.history().current_path(), "/jobs");
    }

    #[test]
    fn test_navigate_error_leaves_history_untouched() {
        let mut nav = navigator();
        let err = nav.navigate("job", &Params::new()).unwrap_err();
        assert!(matches!(err, RouteError::MissingParameter { .. }));
        assert_eq!(nav.history().entries().len(), 1);
        assert_eq!(nav.current_id().value(), 0);
    }

    #[test]
    fn test_href_includes_base() {
        let nav = navigator();
        let mut params = Params::new();
        params.insert("id".to_string(), "5".to_string());
        assert_eq!(nav.href("job", &params).unwrap(), "/board/jobs/5");
    }

    #[test]
    fn test_back_at_start_is_none() {
        let mut nav = navigator();
        assert_eq!(nav.back(), None);
    }
}
