/// Navigation history abstraction and its in-memory implementation
use std::borrow::Cow;
use std::fmt;

use tracing::debug;

/// Callback fired when the history traverses (back, forward, go)
pub type NavigationCallback = Box<dyn FnMut(&NavigationEvent)>;

/// Direction of a history traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    Back,
    Forward,
    Unknown,
}

/// A traversal reported to history listeners
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub from: String,
    pub to: String,
    pub delta: isize,
}

impl NavigationEvent {
    pub fn direction(&self) -> NavigationDirection {
        match self.delta {
            d if d < 0 => NavigationDirection::Back,
            d if d > 0 => NavigationDirection::Forward,
            _ => NavigationDirection::Unknown,
        }
    }
}

/// Where the current location lives and how it changes
///
/// Locations are app-relative (`/jobs?page=2`); the base path is only added by
/// [`create_href`](History::create_href). `push` and `replace` are silent, only
/// traversals via `go` reach the listeners registered with `on_navigate`.
pub trait History {
    /// Normalized base path, empty for an application served at the root
    fn base(&self) -> &str;

    /// App-relative location currently shown
    fn current_path(&self) -> String;

    fn push(&mut self, location: &str);

    fn replace(&mut self, location: &str);

    /// Moves `delta` entries through the history; returns whether the location changed
    fn go(&mut self, delta: isize) -> bool;

    fn on_navigate(&mut self, callback: NavigationCallback);

    /// Full href for an app-relative location
    fn create_href(&self, location: &str) -> String {
        format!("{}{}", self.base(), location)
    }
}

/// Normalizes a base path: leading `/`, no trailing `/`, `/` itself becomes empty
///
/// # Examples
///
/// ```
/// use jobboard_router::history::normalize_base;
///
/// assert_eq!(normalize_base("/"), "");
/// assert_eq!(normalize_base(""), "");
/// assert_eq!(normalize_base("app/"), "/app");
/// assert_eq!(normalize_base("/careers/jobs/"), "/careers/jobs");
/// ```
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Strips `base` from the front of a full location, ASCII case-insensitively
///
/// Returns the location unchanged when it does not live under `base`.
///
/// # Examples
///
/// ```
/// use jobboard_router::history::strip_base;
///
/// assert_eq!(strip_base("/app/jobs/3", "/app"), "/jobs/3");
/// assert_eq!(strip_base("/APP", "/app"), "/");
/// assert_eq!(strip_base("/app?ref=mail", "/app"), "/?ref=mail");
/// assert_eq!(strip_base("/application", "/app"), "/application");
/// assert_eq!(strip_base("/jobs", ""), "/jobs");
/// ```
pub fn strip_base<'a>(location: &'a str, base: &str) -> Cow<'a, str> {
    let split = location
        .get(..base.len())
        .zip(location.get(base.len()..));
    let Some((head, rest)) = split else {
        return Cow::Borrowed(location);
    };
    if base.is_empty() || !head.eq_ignore_ascii_case(base) {
        return Cow::Borrowed(location);
    }

    match rest.chars().next() {
        None => Cow::Borrowed("/"),
        Some('/') => Cow::Borrowed(rest),
        Some('?') | Some('#') => Cow::Owned(format!("/{}", rest)),
        Some(_) => Cow::Borrowed(location),
    }
}

/// History kept in process memory: an entry stack and a cursor
///
/// # Examples
///
/// ```
/// use jobboard_router::history::{History, MemoryHistory};
///
/// let mut history = MemoryHistory::new("/careers/");
/// history.push("/jobs");
/// history.push("/jobs/3");
/// assert!(history.go(-1));
/// assert_eq!(history.current_path(), "/jobs");
/// assert_eq!(history.create_href("/jobs/add"), "/careers/jobs/add");
/// ```
pub struct MemoryHistory {
    base: String,
    entries: Vec<String>,
    position: usize,
    listeners: Vec<NavigationCallback>,
}

impl MemoryHistory {
    /// Starts at `/`
    pub fn new(base: &str) -> Self {
        Self::with_location(base, "/")
    }

    /// Starts at a full location such as the one in the address bar, base path included
    pub fn with_location(base: &str, location: &str) -> Self {
        let base = normalize_base(base);
        let start = strip_base(location, &base);
        let start = if start.starts_with('/') {
            start.to_string()
        } else {
            format!("/{}", start)
        };

        Self {
            base,
            entries: vec![start],
            position: 0,
            listeners: Vec::new(),
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn trigger(&mut self, event: &NavigationEvent) {
        debug!(from = %event.from, to = %event.to, delta = event.delta, "history traversal");
        for listener in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl History for MemoryHistory {
    fn base(&self) -> &str {
        &self.base
    }

    fn current_path(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push(&mut self, location: &str) {
        self.entries.truncate(self.position + 1);
        self.entries.push(location.to_string());
        self.position = self.entries.len() - 1;
    }

    fn replace(&mut self, location: &str) {
        self.entries[self.position] = location.to_string();
    }

    fn go(&mut self, delta: isize) -> bool {
        let last = self.entries.len() - 1;
        let target = self.position.saturating_add_signed(delta).min(last);
        if target == self.position {
            return false;
        }

        let event = NavigationEvent {
            from: self.entries[self.position].clone(),
            to: self.entries[target].clone(),
            delta: target as isize - self.position as isize,
        };
        self.position = target;
        self.trigger(&event);
        true
    }

    fn on_navigate(&mut self, callback: NavigationCallback) {
        self.listeners.push(callback);
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("base", &self.base)
            .field("entries", &self.entries)
            .field("position", &self.position)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut history = MemoryHistory::new("/");
        history.push("/jobs");
        history.push("/jobs/1");
        assert!(history.go(-2));
        history.push("/jobs/add");
        assert_eq!(history.entries(), &["/", "/jobs/add"]);
        assert!(!history.go(1));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut history = MemoryHistory::new("");
        history.push("/jobs");
        history.replace("/jobs?page=2");
        assert_eq!(history.position(), 1);
        assert_eq!(history.current_path(), "/jobs?page=2");
    }

    #[test]
    fn test_go_clamps_to_bounds() {
        let mut history = MemoryHistory::new("/");
        history.push("/a");
        history.push("/b");
        assert!(history.go(-10));
        assert_eq!(history.current_path(), "/");
        assert!(!history.go(-1));
        assert!(history.go(10));
        assert_eq!(history.current_path(), "/b");
    }

    #[test]
    fn test_listeners_only_see_traversals() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut history = MemoryHistory::new("/");
        history.on_navigate(Box::new(move |event| sink.borrow_mut().push(event.clone())));
        history.push("/jobs");
        history.replace("/jobs/1");
        assert!(seen.borrow().is_empty());

        history.go(-1);
        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].from, "/jobs/1");
        assert_eq!(events[0].to, "/");
        assert_eq!(events[0].direction(), NavigationDirection::Back);
    }

    #[test]
    fn test_with_location_strips_base() {
        let history = MemoryHistory::with_location("/careers", "/careers/jobs/edit/5");
        assert_eq!(history.current_path(), "/jobs/edit/5");

        let history = MemoryHistory::with_location("/careers", "/careers?ref=mail");
        assert_eq!(history.current_path(), "/?ref=mail");
    }

    #[test]
    fn test_create_href_at_root() {
        let history = MemoryHistory::new("/");
        assert_eq!(history.create_href("/jobs"), "/jobs");
    }
}
