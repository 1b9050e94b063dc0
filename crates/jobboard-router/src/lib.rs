//! # Job Board Router
//!
//! A client-side route table for single-page applications:
//! - Static routes (`/jobs`)
//! - Dynamic parameters (`/jobs/:id`)
//! - Parameters with a custom pattern (`/jobs/:id(\d+)`)
//! - Catch-all fallback (`/:catchAll(.*)`)
//! - Named routes and reverse resolution
//! - History-driven navigation with superseded-navigation detection
//!
//! ## Specificity
//!
//! Routes are tried most specific first, position by position:
//! literal > custom-pattern parameter > parameter > end of pattern > catch-all.
//! Declaration order only breaks ties between equally specific routes, so `/jobs/add`
//! wins over `/jobs/:id` whichever is declared first.
//!
//! ## Path Normalization
//!
//! - Query string and fragment are split off: `/jobs?page=2#top` → `/jobs`
//! - Trailing slashes: `/jobs/` → `/jobs` (unless strict)
//! - Double slashes: `/jobs//add` → `/jobs/add`
//! - Backslashes: `\jobs\add` → `/jobs/add`
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use jobboard_router::{register, RouteEntry, View};
//!
//! #[derive(Debug)]
//! struct Page(&'static str);
//! impl View for Page {
//!     fn component_name(&self) -> &str { self.0 }
//! }
//!
//! let engine = register(vec![
//!     RouteEntry::new("/jobs", "jobs", Arc::new(Page("JobsView"))),
//!     RouteEntry::new("/jobs/:id", "job", Arc::new(Page("JobView"))),
//!     RouteEntry::new("/:catchAll(.*)", "not-found", Arc::new(Page("NotFoundView"))),
//! ])
//! .unwrap();
//!
//! let route_match = engine.resolve("/jobs/123");
//! assert_eq!(route_match.name(), "job");
//! assert_eq!(route_match.params.get("id"), Some(&"123".to_string()));
//! assert_eq!(route_match.component().component_name(), "JobView");
//! ```

mod engine;
mod error;
pub mod history;
mod navigator;
pub mod path;
pub mod route;

pub use engine::{register, register_with_options, RouteMatch, RouterOptions, RoutingEngine};
pub use error::RouteError;
pub use history::{History, MemoryHistory, NavigationEvent};
pub use navigator::{NavigationId, Navigator};
pub use path::{normalize_path, Location};
pub use route::{Params, Route, RouteEntry, View, ViewHandle};
