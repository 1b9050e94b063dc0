// File: src/lib.rs
// Purpose: Job board routing: route table, views, configuration and wiring

//! Route table and navigation wiring for the job board.
//!
//! There is no global router: [`create_engine`] builds the immutable engine once and
//! callers pass the `Arc` to whatever needs to resolve or generate paths.
//!
//! ```
//! use jobboard::{create_router, routes, Config};
//!
//! let mut router = create_router(&Config::default()).unwrap();
//! router.navigate_params(routes::EDIT_JOB, &[("id", "42")]).unwrap();
//!
//! let current = router.current();
//! assert_eq!(current.name(), routes::EDIT_JOB);
//! assert_eq!(current.params["id"], "42");
//! ```

pub mod config;
pub mod routes;
pub mod views;

use std::sync::Arc;

use anyhow::{Context, Result};
use jobboard_router::{register_with_options, MemoryHistory, Navigator, RoutingEngine};

pub use config::{Config, RoutingConfig};
pub use views::JobBoardView;

/// Registers the job board route table with the configured matching options
pub fn create_engine(config: &Config) -> Result<Arc<RoutingEngine>> {
    let engine = register_with_options(routes::route_table(), config.routing.router_options())
        .context("Failed to register the job board route table")?;
    Ok(Arc::new(engine))
}

/// Builds a navigator starting at the application root
pub fn create_router(config: &Config) -> Result<Navigator<MemoryHistory>> {
    create_router_at(config, &config.routing.base_path)
}

/// Builds a navigator starting at a full location (base path included), e.g. the one
/// the page was loaded with
pub fn create_router_at(config: &Config, location: &str) -> Result<Navigator<MemoryHistory>> {
    let engine = create_engine(config)?;
    let history = MemoryHistory::with_location(&config.routing.base_path, location);
    tracing::info!(base = %config.routing.base_path, location, "job board router ready");
    Ok(Navigator::new(engine, history))
}

/// Resolves the view for a location
pub fn view_for(engine: &RoutingEngine, location: &str) -> Option<JobBoardView> {
    let route_match = engine.resolve(location);
    JobBoardView::from_component_name(route_match.component().component_name())
}
