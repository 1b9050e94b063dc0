// File: src/routes.rs
// Purpose: The job board's route table

use jobboard_router::RouteEntry;

use crate::views::JobBoardView;

pub const HOME: &str = "home";
pub const JOBS: &str = "jobs";
pub const JOB: &str = "job";
pub const ADD_JOB: &str = "add-job";
pub const EDIT_JOB: &str = "edit-job";
pub const NOT_FOUND: &str = "not-found";

/// Parameter bound by the not-found route
pub const CATCH_ALL_PARAM: &str = "catchAll";

/// Route table in declaration order
///
/// `job` is declared before `add-job`; the engine's specificity ordering still sends
/// `/jobs/add` to `add-job`.
pub fn route_table() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("/", HOME, JobBoardView::Home.handle()),
        RouteEntry::new("/jobs", JOBS, JobBoardView::Jobs.handle()),
        RouteEntry::new("/jobs/:id", JOB, JobBoardView::Job.handle()),
        RouteEntry::new("/jobs/add", ADD_JOB, JobBoardView::AddJob.handle()),
        RouteEntry::new("/jobs/edit/:id", EDIT_JOB, JobBoardView::EditJob.handle()),
        RouteEntry::new("/:catchAll(.*)", NOT_FOUND, JobBoardView::NotFound.handle()),
    ]
}
