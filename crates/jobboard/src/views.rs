// File: src/views.rs
// Purpose: View handles the route table dispatches to

use std::sync::Arc;

use jobboard_router::{View, ViewHandle};

/// The job board's pages
///
/// Rendering lives in the front end; the router only needs a stable handle per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobBoardView {
    Home,
    Jobs,
    Job,
    AddJob,
    EditJob,
    NotFound,
}

impl JobBoardView {
    pub const ALL: [JobBoardView; 6] = [
        JobBoardView::Home,
        JobBoardView::Jobs,
        JobBoardView::Job,
        JobBoardView::AddJob,
        JobBoardView::EditJob,
        JobBoardView::NotFound,
    ];

    pub fn handle(self) -> ViewHandle {
        Arc::new(self)
    }

    /// Looks a view up by its component name
    pub fn from_component_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.component_name() == name)
    }
}

impl View for JobBoardView {
    fn component_name(&self) -> &str {
        match self {
            JobBoardView::Home => "HomeView",
            JobBoardView::Jobs => "JobsView",
            JobBoardView::Job => "JobView",
            JobBoardView::AddJob => "AddJobView",
            JobBoardView::EditJob => "EditJobView",
            JobBoardView::NotFound => "NotFoundView",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_names_are_unique() {
        for view in JobBoardView::ALL {
            assert_eq!(JobBoardView::from_component_name(view.component_name()), Some(view));
        }
    }

    #[test]
    fn test_unknown_component_name() {
        assert_eq!(JobBoardView::from_component_name("AdminView"), None);
    }
}
