use thiserror::Error;

/// Errors raised while registering a route table or reverse-resolving a route
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route named `{0}`")]
    UnknownRouteName(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingParameter { route: String, param: String },

    #[error("value `{value}` for parameter `{param}` of route `{route}` does not match its pattern")]
    InvalidParameter {
        route: String,
        param: String,
        value: String,
    },

    #[error("route name `{0}` is registered twice")]
    DuplicateRouteName(String),

    #[error("route table has no catch-all route")]
    MissingCatchAll,

    #[error("route table has more than one catch-all route: `{first}` and `{second}`")]
    MultipleCatchAll { first: String, second: String },

    #[error("catch-all route `{0}` must be declared last")]
    CatchAllNotLast(String),

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
