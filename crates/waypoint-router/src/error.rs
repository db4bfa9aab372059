use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A hook ran against a context with no live router store.
    #[error("no router store in this context; mount a Router first")]
    NoRouterStore,
    /// A path param was changed while nothing matched the current pathname.
    #[error("no route matches `{pathname}`; path params cannot be set")]
    NoActiveRoute { pathname: String },
    #[error("route `{pattern}` needs path param `{param}`")]
    MissingPathParam { pattern: String, param: String },
    /// An empty value would collapse the segment and stop the route matching.
    #[error("path param `{param}` of route `{pattern}` cannot be empty")]
    InvalidPathParam { pattern: String, param: String },
    #[error("no route named `{0}`")]
    UnknownRoute(String),
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RouterError>;
