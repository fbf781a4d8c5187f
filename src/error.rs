use thiserror::Error;

/// Represents errors that can occur when registering a new route.
///
/// Registration errors are fatal by nature: a router that rejected a route
/// should not be used to serve traffic.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InsertError {
    /// A route must carry at least one handler.
    #[error("a route must have at least one handler")]
    EmptyHandlers,
    /// The method is not one of the supported HTTP methods.
    #[error("unsupported request method: {method}")]
    UnsupportedMethod {
        /// The method as it was passed in.
        method: String,
    },
    /// Routes must begin with a `/`.
    #[error("route must begin with '/': {route}")]
    MissingLeadingSlash {
        /// The offending route.
        route: String,
    },
    /// A `{` was never closed by a matching `}`.
    #[error("unclosed parameter in route: {route}")]
    UnclosedParam {
        /// The offending route.
        route: String,
    },
    /// Parameters must be registered with a name.
    #[error("parameters must be registered with a name: {route}")]
    UnnamedParam {
        /// The offending route.
        route: String,
    },
    /// Optional `[...]` segments are only allowed at the end of a route.
    #[error("optional segments must be a trailing suffix: {route}")]
    InvalidOptional {
        /// The offending route.
        route: String,
    },
    /// An inline parameter regex failed to compile.
    #[error("invalid regex in route {route}: {source}")]
    InvalidRegex {
        /// The offending route.
        route: String,
        /// The error reported by the regex compiler.
        #[source]
        source: regex::Error,
    },
}
