use http::Method;

/// The request methods a route can be registered for, in the order they are
/// reported by [`MatchResult::allowed_methods`](crate::MatchResult::allowed_methods).
pub const METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
    Method::CONNECT,
    Method::TRACE,
];

/// Parses a request method case-insensitively, returning `None` if it is not
/// one of [`METHODS`].
pub fn parse(method: &str) -> Option<Method> {
    let upper = method.trim().to_ascii_uppercase();
    METHODS.iter().find(|m| m.as_str() == upper).cloned()
}
