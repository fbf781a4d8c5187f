use crate::params::Params;
use crate::pattern::Pattern;

use http::Method;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A registered route.
///
/// Routes are created by [`Router::add`](crate::Router::add) and never change
/// afterwards.
pub struct Route<H> {
    method: Method,
    path: String,
    pattern: Pattern,
    handlers: Vec<H>,
}

impl<H> Route<H> {
    pub(crate) fn new(method: Method, path: String, pattern: Pattern, handlers: Vec<H>) -> Self {
        Self {
            method,
            path,
            pattern,
            handlers,
        }
    }

    /// The method this route was registered for.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The route pattern, as registered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The handler chain of this route.
    pub fn handlers(&self) -> &[H] {
        &self.handlers
    }

    /// The names of the route parameters, in pattern order.
    pub fn param_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.pattern.params.iter().map(|name| &**name)
    }

    /// The compiled regex, or `None` for static routes.
    pub fn regex(&self) -> Option<&Regex> {
        self.pattern.regex.as_ref()
    }

    /// The literal text preceding the first parameter or optional segment.
    pub fn start(&self) -> &str {
        &self.pattern.start
    }

    /// Returns `true` if the route contains optional segments.
    pub fn is_optional(&self) -> bool {
        self.pattern.optional
    }

    /// Returns `true` if the route has no parameters or optional segments.
    pub fn is_static(&self) -> bool {
        self.pattern.is_static()
    }

    pub(crate) fn first_segment(&self) -> Option<&str> {
        self.pattern.first_segment()
    }

    /// Matches a concrete path against this route, extracting its parameters.
    ///
    /// Static routes are matched by the route table and never reach this.
    pub(crate) fn capture(&self, path: &str) -> Option<Params> {
        let regex = self.pattern.regex.as_ref()?;

        if !path.starts_with(self.pattern.start.as_str()) {
            return None;
        }

        let captures = regex.captures(path)?;
        let mut params = Params::new();

        for (name, &group) in self.pattern.params.iter().zip(&self.pattern.groups) {
            // absent optional segments leave their parameters out
            if let Some(value) = captures.get(group) {
                params.insert(Arc::clone(name), value.as_str().to_owned());
            }
        }

        Some(params)
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("params", &self.pattern.params)
            .field("regex", &self.pattern.regex.as_ref().map(Regex::as_str))
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::Classes;
    use crate::pattern;

    fn route(path: &str) -> Route<()> {
        let pattern = pattern::compile(path, &Classes::new()).unwrap();
        Route::new(Method::GET, path.to_owned(), pattern, vec![()])
    }

    #[test]
    fn capture_params() {
        let route = route(r"/repos/{owner}/{repo}/issues/{number:\d+}");
        let params = route.capture("/repos/rust-lang/rust/issues/42").unwrap();

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("owner"), Some("rust-lang"));
        assert_eq!(params.get("repo"), Some("rust"));
        assert_eq!(params.get("number"), Some("42"));

        assert!(route.capture("/repos/rust-lang/rust/issues/x").is_none());
    }

    #[test]
    fn start_rejects_early() {
        let route = route("/users/{id}");
        assert_eq!(route.start(), "/users/");
        assert!(route.capture("/user/1").is_none());
    }

    #[test]
    fn absent_optional_param() {
        let route = route("/blog[/{id}]");

        let params = route.capture("/blog").unwrap();
        assert!(!params.contains_key("id"));

        let params = route.capture("/blog/42").unwrap();
        assert_eq!(params.get("id"), Some("42"));
    }

    #[test]
    fn accessors() {
        let archive = route(r"/archive/{year:\d{4}}[/{month}]");
        assert_eq!(archive.param_names().collect::<Vec<_>>(), ["year", "month"]);
        assert_eq!(archive.param_names().len(), 2);
        assert!(archive.is_optional());
        assert!(!archive.is_static());
        assert_eq!(archive.start(), "/archive/");
        assert_eq!(
            archive.regex().map(Regex::as_str),
            Some(r"^/archive/(?P<__p0>\d{4})(?:/(?P<__p1>[^/]+))?$")
        );

        let about = route("/about");
        assert_eq!(about.param_names().len(), 0);
        assert!(!about.is_optional());
        assert!(about.regex().is_none());
    }

    #[test]
    fn static_routes_do_not_capture() {
        let route = route("/about");
        assert!(route.is_static());
        assert!(route.capture("/about").is_none());
    }
}
