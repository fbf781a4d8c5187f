use crate::params::Params;
use crate::route::Route;

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

/// The tier a route is stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tier {
    /// Static routes, matched by string equality.
    Stable,
    /// Dynamic routes bucketed by their literal first path segment.
    Regular,
    /// Dynamic routes without a literal first segment, scanned per method.
    Irregular,
}

/// The registered routes, split into three disjoint collections.
///
/// Dynamic routes are kept in registration order within their bucket, and the
/// first route that matches a path wins.
pub(crate) struct RouteTable<H> {
    stable: HashMap<String, Arc<Route<H>>>,
    regular: HashMap<String, Vec<Arc<Route<H>>>>,
    irregular: HashMap<Method, Vec<Arc<Route<H>>>>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self {
            stable: HashMap::new(),
            regular: HashMap::new(),
            irregular: HashMap::new(),
        }
    }

    /// Stores a route, returning the tier it was placed in and the static
    /// route it replaced, if any.
    pub fn insert(&mut self, route: Arc<Route<H>>) -> (Tier, Option<Arc<Route<H>>>) {
        if route.is_static() {
            let replaced = self
                .stable
                .insert(key(route.method(), route.path()), route);
            return (Tier::Stable, replaced);
        }

        match route.first_segment() {
            Some(segment) => {
                let bucket = key(route.method(), segment);
                self.regular.entry(bucket).or_default().push(route);
                (Tier::Regular, None)
            }
            None => {
                self.irregular
                    .entry(route.method().clone())
                    .or_default()
                    .push(route);
                (Tier::Irregular, None)
            }
        }
    }

    /// Looks up a static route by its composite key.
    pub fn stable(&self, key: &str) -> Option<&Arc<Route<H>>> {
        self.stable.get(key)
    }

    /// Finds the first dynamic route matching `path`, searching the bucket of
    /// its first segment before the irregular routes.
    pub fn dynamic(&self, method: &Method, path: &str) -> Option<(&Arc<Route<H>>, Params)> {
        let regular = self.regular.get(&key(method, first_segment(path)));
        let irregular = self.irregular.get(method);

        regular
            .into_iter()
            .chain(irregular)
            .flatten()
            .find_map(|route| route.capture(path).map(|params| (route, params)))
    }

    /// Returns `true` if any route of `method` matches `path`.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.stable(&key(method, path)).is_some() || self.dynamic(method, path).is_some()
    }

    /// Iterates over all routes: static routes first, then regular and
    /// irregular routes in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route<H>>> {
        self.stable
            .values()
            .chain(self.regular.values().flatten())
            .chain(self.irregular.values().flatten())
    }

    pub fn len(&self) -> usize {
        self.stable.len()
            + self.regular.values().map(Vec::len).sum::<usize>()
            + self.irregular.values().map(Vec::len).sum::<usize>()
    }
}

/// Builds the composite `METHOD path` key used for static routes, buckets
/// and the match cache.
pub(crate) fn key(method: &Method, path: &str) -> String {
    let mut key = String::with_capacity(method.as_str().len() + 1 + path.len());
    key.push_str(method.as_str());
    key.push(' ');
    key.push_str(path);
    key
}

/// The text between the first and second `/` of a request path.
pub(crate) fn first_segment(path: &str) -> &str {
    let rest = path.strip_prefix('/').unwrap_or(path);
    match rest.find('/') {
        Some(end) => &rest[..end],
        None => rest,
    }
}
