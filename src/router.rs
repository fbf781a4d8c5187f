use crate::cache::RouteCache;
use crate::classes::Classes;
use crate::config::{Config, TrailingSlash};
use crate::error::InsertError;
use crate::method::{self, METHODS};
use crate::params::Params;
use crate::path::clean_path;
use crate::pattern;
use crate::route::Route;
use crate::table::{self, RouteTable};

use http::Method;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A route matcher.
///
/// Routes are registered with [`Router::add`] or one of the method shortcuts
/// and matched with [`Router::at`]. The router never calls handlers itself:
/// a successful match hands back the route's handler chain and the parameters
/// extracted from the path.
///
/// Registration requires `&mut self`, matching only `&self`, so a router can be
/// built once and then shared between threads (for example in an `Arc`).
///
/// ```rust
/// use rerouter::{MatchResult, Router};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = Router::new();
/// router.get("/home", "Welcome!")?;
/// router.get(r"/users/{id:\d+}", "A User")?;
///
/// let found = router.at("GET", "/users/978");
/// assert_eq!(found.handlers(), Some(&["A User"][..]));
/// assert_eq!(found.params().unwrap().get("id"), Some("978"));
///
/// assert!(matches!(router.at("GET", "/users/abc"), MatchResult::NotFound));
/// # Ok(())
/// # }
/// ```
pub struct Router<H> {
    table: RouteTable<H>,
    cache: Mutex<RouteCache<Match<H>>>,
    classes: Classes,
    config: Config,
}

impl<H> Router<H> {
    /// Creates a router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a router with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            table: RouteTable::new(),
            cache: Mutex::new(RouteCache::new(config.cache_capacity)),
            classes: Classes::new(),
            config,
        }
    }

    /// The configuration of this router.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The named parameter classes used by this router.
    pub fn classes(&self) -> &Classes {
        &self.classes
    }

    /// A mutable reference to the named parameter classes, to register
    /// classes before adding the routes that use them.
    pub fn classes_mut(&mut self) -> &mut Classes {
        &mut self.classes
    }

    /// Registers a route.
    ///
    /// The method is case-insensitive and must be one of
    /// [`METHODS`](crate::METHODS). Registering a static route twice for the
    /// same method replaces the first registration. Dynamic routes are never
    /// replaced: when several of them match a path, the one registered first
    /// wins.
    ///
    /// ```rust
    /// # use rerouter::{InsertError, Router};
    /// let mut router = Router::new();
    /// assert!(router.add("get", "/home", ["auth", "home"]).is_ok());
    /// assert!(router.add("GET", "/blog[/{id}]", ["blog"]).is_ok());
    ///
    /// assert!(matches!(
    ///     router.add("GET", "/a[/b]/c", ["x"]),
    ///     Err(InsertError::InvalidOptional { .. })
    /// ));
    /// assert!(matches!(
    ///     router.add("GET", "/empty", []),
    ///     Err(InsertError::EmptyHandlers)
    /// ));
    /// ```
    pub fn add<I>(
        &mut self,
        method: &str,
        path: &str,
        handlers: I,
    ) -> Result<Arc<Route<H>>, InsertError>
    where
        I: IntoIterator<Item = H>,
    {
        let handlers: Vec<H> = handlers.into_iter().collect();
        if handlers.is_empty() {
            return Err(InsertError::EmptyHandlers);
        }

        let method = method::parse(method).ok_or_else(|| InsertError::UnsupportedMethod {
            method: method.to_owned(),
        })?;

        if !path.starts_with('/') {
            return Err(InsertError::MissingLeadingSlash {
                route: path.to_owned(),
            });
        }

        let path = match self.config.trailing_slash {
            TrailingSlash::Trim => {
                pattern::fold_optional_slashes(TrailingSlash::Trim.apply(path))
            }
            TrailingSlash::Strict => Cow::Borrowed(path),
        };
        let pattern = pattern::compile(&path, &self.classes)?;
        let route = Arc::new(Route::new(method, path.into_owned(), pattern, handlers));

        let (tier, replaced) = self.table.insert(Arc::clone(&route));
        if replaced.is_some() {
            debug!(method = %route.method(), path = route.path(), "replaced static route");
        }
        debug!(method = %route.method(), path = route.path(), ?tier, "registered route");

        // cached matches may no longer be the first match
        self.cache.get_mut().clear();

        Ok(route)
    }

    /// Registers a `GET` route.
    pub fn get(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("GET", path, [handler])
    }

    /// Registers a `POST` route.
    pub fn post(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("POST", path, [handler])
    }

    /// Registers a `PUT` route.
    pub fn put(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("PUT", path, [handler])
    }

    /// Registers a `PATCH` route.
    pub fn patch(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("PATCH", path, [handler])
    }

    /// Registers a `DELETE` route.
    pub fn delete(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("DELETE", path, [handler])
    }

    /// Registers a `HEAD` route.
    pub fn head(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("HEAD", path, [handler])
    }

    /// Registers an `OPTIONS` route.
    pub fn options(&mut self, path: &str, handler: H) -> Result<Arc<Route<H>>, InsertError> {
        self.add("OPTIONS", path, [handler])
    }

    /// Matches a request method and path.
    ///
    /// Lookup proceeds in a fixed order and stops at the first hit:
    ///
    /// 1. static routes, by exact string equality;
    /// 2. previously matched dynamic paths, from the cache;
    /// 3. dynamic routes whose literal first segment equals the path's first
    ///    segment, in registration order;
    /// 4. dynamic routes without a literal first segment, in registration
    ///    order.
    ///
    /// An exact static match always takes precedence over any pattern, and
    /// between overlapping patterns the one registered first wins; no attempt
    /// is made to pick the most specific pattern.
    ///
    /// An unmatched `HEAD` request is retried as `GET`. If the path still
    /// cannot be routed and
    /// [`handle_method_not_allowed`](Config::handle_method_not_allowed) is
    /// enabled, the methods that would have matched are reported with
    /// [`MatchResult::NotAllowed`].
    pub fn at(&self, method: &str, path: &str) -> MatchResult<H> {
        let path = if self.config.clean_path {
            clean_path(path)
        } else {
            Cow::Borrowed(path)
        };
        let path = self.config.trailing_slash.apply(&path);
        let method = method::parse(method);

        if let Some(method) = &method {
            if let Some(found) = self.find(method, path) {
                return MatchResult::Found(found);
            }

            if *method == Method::HEAD {
                if let Some(found) = self.find(&Method::GET, path) {
                    return MatchResult::Found(found);
                }
            }
        }

        if self.config.handle_method_not_allowed {
            let allowed: Vec<Method> = METHODS
                .iter()
                .filter(|&m| method.as_ref() != Some(m))
                .filter(|&m| self.table.matches(m, path))
                .cloned()
                .collect();

            if !allowed.is_empty() {
                return MatchResult::NotAllowed(allowed);
            }
        }

        MatchResult::NotFound
    }

    /// Returns the methods with a route matching `path`.
    ///
    /// ```rust
    /// use http::Method;
    /// # use rerouter::Router;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut router = Router::new();
    /// router.get("/products", "all products")?;
    /// router.post("/products", "product created")?;
    ///
    /// assert_eq!(router.allowed("/products"), [Method::GET, Method::POST]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let path = if self.config.clean_path {
            clean_path(path)
        } else {
            Cow::Borrowed(path)
        };
        let path = self.config.trailing_slash.apply(&path);

        METHODS
            .iter()
            .filter(|m| self.table.matches(m, path))
            .cloned()
            .collect()
    }

    /// Iterates over the registered routes.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.table.iter().map(|route| &**route)
    }

    /// The number of registered routes.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of dynamic matches currently cached.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops all cached matches.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn find(&self, method: &Method, path: &str) -> Option<Match<H>> {
        let key = table::key(method, path);

        if let Some(route) = self.table.stable(&key) {
            return Some(Match {
                route: Arc::clone(route),
                params: Params::new(),
            });
        }

        let caching = self.config.cache_enabled && self.config.cache_capacity > 0;

        if caching {
            if let Some(hit) = self.cache.lock().get(&key) {
                trace!(key = %key, "route cache hit");
                return Some(hit.clone());
            }
        }

        let (route, params) = self.table.dynamic(method, path)?;
        let found = Match {
            route: Arc::clone(route),
            params,
        };

        if caching {
            trace!(key = %key, route = route.path(), "caching route match");
            if let Some((displaced, _)) = self.cache.lock().insert(key, found.clone()) {
                trace!(key = %displaced, "displaced cached route match");
            }
        }

        Some(found)
    }
}

impl<H: Clone> Router<H> {
    /// Registers a route for every supported method.
    pub fn any<I>(&mut self, path: &str, handlers: I) -> Result<Vec<Arc<Route<H>>>, InsertError>
    where
        I: IntoIterator<Item = H>,
    {
        let handlers: Vec<H> = handlers.into_iter().collect();
        if handlers.is_empty() {
            return Err(InsertError::EmptyHandlers);
        }

        METHODS
            .iter()
            .map(|method| self.add(method.as_str(), path, handlers.iter().cloned()))
            .collect()
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("cached", &self.cached())
            .field("config", &self.config)
            .finish()
    }
}

/// A successful match: the route and the parameters extracted from the path.
pub struct Match<H> {
    route: Arc<Route<H>>,
    params: Params,
}

impl<H> Match<H> {
    /// The matched route.
    pub fn route(&self) -> &Arc<Route<H>> {
        &self.route
    }

    /// The handler chain of the matched route.
    pub fn handlers(&self) -> &[H] {
        self.route.handlers()
    }

    /// The parameters extracted from the path.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Consumes the match, returning its parameters.
    pub fn into_params(self) -> Params {
        self.params
    }
}

impl<H> Clone for Match<H> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            params: self.params.clone(),
        }
    }
}

impl<H> fmt::Debug for Match<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("route", &self.route)
            .field("params", &self.params)
            .finish()
    }
}

/// The outcome of [`Router::at`].
pub enum MatchResult<H> {
    /// A route matched.
    Found(Match<H>),
    /// No route matched the path for any method.
    NotFound,
    /// No route matched for the requested method, but routes for the listed
    /// methods match the path.
    NotAllowed(Vec<Method>),
}

/// The kind of a [`MatchResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// A route matched.
    Found,
    /// No route matched the path.
    NotFound,
    /// Only routes for other methods matched the path.
    NotAllowed,
}

impl<H> MatchResult<H> {
    /// The kind of this result.
    pub fn status(&self) -> Status {
        match self {
            MatchResult::Found(_) => Status::Found,
            MatchResult::NotFound => Status::NotFound,
            MatchResult::NotAllowed(_) => Status::NotAllowed,
        }
    }

    /// Returns `true` if a route was found.
    pub fn is_found(&self) -> bool {
        matches!(self, MatchResult::Found(_))
    }

    /// The match, if a route was found.
    pub fn found(&self) -> Option<&Match<H>> {
        match self {
            MatchResult::Found(found) => Some(found),
            _ => None,
        }
    }

    /// The extracted parameters, if a route was found.
    pub fn params(&self) -> Option<&Params> {
        self.found().map(Match::params)
    }

    /// The handler chain, if a route was found.
    pub fn handlers(&self) -> Option<&[H]> {
        self.found().map(Match::handlers)
    }

    /// The methods that would have matched. Empty unless the result is
    /// [`MatchResult::NotAllowed`].
    pub fn allowed_methods(&self) -> &[Method] {
        match self {
            MatchResult::NotAllowed(methods) => methods,
            _ => &[],
        }
    }

    /// Converts the result into the match, if a route was found.
    pub fn into_found(self) -> Option<Match<H>> {
        match self {
            MatchResult::Found(found) => Some(found),
            _ => None,
        }
    }
}

impl<H> fmt::Debug for MatchResult<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Found(found) => f.debug_tuple("Found").field(found).finish(),
            MatchResult::NotFound => f.write_str("NotFound"),
            MatchResult::NotAllowed(methods) => f.debug_tuple("NotAllowed").field(methods).finish(),
        }
    }
}
