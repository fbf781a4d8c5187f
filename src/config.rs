#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How trailing slashes are treated by registration and matching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TrailingSlash {
    /// Trailing slashes are removed from routes and request paths, so `/foo/`
    /// and `/foo` are the same path.
    ///
    /// A `/` directly before an optional segment is moved into it, so
    /// `/blog/[{id}]` is registered as `/blog[/{id}]` and matches `/blog`.
    /// A parameter that may match the empty string, such as `{all}` in
    /// `/files/{all}`, never sees an empty value: `/files/` is requested as
    /// `/files`, which the route does not match.
    #[default]
    Trim,
    /// Paths are used as-is; `/foo/` and `/foo` are different paths.
    Strict,
}

/// Router configuration.
///
/// ```rust
/// use rerouter::{Config, Router, TrailingSlash};
///
/// let router: Router<()> = Router::with_config(Config {
///     trailing_slash: TrailingSlash::Strict,
///     cache_capacity: 256,
///     ..Config::default()
/// });
///
/// assert_eq!(router.config().cache_capacity, 256);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct Config {
    /// Trailing slash policy for routes and request paths.
    pub trailing_slash: TrailingSlash,

    /// If enabled, request paths are cleaned before matching: repeated
    /// slashes are collapsed and `.` and `..` elements are resolved, so
    /// `/a//b/../c` is matched as `/a/c`.
    pub clean_path: bool,

    /// If enabled, dynamic matches are remembered per method and concrete
    /// path.
    pub cache_enabled: bool,

    /// The maximum number of cached dynamic matches.
    pub cache_capacity: usize,

    /// If enabled, the router checks whether other methods would match a path
    /// that could not be routed, and reports them with
    /// [`MatchResult::NotAllowed`](crate::MatchResult::NotAllowed) instead of
    /// [`MatchResult::NotFound`](crate::MatchResult::NotFound).
    pub handle_method_not_allowed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trailing_slash: TrailingSlash::Trim,
            clean_path: false,
            cache_enabled: true,
            cache_capacity: 1000,
            handle_method_not_allowed: true,
        }
    }
}
