//! A regex-backed HTTP route matcher.
//!
//! ```rust
//! use rerouter::{MatchResult, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/home", "Welcome!")?;
//! router.get("/users/{id}", "A User")?;
//!
//! let matched = router.at("GET", "/users/978");
//! assert_eq!(matched.params().unwrap().get("id"), Some("978"));
//! assert_eq!(matched.handlers(), Some(&["A User"][..]));
//!
//! assert!(matches!(router.at("POST", "/home"), MatchResult::NotAllowed(_)));
//! # Ok(())
//! # }
//! ```
//!
//! # Parameters
//!
//! A route can contain parameters, written as `{name}`. By default a parameter
//! matches one or more characters up to the next `/`:
//!
//! ```rust
//! # use rerouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/users/{id}", true)?;
//!
//! assert_eq!(router.at("GET", "/users/1").params().unwrap().get("id"), Some("1"));
//! assert_eq!(router.at("GET", "/users/23").params().unwrap().get("id"), Some("23"));
//! assert!(!router.at("GET", "/users").is_found());
//! assert!(!router.at("GET", "/users/1/edit").is_found());
//! # Ok(())
//! # }
//! ```
//!
//! A parameter can carry its own regex after a `:`. The regex may use `{m,n}`
//! quantifiers:
//!
//! ```rust
//! # use rerouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get(r"/users/{id:\d{1,4}}", true)?;
//!
//! assert!(router.at("GET", "/users/42").is_found());
//! assert!(!router.at("GET", "/users/abc").is_found());
//! assert!(!router.at("GET", "/users/12345").is_found());
//! # Ok(())
//! # }
//! ```
//!
//! A bare parameter named after a registered [class](Classes) uses the class
//! regex. The classes `all` (`.*`), `any` (`[^/]+`) and `num` (`[1-9][0-9]*`)
//! are always available:
//!
//! ```rust
//! # use rerouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/static/{all}", true)?;
//!
//! let matched = router.at("GET", "/static/css/site.css");
//! assert_eq!(matched.params().unwrap().get("all"), Some("css/site.css"));
//! # Ok(())
//! # }
//! ```
//!
//! # Optional Segments
//!
//! The end of a route can be made optional with brackets. Optional segments may
//! nest, but must close at the very end of the route:
//!
//! ```rust
//! # use rerouter::{InsertError, Router};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/blog[/{id}]", true)?;
//!
//! assert!(router.at("GET", "/blog").params().unwrap().is_empty());
//! assert_eq!(router.at("GET", "/blog/42").params().unwrap().get("id"), Some("42"));
//!
//! assert!(matches!(
//!     router.get("/a[/b]/c", true),
//!     Err(InsertError::InvalidOptional { .. })
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! # Routing Priority
//!
//! Static routes take precedence over any pattern. Between patterns, the one
//! registered first wins, so more specific patterns should be registered
//! before more general ones:
//!
//! ```rust
//! # use rerouter::Router;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut router = Router::new();
//! router.get("/users/{name}", "by name")?;
//! router.get(r"/users/{id:\d+}", "by id")?;
//! router.get("/users/me", "me")?;
//!
//! assert_eq!(router.at("GET", "/users/me").handlers(), Some(&["me"][..]));
//! assert_eq!(router.at("GET", "/users/42").handlers(), Some(&["by name"][..]));
//! # Ok(())
//! # }
//! ```
//!
//! # Caching
//!
//! Dynamic matches are cached per method and concrete path in a bounded LRU
//! cache shared by all callers of [`Router::at`]; see [`Config`].

#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod cache;
mod classes;
mod config;
mod error;
mod method;
mod params;
mod path;
mod pattern;
mod route;
mod router;
mod table;

pub use cache::{Keys, RouteCache};
pub use classes::{Classes, DEFAULT_CLASS};
pub use config::{Config, TrailingSlash};
pub use error::InsertError;
pub use http::Method;
pub use method::METHODS;
pub use params::{Params, ParamsIter};
pub use path::clean_path;
pub use route::Route;
pub use router::{Match, MatchResult, Router, Status};
