use std::collections::HashMap;

/// The character class used by a bare `{name}` parameter that does not name a
/// registered class: one or more characters up to the next `/`.
pub const DEFAULT_CLASS: &str = "[^/]+";

/// A registry of named parameter classes.
///
/// A bare `{name}` parameter whose name is registered here matches the
/// registered regex instead of [`DEFAULT_CLASS`]. Every router owns its own
/// registry, seeded with:
///
/// | name  | regex          |
/// |-------|----------------|
/// | `all` | `.*`           |
/// | `any` | `[^/]+`        |
/// | `num` | `[1-9][0-9]*`  |
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = rerouter::Router::new();
/// router.classes_mut().insert("slug", "[a-z0-9-]+");
/// router.get("/posts/{slug}", "post")?;
///
/// assert!(router.at("GET", "/posts/hello-world").is_found());
/// assert!(!router.at("GET", "/posts/Hello").is_found());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classes {
    classes: HashMap<String, String>,
}

impl Classes {
    /// Creates a registry holding the default classes.
    pub fn new() -> Self {
        let mut classes = Self::empty();
        classes.insert("all", ".*");
        classes.insert("any", "[^/]+");
        classes.insert("num", "[1-9][0-9]*");
        classes
    }

    /// Creates a registry without any classes.
    pub fn empty() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Registers a class, returning the regex it replaced, if any.
    ///
    /// Only routes registered afterwards are affected.
    pub fn insert(&mut self, name: impl Into<String>, regex: impl Into<String>) -> Option<String> {
        self.classes.insert(name.into(), regex.into())
    }

    /// Removes a class.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.classes.remove(name)
    }

    /// Returns the regex registered under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.classes.get(name).map(String::as_str)
    }

    /// Returns the regex a bare `{name}` parameter compiles to.
    pub(crate) fn resolve(&self, name: &str) -> &str {
        self.get(name).unwrap_or(DEFAULT_CLASS)
    }
}

impl Default for Classes {
    fn default() -> Self {
        Self::new()
    }
}
