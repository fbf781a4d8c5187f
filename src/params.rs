use std::sync::Arc;
use std::{fmt, mem, slice};

/// A single URL parameter, consisting of a key and a value.
#[derive(PartialEq, Eq, Default, Clone)]
struct Param {
    // Keys are shared with the route that declared them.
    key: Option<Arc<str>>,
    value: String,
}

impl Param {
    fn key_str(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }
}

/// The parameters extracted from a concrete path by a route match.
///
/// Keys are unique: inserting a key that is already present replaces its
/// value.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut router = rerouter::Router::new();
/// router.get("/users/{id}", "user")?;
///
/// let result = router.at("GET", "/users/1");
/// let params = result.params().unwrap();
///
/// // Iterate through the keys and values.
/// for (key, value) in params.iter() {
///     println!("key: {}, value: {}", key, value);
/// }
///
/// // Get a specific value by name.
/// assert_eq!(params.get("id"), Some("1"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Params {
    kind: ParamsKind,
}

// Most routes have a small number of dynamic parameters, so we can avoid
// heap allocations for the list itself in the common case.
const SMALL: usize = 3;

#[derive(Clone)]
enum ParamsKind {
    Small([Param; SMALL], usize),
    Large(Vec<Param>),
}

impl Params {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self {
            kind: ParamsKind::Small(Default::default(), 0),
        }
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        match self.kind {
            ParamsKind::Small(_, len) => len,
            ParamsKind::Large(ref vec) => vec.len(),
        }
    }

    /// Returns `true` if there are no parameters in the list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value registered under the given key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&str> {
        let key = key.as_ref();
        self.as_slice()
            .iter()
            .find(|param| param.key_str() == key)
            .map(|param| param.value.as_str())
    }

    /// Returns `true` if a value is registered under the given key.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over the parameters in the list.
    pub fn iter(&self) -> ParamsIter<'_> {
        ParamsIter::new(self)
    }

    /// Inserts a key value pair, replacing the value of an existing key.
    pub(crate) fn insert(&mut self, key: Arc<str>, value: String) {
        #[cold]
        fn drain_to_vec(elem: Param, arr: &mut [Param; SMALL]) -> Vec<Param> {
            let mut vec = Vec::with_capacity(SMALL + 1);
            vec.extend(arr.iter_mut().map(mem::take));
            vec.push(elem);
            vec
        }

        if let Some(existing) = self
            .as_mut_slice()
            .iter_mut()
            .find(|param| param.key_str() == &*key)
        {
            existing.value = value;
            return;
        }

        let param = Param {
            key: Some(key),
            value,
        };

        match &mut self.kind {
            ParamsKind::Small(arr, len) => {
                if *len == SMALL {
                    self.kind = ParamsKind::Large(drain_to_vec(param, arr));
                    return;
                }

                arr[*len] = param;
                *len += 1;
            }
            ParamsKind::Large(vec) => vec.push(param),
        }
    }

    fn as_slice(&self) -> &[Param] {
        match &self.kind {
            ParamsKind::Small(arr, len) => &arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }

    fn as_mut_slice(&mut self) -> &mut [Param] {
        match &mut self.kind {
            ParamsKind::Small(arr, len) => &mut arr[..*len],
            ParamsKind::Large(vec) => vec,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

// Two parameter lists are equal if they hold the same pairs, in any order.
impl PartialEq for Params {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Params {}

impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'p> IntoIterator for &'p Params {
    type Item = (&'p str, &'p str);
    type IntoIter = ParamsIter<'p>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the keys and values of a match's [parameters](crate::Params).
pub struct ParamsIter<'p> {
    inner: slice::Iter<'p, Param>,
}

impl<'p> ParamsIter<'p> {
    fn new(params: &'p Params) -> Self {
        Self {
            inner: params.as_slice().iter(),
        }
    }
}

impl<'p> Iterator for ParamsIter<'p> {
    type Item = (&'p str, &'p str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|param| (param.key_str(), param.value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        let mut params = Params::new();
        for (key, value) in pairs {
            params.insert(Arc::from(*key), value.to_string());
        }
        params
    }

    #[test]
    fn heap_alloc() {
        let vec = vec![
            ("hello", "hello"),
            ("world", "world"),
            ("foo", "foo"),
            ("bar", "bar"),
            ("baz", "baz"),
        ];

        let params = params(&vec);
        for (key, value) in &vec {
            assert_eq!(params.get(key), Some(*value));
        }

        match params.kind {
            ParamsKind::Large(..) => {}
            _ => panic!(),
        }

        assert!(params.iter().eq(vec.clone()));
    }

    #[test]
    fn stack_alloc() {
        let vec = vec![("hello", "hello"), ("world", "world"), ("baz", "baz")];

        let params = params(&vec);
        match params.kind {
            ParamsKind::Small(..) => {}
            _ => panic!(),
        }

        assert!(params.iter().eq(vec.clone()));
    }

    #[test]
    fn ignore_array_default() {
        let params = Params::new();
        assert!(params.get("").is_none());
        assert!(params.is_empty());
    }

    #[test]
    fn keys_are_unique() {
        let params = params(&[("id", "1"), ("name", "x"), ("id", "2")]);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("2"));
    }

    #[test]
    fn order_insensitive_eq() {
        let a = params(&[("a", "1"), ("b", "2")]);
        let b = params(&[("b", "2"), ("a", "1")]);
        assert_eq!(a, b);
        assert_ne!(a, params(&[("a", "1")]));
        assert_ne!(a, params(&[("a", "1"), ("b", "3")]));
    }
}
