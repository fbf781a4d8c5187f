//! A bounded least-recently-used cache.
//!
//! Entries live in a slab and are threaded through a doubly linked list by
//! index, most recently used at the head. A hash index maps keys to slots.
//! The cache itself is not synchronized; the router keeps it behind a mutex.

use std::collections::HashMap;

const NIL: usize = usize::MAX;

struct Entry<V> {
    key: String,
    value: V,
    prev: usize,
    next: usize,
}

/// A bounded LRU map from composite keys to values.
pub struct RouteCache<V> {
    index: HashMap<String, usize>,
    entries: Vec<Entry<V>>,
    head: usize,
    tail: usize,
    capacity: usize,
}

impl<V> RouteCache<V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// A cache with a capacity of zero never stores anything.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
            head: NIL,
            tail: NIL,
            capacity,
        }
    }

    /// The maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` is cached, without touching its recency.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value cached under `key`, marking it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        Some(&self.entries[slot].value)
    }

    /// Returns the value cached under `key` without touching its recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&slot| &self.entries[slot].value)
    }

    /// Caches a value, marking it most recently used.
    ///
    /// Returns the key and value of the entry evicted to make room, or the
    /// previous value if `key` was already cached.
    pub fn insert(&mut self, key: String, value: V) -> Option<(String, V)> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(&slot) = self.index.get(&key) {
            self.promote(slot);
            let old = std::mem::replace(&mut self.entries[slot].value, value);
            return Some((key, old));
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let slot = self.entries.len();
        self.entries.push(Entry {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        });
        self.index.insert(key, slot);
        self.push_front(slot);

        evicted
    }

    /// Removes the entry cached under `key`.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.index.remove(key)?;
        Some(self.take(slot).1)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Iterates over the cached keys, from most to least recently used.
    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            cache: self,
            cursor: self.head,
        }
    }

    fn pop_lru(&mut self) -> Option<(String, V)> {
        if self.tail == NIL {
            return None;
        }

        let slot = self.tail;
        self.index.remove(&self.entries[slot].key);
        Some(self.take(slot))
    }

    // Unlinks the entry at `slot` and removes it from the slab. The last
    // entry is moved into the freed slot to keep the slab dense.
    fn take(&mut self, slot: usize) -> (String, V) {
        self.unlink(slot);

        let last = self.entries.len() - 1;
        if slot != last {
            self.relocate(last, slot);
        }

        let entry = self.entries.swap_remove(slot);
        (entry.key, entry.value)
    }

    // Points everything that refers to `from` at `to`, ahead of a
    // `swap_remove(to)` that moves the entry.
    fn relocate(&mut self, from: usize, to: usize) {
        let (prev, next) = (self.entries[from].prev, self.entries[from].next);

        if prev == NIL {
            self.head = to;
        } else {
            self.entries[prev].next = to;
        }

        if next == NIL {
            self.tail = to;
        } else {
            self.entries[next].prev = to;
        }

        if let Some(slot) = self.index.get_mut(&self.entries[from].key) {
            *slot = to;
        }
    }

    fn promote(&mut self, slot: usize) {
        if self.head != slot {
            self.unlink(slot);
            self.push_front(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.entries[slot].prev, self.entries[slot].next);

        if prev == NIL {
            self.head = next;
        } else {
            self.entries[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.entries[next].prev = prev;
        }

        self.entries[slot].prev = NIL;
        self.entries[slot].next = NIL;
    }

    fn push_front(&mut self, slot: usize) {
        self.entries[slot].prev = NIL;
        self.entries[slot].next = self.head;

        if self.head != NIL {
            self.entries[self.head].prev = slot;
        }

        self.head = slot;

        if self.tail == NIL {
            self.tail = slot;
        }
    }
}

/// An iterator over the keys of a [`RouteCache`], most recently used first.
pub struct Keys<'a, V> {
    cache: &'a RouteCache<V>,
    cursor: usize,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }

        let entry = &self.cache.entries[self.cursor];
        self.cursor = entry.next;
        Some(&entry.key)
    }
}
