use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;

use crate::error::{CacheError, CacheErrorKind};
use crate::list::{Iter, RecencyList};

/// Fixed-capacity map that evicts its least recently used entry.
///
/// `insert`, `get` and `get_mut` count as a use and move the entry to the
/// most recently used position. The `peek*` methods, `contains_key` and the
/// iterators leave the order alone.
pub struct LruCache<K, V> {
    map: HashMap<K, usize>,
    order: RecencyList<K, V>,
    capacity: NonZeroUsize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash,
{
    /// Fails with [`CacheErrorKind::ZeroCapacity`] when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            CacheError::new(CacheErrorKind::ZeroCapacity, "capacity must be at least 1")
        })?;
        Ok(Self::from_capacity(capacity))
    }

    pub fn from_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            map: HashMap::new(),
            order: RecencyList::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.order.promote_to_head(idx);
        self.order.node(idx).map(|node| &node.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.order.promote_to_head(idx);
        self.order.node_mut(idx).map(|node| &mut node.value)
    }

    pub fn get_cloned<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.get(key).cloned()
    }

    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = *self.map.get(key)?;
        self.order.node(idx).map(|node| &node.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn peek_most_recent(&self) -> Option<&K> {
        self.order.front().map(|node| &node.key)
    }

    /// The key the next insert of a new key would evict once the cache is full.
    pub fn peek_least_recent(&self) -> Option<&K> {
        self.order.back().map(|node| &node.key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = self.map.remove(key)?;
        self.order.remove(idx).map(|(_, value)| value)
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.order.iter()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> {
        self.order.iter().map(|(key, _)| key)
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Stores `value` under `key` and marks it most recently used. A new key
    /// arriving while the cache is full evicts the least recently used entry
    /// first; replacing an existing key never evicts.
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            if let Some(node) = self.order.node_mut(idx) {
                node.value = value;
            }
            self.order.promote_to_head(idx);
            return;
        }

        if self.map.len() >= self.capacity.get() {
            if let Some((evicted, _)) = self.order.evict_tail() {
                self.map.remove(&evicted);
            }
        }

        let idx = self.order.push_front(key.clone(), value);
        self.map.insert(key, idx);
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> std::fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + std::fmt::Debug,
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
