//! Last settled geometry per element key.
//!
//! Entries are overwritten whenever a node is observed outside a transition
//! and are never evicted; a stale entry for a removed key is simply unused.

use std::collections::HashMap;
use std::collections::hash_map;

use super::types::{ElementKey, GeometryRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCache {
    entries: HashMap<ElementKey, GeometryRecord>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&GeometryRecord> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Record `geometry` for `key`, returning the previous entry.
    pub fn insert(&mut self, key: ElementKey, geometry: GeometryRecord) -> Option<GeometryRecord> {
        self.entries.insert(key, geometry)
    }

    /// Copy taken at the start of a pass so deltas within the pass stay
    /// consistent while the live cache keeps being refreshed.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, ElementKey, GeometryRecord> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites() {
        let mut cache = PositionCache::new();
        assert!(cache.is_empty());

        cache.insert("a".into(), GeometryRecord::new(0.0, 0.0, 10.0, 10.0));
        let previous = cache.insert("a".into(), GeometryRecord::new(5.0, 0.0, 10.0, 10.0));

        assert_eq!(previous, Some(GeometryRecord::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(cache.get("a").map(|g| g.left), Some(5.0));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut cache = PositionCache::new();
        cache.insert("a".into(), GeometryRecord::new(0.0, 0.0, 10.0, 10.0));

        let snapshot = cache.snapshot();
        cache.insert("a".into(), GeometryRecord::new(100.0, 0.0, 10.0, 10.0));
        cache.insert("b".into(), GeometryRecord::default());

        assert_eq!(snapshot.get("a").map(|g| g.left), Some(0.0));
        assert!(snapshot.get("b").is_none());
        assert_eq!(cache.iter().count(), 2);
    }
}
