// ── Ordered item collection ──
//
// Insertion-ordered storage with O(1) lookup by `ItemId`. Server order is
// preserved across full replaces and single-item removals. Every mutation
// bumps a version counter so renderers can skip unchanged frames.

use indexmap::IndexMap;

use crate::model::{CollectionItem, ItemId};

/// The full, unfiltered collection held by a list view.
#[derive(Debug, Clone)]
pub struct ItemCollection<T> {
    items: IndexMap<ItemId, T>,
    version: u64,
}

impl<T> Default for ItemCollection<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
            version: 0,
        }
    }
}

impl<T: CollectionItem> ItemCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly fetched batch. A later duplicate
    /// id overwrites the earlier entry in place.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items.clear();
        for item in items {
            self.items.insert(item.id().clone(), item);
        }
        self.bump_version();
    }

    /// Remove by id, keeping the relative order of the rest.
    pub fn remove(&mut self, id: &ItemId) -> Option<T> {
        let removed = self.items.shift_remove(id);
        if removed.is_some() {
            self.bump_version();
        }
        removed
    }

    /// Mutate one item in place. Returns `false` if the id is unknown.
    pub fn update(&mut self, id: &ItemId, f: impl FnOnce(&mut T)) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                f(item);
                self.bump_version();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&T> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::post;

    fn ids(col: &ItemCollection<crate::model::BlogPost>) -> Vec<&str> {
        col.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn replace_all_keeps_server_order() {
        let mut col = ItemCollection::new();
        col.replace_all(vec![post("c", "x"), post("a", "x"), post("b", "x")]);
        assert_eq!(ids(&col), vec!["c", "a", "b"]);
        assert_eq!(col.len(), 3);
        assert_eq!(col.version(), 1);
    }

    #[test]
    fn replace_all_discards_previous_items() {
        let mut col = ItemCollection::new();
        col.replace_all(vec![post("a", "x")]);
        col.replace_all(vec![post("b", "x")]);
        assert!(!col.contains(&"a".into()));
        assert_eq!(ids(&col), vec!["b"]);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut col = ItemCollection::new();
        col.replace_all(vec![post("a", "x"), post("b", "x"), post("c", "x"), post("d", "x")]);
        let removed = col.remove(&"b".into()).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert_eq!(ids(&col), vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_nonexistent_returns_none_without_bump() {
        let mut col: ItemCollection<crate::model::BlogPost> = ItemCollection::new();
        assert!(col.remove(&"ghost".into()).is_none());
        assert_eq!(col.version(), 0);
    }

    #[test]
    fn update_mutates_in_place() {
        let mut col = ItemCollection::new();
        col.replace_all(vec![post("a", "x"), post("b", "x")]);
        assert!(col.update(&"b".into(), |p| p.title = "Edited".into()));
        assert_eq!(col.get(&"b".into()).unwrap().title, "Edited");
        assert_eq!(ids(&col), vec!["a", "b"]);
        assert!(!col.update(&"zzz".into(), |p| p.title.clear()));
    }
}
