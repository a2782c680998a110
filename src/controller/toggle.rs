//! Mutually exclusive selection: tabs and gallery thumbnails.

/// A non-empty group of items with exactly one active at a time.
///
/// The first item starts active, matching the markup the page is rendered
/// with.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleGroup<K> {
    items: Vec<K>,
    active: usize,
}

impl<K: PartialEq> ToggleGroup<K> {
    /// Returns `None` for an empty group.
    pub fn new(items: Vec<K>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items, active: 0 })
    }

    /// Mark `index` active, deactivating its siblings. Out-of-range
    /// indices leave the group unchanged and return `false`.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Activate the first item equal to `key`.
    pub fn activate_item(&mut self, key: &K) -> Option<usize> {
        let index = self.items.iter().position(|k| k == key)?;
        self.active = index;
        Some(index)
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> &K {
        &self.items[self.active]
    }

    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }

    pub fn items(&self) -> &[K] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}
