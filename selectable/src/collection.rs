//! Backing ordered collection of a host.

use std::collections::HashSet;

use crate::id::ItemId;

/// Structural change raised by an [`ItemCollection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChange {
    Added(ItemId),
    Removed(ItemId),
    /// The whole collection was replaced; `previous` is the old content.
    Reset { previous: Vec<ItemId> },
}

/// Ordered, duplicate-free list of item ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<ItemId>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Returns `None` if it is already a member.
    pub fn add(&mut self, id: ItemId) -> Option<CollectionChange> {
        let end = self.items.len();
        self.insert_at(end, id)
    }

    /// Insert an item at `index` (clamped to the length).
    pub fn insert_at(&mut self, index: usize, id: ItemId) -> Option<CollectionChange> {
        if self.contains(id) {
            return None;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, id);
        Some(CollectionChange::Added(id))
    }

    /// Remove an item. Returns `None` if it was not a member.
    pub fn remove(&mut self, id: ItemId) -> Option<CollectionChange> {
        let index = self.position(id)?;
        self.items.remove(index);
        Some(CollectionChange::Removed(id))
    }

    /// Replace the content. Duplicates keep their first occurrence.
    pub fn reset(&mut self, items: impl IntoIterator<Item = ItemId>) -> CollectionChange {
        let mut seen = HashSet::new();
        let items = items.into_iter().filter(|id| seen.insert(*id)).collect();
        let previous = std::mem::replace(&mut self.items, items);
        CollectionChange::Reset { previous }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|&i| i == id)
    }

    pub fn get(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[ItemId] {
        &self.items
    }
}
