//! Row-indexed storage for the items of the list being viewed.

use std::collections::BTreeMap;

use shared::domain::{Item, TaskId};

use crate::error::{ListError, Violation};

/// Items may arrive in any order, so the store knows how many rows were
/// promised and keeps only the ones that have been received. Nothing is
/// allocated for rows that have not arrived.
#[derive(Debug, Default, Clone)]
pub struct ItemStore {
    len: usize,
    items: BTreeMap<usize, Item>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.items.clear();
    }

    /// Drops all items and promises `len` rows.
    pub fn reset(&mut self, len: usize) {
        self.items.clear();
        self.len = len;
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn received_count(&self) -> usize {
        self.items.len()
    }

    pub fn put(&mut self, index: usize, item: Item) -> Result<(), ListError> {
        if index >= self.len {
            return Err(Violation::IndexOutOfRange {
                index,
                expected: self.len,
            }
            .into());
        }
        if self.items.contains_key(&index) {
            return Err(Violation::DuplicateIndex { index }.into());
        }
        self.items.insert(index, item);
        Ok(())
    }

    /// Appends after the last row and returns the item's index.
    pub fn push(&mut self, item: Item) -> usize {
        let index = self.len;
        self.items.insert(index, item);
        self.len += 1;
        index
    }

    pub fn get(&self, index: usize) -> Result<&Item, ListError> {
        self.items
            .get(&index)
            .ok_or(ListError::OutOfRange { index })
    }

    pub fn find_by_id(&self, id: TaskId) -> Option<usize> {
        self.items
            .iter()
            .find(|(_, item)| item.id == id)
            .map(|(index, _)| *index)
    }

    pub fn get_mut_by_id(&mut self, id: TaskId) -> Option<&mut Item> {
        self.items.values_mut().find(|item| item.id == id)
    }

    /// Received items in row order.
    #[cfg(test)]
    pub(crate) fn items(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.items.iter().map(|(index, item)| (*index, item))
    }
}

#[cfg(test)]
#[path = "tests/item_store_tests.rs"]
mod tests;
