//! Items repository: the in-memory catalog

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, ItemQuery},
};

#[derive(Debug, Clone, Default)]
pub struct ItemsRepository {
    items: IndexMap<i32, Item>,
}

impl ItemsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get item by ID
    pub fn get_by_id(&self, id: i32) -> AppResult<&Item> {
        self.items.get(&id).ok_or(AppError::ItemNotFound(id))
    }

    pub fn get_by_id_mut(&mut self, id: i32) -> AppResult<&mut Item> {
        self.items.get_mut(&id).ok_or(AppError::ItemNotFound(id))
    }

    /// Add an item that already carries its ID
    pub fn insert(&mut self, item: Item) -> AppResult<()> {
        if self.items.contains_key(&item.id) {
            return Err(AppError::Conflict(format!("Item with id {} already exists", item.id)));
        }
        self.items.insert(item.id, item);
        Ok(())
    }

    pub fn next_id(&self) -> i32 {
        self.items.keys().max().map_or(1, |id| id + 1)
    }

    /// Items matching the query, in catalog order
    pub fn search(&self, query: &ItemQuery) -> Vec<Item> {
        self.items.values().filter(|item| query.matches(item)).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
