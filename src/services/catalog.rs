//! Catalog service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::item::{CreateItem, Item, ItemQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub fn search_items(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        Ok(self.repository.lock()?.items.search(query))
    }

    pub fn get_item(&self, id: i32) -> AppResult<Item> {
        self.repository.lock()?.items.get_by_id(id).cloned()
    }

    /// Add a new title or tool to the catalog
    pub fn create_item(&self, data: CreateItem) -> AppResult<Item> {
        data.validate()?;

        let name = data.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }

        let mut library = self.repository.lock()?;
        let mut item = Item::new(library.items.next_id(), name, data.category, data.copies);
        if let Some(location) = data.location.filter(|l| !l.trim().is_empty()) {
            item.location = location;
        }
        library.items.insert(item.clone())?;

        tracing::info!(item_id = item.id, category = %item.category, "Item added to catalog");
        Ok(item)
    }
}
