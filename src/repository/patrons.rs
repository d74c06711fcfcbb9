//! Patrons repository: registered members and their loans

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::patron::{Patron, PatronQuery},
};

#[derive(Debug, Clone, Default)]
pub struct PatronsRepository {
    patrons: IndexMap<i32, Patron>,
}

impl PatronsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get patron by ID
    pub fn get_by_id(&self, id: i32) -> AppResult<&Patron> {
        self.patrons.get(&id).ok_or(AppError::PatronNotFound(id))
    }

    pub fn get_by_id_mut(&mut self, id: i32) -> AppResult<&mut Patron> {
        self.patrons.get_mut(&id).ok_or(AppError::PatronNotFound(id))
    }

    /// Add a patron that already carries its ID
    pub fn insert(&mut self, patron: Patron) -> AppResult<()> {
        if self.patrons.contains_key(&patron.id) {
            return Err(AppError::Conflict(format!(
                "Patron with id {} already exists",
                patron.id
            )));
        }
        self.patrons.insert(patron.id, patron);
        Ok(())
    }

    pub fn next_id(&self) -> i32 {
        self.patrons.keys().max().map_or(1, |id| id + 1)
    }

    /// Patrons matching the query, in registration order
    pub fn search(&self, query: &PatronQuery) -> Vec<&Patron> {
        self.patrons.values().filter(|patron| query.matches(patron)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patron> {
        self.patrons.values()
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }
}
