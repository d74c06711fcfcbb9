//! Repository layer: in-memory collections shared by the services

pub mod items;
pub mod patrons;
pub mod store;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::{item::Item, patron::Patron},
};

/// Every item and patron known to the library
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub items: items::ItemsRepository,
    pub patrons: patrons::PatronsRepository,
}

impl Library {
    /// Build a library from stored records, rejecting inconsistent data
    pub fn from_records(items: Vec<Item>, patrons: Vec<Patron>) -> AppResult<Self> {
        let mut library = Library::default();

        for item in items {
            if item.on_loan > item.copies {
                return Err(AppError::Validation(format!(
                    "item {} has {} copies on loan but only {} owned",
                    item.id, item.on_loan, item.copies
                )));
            }
            library.items.insert(item)?;
        }

        let mut holders: HashMap<i32, u32> = HashMap::new();
        for patron in patrons {
            if patron.outstanding_fees.is_sign_negative() {
                return Err(AppError::Validation(format!(
                    "patron {} has a negative fee balance",
                    patron.id
                )));
            }
            for loan in &patron.loans {
                library.items.get_by_id(loan.item_id).map_err(|_| {
                    AppError::Validation(format!(
                        "patron {} holds a loan for unknown item {}",
                        patron.id, loan.item_id
                    ))
                })?;
                if patron.loans.iter().filter(|l| l.item_id == loan.item_id).count() > 1 {
                    return Err(AppError::Validation(format!(
                        "patron {} holds item {} more than once",
                        patron.id, loan.item_id
                    )));
                }
                *holders.entry(loan.item_id).or_default() += 1;
            }
            library.patrons.insert(patron)?;
        }

        // copies counted as out must match the loans patrons actually hold
        for item in library.items.iter() {
            let held = holders.get(&item.id).copied().unwrap_or(0);
            if held != item.on_loan {
                return Err(AppError::Validation(format!(
                    "item {} records {} copies on loan but patrons hold {}",
                    item.id, item.on_loan, held
                )));
            }
        }

        Ok(library)
    }
}

/// Shared handle on the library.
///
/// A service operation holds the lock for its whole check-then-mutate
/// sequence, so concurrent requests never interleave on the same data.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    library: Arc<Mutex<Library>>,
}

impl Repository {
    /// Create a new repository around an already loaded library
    pub fn new(library: Library) -> Self {
        Self {
            library: Arc::new(Mutex::new(library)),
        }
    }

    pub fn lock(&self) -> AppResult<MutexGuard<'_, Library>> {
        self.library
            .lock()
            .map_err(|_| AppError::Internal("library lock poisoned".to_string()))
    }
}
