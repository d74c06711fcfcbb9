//! JSON file store for the catalog and patron records

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::DataConfig,
    error::AppResult,
    models::{item::Item, patron::Patron},
};

use super::Library;

#[derive(Debug, Clone)]
pub struct JsonStore {
    catalogue_path: PathBuf,
    patron_path: PathBuf,
}

impl JsonStore {
    pub fn new(catalogue_path: impl Into<PathBuf>, patron_path: impl Into<PathBuf>) -> Self {
        Self {
            catalogue_path: catalogue_path.into(),
            patron_path: patron_path.into(),
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(&config.catalogue_file, &config.patron_file)
    }

    /// Load both files; a missing file means an empty collection
    pub fn load(&self) -> AppResult<Library> {
        let items: Vec<Item> = read_records(&self.catalogue_path)?;
        let patrons: Vec<Patron> = read_records(&self.patron_path)?;

        tracing::info!(
            items = items.len(),
            patrons = patrons.len(),
            "Loaded library data"
        );

        Library::from_records(items, patrons)
    }

    pub fn save(&self, library: &Library) -> AppResult<()> {
        let items: Vec<&Item> = library.items.iter().collect();
        let patrons: Vec<&Patron> = library.patrons.iter().collect();

        write_records(&self.catalogue_path, &items)?;
        write_records(&self.patron_path, &patrons)?;

        tracing::info!(
            items = items.len(),
            patrons = patrons.len(),
            "Saved library data"
        );
        Ok(())
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Data file not found, starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Write through a temporary file so a failed save never truncates the data
fn write_records<T: Serialize>(path: &Path, records: &[T]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(records)?)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
