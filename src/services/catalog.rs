use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::models::Listing;

/// Errors that can occur when loading the listing catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// In-memory listing catalog
///
/// The catalog is loaded once at startup and treated as immutable input by
/// the matching and allocation endpoints.
#[derive(Debug)]
pub struct CatalogStore {
    listings: Vec<Listing>,
    by_id: HashMap<String, usize>,
}

impl CatalogStore {
    /// Build a catalog from an already-loaded listing set.
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        let by_id = listings
            .iter()
            .enumerate()
            .map(|(i, listing)| (listing.id.clone(), i))
            .collect();

        Self { listings, by_id }
    }

    /// Load a catalog from a JSON file containing an array of listings.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)?;

        if listings.is_empty() {
            tracing::warn!(
                "Catalog file {} contains no listings",
                path.as_ref().display()
            );
        }

        Ok(Self::from_listings(listings))
    }

    /// Compiled-in sample catalog, used when no catalog file is configured
    /// and as fixture data for tests and benchmarks.
    pub fn builtin() -> Self {
        let raw = include_str!("../../data/catalog.json");
        let listings: Vec<Listing> =
            serde_json::from_str(raw).expect("builtin catalog is valid JSON");
        Self::from_listings(listings)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.by_id.get(id).map(|&i| &self.listings[i])
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}
