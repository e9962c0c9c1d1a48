use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use thiserror::Error;

use stockcheck_core::{DomainError, ProductId};

use crate::fact::InventoryFact;
use crate::lookup::{InventoryLookup, LookupError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("catalog lock poisoned")]
    Poisoned,
}

/// In-memory product catalog for tests/dev.
///
/// Stands in for the storefront's catalog: it stores one `InventoryFact` per
/// product id and answers lookups from that snapshot.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<HashMap<ProductId, InventoryFact>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_facts(facts: impl IntoIterator<Item = InventoryFact>) -> Result<Self, CatalogError> {
        let catalog = Self::new();
        for fact in facts {
            catalog.upsert(fact)?;
        }
        Ok(catalog)
    }

    /// Load a JSON array of facts (seed data for local runs).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let facts: Vec<InventoryFact> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_facts(facts)
    }

    /// Insert or replace a fact. Facts breaking the tracking invariant are rejected.
    pub fn upsert(&self, fact: InventoryFact) -> Result<(), CatalogError> {
        fact.validate()?;
        let mut map = self.inner.write().map_err(|_| CatalogError::Poisoned)?;
        map.insert(fact.product_id, fact);
        Ok(())
    }

    pub fn remove(&self, product_id: ProductId) -> Option<InventoryFact> {
        self.inner.write().ok()?.remove(&product_id)
    }

    /// All facts, ordered by product id.
    pub fn list(&self) -> Vec<InventoryFact> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut facts: Vec<_> = map.values().cloned().collect();
        facts.sort_by_key(|f| f.product_id);
        facts
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InventoryLookup for InMemoryCatalog {
    fn lookup(&self, product_id: ProductId) -> Result<Option<InventoryFact>, LookupError> {
        let map = self
            .inner
            .read()
            .map_err(|_| LookupError::Unavailable("catalog lock poisoned".to_string()))?;
        Ok(map.get(&product_id).cloned())
    }
}
