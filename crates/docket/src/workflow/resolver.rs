//! Item-resolution collaborator contract.
//!
//! Decisions are audited against the catalogued item an event concerns.
//! Resolution is external; a failure to resolve is surfaced to the caller,
//! never swallowed.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DocketError, Result};

/// A resolved catalogued item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Identifier of the item.
    pub id: Uuid,

    /// Display title, when the catalogue knows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CatalogItem {
    /// Create an item with just an id.
    pub fn new(id: Uuid) -> Self {
        Self { id, title: None }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Catalogue lookup collaborator.
pub trait ItemResolver: Send + Sync {
    /// Resolve a target id to its catalogued item.
    fn resolve(&self, target: Uuid) -> Result<CatalogItem>;
}

/// Resolver backed by an in-memory map. Fails for unknown targets.
#[derive(Debug, Default)]
pub struct MapResolver {
    items: RwLock<HashMap<Uuid, CatalogItem>>,
}

impl MapResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item.
    pub fn insert(&self, item: CatalogItem) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| DocketError::Store("item resolver lock poisoned".to_string()))?;
        items.insert(item.id, item);
        Ok(())
    }
}

impl ItemResolver for MapResolver {
    fn resolve(&self, target: Uuid) -> Result<CatalogItem> {
        let items = self
            .items
            .read()
            .map_err(|_| DocketError::Store("item resolver lock poisoned".to_string()))?;
        items
            .get(&target)
            .cloned()
            .ok_or_else(|| DocketError::TargetResolution {
                target,
                reason: "no such item in catalogue".to_string(),
            })
    }
}

/// Resolver that echoes the id without a lookup. Default for composition
/// roots that have no catalogue wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl ItemResolver for PassthroughResolver {
    fn resolve(&self, target: Uuid) -> Result<CatalogItem> {
        Ok(CatalogItem::new(target))
    }
}
