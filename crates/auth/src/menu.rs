//! Menu catalog contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use gatehouse_core::{MenuId, StoreResult};

use crate::Role;

/// A registered menu entry (or one row of the role→menu join).
///
/// Entries form a forest: `parent_id == 0` marks a root. An empty `uri` marks a
/// pure grouping node that is never navigable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: MenuId,
    #[serde(default)]
    pub parent_id: MenuId,
    #[serde(default)]
    pub uri: String,
}

impl MenuEntry {
    pub fn new(id: i64, parent_id: i64, uri: impl Into<String>) -> Self {
        Self {
            id: MenuId::new(id),
            parent_id: MenuId::new(parent_id),
            uri: uri.into(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_root()
    }

    pub fn is_navigable(&self) -> bool {
        !self.uri.is_empty()
    }
}

/// Read-only source of menu entries.
///
/// Queried on every resolution; caching, if any, belongs to the implementation.
#[async_trait]
pub trait MenuCatalog: Send + Sync {
    /// Every registered menu entry.
    async fn list_all(&self) -> StoreResult<Vec<MenuEntry>>;

    /// Rows of the role→menu join for one role, in grant order.
    async fn list_for_role(&self, role: Role) -> StoreResult<Vec<MenuEntry>>;
}

#[async_trait]
impl<C> MenuCatalog for Arc<C>
where
    C: MenuCatalog + ?Sized,
{
    async fn list_all(&self) -> StoreResult<Vec<MenuEntry>> {
        (**self).list_all().await
    }

    async fn list_for_role(&self, role: Role) -> StoreResult<Vec<MenuEntry>> {
        (**self).list_for_role(role).await
    }
}
