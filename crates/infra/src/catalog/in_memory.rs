use std::sync::RwLock;

use async_trait::async_trait;

use gatehouse_auth::{MenuCatalog, MenuEntry, Role};
use gatehouse_core::{MenuId, StoreError, StoreResult};

/// In-memory menu table plus role→menu grants, for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMenuCatalog {
    menus: RwLock<Vec<MenuEntry>>,
    grants: RwLock<Vec<(Role, MenuId)>>,
}

impl InMemoryMenuCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_menus(menus: impl IntoIterator<Item = MenuEntry>) -> Self {
        Self {
            menus: RwLock::new(menus.into_iter().collect()),
            grants: RwLock::new(Vec::new()),
        }
    }

    /// Register (or replace) a menu entry.
    pub fn add_menu(&self, entry: MenuEntry) {
        if let Ok(mut menus) = self.menus.write() {
            menus.retain(|m| m.id != entry.id);
            menus.push(entry);
        }
    }

    pub fn grant(&self, role: Role, menu: MenuId) {
        if let Ok(mut grants) = self.grants.write() {
            if !grants.contains(&(role, menu)) {
                grants.push((role, menu));
            }
        }
    }

    pub fn revoke(&self, role: Role, menu: MenuId) {
        if let Ok(mut grants) = self.grants.write() {
            grants.retain(|g| *g != (role, menu));
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::unavailable("menu catalog lock poisoned")
}

#[async_trait]
impl MenuCatalog for InMemoryMenuCatalog {
    async fn list_all(&self) -> StoreResult<Vec<MenuEntry>> {
        let menus = self.menus.read().map_err(|_| poisoned())?;
        Ok(menus.clone())
    }

    /// Left-join semantics: a grant pointing at a missing menu row still yields
    /// a root-level tuple with an empty URI.
    async fn list_for_role(&self, role: Role) -> StoreResult<Vec<MenuEntry>> {
        let menus = self.menus.read().map_err(|_| poisoned())?;
        let grants = self.grants.read().map_err(|_| poisoned())?;

        Ok(grants
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, menu_id)| {
                menus
                    .iter()
                    .find(|m| m.id == *menu_id)
                    .cloned()
                    .unwrap_or(MenuEntry {
                        id: *menu_id,
                        parent_id: MenuId::ROOT,
                        uri: String::new(),
                    })
            })
            .collect())
    }
}
