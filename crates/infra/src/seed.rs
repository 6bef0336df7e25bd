//! JSON seed for the in-memory adapters.
//!
//! ```json
//! {
//!   "users":  [{ "token": "t1", "id": "<uuid>", "display_name": "Ann",
//!                "login_name": "ann", "avatar": "", "role": 2 }],
//!   "menus":  [{ "id": 1, "parent_id": 0, "uri": "/dashboard" }],
//!   "grants": [{ "role": 2, "menu": 1 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use gatehouse_auth::{DirectoryRecord, MenuEntry, Role};
use gatehouse_core::MenuId;

use crate::{InMemoryMenuCatalog, InMemoryUserDirectory};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid seed document: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    pub token: String,
    #[serde(flatten)]
    pub record: DirectoryRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedGrant {
    pub role: Role,
    pub menu: MenuId,
}

/// Users, menus and grants to preload into the in-memory stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub users: Vec<SeedUser>,
    pub menus: Vec<MenuEntry>,
    pub grants: Vec<SeedGrant>,
}

impl Seed {
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let seed = Self::from_json(&raw)?;
        info!(
            path = %path.as_ref().display(),
            users = seed.users.len(),
            menus = seed.menus.len(),
            grants = seed.grants.len(),
            "loaded seed"
        );
        Ok(seed)
    }

    pub fn into_stores(self) -> (InMemoryUserDirectory, InMemoryMenuCatalog) {
        let directory = InMemoryUserDirectory::new();
        for user in self.users {
            directory.insert(user.token, user.record);
        }

        let catalog = InMemoryMenuCatalog::with_menus(self.menus);
        for grant in self.grants {
            catalog.grant(grant.role, grant.menu);
        }

        (directory, catalog)
    }
}

#[cfg(test)]
mod tests {
    use gatehouse_auth::{MenuCatalog, UserDirectory};

    use super::*;

    const DOC: &str = r#"{
        "users": [
            { "token": "t1", "id": "0190a0c4-1f5e-7cc2-9b8e-3d1f2a4b5c6d",
              "display_name": "Ann", "login_name": "ann", "role": 2 }
        ],
        "menus": [
            { "id": 1, "uri": "/dashboard" },
            { "id": 2, "parent_id": 1, "uri": "/dashboard/stats" }
        ],
        "grants": [ { "role": 2, "menu": 1 } ]
    }"#;

    #[tokio::test]
    async fn seed_populates_both_stores() {
        let (directory, catalog) = Seed::from_json(DOC).unwrap().into_stores();

        let user = directory.resolve_token("t1").await.unwrap().unwrap();
        assert_eq!(user.login_name, "ann");
        assert_eq!(user.avatar, "");

        assert_eq!(catalog.list_all().await.unwrap().len(), 2);
        assert_eq!(
            catalog.list_for_role(Role::new(2)).await.unwrap(),
            vec![MenuEntry::new(1, 0, "/dashboard")]
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = Seed::from_json("{}").unwrap();
        assert_eq!(seed, Seed::default());
    }

    #[test]
    fn invalid_document_is_rejected() {
        assert!(matches!(Seed::from_json("{\"menus\": 3}"), Err(SeedError::Parse(_))));
    }
}
