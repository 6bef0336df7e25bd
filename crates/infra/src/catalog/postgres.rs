//! Postgres-backed menu catalog.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE menu (
//!     id        BIGINT PRIMARY KEY,
//!     parent_id BIGINT NOT NULL DEFAULT 0,
//!     uri       TEXT   NOT NULL DEFAULT ''
//! );
//!
//! CREATE TABLE role_menu (
//!     role_id BIGINT NOT NULL,
//!     menu_id BIGINT NOT NULL,
//!     PRIMARY KEY (role_id, menu_id)
//! );
//! ```

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use gatehouse_auth::{MenuCatalog, MenuEntry, Role};
use gatehouse_core::{MenuId, StoreError, StoreResult};

/// Reads the catalog and the role→menu join straight from Postgres on every call.
#[derive(Debug, Clone)]
pub struct PgMenuCatalog {
    pool: PgPool,
}

impl PgMenuCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuCatalog for PgMenuCatalog {
    #[instrument(skip(self), err)]
    async fn list_all(&self) -> StoreResult<Vec<MenuEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id AS menu_id, parent_id, uri
            FROM menu
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_all", e))?;

        rows.iter().map(row_to_entry).collect()
    }

    #[instrument(skip(self), err)]
    async fn list_for_role(&self, role: Role) -> StoreResult<Vec<MenuEntry>> {
        // LEFT JOIN: grants on deleted menus come back with NULL parent/uri.
        let rows = sqlx::query(
            r#"
            SELECT role_menu.menu_id, menu.parent_id, menu.uri
            FROM role_menu
            LEFT JOIN menu ON menu.id = role_menu.menu_id
            WHERE role_menu.role_id = $1
            "#,
        )
        .bind(role.level())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_for_role", e))?;

        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &PgRow) -> StoreResult<MenuEntry> {
    let id: i64 = row
        .try_get("menu_id")
        .map_err(|e| StoreError::malformed(format!("menu_id: {e}")))?;
    let parent_id: Option<i64> = row
        .try_get("parent_id")
        .map_err(|e| StoreError::malformed(format!("parent_id: {e}")))?;
    let uri: Option<String> = row
        .try_get("uri")
        .map_err(|e| StoreError::malformed(format!("uri: {e}")))?;

    Ok(MenuEntry {
        id: MenuId::new(id),
        parent_id: MenuId::new(parent_id.unwrap_or_default()),
        uri: uri.unwrap_or_default(),
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::malformed(format!("{operation}: {err}"))
        }
        other => StoreError::unavailable(format!("{operation}: {other}")),
    }
}
