use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use gatehouse_auth::AuthConfig;
use gatehouse_core::MenuId;

use crate::app::{errors::json_error, services::AppServices};
use crate::context::CurrentUser;

#[derive(Debug, Serialize)]
pub struct MenuLink {
    pub id: MenuId,
    pub parent_id: MenuId,
    /// Mounted URL of the entry.
    pub url: String,
}

/// Navigable catalog entries the current user may open.
pub async fn list_menus(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(config): Extension<AuthConfig>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> axum::response::Response {
    let entries = match services.catalog.list_all().await {
        Ok(entries) => entries,
        Err(err) => {
            error!(error = %err, "menu catalog unavailable");
            return json_error(StatusCode::SERVICE_UNAVAILABLE, err.to_string());
        }
    };

    let links: Vec<MenuLink> = entries
        .into_iter()
        .filter(|entry| entry.is_navigable())
        .filter_map(|entry| {
            let path = user.permitted_path(&entry.uri)?;
            Some(MenuLink {
                id: entry.id,
                parent_id: entry.parent_id,
                url: config.url(path),
            })
        })
        .collect();

    Json(links).into_response()
}
