use axum::{routing::get, Router};

pub mod menus;
pub mod system;

/// Router for everything behind the access middleware.
///
/// Unmatched paths fall through to [`system::content`], so every catalog URI
/// is reachable and subject to the denylist.
pub fn router(config: &gatehouse_auth::AuthConfig) -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/menus", get(menus::list_menus))
        .route(&config.logout_path, get(system::logout))
        .fallback(system::content)
}
