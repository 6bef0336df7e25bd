//! HTTP application wiring.
//!
//! - `services.rs`: user directory and menu catalog wiring
//! - `routes/`: handlers (system pages, menu listing)
//! - `errors.rs`: JSON error bodies

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware::{access_middleware, AccessGuard};

pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the router with the default responder.
pub fn build_app(config: &AppConfig, services: AppServices) -> Router {
    let guard = AccessGuard::new(
        services.directory.clone(),
        services.catalog.clone(),
        config.auth.clone(),
        config.cookies(),
    );
    build_app_with_guard(config, services, guard)
}

/// Build the router around a caller-supplied guard.
///
/// Everything except `/health` and the login page is mounted under the
/// configured prefix and passes through [`access_middleware`].
pub fn build_app_with_guard(config: &AppConfig, services: AppServices, guard: AccessGuard) -> Router {
    let auth = config.auth.clone();

    let protected = routes::router(&auth)
        .layer(Extension(Arc::new(services)))
        .layer(Extension(auth.clone()))
        .layer(Extension(config.cookies()))
        .layer(axum::middleware::from_fn_with_state(guard, access_middleware));

    let mounted = Router::new()
        .route(&auth.login_path, get(routes::system::login_page))
        .merge(protected);

    let prefix = auth.mount_prefix.trim_end_matches('/');
    let app = Router::new().route("/health", get(routes::system::health));
    let app = if prefix.is_empty() {
        app.merge(mounted)
    } else {
        app.nest(prefix, mounted)
    };

    app.layer(ServiceBuilder::new())
}
