use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, info};

use gatehouse_auth::{
    AuthConfig, AuthOutcome, AuthorizationFilter, MenuCatalog, ResolvedIdentity, UserDirectory,
};

use crate::config::CookieNames;
use crate::context::{CurrentUser, RequestInfo};
use crate::responder::{
    AccessResponder, AuthFailureFn, CallbackResponder, DefaultResponder, PermissionDeniedFn,
};

pub type DynFilter = AuthorizationFilter<Arc<dyn UserDirectory>, Arc<dyn MenuCatalog>>;

/// State of [`access_middleware`]: the filter plus the responder for refused requests.
#[derive(Clone)]
pub struct AccessGuard {
    filter: Arc<DynFilter>,
    responder: Arc<dyn AccessResponder>,
    cookies: CookieNames,
}

impl AccessGuard {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        catalog: Arc<dyn MenuCatalog>,
        config: AuthConfig,
        cookies: CookieNames,
    ) -> Self {
        Self {
            filter: Arc::new(AuthorizationFilter::new(directory, catalog, config)),
            responder: Arc::new(DefaultResponder::default()),
            cookies,
        }
    }

    /// Replace the mount prefix stripped before the denylist check.
    ///
    /// Responders receive the same config, so the login and logout URLs they
    /// redirect to move under the new prefix as well.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let filter = (*self.filter).clone().with_prefix(prefix);
        self.filter = Arc::new(filter);
        self
    }

    /// Replace both failure responses at once.
    pub fn with_responder(mut self, responder: Arc<dyn AccessResponder>) -> Self {
        self.responder = responder;
        self
    }

    /// Override only the unauthenticated path; denials keep the current responder.
    pub fn with_auth_failure<F>(mut self, f: F) -> Self
    where
        F: Fn(&AuthConfig, &RequestInfo) -> Response + Send + Sync + 'static,
    {
        let f: AuthFailureFn = Arc::new(f);
        self.responder = Arc::new(CallbackResponder {
            auth_failure: Some(f),
            permission_denied: None,
            fallback: self.responder,
        });
        self
    }

    /// Override only the permission-denied path.
    pub fn with_permission_denied<F>(mut self, f: F) -> Self
    where
        F: Fn(&AuthConfig, &RequestInfo, &ResolvedIdentity) -> Response + Send + Sync + 'static,
    {
        let f: PermissionDeniedFn = Arc::new(f);
        self.responder = Arc::new(CallbackResponder {
            auth_failure: None,
            permission_denied: Some(f),
            fallback: self.responder,
        });
        self
    }

    pub fn config(&self) -> &AuthConfig {
        self.filter.config()
    }
}

/// Classifies each request and either forwards it with a [`CurrentUser`]
/// extension or answers it through the guard's responder.
pub async fn access_middleware(
    State(guard): State<AccessGuard>,
    mut req: Request,
    next: Next,
) -> Response {
    // nested routers only see the suffix after the nest point
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.clone())
        .unwrap_or_else(|| req.uri().clone());

    let request = RequestInfo::from_parts(req.method(), &uri, req.headers(), &guard.cookies);
    let outcome = guard.filter.authorize(&request.access_request()).await;

    match outcome {
        AuthOutcome::Unauthenticated => {
            debug!(path = %request.path, method = %request.method, "no identity; answering auth failure");
            guard.responder.on_auth_failure(guard.config(), &request)
        }
        AuthOutcome::Denied(user) => {
            info!(
                path = %request.path,
                method = %request.method,
                user = %user.identity().id,
                role = %user.role(),
                catalog_error = user.catalog_error().is_some(),
                "request denied"
            );
            let mut resp = guard.responder.on_permission_denied(guard.config(), &request, &user);
            resp.extensions_mut().insert(CurrentUser(user));
            resp
        }
        AuthOutcome::Allowed(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
    }
}
