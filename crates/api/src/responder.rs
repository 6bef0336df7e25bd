//! Responses for refused requests.
//!
//! [`AccessResponder`] is the replaceable strategy; [`DefaultResponder`] picks
//! between a redirect, a JSON error, a session-expired notice, and a warning
//! panel depending on how the request was made.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use url::form_urlencoded;

use gatehouse_auth::{AuthConfig, ResolvedIdentity};

use crate::app::errors::json_error;
use crate::context::RequestInfo;
use crate::i18n::{keys, EnglishLocalizer, Localizer};
use crate::page;

/// Strategy invoked by the access middleware when it halts a request.
pub trait AccessResponder: Send + Sync {
    /// The caller has no resolvable identity.
    fn on_auth_failure(&self, config: &AuthConfig, req: &RequestInfo) -> Response;

    /// The caller is known but the path is on their denylist.
    fn on_permission_denied(
        &self,
        config: &AuthConfig,
        req: &RequestInfo,
        user: &ResolvedIdentity,
    ) -> Response;
}

pub type AuthFailureFn = Arc<dyn Fn(&AuthConfig, &RequestInfo) -> Response + Send + Sync>;
pub type PermissionDeniedFn =
    Arc<dyn Fn(&AuthConfig, &RequestInfo, &ResolvedIdentity) -> Response + Send + Sync>;

/// `302 Found` to `location`.
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Login URL carrying the referrer as `ref` for post-login return.
pub fn login_redirect_target(config: &AuthConfig, referer: Option<&str>) -> String {
    let login = config.login_url();
    match referer {
        Some(r) if !r.is_empty() => {
            let encoded: String = form_urlencoded::byte_serialize(r.as_bytes()).collect();
            format!("{login}?ref={encoded}")
        }
        _ => login,
    }
}

#[derive(Clone)]
pub struct DefaultResponder {
    localizer: Arc<dyn Localizer>,
}

impl Default for DefaultResponder {
    fn default() -> Self {
        Self::new(Arc::new(EnglishLocalizer))
    }
}

impl DefaultResponder {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self { localizer }
    }
}

impl AccessResponder for DefaultResponder {
    fn on_auth_failure(&self, config: &AuthConfig, req: &RequestInfo) -> Response {
        let login = config.login_url();

        if req.path == login {
            return StatusCode::OK.into_response();
        }
        if req.path == config.logout_url() {
            return redirect_found(&login);
        }

        let target = login_redirect_target(config, req.referer.as_deref());

        if req.is_programmatic() || !req.has_session || req.referer.is_none() {
            return redirect_found(&target);
        }

        // background navigation of a page whose session just expired
        Html(page::login_expired_notice(
            &self.localizer.localize(keys::LOGIN_INFO),
            &self.localizer.localize(keys::LOGIN_OVERDUE),
            &self.localizer.localize(keys::GOT_IT),
            &target,
        ))
        .into_response()
    }

    fn on_permission_denied(
        &self,
        _config: &AuthConfig,
        req: &RequestInfo,
        user: &ResolvedIdentity,
    ) -> Response {
        let message = self.localizer.localize(keys::PERMISSION_DENIED);

        if req.is_programmatic() {
            return json_error(StatusCode::FORBIDDEN, message);
        }

        Html(page::warning_panel(
            &message,
            &self.localizer.localize(keys::NO_PERMISSION),
            &user.render_template("{{.AuthName}} ({{.AuthUserName}})"),
        ))
        .into_response()
    }
}

/// Per-method overrides on top of another responder.
pub(crate) struct CallbackResponder {
    pub(crate) auth_failure: Option<AuthFailureFn>,
    pub(crate) permission_denied: Option<PermissionDeniedFn>,
    pub(crate) fallback: Arc<dyn AccessResponder>,
}

impl AccessResponder for CallbackResponder {
    fn on_auth_failure(&self, config: &AuthConfig, req: &RequestInfo) -> Response {
        match &self.auth_failure {
            Some(f) => f(config, req),
            None => self.fallback.on_auth_failure(config, req),
        }
    }

    fn on_permission_denied(
        &self,
        config: &AuthConfig,
        req: &RequestInfo,
        user: &ResolvedIdentity,
    ) -> Response {
        match &self.permission_denied {
            Some(f) => f(config, req, user),
            None => self.fallback.on_permission_denied(config, req, user),
        }
    }
}
