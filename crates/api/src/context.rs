use axum::http::{header, HeaderMap, Method, Uri};
use axum_extra::extract::cookie::CookieJar;

use gatehouse_auth::{AccessRequest, ResolvedIdentity};

use crate::config::CookieNames;

/// Header set by in-page partial navigations.
pub const PJAX_HEADER: &str = "x-pjax";

/// Identity attached to a request once the access middleware has classified it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub ResolvedIdentity);

/// The parts of a request the access decision and the responders look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: Method,
    /// Path plus query string.
    pub target: String,
    pub path: String,
    /// Partial-fetch marker present.
    pub pjax: bool,
    pub referer: Option<String>,
    /// Prior-session cookie present.
    pub has_session: bool,
    /// Session token; empty when absent.
    pub token: String,
}

impl RequestInfo {
    pub fn from_parts(method: &Method, uri: &Uri, headers: &HeaderMap, cookies: &CookieNames) -> Self {
        let jar = CookieJar::from_headers(headers);

        let token = jar
            .get(&cookies.token)
            .map(|c| c.value().to_string())
            .or_else(|| bearer_token(headers))
            .unwrap_or_default();

        Self {
            method: method.clone(),
            target: uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| uri.path().to_string()),
            path: uri.path().to_string(),
            pjax: header_value(headers, PJAX_HEADER).is_some(),
            referer: header_value(headers, header::REFERER.as_str()),
            has_session: jar.get(&cookies.session).is_some(),
            token,
        }
    }

    /// A call that is neither a partial fetch nor a plain GET.
    pub fn is_programmatic(&self) -> bool {
        !self.pjax && self.method != Method::GET
    }

    pub fn access_request(&self) -> AccessRequest<'_> {
        AccessRequest::new(&self.token, &self.target, self.method.as_str())
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = header_value(headers, header::AUTHORIZATION.as_str())?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}
