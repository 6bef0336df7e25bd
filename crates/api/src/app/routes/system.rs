use axum::{
    extract::{Extension, OriginalUri, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use tracing::info;

use gatehouse_auth::AuthConfig;

use crate::config::CookieNames;
use crate::context::CurrentUser;
use crate::page;
use crate::responder::redirect_found;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "ref")]
    pub return_to: Option<String>,
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    Html(page::login_page(query.return_to.as_deref()))
}

pub async fn whoami(Extension(CurrentUser(user)): Extension<CurrentUser>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": user.identity().id.to_string(),
        "name": user.identity().name,
        "username": user.identity().username,
        "avatar": user.identity().avatar,
        "role": user.role(),
        "super_admin": user.is_super_admin(),
        "menu_ids": user.menu_ids(),
    }))
}

/// Clears the session cookies and sends the browser back to the login page.
pub async fn logout(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Extension(cookies): Extension<CookieNames>,
    Extension(config): Extension<AuthConfig>,
    jar: CookieJar,
) -> Response {
    info!(user = %user.identity().id, "logout");

    let jar = jar
        .remove(Cookie::build(cookies.token).path("/"))
        .remove(Cookie::build(cookies.session).path("/"));
    (jar, redirect_found(&config.login_url())).into_response()
}

/// Stand-in content for any guarded path without a dedicated handler.
pub async fn content(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    OriginalUri(uri): OriginalUri,
) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p></body></html>",
        page::html_escape(uri.path()),
        page::html_escape(&user.render_template("signed in as {{.AuthName}}")),
    ))
}
