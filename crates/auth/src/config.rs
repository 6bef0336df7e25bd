//! Access configuration value object.
//!
//! Built once at startup and handed to the filter and the dispatcher; nothing
//! in this crate reads configuration from the process environment.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Settings consumed by the authorization core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Prefix every application path is mounted under (e.g. `/admin`).
    ///
    /// Stripped from the request path before the denylist check.
    pub mount_prefix: String,

    /// Login endpoint, relative to the mount prefix.
    pub login_path: String,

    /// Logout endpoint, relative to the mount prefix.
    pub logout_path: String,

    /// Role value that bypasses all denylist checks.
    pub super_admin_role: Role,

    /// Storage prefix used to turn avatar references into absolute URLs.
    ///
    /// When empty, avatars are dropped instead of passed through as relative paths.
    pub avatar_prefix: String,

    /// Treat identities without any granted menu entry as unauthenticated.
    pub require_granted_menu: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mount_prefix: "/admin".to_string(),
            login_path: "/login".to_string(),
            logout_path: "/logout".to_string(),
            super_admin_role: Role::new(1),
            avatar_prefix: String::new(),
            require_granted_menu: false,
        }
    }
}

impl AuthConfig {
    pub fn is_super_admin(&self, role: Role) -> bool {
        role == self.super_admin_role
    }

    /// Mount an application path under the configured prefix.
    pub fn url(&self, path: &str) -> String {
        let prefix = self.mount_prefix.trim_end_matches('/');
        if path.is_empty() {
            return if prefix.is_empty() { "/".to_string() } else { prefix.to_string() };
        }
        if path.starts_with('/') {
            format!("{prefix}{path}")
        } else {
            format!("{prefix}/{path}")
        }
    }

    pub fn login_url(&self) -> String {
        self.url(&self.login_path)
    }

    pub fn logout_url(&self) -> String {
        self.url(&self.logout_path)
    }

    /// Reduce a request target to the form stored in the menu catalog.
    ///
    /// The query string is dropped first, then the mount prefix (without any
    /// trailing `/`) is removed when the path literally starts with it
    /// (case-sensitive, no segment awareness).
    pub fn normalize_path<'a>(&self, target: &'a str) -> &'a str {
        let path = target.split('?').next().unwrap_or_default();
        let prefix = self.mount_prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return path;
        }
        path.strip_prefix(prefix).unwrap_or(path)
    }

    /// Absolute avatar URL, or an empty string when no storage prefix is active.
    pub fn avatar_url(&self, avatar: &str) -> String {
        if avatar.is_empty() || self.avatar_prefix.is_empty() {
            return String::new();
        }
        format!(
            "{}/{}",
            self.avatar_prefix.trim_end_matches('/'),
            avatar.trim_start_matches('/')
        )
    }
}
