use thiserror::Error;
use tracing::debug;

use gatehouse_core::StoreError;

use crate::{
    AuthConfig, IdentityResolver, MenuCatalog, PermissionResolver, ResolvedIdentity, UserDirectory,
};

/// Transport-agnostic view of an incoming request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRequest<'a> {
    /// Session token; empty when the request carries none.
    pub token: &'a str,
    /// Request target: path plus optional query string.
    pub target: &'a str,
    pub method: &'a str,
}

impl<'a> AccessRequest<'a> {
    pub fn new(token: &'a str, target: &'a str, method: &'a str) -> Self {
        Self {
            token,
            target,
            method,
        }
    }
}

/// Failure taxonomy of an access decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("identity not found")]
    IdentityNotFound,

    #[error("permission denied for '{0}'")]
    PermissionDenied(String),

    #[error("menu catalog unavailable: {0}")]
    CatalogUnavailable(StoreError),
}

/// Classification of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Unauthenticated,
    Denied(ResolvedIdentity),
    Allowed(ResolvedIdentity),
}

impl AuthOutcome {
    pub fn authenticated(&self) -> bool {
        !matches!(self, AuthOutcome::Unauthenticated)
    }

    /// `true` for unauthenticated requests: callers branch on [`Self::authenticated`] first.
    pub fn permitted(&self) -> bool {
        !matches!(self, AuthOutcome::Denied(_))
    }

    pub fn identity(&self) -> Option<&ResolvedIdentity> {
        match self {
            AuthOutcome::Unauthenticated => None,
            AuthOutcome::Denied(user) | AuthOutcome::Allowed(user) => Some(user),
        }
    }

    /// The allowed identity, or why the request was refused.
    pub fn check(&self, path: &str) -> Result<&ResolvedIdentity, AccessError> {
        match self {
            AuthOutcome::Unauthenticated => Err(AccessError::IdentityNotFound),
            AuthOutcome::Denied(user) => match user.catalog_error() {
                Some(err) => Err(AccessError::CatalogUnavailable(err.clone())),
                None => Err(AccessError::PermissionDenied(path.to_string())),
            },
            AuthOutcome::Allowed(user) => Ok(user),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthOutcome::Unauthenticated => "unauthenticated",
            AuthOutcome::Denied(_) => "denied",
            AuthOutcome::Allowed(_) => "allowed",
        }
    }
}

/// Classifies requests into [`AuthOutcome`]s.
///
/// Identity resolution always completes before grants are read. The filter
/// keeps no state between calls.
#[derive(Debug, Clone)]
pub struct AuthorizationFilter<D, C> {
    identities: IdentityResolver<D>,
    permissions: PermissionResolver<C>,
    config: AuthConfig,
}

impl<D, C> AuthorizationFilter<D, C>
where
    D: UserDirectory,
    C: MenuCatalog,
{
    pub fn new(directory: D, catalog: C, config: AuthConfig) -> Self {
        Self {
            identities: IdentityResolver::new(directory, config.clone()),
            permissions: PermissionResolver::new(catalog, config.super_admin_role),
            config,
        }
    }

    /// Replace the mount prefix stripped before the denylist check.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.mount_prefix = prefix.into();
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub async fn authorize(&self, request: &AccessRequest<'_>) -> AuthOutcome {
        let path = self.config.normalize_path(request.target);

        let Some(identity) = self.identities.resolve(request.token).await else {
            debug!(path, method = request.method, outcome = "unauthenticated", "access decision");
            return AuthOutcome::Unauthenticated;
        };

        let resolved = self.permissions.resolve(identity).await;

        if self.config.require_granted_menu && !resolved.has_menu() {
            debug!(
                path,
                method = request.method,
                user = %resolved.identity().id,
                outcome = "unauthenticated",
                "identity has no granted menu"
            );
            return AuthOutcome::Unauthenticated;
        }

        let outcome = if resolved.permits(path) {
            AuthOutcome::Allowed(resolved)
        } else {
            AuthOutcome::Denied(resolved)
        };

        debug!(path, method = request.method, outcome = outcome.label(), "access decision");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use gatehouse_core::{StoreResult, UserId};

    use super::*;
    use crate::{DirectoryRecord, MenuEntry, Role};

    const SUPER: Role = Role::new(1);
    const EDITOR: Role = Role::new(2);
    const ORPHAN: Role = Role::new(3);

    struct Directory(HashMap<String, DirectoryRecord>);

    #[async_trait]
    impl UserDirectory for Directory {
        async fn resolve_token(&self, token: &str) -> StoreResult<Option<DirectoryRecord>> {
            Ok(self.0.get(token).cloned())
        }
    }

    struct Catalog {
        all: Vec<MenuEntry>,
        grants: HashMap<Role, Vec<MenuEntry>>,
        broken: bool,
    }

    #[async_trait]
    impl MenuCatalog for Catalog {
        async fn list_all(&self) -> StoreResult<Vec<MenuEntry>> {
            if self.broken {
                return Err(StoreError::unavailable("catalog offline"));
            }
            Ok(self.all.clone())
        }

        async fn list_for_role(&self, role: Role) -> StoreResult<Vec<MenuEntry>> {
            if self.broken {
                return Err(StoreError::unavailable("catalog offline"));
            }
            Ok(self.grants.get(&role).cloned().unwrap_or_default())
        }
    }

    fn record(role: Role) -> DirectoryRecord {
        DirectoryRecord {
            id: UserId::new().to_string(),
            display_name: "Dana".to_string(),
            login_name: "dana".to_string(),
            avatar: String::new(),
            role,
        }
    }

    fn catalog(broken: bool) -> Catalog {
        let mut grants = HashMap::new();
        grants.insert(
            EDITOR,
            vec![MenuEntry::new(1, 0, "/a"), MenuEntry::new(2, 1, "/a/b")],
        );
        grants.insert(ORPHAN, vec![MenuEntry::new(2, 1, "/a/b")]);
        Catalog {
            all: vec![
                MenuEntry::new(1, 0, "/a"),
                MenuEntry::new(2, 1, "/a/b"),
                MenuEntry::new(3, 0, "/c"),
            ],
            grants,
            broken,
        }
    }

    fn filter_with(config: AuthConfig, broken: bool) -> AuthorizationFilter<Directory, Catalog> {
        let mut users = HashMap::new();
        users.insert("super".to_string(), record(SUPER));
        users.insert("editor".to_string(), record(EDITOR));
        users.insert("orphan".to_string(), record(ORPHAN));
        AuthorizationFilter::new(Directory(users), catalog(broken), config)
    }

    fn filter() -> AuthorizationFilter<Directory, Catalog> {
        filter_with(AuthConfig::default(), false)
    }

    #[tokio::test]
    async fn missing_token_is_unauthenticated_on_any_path() {
        let filter = filter();
        for target in ["/admin/a", "/admin/c", "/admin/login", "/elsewhere"] {
            let outcome = filter.authorize(&AccessRequest::new("", target, "GET")).await;
            assert_eq!(outcome, AuthOutcome::Unauthenticated);
            assert!(!outcome.authenticated());
            assert!(outcome.permitted());
        }
    }

    #[tokio::test]
    async fn unknown_token_is_unauthenticated() {
        let outcome = filter()
            .authorize(&AccessRequest::new("nope", "/admin/a", "GET"))
            .await;
        assert_eq!(outcome.check("/a"), Err(AccessError::IdentityNotFound));
    }

    #[tokio::test]
    async fn denylisted_path_is_denied_with_identity() {
        let outcome = filter()
            .authorize(&AccessRequest::new("editor", "/admin/c", "GET"))
            .await;

        assert!(outcome.authenticated());
        assert!(!outcome.permitted());
        assert_eq!(outcome.identity().unwrap().identity().username, "dana");
        assert_eq!(outcome.check("/c"), Err(AccessError::PermissionDenied("/c".to_string())));
    }

    #[tokio::test]
    async fn granted_path_is_allowed_even_with_query() {
        let outcome = filter()
            .authorize(&AccessRequest::new("editor", "/admin/a/b?tab=2", "GET"))
            .await;
        assert!(matches!(outcome, AuthOutcome::Allowed(_)));
    }

    #[tokio::test]
    async fn unregistered_path_is_allowed() {
        let outcome = filter()
            .authorize(&AccessRequest::new("orphan", "/admin/reports/custom", "POST"))
            .await;
        assert!(outcome.permitted());
    }

    #[tokio::test]
    async fn super_admin_is_always_permitted() {
        let filter = filter_with(AuthConfig::default(), true);
        for target in ["/admin/a", "/admin/c", "/x/y/z"] {
            let outcome = filter.authorize(&AccessRequest::new("super", target, "DELETE")).await;
            assert!(matches!(outcome, AuthOutcome::Allowed(ref u) if u.is_super_admin()));
        }
    }

    #[tokio::test]
    async fn prefix_is_stripped_before_membership_test() {
        // without the strip, "/admin/c" is not a catalog URI and would pass
        let filter = filter().with_prefix("/console");
        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/admin/c", "GET"))
            .await;
        assert!(outcome.permitted());

        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/console/c", "GET"))
            .await;
        assert!(!outcome.permitted());
    }

    #[tokio::test]
    async fn prefix_with_trailing_slash_still_enforces_denylist() {
        let config = AuthConfig {
            mount_prefix: "/admin/".to_string(),
            ..AuthConfig::default()
        };
        let filter = filter_with(config, false);

        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/admin/c", "GET"))
            .await;
        assert!(outcome.authenticated());
        assert!(!outcome.permitted());

        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/admin/a/b", "GET"))
            .await;
        assert!(outcome.permitted());
    }

    #[tokio::test]
    async fn catalog_failure_denies_authenticated_users() {
        let filter = filter_with(AuthConfig::default(), true);
        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/admin/unregistered", "GET"))
            .await;

        assert!(outcome.authenticated());
        assert!(matches!(
            outcome.check("/unregistered"),
            Err(AccessError::CatalogUnavailable(StoreError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn identity_without_menus_is_authenticated_by_default() {
        let outcome = filter()
            .authorize(&AccessRequest::new("orphan", "/admin/a", "GET"))
            .await;
        assert!(outcome.authenticated());
        assert!(!outcome.permitted());
    }

    #[tokio::test]
    async fn identity_without_menus_can_be_rejected() {
        let config = AuthConfig {
            require_granted_menu: true,
            ..AuthConfig::default()
        };
        let filter = filter_with(config, false);

        let outcome = filter
            .authorize(&AccessRequest::new("orphan", "/admin/a", "GET"))
            .await;
        assert_eq!(outcome, AuthOutcome::Unauthenticated);

        let outcome = filter
            .authorize(&AccessRequest::new("editor", "/admin/a", "GET"))
            .await;
        assert!(matches!(outcome, AuthOutcome::Allowed(_)));
    }
}
