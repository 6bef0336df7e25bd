//! Menu-derived permissions.
//!
//! A role is never given an allow-list. Instead the URIs of the menu entries it
//! can reach are subtracted from the URIs of the whole catalog, and the rest
//! becomes the role's *denylist*. Requests are checked against the denylist
//! only, so paths that are not in the catalog at all are allowed.
//!
//! Reachability uses a single-level parent check: a child grant counts when a
//! row for its direct parent is present in the same role's join result. The
//! parent's own reachability and further ancestors are not consulted.

use std::collections::HashSet;

use tracing::{debug, error, warn};

use gatehouse_core::{MenuId, StoreResult};

use crate::{MenuCatalog, MenuEntry, ResolvedIdentity, Role, UserIdentity};

// ─────────────────────────────────────────────────────────────────────────────
// Denylist
// ─────────────────────────────────────────────────────────────────────────────

/// Set of URIs a role must not access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denylist {
    /// Explicit set of catalog URIs.
    Uris(HashSet<String>),
    /// Every path is denied (grants could not be loaded).
    Everything,
}

impl Denylist {
    pub fn empty() -> Self {
        Self::Uris(HashSet::new())
    }

    pub fn contains(&self, path: &str) -> bool {
        match self {
            Denylist::Uris(uris) => uris.contains(path),
            Denylist::Everything => true,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Denylist::Uris(uris) if uris.is_empty())
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<HashSet<String>> for Denylist {
    fn from(value: HashSet<String>) -> Self {
        Self::Uris(value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pure derivation
// ─────────────────────────────────────────────────────────────────────────────

/// Join rows that count as granted.
///
/// Root rows are always kept; a child row is kept only when some row in
/// `granted` has `id == child.parent_id`.
pub fn reachable_entries(granted: &[MenuEntry]) -> Vec<&MenuEntry> {
    let present: HashSet<MenuId> = granted.iter().map(|m| m.id).collect();

    granted
        .iter()
        .filter(|m| m.is_root() || present.contains(&m.parent_id))
        .collect()
}

/// Navigable URIs of the granted rows.
pub fn reachable_uris(granted: &[MenuEntry]) -> HashSet<String> {
    reachable_entries(granted)
        .into_iter()
        .filter(|m| m.is_navigable())
        .map(|m| m.uri.clone())
        .collect()
}

/// Navigable URIs of the catalog (the denylist universe).
pub fn catalog_uris(catalog: &[MenuEntry]) -> HashSet<String> {
    catalog
        .iter()
        .filter(|m| m.is_navigable())
        .map(|m| m.uri.clone())
        .collect()
}

/// `catalog URIs − reachable URIs`.
pub fn derive_denylist(catalog: &[MenuEntry], granted: &[MenuEntry]) -> HashSet<String> {
    let reachable = reachable_uris(granted);
    catalog_uris(catalog)
        .into_iter()
        .filter(|uri| !reachable.contains(uri))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

/// Computes reachable sets and denylists from a [`MenuCatalog`].
///
/// Holds no cache: every call reads the catalog again.
#[derive(Debug, Clone)]
pub struct PermissionResolver<C> {
    catalog: C,
    super_admin: Role,
}

impl<C> PermissionResolver<C>
where
    C: MenuCatalog,
{
    pub fn new(catalog: C, super_admin: Role) -> Self {
        Self {
            catalog,
            super_admin,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// URIs reachable by `role`. The super-admin reaches the whole catalog.
    pub async fn reachable_set(&self, role: Role) -> StoreResult<HashSet<String>> {
        if role == self.super_admin {
            let all = self.catalog.list_all().await?;
            return Ok(catalog_uris(&all));
        }

        let granted = self.catalog.list_for_role(role).await?;
        Ok(reachable_uris(&granted))
    }

    /// Denylist for `role`. The super-admin gets an empty one without any catalog query.
    pub async fn denylist(&self, role: Role) -> StoreResult<Denylist> {
        if role == self.super_admin {
            return Ok(Denylist::empty());
        }

        let (_, denylist) = self.grants(role).await?;
        Ok(denylist)
    }

    /// Granted menu ids and denylist for a non-super-admin role.
    async fn grants(&self, role: Role) -> StoreResult<(Vec<MenuId>, Denylist)> {
        let all = self.catalog.list_all().await?;
        let granted = self.catalog.list_for_role(role).await?;

        let menu_ids = reachable_entries(&granted).into_iter().map(|m| m.id).collect();
        let denylist = derive_denylist(&all, &granted);

        debug!(
            role = %role,
            catalog = all.len(),
            granted = granted.len(),
            denied = denylist.len(),
            "derived menu denylist"
        );

        Ok((menu_ids, Denylist::Uris(denylist)))
    }

    /// Attach grants to an identity.
    ///
    /// A catalog failure yields an identity that is denied every path.
    pub async fn resolve(&self, identity: UserIdentity) -> ResolvedIdentity {
        let role = identity.role;

        if role == self.super_admin {
            let menu_ids = match self.catalog.list_all().await {
                Ok(all) => all.into_iter().map(|m| m.id).collect(),
                Err(err) => {
                    warn!(error = %err, "menu catalog unavailable; super-admin menu ids left empty");
                    Vec::new()
                }
            };
            return ResolvedIdentity::new(identity, true, menu_ids, Denylist::empty());
        }

        match self.grants(role).await {
            Ok((menu_ids, denylist)) => ResolvedIdentity::new(identity, false, menu_ids, denylist),
            Err(err) => {
                error!(role = %role, error = %err, "menu catalog unavailable; denying all paths");
                ResolvedIdentity::degraded(identity, err)
            }
        }
    }
}
