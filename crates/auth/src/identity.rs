use serde::{Deserialize, Serialize};

use gatehouse_core::{MenuId, StoreError, UserId};

use crate::{Denylist, Role};

/// Identity of the caller, as reported by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
    /// Absolute avatar URL, or empty.
    pub avatar: String,
    pub role: Role,
}

impl UserIdentity {
    /// Substitute `{{.AuthId}}`, `{{.AuthName}}` and `{{.AuthUserName}}` in `template`.
    ///
    /// Single left-to-right pass: substituted values are never scanned again.
    pub fn render_template(&self, template: &str) -> String {
        let id = self.id.to_string();
        let fields: [(&str, &str); 3] = [
            ("{{.AuthId}}", &id),
            ("{{.AuthName}}", &self.name),
            ("{{.AuthUserName}}", &self.username),
        ];

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("{{.") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match fields.iter().find(|(key, _)| tail.starts_with(key)) {
                Some((key, value)) => {
                    out.push_str(value);
                    rest = &tail[key.len()..];
                }
                None => {
                    out.push_str("{{.");
                    rest = &tail[3..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// An identity together with its computed menu grants.
///
/// Built once per request by [`crate::PermissionResolver::resolve`]; the role
/// and the denylist cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    identity: UserIdentity,
    super_admin: bool,
    menu_ids: Vec<MenuId>,
    denylist: Denylist,
    degraded: Option<StoreError>,
}

impl ResolvedIdentity {
    pub(crate) fn new(
        identity: UserIdentity,
        super_admin: bool,
        menu_ids: Vec<MenuId>,
        denylist: Denylist,
    ) -> Self {
        Self {
            identity,
            super_admin,
            menu_ids,
            denylist,
            degraded: None,
        }
    }

    /// Identity whose grants could not be loaded; every path is denied.
    pub(crate) fn degraded(identity: UserIdentity, err: StoreError) -> Self {
        Self {
            identity,
            super_admin: false,
            menu_ids: Vec::new(),
            denylist: Denylist::Everything,
            degraded: Some(err),
        }
    }

    pub fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn is_super_admin(&self) -> bool {
        self.super_admin
    }

    /// Ids of the granted menu entries (root grants plus children whose parent is granted).
    pub fn menu_ids(&self) -> &[MenuId] {
        &self.menu_ids
    }

    pub fn has_menu(&self) -> bool {
        self.super_admin || !self.menu_ids.is_empty()
    }

    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }

    /// Catalog failure that forced a deny-everything denylist, if any.
    pub fn catalog_error(&self) -> Option<&StoreError> {
        self.degraded.as_ref()
    }

    /// Whether an already-normalized path may be accessed.
    ///
    /// Paths missing from the catalog are allowed.
    pub fn permits(&self, path: &str) -> bool {
        self.super_admin || !self.denylist.contains(path)
    }

    /// `Some(path)` when accessible, for filtering rendered menu links.
    pub fn permitted_path<'a>(&self, path: &'a str) -> Option<&'a str> {
        self.permits(path).then_some(path)
    }

    pub fn render_template(&self, template: &str) -> String {
        self.identity.render_template(template)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity {
            id: UserId::new(),
            name: "Alice".to_string(),
            username: "alice".to_string(),
            avatar: String::new(),
            role: Role::new(2),
        }
    }

    #[test]
    fn template_substitutes_identity_fields() {
        let user = alice();
        let out = user.render_template("{{.AuthName}} ({{.AuthUserName}}) #{{.AuthId}}");
        assert_eq!(out, format!("Alice (alice) #{}", user.id));
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let user = UserIdentity {
            name: "{{.AuthUserName}}".to_string(),
            username: "dana".to_string(),
            ..alice()
        };
        assert_eq!(user.render_template("{{.AuthName}}"), "{{.AuthUserName}}");
        assert_eq!(
            user.render_template("{{.AuthName}}/{{.AuthUserName}}/{{.Other}}"),
            "{{.AuthUserName}}/dana/{{.Other}}"
        );
    }

    #[test]
    fn permitted_path_filters_denied_links() {
        let deny: HashSet<String> = ["/c".to_string()].into_iter().collect();
        let resolved = ResolvedIdentity::new(alice(), false, vec![MenuId::new(1)], Denylist::from(deny));

        assert_eq!(resolved.permitted_path("/a"), Some("/a"));
        assert_eq!(resolved.permitted_path("/c"), None);
        assert!(resolved.permits("/not/in/catalog"));
    }

    #[test]
    fn degraded_identity_denies_everything() {
        let resolved = ResolvedIdentity::degraded(alice(), StoreError::unavailable("db down"));
        assert!(!resolved.permits("/a"));
        assert!(!resolved.permits("/anything/else"));
        assert!(!resolved.has_menu());
        assert!(resolved.catalog_error().is_some());
    }
}
