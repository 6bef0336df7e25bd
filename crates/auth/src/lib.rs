//! `gatehouse-auth`: request-level access decisions (identity + menu denylist).
//!
//! This crate knows nothing about HTTP or storage: the user
//! directory and the menu catalog are consumed through traits, and requests are
//! described by the transport-agnostic [`AccessRequest`].

pub mod authorize;
pub mod config;
pub mod directory;
pub mod identity;
pub mod menu;
pub mod permissions;
pub mod roles;

pub use authorize::{AccessError, AccessRequest, AuthOutcome, AuthorizationFilter};
pub use config::AuthConfig;
pub use directory::{DirectoryRecord, IdentityError, IdentityResolver, UserDirectory};
pub use identity::{ResolvedIdentity, UserIdentity};
pub use menu::{MenuCatalog, MenuEntry};
pub use permissions::{Denylist, PermissionResolver, derive_denylist, reachable_entries, reachable_uris};
pub use roles::Role;
