use serde::{Deserialize, Serialize};

/// Privilege level of a user.
///
/// Roles are opaque integers at this layer; which value is the super-admin
/// sentinel is decided by [`crate::AuthConfig::super_admin_role`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Role(i64);

impl Role {
    pub const fn new(level: i64) -> Self {
        Self(level)
    }

    pub const fn level(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Role {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
