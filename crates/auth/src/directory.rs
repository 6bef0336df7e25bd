//! Session token → user identity.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use gatehouse_core::{StoreError, StoreResult, UserId};

use crate::{AuthConfig, Role, UserIdentity};

/// User fields as returned by the external user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// UUID of the user, as text.
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub login_name: String,
    /// Avatar reference relative to the storage prefix.
    #[serde(default)]
    pub avatar: String,
    pub role: Role,
}

/// External user directory keyed by session token.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` when the token is unknown or expired.
    async fn resolve_token(&self, token: &str) -> StoreResult<Option<DirectoryRecord>>;
}

#[async_trait]
impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    async fn resolve_token(&self, token: &str) -> StoreResult<Option<DirectoryRecord>> {
        (**self).resolve_token(token).await
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("no identity for session token")]
    NotFound,

    #[error("user directory failed: {0}")]
    Directory(#[from] StoreError),
}

/// Adapter from a [`UserDirectory`] to [`UserIdentity`] values.
#[derive(Debug, Clone)]
pub struct IdentityResolver<D> {
    directory: D,
    config: AuthConfig,
}

impl<D> IdentityResolver<D>
where
    D: UserDirectory,
{
    pub fn new(directory: D, config: AuthConfig) -> Self {
        Self { directory, config }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Look a token up, keeping the reason for a miss.
    pub async fn try_resolve(&self, token: &str) -> Result<UserIdentity, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::NotFound);
        }

        let record = self
            .directory
            .resolve_token(token)
            .await?
            .ok_or(IdentityError::NotFound)?;

        let id: UserId = record.id.parse()?;

        Ok(UserIdentity {
            id,
            name: record.display_name,
            username: record.login_name,
            avatar: self.config.avatar_url(&record.avatar),
            role: record.role,
        })
    }

    /// Look a token up; directory failures count as "not found".
    pub async fn resolve(&self, token: &str) -> Option<UserIdentity> {
        match self.try_resolve(token).await {
            Ok(identity) => Some(identity),
            Err(IdentityError::NotFound) => None,
            Err(IdentityError::Directory(err)) => {
                warn!(error = %err, "user directory lookup failed; treating caller as anonymous");
                None
            }
        }
    }
}
