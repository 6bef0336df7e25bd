use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use gatehouse_auth::{DirectoryRecord, UserDirectory};
use gatehouse_core::{StoreError, StoreResult};

#[derive(Debug, Clone)]
struct Session {
    record: DirectoryRecord,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    fn expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-memory session directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a non-expiring session under a caller-chosen token.
    pub fn insert(&self, token: impl Into<String>, record: DirectoryRecord) {
        self.put(token.into(), record, None);
    }

    /// Mint a random token valid for `ttl`, dropping sessions that have expired.
    pub fn issue(&self, record: DirectoryRecord, ttl: Duration) -> String {
        let now = Utc::now();
        if let Ok(mut map) = self.sessions.write() {
            map.retain(|_, session| !session.expired(now));
        }

        let token = Uuid::new_v4().simple().to_string();
        self.put(token.clone(), record, Some(now + ttl));
        token
    }

    pub fn revoke(&self, token: &str) -> bool {
        match self.sessions.write() {
            Ok(mut map) => map.remove(token).is_some(),
            Err(_) => false,
        }
    }

    fn put(&self, token: String, record: DirectoryRecord, expires_at: Option<DateTime<Utc>>) {
        if let Ok(mut map) = self.sessions.write() {
            map.insert(token, Session { record, expires_at });
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve_token(&self, token: &str) -> StoreResult<Option<DirectoryRecord>> {
        let now = Utc::now();
        {
            let map = self
                .sessions
                .read()
                .map_err(|_| StoreError::unavailable("session map poisoned"))?;

            match map.get(token) {
                None => return Ok(None),
                Some(session) if !session.expired(now) => return Ok(Some(session.record.clone())),
                Some(_) => {}
            }
        }

        // expired; evict
        let mut map = self
            .sessions
            .write()
            .map_err(|_| StoreError::unavailable("session map poisoned"))?;
        if map.get(token).is_some_and(|session| session.expired(now)) {
            map.remove(token);
        }
        Ok(None)
    }
}
