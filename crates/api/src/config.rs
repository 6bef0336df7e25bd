//! Application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the optional file named
//! by `GATEHOUSE_CONFIG`, then `GATEHOUSE_*` environment variables (nested keys
//! use `__`, e.g. `GATEHOUSE_AUTH__MOUNT_PREFIX=/console`).

use serde::{Deserialize, Serialize};
use tracing::info;

use gatehouse_auth::AuthConfig;

/// Cookie names read from incoming requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieNames {
    /// Cookie carrying the session token.
    pub token: String,
    /// Cookie whose presence marks a prior session.
    pub session: String,
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            token: "gatehouse_token".to_string(),
            session: "gatehouse_session".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub token_cookie: String,
    pub session_cookie: String,
    /// JSON seed for the in-memory directory and catalog.
    pub seed_path: Option<String>,
    /// When set, menus are read from Postgres instead of the seed.
    pub database_url: Option<String>,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let cookies = CookieNames::default();
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            token_cookie: cookies.token,
            session_cookie: cookies.session,
            seed_path: None,
            database_url: None,
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Ok(path) = std::env::var("GATEHOUSE_CONFIG") {
            info!(path = %path, "loading config file");
            builder = builder.add_source(config::File::with_name(&path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("GATEHOUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn cookies(&self) -> CookieNames {
        CookieNames {
            token: self.token_cookie.clone(),
            session: self.session_cookie.clone(),
        }
    }
}
