//! Message lookup for responder output.

use std::collections::HashMap;

/// Message keys used by the default responders.
pub mod keys {
    pub const PERMISSION_DENIED: &str = "permission denied";
    pub const NO_PERMISSION: &str = "403: you do not have permission to access this page";
    pub const LOGIN_INFO: &str = "login info";
    pub const LOGIN_OVERDUE: &str = "login overdue, please login again";
    pub const GOT_IT: &str = "got it";
}

/// Looks up display text for a message key.
pub trait Localizer: Send + Sync {
    fn localize(&self, key: &str) -> String;
}

/// Returns keys verbatim; the keys are English text.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn localize(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Fixed translation table; unknown keys fall back to the key itself.
#[derive(Debug, Clone, Default)]
pub struct TableLocalizer {
    entries: HashMap<String, String>,
}

impl TableLocalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }
}

impl Localizer for TableLocalizer {
    fn localize(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
