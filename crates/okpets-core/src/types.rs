//! Account identity and session credential types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque OK.ru user identifier — the key under which automation runs.
///
/// Stable for the lifetime of a user's chat interaction; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(uid: &str) -> Self {
        Self(uid.to_string())
    }
}

impl From<String> for AccountId {
    fn from(uid: String) -> Self {
        Self(uid)
    }
}

/// The cookie set authenticating mpets.mobi calls for one account.
///
/// Handed to exactly one sequencer at start time and never shared between
/// tasks — each HTTP call renders its own `Cookie` header from this set,
/// so no ambient cookie jar can leak sessions across accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    cookies: BTreeMap<String, String>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Render the set as a `Cookie` header value, or `None` when empty.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl From<BTreeMap<String, String>> for SessionCredentials {
    fn from(cookies: BTreeMap<String, String>) -> Self {
        Self { cookies }
    }
}
