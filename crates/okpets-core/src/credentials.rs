//! In-memory credential store.
//!
//! Credential acquisition is an external precondition of the autopilot:
//! the OAuth callback deposits the OK.ru access token here, and a game
//! session cookie set may be deposited by whatever collaborator owns the
//! mpets login. Nothing is persisted — an empty cookie set is handed out
//! for accounts that never logged in, matching the behavior of the relay
//! this replaces.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::types::{AccountId, SessionCredentials};

/// Everything we hold for one account.
#[derive(Debug, Clone, Default)]
pub struct AccountCredentials {
    /// OK.ru `mediatopic.post` access token, used for chat replies.
    pub access_token: String,
    /// mpets.mobi session cookies, used by the autopilot.
    pub game_session: SessionCredentials,
}

/// Thread-safe account → credentials table shared by the gateway and the
/// command dispatcher.
#[derive(Debug, Default)]
pub struct CredentialStore {
    inner: Mutex<HashMap<AccountId, AccountCredentials>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_access_token(&self, account: AccountId, token: impl Into<String>) {
        let mut inner = self.inner.lock().unwrap();
        inner.entry(account).or_default().access_token = token.into();
    }

    pub fn set_game_session(&self, account: AccountId, session: SessionCredentials) {
        let mut inner = self.inner.lock().unwrap();
        inner.entry(account).or_default().game_session = session;
    }

    pub fn access_token(&self, account: &AccountId) -> Option<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .get(account)
            .filter(|c| !c.access_token.is_empty())
            .map(|c| c.access_token.clone())
    }

    /// Game session for an account, empty when the account never logged in.
    pub fn game_session(&self, account: &AccountId) -> SessionCredentials {
        let inner = self.inner.lock().unwrap();
        inner
            .get(account)
            .map(|c| c.game_session.clone())
            .unwrap_or_default()
    }

    pub fn remove(&self, account: &AccountId) {
        self.inner.lock().unwrap().remove(account);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_account_gets_empty_session() {
        let store = CredentialStore::new();
        let account = AccountId::from("nobody");
        assert!(store.game_session(&account).is_empty());
        assert_eq!(store.access_token(&account), None);
    }

    #[test]
    fn test_token_and_session_are_independent() {
        let store = CredentialStore::new();
        let account = AccountId::from("42");

        store.set_access_token(account.clone(), "tok");
        assert_eq!(store.access_token(&account).as_deref(), Some("tok"));
        assert!(store.game_session(&account).is_empty());

        let mut session = SessionCredentials::new();
        session.set("session", "s1");
        store.set_game_session(account.clone(), session);
        assert_eq!(store.access_token(&account).as_deref(), Some("tok"));
        assert_eq!(store.game_session(&account).len(), 1);
    }

    #[test]
    fn test_empty_token_reads_as_absent() {
        let store = CredentialStore::new();
        let account = AccountId::from("42");
        store.set_access_token(account.clone(), "");
        assert_eq!(store.access_token(&account), None);
    }
}
