// ============================
// diary-core/src/auth/service.rs
// ============================
//! Credential service: registration, login, and token verification.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::token::TokenKeys;
use crate::error::{Error, Result};
use crate::model::{Account, AccountProfile};
use crate::store::Store;

/// Outcome of a successful registration or login: the public account
/// fields and a fresh session token.
#[derive(Debug)]
pub struct Authenticated {
    pub account: AccountProfile,
    pub token: String,
}

pub struct CredentialService {
    store: Arc<dyn Store>,
    keys: TokenKeys,
}

impl CredentialService {
    pub fn new(store: Arc<dyn Store>, keys: TokenKeys) -> Self {
        Self { store, keys }
    }

    /// Register a new account and sign the caller in.
    ///
    /// Duplicate usernames are decided by the store at write time, so a
    /// race between identical registrations has exactly one winner.
    pub async fn register(&self, username: &str, password: &str) -> Result<Authenticated> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidCredentials);
        }
        let account = Account {
            id: Uuid::new_v4(),
            username: username.to_string(),
            secret_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.store.insert_account(&account).await?;
        let token = self.keys.issue(account.id)?;
        tracing::debug!(account = %account.id, "account registered");
        Ok(Authenticated {
            account: account.profile(),
            token,
        })
    }

    /// Verify a username/password pair and issue a fresh token.
    ///
    /// Unknown usernames and wrong passwords fail identically, so a
    /// response never confirms whether a username exists.
    pub async fn login(&self, username: &str, password: &str) -> Result<Authenticated> {
        if username.is_empty() || password.is_empty() {
            return Err(Error::InvalidCredentials);
        }
        let account = self
            .store
            .find_account_by_username(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;
        if !verify_password(&account.secret_hash, password) {
            return Err(Error::InvalidCredentials);
        }
        let token = self.keys.issue(account.id)?;
        tracing::debug!(account = %account.id, "login succeeded");
        Ok(Authenticated {
            account: account.profile(),
            token,
        })
    }

    /// Validate a caller-supplied token and return the acting identity.
    /// The caller passes this id to every [`crate::DiaryStore`] operation.
    pub fn verify_token(&self, token: Option<&str>) -> Result<Uuid> {
        self.keys.verify(token)
    }
}
