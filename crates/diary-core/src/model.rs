// ============================
// diary-core/src/model.rs
// ============================
//! Persistent record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account as stored. `secret_hash` stays inside the core;
/// API responses carry [`AccountProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Unique, case-sensitive. Uniqueness is enforced by the store at
    /// write time, not by a pre-check.
    pub username: String,
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// The public projection: everything but the hash.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Public account fields, safe to serialize into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: Uuid,
    pub username: String,
}

/// A diary entry owned by exactly one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    /// Immutable once set; every lookup filters by it.
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Store-assigned insertion counter; breaks ordering ties when two
    /// entries share a timestamp.
    pub seq: u64,
}
