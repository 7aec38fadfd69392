// ============================
// diary-core/src/diary.rs
// ============================
//! Owner-scoped diary entry operations.
//!
//! Every operation takes the acting owner (from
//! [`CredentialService::verify_token`](crate::CredentialService::verify_token))
//! as its first parameter and the store applies it in every query
//! predicate, so an entry belonging to someone else is indistinguishable
//! from one that does not exist.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::DiaryEntry;
use crate::store::Store;

pub struct DiaryStore {
    store: Arc<dyn Store>,
}

impl DiaryStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create an entry owned by `owner`. Content that trims to nothing
    /// is rejected; otherwise it is stored exactly as given.
    pub async fn create(&self, owner: Uuid, content: &str) -> Result<DiaryEntry> {
        if content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        let entry = DiaryEntry {
            id: Uuid::new_v4(),
            owner_id: owner,
            content: content.to_string(),
            created_at: Utc::now(),
            seq: 0, // assigned by the store
        };
        self.store.insert_entry(entry).await
    }

    /// All entries for `owner`, newest first. Entries created within the
    /// same timestamp tick keep their insertion order, latest first.
    pub async fn list(&self, owner: Uuid) -> Result<Vec<DiaryEntry>> {
        let mut entries = self.store.entries_for_owner(owner).await?;
        entries.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
        Ok(entries)
    }

    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<DiaryEntry> {
        self.store.entry(owner, id).await?.ok_or(Error::NotFound)
    }

    /// Replace an entry's content in place; id and creation time are
    /// untouched.
    pub async fn update(&self, owner: Uuid, id: Uuid, content: &str) -> Result<DiaryEntry> {
        if content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        let mut entry = self.get(owner, id).await?;
        entry.content = content.to_string();
        self.store.put_entry(&entry).await?;
        Ok(entry)
    }

    /// Remove an entry permanently.
    pub async fn delete(&self, owner: Uuid, id: Uuid) -> Result<()> {
        if self.store.delete_entry(owner, id).await? {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}
