// ============================
// diary-core/src/store/mod.rs
// ============================
//! Persistence abstraction over a document store.

mod flat_file;

pub use flat_file::FlatFileStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Account, DiaryEntry};

/// Trait for document store backends.
///
/// Entry lookups take the owner alongside the id; the backend must apply
/// both in its query predicate so a foreign entry is indistinguishable
/// from a missing one. All operations are bounded in time and surface
/// [`StoreUnavailable`](crate::error::Error::StoreUnavailable) on
/// timeout or backend failure.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persist a new account. The store is the sole arbiter of username
    /// uniqueness: of two concurrent inserts with the same username,
    /// exactly one succeeds and the other gets
    /// [`DuplicateUsername`](crate::error::Error::DuplicateUsername).
    async fn insert_account(&self, account: &Account) -> Result<()>;

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Persist a new entry, assigning its insertion sequence number.
    /// Returns the entry as stored.
    async fn insert_entry(&self, entry: DiaryEntry) -> Result<DiaryEntry>;

    /// Fetch one entry, filtered by owner and id.
    async fn entry(&self, owner: Uuid, id: Uuid) -> Result<Option<DiaryEntry>>;

    /// All entries belonging to `owner`, in no particular order.
    async fn entries_for_owner(&self, owner: Uuid) -> Result<Vec<DiaryEntry>>;

    /// Overwrite an existing entry document.
    async fn put_entry(&self, entry: &DiaryEntry) -> Result<()>;

    /// Remove an entry. Returns `false` when nothing matched the owner
    /// and id pair.
    async fn delete_entry(&self, owner: Uuid, id: Uuid) -> Result<bool>;
}
