// ============================
// diary-core/src/store/flat_file.rs
// ============================
//! Flat-file implementation of the [`Store`] trait.
//!
//! One JSON document per record: `accounts/<id>.json` and
//! `diaries/<id>.json`, plus a `usernames/` index whose file names are
//! the base64url-encoded username and whose content is the account id.
//! The index file is created with `create_new`, which makes the
//! filesystem the arbiter of concurrent registrations: one winner, the
//! rest see `AlreadyExists`.

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use super::Store;
use crate::error::{Error, Result};
use crate::model::{Account, DiaryEntry};

const ACCOUNTS_DIR: &str = "accounts";
const DIARIES_DIR: &str = "diaries";
const USERNAMES_DIR: &str = "usernames";

pub struct FlatFileStore {
    root: PathBuf,
    op_timeout: Duration,
    next_seq: AtomicU64,
}

impl FlatFileStore {
    /// Open a store rooted at `root`, creating the collection
    /// directories and recovering the insertion counter from existing
    /// entries.
    pub fn open<P: AsRef<Path>>(root: P, op_timeout: Duration) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join(ACCOUNTS_DIR))?;
        std::fs::create_dir_all(root.join(DIARIES_DIR))?;
        std::fs::create_dir_all(root.join(USERNAMES_DIR))?;
        let next_seq = AtomicU64::new(max_seq(&root.join(DIARIES_DIR))? + 1);
        Ok(Self {
            root,
            op_timeout,
            next_seq,
        })
    }

    fn account_path(&self, id: Uuid) -> PathBuf {
        self.root.join(ACCOUNTS_DIR).join(format!("{id}.json"))
    }

    fn entry_path(&self, id: Uuid) -> PathBuf {
        self.root.join(DIARIES_DIR).join(format!("{id}.json"))
    }

    fn username_index_path(&self, username: &str) -> PathBuf {
        self.root
            .join(USERNAMES_DIR)
            .join(URL_SAFE_NO_PAD.encode(username.as_bytes()))
    }

    /// Run a store operation under the configured bound. An elapsed
    /// timeout surfaces as `StoreUnavailable`, never as a hang.
    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| {
                tracing::warn!("store operation timed out");
                Error::StoreUnavailable
            })?
    }
}

/// Highest sequence number currently on disk. Runs once at open, before
/// the store handle is shared.
fn max_seq(dir: &Path) -> std::io::Result<u64> {
    let mut max = 0;
    for dent in std::fs::read_dir(dir)? {
        let bytes = std::fs::read(dent?.path())?;
        if let Ok(entry) = serde_json::from_slice::<DiaryEntry>(&bytes) {
            max = max.max(entry.seq);
        }
    }
    Ok(max)
}

fn store_io(err: std::io::Error) -> Error {
    tracing::warn!(error = %err, "store i/o failure");
    Error::StoreUnavailable
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|err| {
            tracing::warn!(error = %err, "corrupt store document");
            Error::StoreUnavailable
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(store_io(err)),
    }
}

async fn write_json<T: Serialize>(path: &Path, doc: &T) -> Result<()> {
    let bytes = serde_json::to_vec(doc).map_err(|err| {
        tracing::warn!(error = %err, "document serialization failed");
        Error::StoreUnavailable
    })?;
    fs::write(path, bytes).await.map_err(store_io)
}

#[async_trait]
impl Store for FlatFileStore {
    async fn insert_account(&self, account: &Account) -> Result<()> {
        let account_path = self.account_path(account.id);
        let index_path = self.username_index_path(&account.username);
        self.bounded(async {
            // The account document goes first; until the index exists the
            // username is still free, so a crash here leaves only an
            // unreachable orphan document.
            write_json(&account_path, account).await?;

            let open = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&index_path)
                .await;
            let mut index = match open {
                Ok(file) => file,
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    let _ = fs::remove_file(&account_path).await;
                    return Err(Error::DuplicateUsername);
                }
                Err(err) => return Err(store_io(err)),
            };
            index
                .write_all(account.id.to_string().as_bytes())
                .await
                .map_err(store_io)
        })
        .await
    }

    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        let index_path = self.username_index_path(username);
        self.bounded(async {
            let id = match fs::read_to_string(&index_path).await {
                Ok(raw) => Uuid::parse_str(raw.trim()).map_err(|err| {
                    tracing::warn!(error = %err, "corrupt username index");
                    Error::StoreUnavailable
                })?,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(store_io(err)),
            };
            read_json::<Account>(&self.account_path(id)).await
        })
        .await
    }

    async fn insert_entry(&self, mut entry: DiaryEntry) -> Result<DiaryEntry> {
        entry.seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let path = self.entry_path(entry.id);
        self.bounded(write_json(&path, &entry)).await?;
        Ok(entry)
    }

    async fn entry(&self, owner: Uuid, id: Uuid) -> Result<Option<DiaryEntry>> {
        let path = self.entry_path(id);
        let found = self.bounded(read_json::<DiaryEntry>(&path)).await?;
        // Owner is part of the predicate: a foreign entry reads as absent.
        Ok(found.filter(|entry| entry.owner_id == owner))
    }

    async fn entries_for_owner(&self, owner: Uuid) -> Result<Vec<DiaryEntry>> {
        let dir = self.root.join(DIARIES_DIR);
        self.bounded(async {
            let mut entries = Vec::new();
            let mut dents = fs::read_dir(&dir).await.map_err(store_io)?;
            while let Some(dent) = dents.next_entry().await.map_err(store_io)? {
                if let Some(entry) = read_json::<DiaryEntry>(&dent.path()).await? {
                    if entry.owner_id == owner {
                        entries.push(entry);
                    }
                }
            }
            Ok(entries)
        })
        .await
    }

    async fn put_entry(&self, entry: &DiaryEntry) -> Result<()> {
        let path = self.entry_path(entry.id);
        self.bounded(write_json(&path, entry)).await
    }

    async fn delete_entry(&self, owner: Uuid, id: Uuid) -> Result<bool> {
        let path = self.entry_path(id);
        self.bounded(async {
            let found = read_json::<DiaryEntry>(&path).await?;
            match found.filter(|entry| entry.owner_id == owner) {
                Some(_) => match fs::remove_file(&path).await {
                    Ok(()) => Ok(true),
                    // Lost a race with another delete of the same entry.
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
                    Err(err) => Err(store_io(err)),
                },
                None => Ok(false),
            }
        })
        .await
    }
}
