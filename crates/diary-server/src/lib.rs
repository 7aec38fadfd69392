// ============================
// diary-server/src/lib.rs
// ============================
//! HTTP collaborator layer over `diary-core`: extracts raw fields from
//! requests, calls the core, and maps failure kinds to status codes.

pub mod error;
pub mod router;

use std::sync::Arc;

use diary_core::{CredentialService, DiaryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential service
    pub credentials: Arc<CredentialService>,
    /// Owner-scoped entry store
    pub diaries: Arc<DiaryStore>,
}
