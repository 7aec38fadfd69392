// ============================
// diary-core/src/lib.rs
// ============================
//! Core of the private diary backend: credential handling and the
//! owner-scoped entry store. HTTP plumbing lives in `diary-server`.

pub mod auth;
pub mod config;
pub mod diary;
pub mod error;
pub mod model;
pub mod store;

pub use auth::CredentialService;
pub use diary::DiaryStore;
pub use error::Error;
