// ============================
// diary-core/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;

pub use password::{hash_password, verify_password};
pub use service::{Authenticated, CredentialService};
pub use token::{TokenKeys, TOKEN_TTL};
