// ============================
// diary-core/src/error.rs
// ============================
//! Central error type for the core.
//!
//! Every fallible core operation resolves to one of these kinds; the
//! server layer owns the mapping to status codes and user-facing copy.
//! Display strings carry no secrets and no store internals.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The username is already registered.
    #[error("username already taken")]
    DuplicateUsername,

    /// Unknown username or wrong password. Deliberately a single kind, so
    /// a response never confirms whether a username exists.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No token was supplied.
    #[error("missing session token")]
    MissingToken,

    /// The token is malformed, tampered with, or not bound to an account.
    #[error("invalid session token")]
    InvalidToken,

    /// The token's expiry instant has passed.
    #[error("session token expired")]
    ExpiredToken,

    /// Entry content was empty after trimming whitespace.
    #[error("entry content must not be empty")]
    EmptyContent,

    /// No entry with that id exists for the acting owner. An entry owned
    /// by someone else reports the same kind.
    #[error("entry not found")]
    NotFound,

    /// The store timed out or failed; details stay in the logs.
    #[error("store unavailable")]
    StoreUnavailable,

    /// A fault that should not occur with a valid signing key.
    #[error("internal error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable_and_secret_free() {
        assert_eq!(Error::DuplicateUsername.to_string(), "username already taken");
        assert_eq!(
            Error::InvalidCredentials.to_string(),
            "invalid username or password"
        );
        assert_eq!(Error::NotFound.to_string(), "entry not found");
        assert_eq!(Error::StoreUnavailable.to_string(), "store unavailable");
    }

    #[test]
    fn credential_failures_share_one_kind() {
        // Both the unknown-user and wrong-password paths surface this
        // exact variant; there is no sibling that would leak existence.
        let err = Error::InvalidCredentials;
        assert!(matches!(err, Error::InvalidCredentials));
    }
}
