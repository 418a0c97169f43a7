//! Authentication error types.

use thiserror::Error;

use mombabyshop_core::EmailError;

use crate::storage::StorageError;

/// Errors that can occur during auth session operations.
///
/// Credential and validation failures are structured results for the UI
/// to render as a toast message; nothing here is fatal.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Login did not match any demo account for the requested role.
    #[error("email or password is incorrect for the selected role")]
    InvalidCredentials,

    /// Registration was missing a required field.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Password change supplied the wrong current password.
    #[error("current password is incorrect")]
    WrongPassword,

    /// Operation requires a logged-in session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The durable store rejected the write; the session is unchanged.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
