//! Error kinds raised by the collaborators around the core.
//!
//! The challenge arithmetic itself cannot fail; these cover credentials,
//! stored rows and photo files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account for {0} already exists")]
    EmailTaken(String),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Not signed in. Run `hard75 login` first")]
    NotSignedIn,

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Photo {0} not found")]
    PhotoNotFound(i64),

    #[error("Stored date '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("Unsupported photo file: {0}")]
    UnsupportedFile(String),
}
