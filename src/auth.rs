//! Local credential store and session.
//!
//! Passwords are stored as Argon2id PHC strings. The signed-in user id lives in
//! `app_meta` under `session_user`.

use anyhow::Result;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::{info, warn};
use rand::RngCore;
use rusqlite::Connection;

use crate::db::repository::{MetaRepo, ProfileRepo, UserRepo};
use crate::error::AuthError;
use crate::models::User;

pub const MIN_PASSWORD_LEN: usize = 6;
const SALT_SIZE: usize = 16;
const SESSION_KEY: &str = "session_user";

fn normalize_email(email: &str) -> Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(AuthError::InvalidEmail(email))
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let mut salt = [0u8; SALT_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(|e| AuthError::Hash(e.to_string()))?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("unreadable password hash: {}", e);
            false
        }
    }
}

/// Register a new account and its (not yet started) challenge profile.
pub fn sign_up(
    conn: &Connection,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<User> {
    let email = normalize_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LEN).into());
    }
    if UserRepo::find_by_email(conn, &email)?.is_some() {
        return Err(AuthError::EmailTaken(email).into());
    }

    let hash = hash_password(password)?;
    let user = UserRepo::create(conn, &email, &hash)?;
    ProfileRepo::create(conn, user.id, display_name)?;
    info!("signed up {}", user.email);
    Ok(user)
}

pub fn sign_in(conn: &Connection, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
    let Some((user, stored)) = UserRepo::find_by_email(conn, &email)? else {
        return Err(AuthError::InvalidCredentials.into());
    };
    if !verify_password(password, &stored) {
        return Err(AuthError::InvalidCredentials.into());
    }

    MetaRepo::set(conn, SESSION_KEY, &user.id.to_string())?;
    info!("signed in {}", user.email);
    Ok(user)
}

pub fn sign_out(conn: &Connection) -> Result<()> {
    MetaRepo::delete(conn, SESSION_KEY)
}

/// The signed-in user, if the stored session still points at one.
pub fn current_user(conn: &Connection) -> Result<Option<User>> {
    let Some(value) = MetaRepo::get(conn, SESSION_KEY)? else {
        return Ok(None);
    };
    let Ok(id) = value.parse::<i64>() else {
        warn!("discarding malformed session value '{}'", value);
        sign_out(conn)?;
        return Ok(None);
    };
    let user = UserRepo::get(conn, id)?;
    if user.is_none() {
        warn!("session points at missing user {}", id);
        sign_out(conn)?;
    }
    Ok(user)
}

pub fn require_user(conn: &Connection) -> Result<User> {
    current_user(conn)?.ok_or_else(|| AuthError::NotSignedIn.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn auth_err(err: &anyhow::Error) -> &AuthError {
        err.downcast_ref::<AuthError>().expect("expected AuthError")
    }

    #[test]
    fn sign_up_then_sign_in() {
        let conn = conn();
        let user = sign_up(&conn, " Challenger@75Hard.app ", "75HardChallenge!", None).unwrap();
        assert_eq!(user.email, "challenger@75hard.app");

        let profile = ProfileRepo::get(&conn, user.id).unwrap().unwrap();
        assert_eq!(profile.display_name, "Challenger");
        assert!(profile.start_date.is_none());

        assert!(current_user(&conn).unwrap().is_none());
        let signed_in = sign_in(&conn, "CHALLENGER@75hard.app", "75HardChallenge!").unwrap();
        assert_eq!(signed_in.id, user.id);
        assert_eq!(require_user(&conn).unwrap().id, user.id);
    }

    #[test]
    fn wrong_password_is_rejected() {
        let conn = conn();
        sign_up(&conn, "a@b.co", "secret1", None).unwrap();
        let err = sign_in(&conn, "a@b.co", "secret2").unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::InvalidCredentials));
        assert!(current_user(&conn).unwrap().is_none());
    }

    #[test]
    fn unknown_email_is_rejected() {
        let conn = conn();
        let err = sign_in(&conn, "nobody@b.co", "secret1").unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::InvalidCredentials));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let conn = conn();
        sign_up(&conn, "a@b.co", "secret1", Some("Sam")).unwrap();
        let err = sign_up(&conn, "A@B.CO", "secret2", None).unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::EmailTaken(_)));
    }

    #[test]
    fn validates_input() {
        let conn = conn();
        let err = sign_up(&conn, "not-an-email", "secret1", None).unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::InvalidEmail(_)));
        let err = sign_up(&conn, "a@b.co", "short", None).unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::WeakPassword(6)));
    }

    #[test]
    fn sign_out_clears_session() {
        let conn = conn();
        sign_up(&conn, "a@b.co", "secret1", None).unwrap();
        sign_in(&conn, "a@b.co", "secret1").unwrap();
        sign_out(&conn).unwrap();

        let err = require_user(&conn).unwrap_err();
        assert!(matches!(auth_err(&err), AuthError::NotSignedIn));
    }

    #[test]
    fn stale_session_is_discarded() {
        let conn = conn();
        MetaRepo::set(&conn, SESSION_KEY, "42").unwrap();
        assert!(current_user(&conn).unwrap().is_none());
        assert!(MetaRepo::get(&conn, SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same password", &a));
        assert!(!verify_password("other password", &a));
        assert!(!verify_password("same password", "garbage"));
    }
}
