//! Progress photos: blob upload plus the gallery row that points at it.

use anyhow::Result;
use chrono::NaiveDate;
use log::warn;
use rusqlite::Connection;
use std::path::Path;

use crate::db::repository::PhotoRepo;
use crate::error::StoreError;
use crate::models::ProgressPhoto;
use crate::storage::PhotoStore;

pub fn add_photo(
    conn: &Connection,
    store: &PhotoStore,
    user_id: i64,
    source: &Path,
    today: NaiveDate,
) -> Result<ProgressPhoto> {
    let path = store.upload(user_id, source)?;
    let url = store.public_url(&path);

    match PhotoRepo::insert(conn, user_id, &path, &url, today) {
        Ok(photo) => Ok(photo),
        Err(e) => {
            // Don't leave an orphaned file behind a failed insert.
            if let Err(cleanup) = store.remove(&path) {
                warn!("could not remove orphaned photo {}: {}", path, cleanup);
            }
            Err(e)
        }
    }
}

pub fn remove_photo(
    conn: &Connection,
    store: &PhotoStore,
    user_id: i64,
    photo_id: i64,
) -> Result<ProgressPhoto> {
    let photo = PhotoRepo::get(conn, user_id, photo_id)?
        .ok_or(StoreError::PhotoNotFound(photo_id))?;
    PhotoRepo::delete(conn, user_id, photo_id)?;
    store.remove(&photo.storage_path)?;
    Ok(photo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::UserRepo;
    use tempfile::TempDir;

    fn setup() -> (Connection, PhotoStore, TempDir, i64) {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserRepo::create(&conn, "a@b.co", "hash").unwrap();
        let temp = TempDir::new().unwrap();
        let store = PhotoStore::new(temp.path().join("photos"), "");
        store.initialize().unwrap();
        (conn, store, temp, user.id)
    }

    #[test]
    fn add_then_remove() {
        let (conn, store, temp, user) = setup();
        let src = temp.path().join("day1.jpg");
        std::fs::write(&src, b"jpeg").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let photo = add_photo(&conn, &store, user, &src, today).unwrap();
        assert_eq!(photo.day_number, 1);
        assert_eq!(photo.photo_date, today);
        assert!(store.exists(&photo.storage_path));
        assert!(photo.photo_url.starts_with("file://"));

        let removed = remove_photo(&conn, &store, user, photo.id).unwrap();
        assert_eq!(removed.id, photo.id);
        assert!(!store.exists(&photo.storage_path));
        assert!(PhotoRepo::list(&conn, user).unwrap().is_empty());
    }

    #[test]
    fn removing_unknown_photo_fails() {
        let (conn, store, _temp, user) = setup();
        let err = remove_photo(&conn, &store, user, 99).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::PhotoNotFound(99))
        ));
    }

    #[test]
    fn unsupported_file_leaves_no_row() {
        let (conn, store, temp, user) = setup();
        let src = temp.path().join("notes.txt");
        std::fs::write(&src, b"text").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        assert!(add_photo(&conn, &store, user, &src, today).is_err());
        assert_eq!(PhotoRepo::count(&conn, user).unwrap(), 0);
    }
}
