use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            email          TEXT NOT NULL UNIQUE,
            password_hash  TEXT NOT NULL,
            created_at     TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS profiles (
            user_id       INTEGER PRIMARY KEY REFERENCES users(id),
            display_name  TEXT NOT NULL DEFAULT 'Challenger',
            start_date    TEXT
        );

        CREATE TABLE IF NOT EXISTS daily_checkins (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id           INTEGER NOT NULL REFERENCES users(id),
            check_date        TEXT NOT NULL,
            diet              INTEGER NOT NULL DEFAULT 0,
            water             INTEGER NOT NULL DEFAULT 0,
            reading           INTEGER NOT NULL DEFAULT 0,
            workout1          INTEGER NOT NULL DEFAULT 0,
            workout2_outdoor  INTEGER NOT NULL DEFAULT 0,
            progress_photo    INTEGER NOT NULL DEFAULT 0,
            no_alcohol        INTEGER NOT NULL DEFAULT 0,
            updated_at        TEXT DEFAULT (datetime('now')),
            UNIQUE(user_id, check_date)
        );

        CREATE TABLE IF NOT EXISTS progress_photos (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id       INTEGER NOT NULL REFERENCES users(id),
            storage_path  TEXT NOT NULL,
            photo_url     TEXT NOT NULL,
            day_number    INTEGER NOT NULL,
            photo_date    TEXT NOT NULL,
            created_at    TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_progress_photos_user
            ON progress_photos(user_id, photo_date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('users','profiles','daily_checkins','progress_photos','app_meta')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }
}
