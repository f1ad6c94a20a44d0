use anyhow::Result;
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::StoreError;
use crate::models::{
    ChallengeProfile, CheckinRecord, ProgressPhoto, Task, User, DEFAULT_DISPLAY_NAME,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stored dates are validated here so nothing malformed reaches the challenge maths.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| StoreError::InvalidDate(s.to_string()).into())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub struct UserRepo;

impl UserRepo {
    pub fn create(conn: &Connection, email: &str, password_hash: &str) -> Result<User> {
        conn.execute(
            "INSERT INTO users (email, password_hash) VALUES (?1, ?2)",
            params![email, password_hash],
        )?;
        let id = conn.last_insert_rowid();
        debug!("created user id={} email={}", id, email);
        Ok(User {
            id,
            email: email.to_string(),
        })
    }

    /// Returns the user together with the stored password hash.
    pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<(User, String)>> {
        conn.query_row(
            "SELECT id, email, password_hash FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok((
                    User {
                        id: row.get(0)?,
                        email: row.get(1)?,
                    },
                    row.get::<_, String>(2)?,
                ))
            },
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<User>> {
        conn.query_row(
            "SELECT id, email FROM users WHERE id = ?1",
            params![id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(anyhow::Error::from)
    }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

pub struct ProfileRepo;

impl ProfileRepo {
    pub fn create(conn: &Connection, user_id: i64, display_name: Option<&str>) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO profiles (user_id, display_name) VALUES (?1, ?2)",
            params![user_id, display_name.unwrap_or(DEFAULT_DISPLAY_NAME)],
        )?;
        Ok(())
    }

    pub fn get(conn: &Connection, user_id: i64) -> Result<Option<ChallengeProfile>> {
        let row = conn
            .query_row(
                "SELECT user_id, display_name, start_date FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        match row {
            None => Ok(None),
            Some((user_id, display_name, start_date)) => Ok(Some(ChallengeProfile {
                user_id,
                display_name,
                start_date: start_date.as_deref().map(parse_date).transpose()?,
            })),
        }
    }

    pub fn set_start_date(conn: &Connection, user_id: i64, start: Option<NaiveDate>) -> Result<()> {
        conn.execute(
            "INSERT INTO profiles (user_id, start_date) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET start_date = ?2",
            params![user_id, start.map(format_date)],
        )?;
        debug!("user {} start date set to {:?}", user_id, start);
        Ok(())
    }

    pub fn set_display_name(conn: &Connection, user_id: i64, name: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO profiles (user_id, display_name) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET display_name = ?2",
            params![user_id, name],
        )?;
        Ok(())
    }
}

// ─── Check-ins ───────────────────────────────────────────────────────────────

const CHECKIN_COLUMNS: &str =
    "check_date, diet, water, reading, workout1, workout2_outdoor, progress_photo, no_alcohol";

fn checkin_row(row: &Row<'_>) -> rusqlite::Result<(String, [bool; Task::COUNT])> {
    let mut flags = [false; Task::COUNT];
    for (i, flag) in flags.iter_mut().enumerate() {
        *flag = row.get::<_, i32>(i + 1)? != 0;
    }
    Ok((row.get(0)?, flags))
}

fn to_record((date, flags): (String, [bool; Task::COUNT])) -> Result<CheckinRecord> {
    let mut record = CheckinRecord::empty(parse_date(&date)?);
    for (task, value) in Task::all().into_iter().zip(flags) {
        record.set(task, value);
    }
    Ok(record)
}

pub struct CheckinRepo;

impl CheckinRepo {
    pub fn get_for_date(
        conn: &Connection,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<CheckinRecord>> {
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM daily_checkins WHERE user_id = ?1 AND check_date = ?2",
                    CHECKIN_COLUMNS
                ),
                params![user_id, format_date(date)],
                checkin_row,
            )
            .optional()?;
        row.map(to_record).transpose()
    }

    /// Flip one task for `date`, creating the day's row on first touch.
    pub fn toggle_task(
        conn: &Connection,
        user_id: i64,
        date: NaiveDate,
        task: Task,
    ) -> Result<CheckinRecord> {
        let date_str = format_date(date);

        match Self::get_for_date(conn, user_id, date)? {
            Some(mut record) => {
                let value = !record.get(task);
                conn.execute(
                    &format!(
                        "UPDATE daily_checkins SET {} = ?1, updated_at = datetime('now')
                         WHERE user_id = ?2 AND check_date = ?3",
                        task.column()
                    ),
                    params![value as i32, user_id, date_str],
                )?;
                record.set(task, value);
                debug!("user {} {} {} -> {}", user_id, date_str, task.column(), value);
                Ok(record)
            }
            None => {
                let mut record = CheckinRecord::empty(date);
                record.set(task, true);
                conn.execute(
                    &format!(
                        "INSERT INTO daily_checkins (user_id, {})
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                        CHECKIN_COLUMNS
                    ),
                    params![
                        user_id,
                        date_str,
                        record.diet as i32,
                        record.water as i32,
                        record.reading as i32,
                        record.workout1 as i32,
                        record.workout2_outdoor as i32,
                        record.progress_photo as i32,
                        record.no_alcohol as i32,
                    ],
                )?;
                debug!("user {} created check-in for {} with {}", user_id, date_str, task.column());
                Ok(record)
            }
        }
    }

    /// Most recent check-ins first, at most `limit` rows.
    pub fn recent(conn: &Connection, user_id: i64, limit: u32) -> Result<Vec<CheckinRecord>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_checkins WHERE user_id = ?1
             ORDER BY check_date DESC LIMIT ?2",
            CHECKIN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id, limit], checkin_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(to_record(r?)?);
        }
        Ok(result)
    }

    pub fn all(conn: &Connection, user_id: i64) -> Result<Vec<CheckinRecord>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM daily_checkins WHERE user_id = ?1 ORDER BY check_date",
            CHECKIN_COLUMNS
        ))?;
        let rows = stmt.query_map(params![user_id], checkin_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(to_record(r?)?);
        }
        Ok(result)
    }
}

// ─── Progress photos ─────────────────────────────────────────────────────────

pub struct PhotoRepo;

impl PhotoRepo {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<(i64, i64, String, String, u32, String)> {
        Ok((
            row.get(0)?,
            row.get(1)?,
            row.get(2)?,
            row.get(3)?,
            row.get(4)?,
            row.get(5)?,
        ))
    }

    fn to_photo(
        (id, user_id, storage_path, photo_url, day_number, photo_date): (
            i64,
            i64,
            String,
            String,
            u32,
            String,
        ),
    ) -> Result<ProgressPhoto> {
        Ok(ProgressPhoto {
            id,
            user_id,
            storage_path,
            photo_url,
            day_number,
            photo_date: parse_date(&photo_date)?,
        })
    }

    /// Oldest first, the order the gallery shows them in.
    pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<ProgressPhoto>> {
        let mut stmt = conn.prepare(
            "SELECT id, user_id, storage_path, photo_url, day_number, photo_date
             FROM progress_photos WHERE user_id = ?1
             ORDER BY photo_date, id",
        )?;
        let rows = stmt.query_map(params![user_id], Self::from_row)?;

        let mut result = Vec::new();
        for r in rows {
            result.push(Self::to_photo(r?)?);
        }
        Ok(result)
    }

    pub fn count(conn: &Connection, user_id: i64) -> Result<u32> {
        conn.query_row(
            "SELECT COUNT(*) FROM progress_photos WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }

    /// Numbers the photo after the ones already stored.
    pub fn insert(
        conn: &Connection,
        user_id: i64,
        storage_path: &str,
        photo_url: &str,
        photo_date: NaiveDate,
    ) -> Result<ProgressPhoto> {
        let day_number = Self::count(conn, user_id)? + 1;
        conn.execute(
            "INSERT INTO progress_photos (user_id, storage_path, photo_url, day_number, photo_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, storage_path, photo_url, day_number, format_date(photo_date)],
        )?;
        let id = conn.last_insert_rowid();
        debug!("user {} stored photo {} as day {}", user_id, id, day_number);
        Ok(ProgressPhoto {
            id,
            user_id,
            storage_path: storage_path.to_string(),
            photo_url: photo_url.to_string(),
            day_number,
            photo_date,
        })
    }

    pub fn get(conn: &Connection, user_id: i64, id: i64) -> Result<Option<ProgressPhoto>> {
        let row = conn
            .query_row(
                "SELECT id, user_id, storage_path, photo_url, day_number, photo_date
                 FROM progress_photos WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::from_row,
            )
            .optional()?;
        row.map(Self::to_photo).transpose()
    }

    pub fn delete(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
        let affected = conn.execute(
            "DELETE FROM progress_photos WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        if affected == 0 {
            return Err(StoreError::PhotoNotFound(id).into());
        }
        Ok(())
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn delete(conn: &Connection, key: &str) -> Result<()> {
        conn.execute("DELETE FROM app_meta WHERE key = ?1", params![key])?;
        Ok(())
    }
}
