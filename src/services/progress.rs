use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::challenge::{self, CHALLENGE_DAYS};
use crate::db::repository::{CheckinRepo, ProfileRepo};
use crate::models::{ChallengeProfile, ProgressSummary, DEFAULT_DISPLAY_NAME};

/// Load the profile and the last 75 check-ins, then run the challenge maths.
pub fn load_progress(
    conn: &Connection,
    user_id: i64,
    today: NaiveDate,
) -> Result<(ChallengeProfile, ProgressSummary)> {
    let profile = ProfileRepo::get(conn, user_id)?.unwrap_or_else(|| ChallengeProfile {
        user_id,
        display_name: DEFAULT_DISPLAY_NAME.to_string(),
        start_date: None,
    });
    let checkins = CheckinRepo::recent(conn, user_id, CHALLENGE_DAYS)?;
    let summary = challenge::summarize(profile.start_date, &checkins, today);
    Ok((profile, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::db::repository::UserRepo;
    use crate::models::Task;
    use chrono::Days;

    #[test]
    fn streak_from_stored_checkins() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserRepo::create(&conn, "a@b.co", "hash").unwrap().id;
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        ProfileRepo::set_start_date(&conn, user, Some(today - Days::new(2))).unwrap();

        for back in 0..3u64 {
            let date = today - Days::new(back);
            for task in Task::all() {
                if back == 2 && task == Task::Water {
                    continue;
                }
                CheckinRepo::toggle_task(&conn, user, date, task).unwrap();
            }
        }

        let (profile, summary) = load_progress(&conn, user, today).unwrap();
        assert_eq!(profile.start_date, Some(today - Days::new(2)));
        assert_eq!(summary.day_number, 3);
        assert_eq!(summary.streak, 2);
        assert_eq!(summary.milestone, None);
    }

    #[test]
    fn missing_profile_reads_as_not_started() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let user = UserRepo::create(&conn, "a@b.co", "hash").unwrap().id;
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let (profile, summary) = load_progress(&conn, user, today).unwrap();
        assert_eq!(profile.display_name, DEFAULT_DISPLAY_NAME);
        assert_eq!(summary, ProgressSummary::default());
    }
}
