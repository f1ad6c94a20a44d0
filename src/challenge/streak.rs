use chrono::{Days, NaiveDate};

use crate::models::CheckinRecord;

/// Length of the unbroken run of fully-completed days ending today.
///
/// Records are sorted newest first (stable, so duplicate dates keep input order)
/// and walked against `today`, `today - 1`, ... The first gap or incomplete day
/// ends the run; nothing after it is counted. A missing record for today means 0.
pub fn compute_streak(checkins: &[CheckinRecord], today: NaiveDate) -> u32 {
    if checkins.is_empty() {
        return 0;
    }

    let mut sorted: Vec<&CheckinRecord> = checkins.iter().collect();
    sorted.sort_by(|a, b| b.check_date.cmp(&a.check_date));

    let mut streak = 0u32;
    for (i, checkin) in sorted.iter().enumerate() {
        let Some(expected) = today.checked_sub_days(Days::new(i as u64)) else {
            break;
        };
        if checkin.check_date != expected || !checkin.is_complete() {
            break;
        }
        streak += 1;
    }
    streak
}
