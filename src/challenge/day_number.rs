use chrono::NaiveDate;

/// Length of the challenge in days.
pub const CHALLENGE_DAYS: u32 = 75;

/// Which day of the challenge `today` is, always within `1..=75`.
///
/// A missing start date means the challenge has not begun and reads as day 1.
/// Start dates in the future clamp to 1; anything past the end clamps to 75.
pub fn compute_day_number(start_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(start) = start_date else {
        return 1;
    };
    let elapsed = today.signed_duration_since(start).num_days();
    elapsed
        .saturating_add(1)
        .clamp(1, CHALLENGE_DAYS as i64) as u32
}

pub fn days_remaining(day_number: u32) -> u32 {
    CHALLENGE_DAYS.saturating_sub(day_number)
}

/// Share of the challenge reached on `day_number`, rounded to a whole percent.
pub fn progress_percent(day_number: u32) -> u32 {
    let day = day_number.min(CHALLENGE_DAYS) as f64;
    (day / CHALLENGE_DAYS as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn not_started_is_day_one() {
        assert_eq!(compute_day_number(None, d(2024, 3, 10)), 1);
        assert_eq!(compute_day_number(None, d(1999, 12, 31)), 1);
        assert_eq!(compute_day_number(None, NaiveDate::MAX), 1);
    }

    #[test]
    fn start_day_is_day_one() {
        let start = d(2024, 3, 10);
        assert_eq!(compute_day_number(Some(start), start), 1);
    }

    #[test]
    fn counts_whole_calendar_days() {
        let start = d(2024, 2, 28);
        assert_eq!(compute_day_number(Some(start), d(2024, 2, 29)), 2);
        assert_eq!(compute_day_number(Some(start), d(2024, 3, 1)), 3);
    }

    #[test]
    fn last_day_is_seventy_five() {
        let start = d(2024, 1, 1);
        assert_eq!(compute_day_number(Some(start), start + Duration::days(74)), 75);
    }

    #[test]
    fn clamps_past_the_end() {
        let start = d(2024, 1, 1);
        assert_eq!(compute_day_number(Some(start), start + Duration::days(75)), 75);
        assert_eq!(compute_day_number(Some(start), start + Duration::days(1000)), 75);
        assert_eq!(compute_day_number(Some(NaiveDate::MIN), NaiveDate::MAX), 75);
    }

    #[test]
    fn future_start_clamps_to_one() {
        let today = d(2024, 3, 10);
        assert_eq!(compute_day_number(Some(today + Duration::days(1)), today), 1);
        assert_eq!(compute_day_number(Some(today + Duration::days(400)), today), 1);
    }

    #[test]
    fn remaining_and_percent() {
        assert_eq!(days_remaining(1), 74);
        assert_eq!(days_remaining(75), 0);
        assert_eq!(progress_percent(1), 1);
        assert_eq!(progress_percent(30), 40);
        assert_eq!(progress_percent(75), 100);
        assert_eq!(progress_percent(200), 100);
    }
}
