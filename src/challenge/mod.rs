//! Challenge arithmetic: day numbers and streaks.
//!
//! Everything here is pure. Callers pick "today" once (see
//! [`crate::config::DayBoundary`]) and pass it in.

pub mod day_number;
pub mod streak;

use chrono::NaiveDate;

use crate::models::{CheckinRecord, Milestone, ProgressSummary};

pub use day_number::{compute_day_number, days_remaining, progress_percent, CHALLENGE_DAYS};
pub use streak::compute_streak;

pub fn summarize(
    start_date: Option<NaiveDate>,
    checkins: &[CheckinRecord],
    today: NaiveDate,
) -> ProgressSummary {
    let day_number = compute_day_number(start_date, today);
    let streak = compute_streak(checkins, today);
    ProgressSummary {
        day_number,
        days_remaining: days_remaining(day_number),
        percent: progress_percent(day_number),
        streak,
        milestone: Milestone::for_streak(streak),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::Days;

    #[test]
    fn summary_combines_day_and_streak() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let start = today.checked_sub_days(Days::new(9)).unwrap();
        let checkins: Vec<_> = (0..8)
            .map(|i| {
                let mut rec = CheckinRecord::empty(today.checked_sub_days(Days::new(i)).unwrap());
                for task in Task::all() {
                    rec.set(task, true);
                }
                rec
            })
            .collect();

        let summary = summarize(Some(start), &checkins, today);
        assert_eq!(summary.day_number, 10);
        assert_eq!(summary.days_remaining, 65);
        assert_eq!(summary.percent, 13);
        assert_eq!(summary.streak, 8);
        assert_eq!(summary.milestone, Some(Milestone::OneWeek));
    }

    #[test]
    fn summary_before_start() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(summarize(None, &[], today), ProgressSummary::default());
    }
}
