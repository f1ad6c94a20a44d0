use chrono::NaiveDate;

use crate::challenge::CHALLENGE_DAYS;

/// "Day 12 of 75"
pub fn day_label(day_number: u32) -> String {
    format!("Day {} of {}", day_number, CHALLENGE_DAYS)
}

/// "3/7"
pub fn tasks_done(done: usize, total: usize) -> String {
    format!("{}/{}", done, total)
}

/// Format a date the way the dashboard shows it: "Sun, Mar 10 2024"
pub fn pretty_date(date: NaiveDate) -> String {
    date.format("%a, %b %d %Y").to_string()
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}
