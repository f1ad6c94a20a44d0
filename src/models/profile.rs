use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DISPLAY_NAME: &str = "Challenger";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// A user's challenge enrollment. No start date means the challenge has not begun.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeProfile {
    pub user_id: i64,
    pub display_name: String,
    pub start_date: Option<NaiveDate>,
}
