use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressPhoto {
    pub id: i64,
    pub user_id: i64,
    pub storage_path: String,
    pub photo_url: String,
    /// Sequential: count of earlier photos + 1, independent of the calendar.
    pub day_number: u32,
    pub photo_date: NaiveDate,
}
