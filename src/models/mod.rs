pub mod checkin;
pub mod photo;
pub mod profile;
pub mod stats;

pub use checkin::{CheckinRecord, Task};
pub use photo::ProgressPhoto;
pub use profile::{ChallengeProfile, User, DEFAULT_DISPLAY_NAME};
pub use stats::{Milestone, ProgressSummary};
