pub mod checklist;
pub mod header;
pub mod photos;
pub mod statusbar;
pub mod streak;
