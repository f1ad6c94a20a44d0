pub mod photos;
pub mod progress;

pub use photos::{add_photo, remove_photo};
pub use progress::load_progress;
