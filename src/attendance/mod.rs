pub mod challenge;
pub mod normalize;

pub use challenge::Challenge;
pub use normalize::{normalize_rows, normalize_time, AttendanceRecord};
