// Core algorithm exports
pub mod distance;
pub mod layout;
pub mod matcher;
pub mod ordering;
pub mod summary;

pub use distance::{attribute_distance, farthest, nearest};
pub use layout::{layout, SeatPlanner};
pub use matcher::match_respondents;
pub use ordering::order_left_right;
pub use summary::{truncate_summary, DEFAULT_SUMMARY_CHARS};
