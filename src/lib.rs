//! Tablemate - survey-driven seating service
//!
//! This library provides the matching core used to seat event participants:
//! respondents are grouped into pairs (or one triad) by a similarity /
//! difference heuristic and packed onto four-seat tables.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{layout, match_respondents, order_left_right, SeatPlanner};
pub use crate::models::{Block, BlockType, Respondent, SeatPosition, Table, TableLayout};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = layout(&[]);
        assert!(result.tables.is_empty());
        assert!(match_respondents(&[]).is_empty());
    }
}
