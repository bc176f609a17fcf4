//! Queries for switch-in decision making
//!
//! These read the battle without mutating it, so an AI or a UI can ask how
//! welcoming a side is before committing to a switch.

mod matchup;

pub use matchup::{hazard_matchup_score, hazards_facing, is_immune_to, weaknesses};
