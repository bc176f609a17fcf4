use thiserror::Error;

pub mod battle;
pub mod record;
pub mod tags;


pub use battle::{ArenaTagSide, BattlerIndex, CombatantId, Move, MoveCategory, Stat};
pub use record::{ArenaTagRecord, BattlerTagRecord, parse_arena_tags, parse_battler_tags, require, to_json};
pub use tags::{ArenaTagType, BattlerTagLapseType, BattlerTagType};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid tag JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{tag} record is missing required field: {field}")]
    MissingField { tag: String, field: &'static str },

    #[error("{tag} record has invalid {field}: {reason}")]
    InvalidField {
        tag: String,
        field: &'static str,
        reason: String,
    },
}
