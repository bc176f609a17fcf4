//! Domain types for the effect engine

mod conditions;
mod field;
mod pokemon;
mod pokemon_type;
mod stats;
mod status;

pub use conditions::{Terrain, TerrainType, Weather, WeatherType};
pub use field::Arena;
pub use pokemon::{Combatant, Gender, MoveResult, MovesetSlot, QueuedMove, TurnData, TurnMove};
pub use pokemon_type::{Effectiveness, TYPE_CHART, Type, move_type};
pub use stats::{BaseStats, StatStages};
pub use status::{Status, StatusEffect};
