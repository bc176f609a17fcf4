//! Field-wide and combatant-scoped effect engine for turn-based monster battles.
//!
//! # Overview
//!
//! `fieldtag-battle` sits between `fieldtag-protocol` (identifiers, tag
//! discriminators and saved records) and whatever drives the turn:
//!
//! ```text
//! fieldtag-protocol (ids, tag types, records)
//!        │
//!        ▼
//! fieldtag-battle (tags + lifecycle) ← THIS CRATE
//!        │
//!        └─> turn scheduler (implements PhaseScheduler)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Elemental types with the effectiveness chart
//! - [`Status`] - Non-volatile status conditions (Burn, Sleep, etc.)
//! - [`Weather`], [`Terrain`] - Field-wide conditions
//! - [`Combatant`] - One participant and its battler tags
//! - [`Arena`] - Weather, terrain and arena tags
//!
//! ## Tags
//! - [`ArenaTag`] - Screens, hazards, rooms, delayed attacks, wishes
//! - [`BattlerTag`] - Confusion, binding, protection, boosts and the rest
//!
//! ## Lifecycle
//! - [`Battle`] - Adds, lapses, applies and removes tags; queues [`Phase`]s
//!
//! # Example Usage
//!
//! ```ignore
//! use fieldtag_battle::{Battle, Combatant, Type};
//! use fieldtag_protocol::{ArenaTagSide, ArenaTagType, BattlerIndex, CombatantId};
//!
//! let mut battle = Battle::new(42);
//! battle.add_arena_tag(ArenaTagType::Spikes, 0, None, None, ArenaTagSide::Enemy, None);
//!
//! let foe = Combatant::new(CombatantId(7), "Snorlax", vec![Type::Normal], 400).enemy();
//! battle.add_combatant(foe);
//! battle.switch_in(CombatantId(7), BattlerIndex::Enemy);
//!
//! // Spikes queued a damage phase for the entrant
//! battle.flush_phases(&mut scheduler);
//! ```

pub mod abilities;
pub mod berry;
pub mod config;
pub mod engine;
pub mod messages;
pub mod query;
pub mod rng;
pub mod tags;
pub mod types;

// Re-export main types at crate root for convenience
pub use abilities::AbilityId;
pub use berry::{BerryType, eat_berry};
pub use config::{TagRules, TurnRange};
pub use engine::{Battle, HitResult, Phase, PhaseQueue, PhaseScheduler};
pub use rng::{BattleRng, ScriptedRng, SeededRng};
pub use tags::{ArenaTag, BattlerTag, IncomingMove, TagEvent};
pub use types::{
    Arena, Combatant, Effectiveness, Status, StatusEffect, TYPE_CHART, Terrain, TerrainType, Type, Weather,
    WeatherType,
};

// Re-export commonly used protocol types
pub use fieldtag_protocol::{ArenaTagSide, ArenaTagType, BattlerIndex, BattlerTagType, CombatantId, Move, Stat};
