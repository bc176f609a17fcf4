//! Field-level and combatant-scoped tags.
//!
//! A tag is plain data: a discriminator, a duration, an optional back
//! reference to the combatant that installed it, and a small payload for the
//! families that need extra state. Behaviour lives in static hook tables,
//! one per tag kind, looked up through an exhaustive `match` on the
//! discriminator. The lifecycle itself (add, overlap, lapse, remove) is
//! driven by [`crate::Battle`].

use fieldtag_protocol::{BattlerTagLapseType, CombatantId, Move, MoveCategory};

pub mod arena;
pub mod battler;

pub use arena::{
    ArenaTag, ArenaTagArgs, ArenaTagData, ArenaTagHooks, TrapOutcome, get_arena_tag, load_arena_tag,
};
pub use battler::{
    BattlerTag, BattlerTagArgs, BattlerTagData, BattlerTagHooks, get_battler_tag, load_battler_tag,
};

/// Standard countdown.
///
/// A count below 1 never runs out; otherwise the count drops by one and the
/// tag survives while it stays positive.
pub fn count_down(turn_count: &mut i32) -> bool {
    if *turn_count < 1 {
        return true;
    }
    *turn_count -= 1;
    *turn_count > 0
}

/// Countdown for effects that only last the current turn: a count of 0
/// expires on the first lapse instead of persisting
pub fn count_down_turn_scoped(turn_count: &mut i32) -> bool {
    *turn_count -= 1;
    *turn_count > 0
}

/// A move in flight against a tag's owner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingMove {
    pub attacker: CombatantId,
    pub move_id: Move,
    pub category: MoveCategory,
    pub makes_contact: bool,
}

impl IncomingMove {
    pub fn new(attacker: CombatantId, move_id: Move) -> Self {
        Self {
            attacker,
            move_id,
            category: move_id.category(),
            makes_contact: move_id.makes_contact(),
        }
    }
}

/// Context for one battler tag lapse pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TagEvent {
    pub lapse_type: BattlerTagLapseType,
    /// The attack being resolved, when the pass runs during one
    pub incoming: Option<IncomingMove>,
    /// Set by tags that stop the owner's pending move
    pub move_cancelled: bool,
}

impl TagEvent {
    pub fn new(lapse_type: BattlerTagLapseType) -> Self {
        Self {
            lapse_type,
            incoming: None,
            move_cancelled: false,
        }
    }

    pub fn with_incoming(lapse_type: BattlerTagLapseType, incoming: IncomingMove) -> Self {
        Self {
            lapse_type,
            incoming: Some(incoming),
            move_cancelled: false,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.lapse_type == BattlerTagLapseType::Custom
    }
}
