//! Follow-on events the engine hands to the turn scheduler

use fieldtag_protocol::{BattlerIndex, BattlerTagLapseType, CombatantId, Move, Stat};

use crate::types::StatusEffect;

/// Outcome of one hit against a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitResult {
    Effective,
    SuperEffective,
    NotVeryEffective,
    OneHitKo,
    NoEffect,
    Status,
    Fail,
    Miss,
    Other,
    Immune,
}

/// An event queued for the scheduler to resolve
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Plain battle text
    Message(String),
    Damage {
        target: BattlerIndex,
        amount: u32,
        result: HitResult,
    },
    Heal {
        target: BattlerIndex,
        amount: u32,
        message: Option<String>,
        /// Show the message even when the target is already at full HP
        full_hp_message: bool,
    },
    StatChange {
        target: BattlerIndex,
        self_targeted: bool,
        stats: Vec<Stat>,
        levels: i8,
    },
    SetStatus {
        target: BattlerIndex,
        effect: StatusEffect,
        source_text: Option<String>,
    },
    /// Resolve a move outside the normal action order
    MoveEffect {
        user: CombatantId,
        targets: Vec<BattlerIndex>,
        move_id: Move,
        virtual_move: bool,
    },
    /// Swap the user's queued action for another move
    ReplaceMove {
        user: BattlerIndex,
        move_id: Move,
        targets: Vec<BattlerIndex>,
    },
    ShowAbility {
        target: BattlerIndex,
        passive: bool,
    },
    Faint {
        target: BattlerIndex,
    },
}

/// The turn scheduler as seen by the engine
pub trait PhaseScheduler {
    /// Run `phase` before anything already queued
    fn enqueue_now(&mut self, phase: Phase);

    /// Run `phase` after everything already queued
    fn enqueue_next(&mut self, phase: Phase);

    /// Checkpoint the turn is currently at, if any
    fn current_checkpoint(&self) -> Option<BattlerTagLapseType>;
}
