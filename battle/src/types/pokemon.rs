//! Combatant state

use std::collections::VecDeque;

use fieldtag_protocol::{BattlerIndex, BattlerTagType, CombatantId, Move, Stat};
use serde::{Deserialize, Serialize};

use super::pokemon_type::Type;
use super::stats::{BaseStats, StatStages};
use super::status::{Status, StatusEffect};
use crate::abilities::AbilityId;
use crate::berry::BerryType;
use crate::engine::HitResult;
use crate::tags::BattlerTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Genderless,
}

impl Gender {
    /// Whether two combatants can be infatuated with each other
    pub fn is_opposite(&self, other: Gender) -> bool {
        matches!(
            (self, other),
            (Gender::Male, Gender::Female) | (Gender::Female, Gender::Male)
        )
    }
}

/// How a recorded move use turned out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    Pending,
    Success,
    Fail,
    Miss,
    /// Spent a charge turn or was otherwise interrupted
    Other,
}

/// One entry of a combatant's move history
#[derive(Debug, Clone, PartialEq)]
pub struct TurnMove {
    /// `None` for a turn spent switching in
    pub move_id: Option<Move>,
    pub targets: Vec<BattlerIndex>,
    pub result: MoveResult,
    /// Called by another move rather than selected
    pub virtual_move: bool,
}

impl TurnMove {
    pub fn used(move_id: Move, targets: Vec<BattlerIndex>, result: MoveResult) -> Self {
        Self {
            move_id: Some(move_id),
            targets,
            result,
            virtual_move: false,
        }
    }

    pub fn switch_in() -> Self {
        Self {
            move_id: None,
            targets: Vec::new(),
            result: MoveResult::Pending,
            virtual_move: false,
        }
    }
}

/// Action waiting in a combatant's queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedMove {
    pub move_id: Move,
    pub targets: Vec<BattlerIndex>,
    /// Skip the PP cost when executed
    pub ignore_pp: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovesetSlot {
    pub move_id: Move,
    pub pp_used: u8,
}

impl MovesetSlot {
    pub fn new(move_id: Move) -> Self {
        Self { move_id, pp_used: 0 }
    }

    pub fn pp_left(&self) -> u8 {
        self.move_id.pp().saturating_sub(self.pp_used)
    }
}

/// Per-turn bookkeeping, reset at the start of each turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnData {
    pub damage_taken: u32,
    pub attacks_received: Vec<HitResult>,
}

/// A participant in the battle
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub level: u8,
    /// Fights for the player's team
    pub is_player: bool,
    /// Belongs to a trainer rather than appearing wild
    pub has_trainer: bool,
    pub gender: Gender,

    // === Typing and abilities ===
    pub types: Vec<Type>,
    pub ability: AbilityId,
    pub passive: Option<AbilityId>,

    // === HP and stats ===
    pub hp: u32,
    pub max_hp: u32,
    pub stats: BaseStats,
    pub stages: StatStages,
    pub status: Option<Status>,

    /// Volatile conditions, in installation order
    pub tags: Vec<BattlerTag>,

    // === Moves ===
    pub moveset: Vec<MovesetSlot>,
    pub move_history: Vec<TurnMove>,
    pub move_queue: VecDeque<QueuedMove>,

    // === Special states ===
    pub dynamaxed: bool,
    pub boss: bool,
    /// Semi-invulnerable during a charge turn
    pub hidden: bool,
    pub berries_eaten: Vec<BerryType>,
    pub turn_data: TurnData,
}

impl Combatant {
    pub fn new(id: CombatantId, name: impl Into<String>, types: Vec<Type>, max_hp: u32) -> Self {
        Self {
            id,
            name: name.into(),
            level: 50,
            is_player: true,
            has_trainer: true,
            gender: Gender::Genderless,
            types,
            ability: AbilityId::None,
            passive: None,
            hp: max_hp,
            max_hp,
            stats: BaseStats::default(),
            stages: StatStages::new(),
            status: None,
            tags: Vec::new(),
            moveset: Vec::new(),
            move_history: Vec::new(),
            move_queue: VecDeque::new(),
            dynamaxed: false,
            boss: false,
            hidden: false,
            berries_eaten: Vec::new(),
            turn_data: TurnData::default(),
        }
    }

    /// Same combatant on the enemy team
    pub fn enemy(mut self) -> Self {
        self.is_player = false;
        self
    }

    pub fn with_ability(mut self, ability: AbilityId) -> Self {
        self.ability = ability;
        self
    }

    pub fn with_moves(mut self, moves: &[Move]) -> Self {
        self.moveset = moves.iter().copied().map(MovesetSlot::new).collect();
        self
    }

    /// Fraction of max HP remaining
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_full_hp(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Reduce HP, returning the damage actually dealt
    pub fn damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        self.turn_data.damage_taken += dealt;
        dealt
    }

    /// Restore HP, returning the amount actually healed
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp += healed;
        healed
    }

    /// Stat after stage modifiers
    pub fn battle_stat(&self, stat: Stat) -> u32 {
        StatStages::apply(self.stats.get(stat), self.stages.get(stat))
    }

    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    /// Main ability followed by the passive, if any
    pub fn abilities(&self) -> impl Iterator<Item = AbilityId> + '_ {
        std::iter::once(self.ability).chain(self.passive)
    }

    pub fn has_ability(&self, ability: AbilityId) -> bool {
        self.abilities().any(|a| a == ability)
    }

    /// Whether `ability` is in the passive slot rather than the main one
    pub fn is_passive(&self, ability: AbilityId) -> bool {
        self.ability != ability && self.passive == Some(ability)
    }

    pub fn get_tag(&self, tag_type: BattlerTagType) -> Option<&BattlerTag> {
        self.tags.iter().find(|tag| tag.tag_type == tag_type)
    }

    pub fn get_tag_mut(&mut self, tag_type: BattlerTagType) -> Option<&mut BattlerTag> {
        self.tags.iter_mut().find(|tag| tag.tag_type == tag_type)
    }

    pub fn has_tag(&self, tag_type: BattlerTagType) -> bool {
        self.get_tag(tag_type).is_some()
    }

    /// Held in place by a binding move, Ingrain or Mean Look
    pub fn is_trapped(&self) -> bool {
        self.tags.iter().any(|tag| tag.tag_type.is_trapping())
    }

    /// Touching the ground, ignoring field-wide effects such as Gravity
    pub fn is_grounded(&self) -> bool {
        if self.has_tag(BattlerTagType::Grounded) || self.has_tag(BattlerTagType::IgnoreFlying) {
            return true;
        }
        !self.has_type(Type::Flying)
            && !self.has_ability(AbilityId::Levitate)
            && !self.has_tag(BattlerTagType::MagnetRisen)
    }

    /// Whether `effect` could be inflicted right now, ignoring the field
    pub fn can_set_status(&self, effect: StatusEffect) -> bool {
        if self.status.is_some() || self.is_fainted() {
            return false;
        }
        match effect {
            StatusEffect::Poison | StatusEffect::Toxic => {
                !self.has_type(Type::Poison) && !self.has_type(Type::Steel)
            }
            StatusEffect::Paralysis => !self.has_type(Type::Electric),
            StatusEffect::Burn => !self.has_type(Type::Fire),
            StatusEffect::Freeze => !self.has_type(Type::Ice),
            StatusEffect::Sleep => true,
            StatusEffect::Faint => false,
        }
    }

    pub fn last_move(&self) -> Option<&TurnMove> {
        self.move_history.last()
    }

    pub fn moveset_slot_mut(&mut self, move_id: Move) -> Option<&mut MovesetSlot> {
        self.moveset.iter_mut().find(|slot| slot.move_id == move_id)
    }

    pub fn knows_move(&self, move_id: Move) -> bool {
        self.moveset.iter().any(|slot| slot.move_id == move_id)
    }

    /// Clear state that does not survive leaving the field
    pub fn reset_on_switch(&mut self) {
        self.stages.clear();
        self.tags.clear();
        self.hidden = false;
        self.move_queue.clear();
        self.turn_data = TurnData::default();
    }
}
