//! Combatant-scoped tags: volatile conditions, binding, protection and
//! ability-driven boosts.
//!
//! Unlike arena tags, a battler tag mutates its owner directly (HP, move
//! queue, visibility). Anything aimed at another combatant, such as a drain
//! heal or a contact punishment, is queued as a [`Phase`].

use fieldtag_protocol::{
    BattlerIndex, BattlerTagLapseType, BattlerTagRecord, BattlerTagType, CombatantId, LoadError, Move, Stat,
    require,
};
use tracing::warn;

use super::{TagEvent, count_down, count_down_turn_scoped};
use crate::abilities::{self, AbilityId};
use crate::engine::{Battle, HitResult, Phase, PhaseScheduler};
use crate::messages::{pokemon_message, pokemon_prefix};
use crate::types::{Combatant, MoveResult, StatusEffect, TerrainType, TurnMove, Type, WeatherType};

/// Family-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum BattlerTagData {
    Plain,
    /// Seeded, Salt Cure and Curse; the slot the inflicter stood in
    Drain { source_index: Option<BattlerIndex> },
    Encore { move_id: Option<Move> },
    /// Protosynthesis and Quark Drive, fixed when the tag is added
    HighestStat { stat: Option<Stat>, multiplier: f64 },
    TypeBoost {
        boosted_type: Type,
        boost_value: f64,
        /// Spent by the first boosted move
        one_use: bool,
    },
    TypeImmune { immune_type: Type },
    ContactDamage { damage_ratio: u32 },
    ContactStatChange { stat: Stat, levels: i8 },
    ContactStatus { effect: StatusEffect },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattlerTag {
    pub tag_type: BattlerTagType,
    pub lapse_type: BattlerTagLapseType,
    pub turn_count: i32,
    pub source_move: Option<Move>,
    pub source_id: Option<CombatantId>,
    pub data: BattlerTagData,
}

/// Query arguments and output holders for [`BattlerTag::apply`]
#[derive(Debug)]
pub enum BattlerTagArgs<'a> {
    StatMultiplier { stat: Stat, multiplier: &'a mut f64 },
    MovePower { move_type: Type, power: &'a mut f64 },
    TypeImmunity { move_type: Type, immune: &'a mut bool },
    Crit {
        stage: &'a mut i8,
        always: &'a mut bool,
        never: &'a mut bool,
    },
    IgnoreAccuracy { ignore: &'a mut bool },
    ForcedMove { move_id: &'a mut Option<Move> },
}

pub type CanAdd = fn(tag: &BattlerTag, battle: &Battle, owner: &Combatant) -> bool;
pub type OnAdd = fn(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId);
pub type OnOverlap = fn(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId);
pub type OnRemove = fn(tag: &BattlerTag, battle: &mut Battle, owner: CombatantId);
pub type Lapse = fn(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool;
pub type Apply = fn(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool;

#[derive(Clone, Copy)]
pub struct BattlerTagHooks {
    pub can_add: Option<CanAdd>,
    pub on_add: Option<OnAdd>,
    pub on_overlap: Option<OnOverlap>,
    pub on_remove: Option<OnRemove>,
    pub lapse: Lapse,
    pub apply: Option<Apply>,
    /// Removed when the inflicter leaves the field
    pub source_linked: bool,
}

impl BattlerTagHooks {
    pub const BASE: Self = Self {
        can_add: None,
        on_add: None,
        on_overlap: None,
        on_remove: None,
        lapse: base_lapse,
        apply: None,
        source_linked: false,
    };
}

impl BattlerTag {
    pub fn new(
        tag_type: BattlerTagType,
        lapse_type: BattlerTagLapseType,
        turn_count: i32,
        source_move: Option<Move>,
        source_id: Option<CombatantId>,
    ) -> Self {
        Self {
            tag_type,
            lapse_type,
            turn_count,
            source_move,
            source_id,
            data: BattlerTagData::Plain,
        }
    }

    fn with_data(mut self, data: BattlerTagData) -> Self {
        self.data = data;
        self
    }

    pub fn hooks(&self) -> &'static BattlerTagHooks {
        battler_tag_hooks(self.tag_type)
    }

    pub fn can_add(&self, battle: &Battle, owner: &Combatant) -> bool {
        self.hooks().can_add.is_none_or(|can_add| can_add(self, battle, owner))
    }

    pub fn apply(&self, args: &mut BattlerTagArgs<'_>) -> bool {
        match self.hooks().apply {
            Some(apply) => apply(self, args),
            None => false,
        }
    }

    pub fn is_source_linked(&self) -> bool {
        self.hooks().source_linked
    }

    /// Whether this tag lapses at `lapse_type`
    pub fn lapses_at(&self, lapse_type: BattlerTagLapseType) -> bool {
        self.lapse_type == lapse_type
    }

    pub fn move_name(&self) -> &'static str {
        self.source_move.map_or(self.tag_type.as_str(), |m| m.name())
    }

    pub fn to_record(&self) -> BattlerTagRecord {
        let mut record = BattlerTagRecord::new(self.tag_type, self.lapse_type, self.turn_count);
        record.source_move = self.source_move;
        record.source_id = self.source_id;
        match &self.data {
            BattlerTagData::Drain { source_index } => record.source_index = *source_index,
            BattlerTagData::Encore { move_id } => record.move_id = *move_id,
            BattlerTagData::HighestStat { stat, multiplier } => {
                record.stat = *stat;
                record.multiplier = Some(*multiplier);
            }
            _ => {}
        }
        record
    }
}

/// Build a fresh tag of `tag_type`.
///
/// Most kinds fix their own checkpoint and duration; `turn_count` only
/// matters for the kinds whose length the caller decides (confusion,
/// binding, Perish Song, semi-invulnerable turns and a few markers).
pub fn get_battler_tag(
    tag_type: BattlerTagType,
    turn_count: i32,
    source_move: Option<Move>,
    source_id: Option<CombatantId>,
) -> BattlerTag {
    use BattlerTagLapseType as L;
    use BattlerTagType as T;

    let tag = |lapse_type, turns, source_move| BattlerTag::new(tag_type, lapse_type, turns, source_move, source_id);
    let drain = BattlerTagData::Drain { source_index: None };

    match tag_type {
        T::Recharging => tag(L::PreMove, 1, source_move),
        T::Flinched | T::Interrupted => tag(L::PreMove, 0, source_move),
        T::Confused => tag(L::Move, turn_count, source_move),
        T::Infatuated => tag(L::Move, 1, source_move),
        T::Seeded => tag(L::TurnEnd, 1, Some(Move::LeechSeed)).with_data(drain),
        T::Nightmare => tag(L::AfterMove, 1, Some(Move::Nightmare)),
        T::Frenzy | T::Charging => tag(L::Custom, 1, source_move),
        T::Encore => {
            tag(L::AfterMove, 3, Some(Move::Encore)).with_data(BattlerTagData::Encore { move_id: None })
        }
        T::HelpingHand => tag(L::TurnEnd, 1, Some(Move::HelpingHand)),
        T::Ingrain => tag(L::TurnEnd, 1, Some(Move::Ingrain)),
        T::AquaRing => BattlerTag::new(tag_type, L::TurnEnd, 1, Some(Move::AquaRing), None),
        T::Minimized => BattlerTag::new(tag_type, L::TurnEnd, 1, Some(Move::Minimize), None),
        T::Drowsy => BattlerTag::new(tag_type, L::TurnEnd, 2, Some(Move::Yawn), None),
        T::Trapped => tag(L::Custom, turn_count, source_move),
        T::Bind
        | T::Wrap
        | T::FireSpin
        | T::Whirlpool
        | T::Clamp
        | T::SandTomb
        | T::MagmaStorm
        | T::SnapTrap
        | T::ThunderCage
        | T::Infestation => tag(L::TurnEnd, turn_count, Some(binding_move(tag_type))),
        T::Protected => tag(L::Custom, 0, source_move),
        T::SpikyShield => {
            tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactDamage { damage_ratio: 8 })
        }
        T::KingsShield => tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactStatChange {
            stat: Stat::Atk,
            levels: -1,
        }),
        T::Obstruct => tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactStatChange {
            stat: Stat::Def,
            levels: -2,
        }),
        T::SilkTrap => tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactStatChange {
            stat: Stat::Spe,
            levels: -1,
        }),
        T::BanefulBunker => tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactStatus {
            effect: StatusEffect::Poison,
        }),
        T::BurningBulwark => tag(L::Custom, 0, source_move).with_data(BattlerTagData::ContactStatus {
            effect: StatusEffect::Burn,
        }),
        T::Enduring | T::Sturdy => tag(L::TurnEnd, 0, source_move),
        T::PerishSong => tag(L::TurnEnd, turn_count, Some(Move::PerishSong)),
        T::Truant => BattlerTag::new(tag_type, L::Move, 1, None, None),
        T::SlowStart => BattlerTag::new(tag_type, L::TurnEnd, 5, None, None),
        T::Protosynthesis | T::QuarkDrive => BattlerTag::new(tag_type, L::Custom, 1, None, None).with_data(
            BattlerTagData::HighestStat {
                stat: None,
                multiplier: 1.0,
            },
        ),
        T::Flying | T::Underground | T::Underwater | T::Hidden => tag(L::MoveEffect, turn_count, source_move),
        T::FireBoost => tag(L::TurnEnd, 1, source_move).with_data(BattlerTagData::TypeBoost {
            boosted_type: Type::Fire,
            boost_value: 1.5,
            one_use: false,
        }),
        T::Charged => tag(L::TurnEnd, 1, source_move).with_data(BattlerTagData::TypeBoost {
            boosted_type: Type::Electric,
            boost_value: 2.0,
            one_use: true,
        }),
        T::CritBoost => tag(L::TurnEnd, 1, source_move),
        T::AlwaysCrit | T::IgnoreAccuracy => tag(L::TurnEnd, 2, source_move),
        T::NoCrit => tag(L::AfterMove, turn_count, source_move),
        T::BypassSleep | T::IgnoreFlying => tag(L::TurnEnd, turn_count, source_move),
        T::Grounded => tag(L::TurnEnd, turn_count - 1, source_move),
        T::SaltCured => tag(L::TurnEnd, 1, Some(Move::SaltCure)).with_data(drain),
        T::Cursed => tag(L::TurnEnd, 1, Some(Move::Curse)).with_data(drain),
        T::MagnetRisen => tag(L::TurnEnd, 5, source_move.or(Some(Move::MagnetRise))).with_data(
            BattlerTagData::TypeImmune {
                immune_type: Type::Ground,
            },
        ),
    }
}

fn binding_move(tag_type: BattlerTagType) -> Move {
    match tag_type {
        BattlerTagType::Wrap => Move::Wrap,
        BattlerTagType::FireSpin => Move::FireSpin,
        BattlerTagType::Whirlpool => Move::Whirlpool,
        BattlerTagType::Clamp => Move::Clamp,
        BattlerTagType::SandTomb => Move::SandTomb,
        BattlerTagType::MagmaStorm => Move::MagmaStorm,
        BattlerTagType::SnapTrap => Move::SnapTrap,
        BattlerTagType::ThunderCage => Move::ThunderCage,
        BattlerTagType::Infestation => Move::Infestation,
        _ => Move::Bind,
    }
}

/// Rebuild a saved tag through the factory, then restore its saved state
pub fn load_battler_tag(record: &BattlerTagRecord) -> Result<BattlerTag, LoadError> {
    let mut tag = get_battler_tag(record.tag_type, record.turn_count, record.source_move, record.source_id);
    tag.turn_count = record.turn_count;
    if record.source_move.is_some() {
        tag.source_move = record.source_move;
    }
    match &mut tag.data {
        BattlerTagData::Drain { source_index } => *source_index = record.source_index,
        BattlerTagData::Encore { move_id } => {
            *move_id = Some(require(record.move_id, record.tag_type, "moveId")?);
        }
        BattlerTagData::HighestStat { stat, multiplier } => {
            *stat = Some(require(record.stat, record.tag_type, "stat")?);
            *multiplier = require(record.multiplier, record.tag_type, "multiplier")?;
        }
        _ => {}
    }
    Ok(tag)
}

// =========================================================================
// Hook tables
// =========================================================================

const RECHARGING: BattlerTagHooks = BattlerTagHooks {
    lapse: recharging_lapse,
    ..BattlerTagHooks::BASE
};

const FLINCHED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(not_dynamaxed),
    on_add: Some(flinched_add),
    lapse: flinched_lapse,
    ..BattlerTagHooks::BASE
};

const INTERRUPTED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(interrupted_can_add),
    on_add: Some(interrupted_add),
    lapse: interrupted_lapse,
    ..BattlerTagHooks::BASE
};

const CONFUSED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(confused_can_add),
    on_add: Some(confused_add),
    on_overlap: Some(confused_overlap),
    on_remove: Some(confused_remove),
    lapse: confused_lapse,
    ..BattlerTagHooks::BASE
};

const INFATUATED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(infatuated_can_add),
    on_add: Some(infatuated_add),
    on_overlap: Some(infatuated_overlap),
    on_remove: Some(infatuated_remove),
    lapse: infatuated_lapse,
    source_linked: true,
    ..BattlerTagHooks::BASE
};

const SEEDED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(seeded_can_add),
    on_add: Some(seeded_add),
    lapse: seeded_lapse,
    ..BattlerTagHooks::BASE
};

const NIGHTMARE: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(nightmare_add),
    on_overlap: Some(nightmare_overlap),
    lapse: nightmare_lapse,
    ..BattlerTagHooks::BASE
};

const FRENZY: BattlerTagHooks = BattlerTagHooks {
    on_remove: Some(frenzy_remove),
    ..BattlerTagHooks::BASE
};

const ENCORE: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(encore_can_add),
    on_add: Some(encore_add),
    on_remove: Some(encore_remove),
    apply: Some(encore_apply),
    ..BattlerTagHooks::BASE
};

const HELPING_HAND: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(helping_hand_add),
    ..BattlerTagHooks::BASE
};

const INGRAIN: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(ingrain_can_add),
    on_add: Some(trap_add),
    on_remove: Some(trap_remove),
    lapse: ingrain_lapse,
    source_linked: true,
    ..BattlerTagHooks::BASE
};

const AQUA_RING: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(aqua_ring_add),
    lapse: aqua_ring_lapse,
    ..BattlerTagHooks::BASE
};

const MINIMIZED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(not_dynamaxed),
    lapse: minimized_lapse,
    ..BattlerTagHooks::BASE
};

const DROWSY: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(drowsy_can_add),
    on_add: Some(drowsy_add),
    lapse: drowsy_lapse,
    ..BattlerTagHooks::BASE
};

const TRAPPED: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(trapped_can_add),
    on_add: Some(trap_add),
    on_remove: Some(trap_remove),
    source_linked: true,
    ..BattlerTagHooks::BASE
};

const DAMAGING_TRAP: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(damaging_trap_can_add),
    on_add: Some(trap_add),
    on_remove: Some(trap_remove),
    lapse: damaging_trap_lapse,
    source_linked: true,
    ..BattlerTagHooks::BASE
};

const PROTECTED: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(protected_add),
    lapse: protected_lapse,
    ..BattlerTagHooks::BASE
};

const ENDURING: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(enduring_add),
    lapse: endure_lapse,
    ..BattlerTagHooks::BASE
};

const STURDY: BattlerTagHooks = BattlerTagHooks {
    lapse: endure_lapse,
    ..BattlerTagHooks::BASE
};

const PERISH_SONG: BattlerTagHooks = BattlerTagHooks {
    can_add: Some(perish_song_can_add),
    lapse: perish_song_lapse,
    ..BattlerTagHooks::BASE
};

const TRUANT: BattlerTagHooks = BattlerTagHooks {
    lapse: truant_lapse,
    ..BattlerTagHooks::BASE
};

const SLOW_START: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(slow_start_add),
    on_remove: Some(slow_start_remove),
    lapse: slow_start_lapse,
    apply: Some(slow_start_apply),
    ..BattlerTagHooks::BASE
};

const HIGHEST_STAT_BOOST: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(highest_stat_add),
    on_remove: Some(highest_stat_remove),
    lapse: highest_stat_lapse,
    apply: Some(highest_stat_apply),
    ..BattlerTagHooks::BASE
};

const HIDE_SPRITE: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(hide_add),
    on_remove: Some(hide_remove),
    ..BattlerTagHooks::BASE
};

const TYPE_BOOST: BattlerTagHooks = BattlerTagHooks {
    lapse: custom_countdown_lapse,
    apply: Some(type_boost_apply),
    ..BattlerTagHooks::BASE
};

const CRIT_BOOST: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(crit_boost_add),
    on_remove: Some(crit_boost_remove),
    lapse: custom_countdown_lapse,
    apply: Some(crit_apply),
    ..BattlerTagHooks::BASE
};

const CRIT_FLAG: BattlerTagHooks = BattlerTagHooks {
    apply: Some(crit_apply),
    ..BattlerTagHooks::BASE
};

const IGNORE_ACCURACY: BattlerTagHooks = BattlerTagHooks {
    apply: Some(ignore_accuracy_apply),
    ..BattlerTagHooks::BASE
};

const GROUNDED: BattlerTagHooks = BattlerTagHooks {
    lapse: turn_scoped_lapse,
    ..BattlerTagHooks::BASE
};

const SALT_CURED: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(salt_cured_add),
    lapse: salt_cured_lapse,
    ..BattlerTagHooks::BASE
};

const CURSED: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(cursed_add),
    lapse: cursed_lapse,
    ..BattlerTagHooks::BASE
};

const MAGNET_RISEN: BattlerTagHooks = BattlerTagHooks {
    on_add: Some(magnet_rise_add),
    on_remove: Some(magnet_rise_remove),
    apply: Some(type_immune_apply),
    ..BattlerTagHooks::BASE
};

pub fn battler_tag_hooks(tag_type: BattlerTagType) -> &'static BattlerTagHooks {
    use BattlerTagType as T;
    match tag_type {
        T::Recharging => &RECHARGING,
        T::Flinched => &FLINCHED,
        T::Interrupted => &INTERRUPTED,
        T::Confused => &CONFUSED,
        T::Infatuated => &INFATUATED,
        T::Seeded => &SEEDED,
        T::Nightmare => &NIGHTMARE,
        T::Frenzy => &FRENZY,
        T::Charging | T::BypassSleep | T::IgnoreFlying => &BattlerTagHooks::BASE,
        T::Encore => &ENCORE,
        T::HelpingHand => &HELPING_HAND,
        T::Ingrain => &INGRAIN,
        T::AquaRing => &AQUA_RING,
        T::Minimized => &MINIMIZED,
        T::Drowsy => &DROWSY,
        T::Trapped => &TRAPPED,
        T::Bind
        | T::Wrap
        | T::FireSpin
        | T::Whirlpool
        | T::Clamp
        | T::SandTomb
        | T::MagmaStorm
        | T::SnapTrap
        | T::ThunderCage
        | T::Infestation => &DAMAGING_TRAP,
        T::Protected
        | T::SpikyShield
        | T::KingsShield
        | T::Obstruct
        | T::SilkTrap
        | T::BanefulBunker
        | T::BurningBulwark => &PROTECTED,
        T::Enduring => &ENDURING,
        T::Sturdy => &STURDY,
        T::PerishSong => &PERISH_SONG,
        T::Truant => &TRUANT,
        T::SlowStart => &SLOW_START,
        T::Protosynthesis | T::QuarkDrive => &HIGHEST_STAT_BOOST,
        T::Flying | T::Underground | T::Underwater | T::Hidden => &HIDE_SPRITE,
        T::FireBoost | T::Charged => &TYPE_BOOST,
        T::CritBoost => &CRIT_BOOST,
        T::AlwaysCrit | T::NoCrit => &CRIT_FLAG,
        T::IgnoreAccuracy => &IGNORE_ACCURACY,
        T::Grounded => &GROUNDED,
        T::SaltCured => &SALT_CURED,
        T::Cursed => &CURSED,
        T::MagnetRisen => &MAGNET_RISEN,
    }
}

// =========================================================================
// Shared behaviour
// =========================================================================

fn base_lapse(tag: &mut BattlerTag, _battle: &mut Battle, _owner: CombatantId, _event: &mut TagEvent) -> bool {
    count_down(&mut tag.turn_count)
}

fn turn_scoped_lapse(tag: &mut BattlerTag, _battle: &mut Battle, _owner: CombatantId, _event: &mut TagEvent) -> bool {
    count_down_turn_scoped(&mut tag.turn_count)
}

/// Persists through ordinary checkpoints; only an explicit lapse counts down
fn custom_countdown_lapse(tag: &mut BattlerTag, _battle: &mut Battle, _owner: CombatantId, event: &mut TagEvent) -> bool {
    !event.is_custom() || count_down(&mut tag.turn_count)
}

fn say(battle: &mut Battle, owner: CombatantId, content: &str) {
    if let Some(pokemon) = battle.combatant(owner) {
        let text = pokemon_message(pokemon, content);
        battle.phases.message(text);
    }
}

fn not_dynamaxed(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.dynamaxed
}

/// Apply non-direct damage to the owner unless an ability blocks it
fn hurt(battle: &mut Battle, owner: CombatantId, amount: impl FnOnce(&Combatant) -> u32) -> Option<u32> {
    let pokemon = battle.combatant_mut(owner)?;
    if abilities::blocks_non_direct_damage(pokemon) {
        return None;
    }
    let amount = amount(pokemon);
    Some(pokemon.damage(amount))
}

/// Prefixed name of the combatant that installed `tag`
fn source_name(battle: &Battle, tag: &BattlerTag) -> Option<String> {
    let source = tag.source_id.and_then(|id| battle.combatant(id));
    if source.is_none() {
        warn!(tag = %tag.tag_type, source = ?tag.source_id, "tag source not found");
    }
    source.map(|s| format!("{}{}", pokemon_prefix(s), s.name))
}

// =========================================================================
// Move-cancelling tags
// =========================================================================

fn recharging_lapse(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    say(battle, owner, " must recharge!");
    event.move_cancelled = true;
    if let Some(pokemon) = battle.combatant_mut(owner) {
        pokemon.move_queue.pop_front();
    }
    false
}

fn flinched_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let Some(pokemon) = battle.combatant(owner) else {
        return;
    };
    let Some((stat, levels)) = abilities::flinch_effect(pokemon) else {
        return;
    };
    let passive = pokemon.is_passive(AbilityId::Steadfast);
    if let Some(target) = battle.battler_index(owner) {
        battle.phases.enqueue_now(Phase::ShowAbility { target, passive });
        battle.phases.enqueue_now(Phase::StatChange {
            target,
            self_targeted: true,
            stats: vec![stat],
            levels,
        });
    }
}

fn flinched_lapse(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    event.move_cancelled = true;
    say(battle, owner, " flinched!");
    false
}

fn interrupted_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    owner.has_tag(BattlerTagType::Flying)
}

fn interrupted_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    if let Some(pokemon) = battle.combatant_mut(owner) {
        pokemon.move_queue.pop_front();
        pokemon.move_history.push(TurnMove {
            move_id: None,
            targets: Vec::new(),
            result: MoveResult::Other,
            virtual_move: false,
        });
    }
}

fn interrupted_lapse(_tag: &mut BattlerTag, _battle: &mut Battle, _owner: CombatantId, event: &mut TagEvent) -> bool {
    event.move_cancelled = true;
    false
}

// =========================================================================
// Confusion and infatuation
// =========================================================================

fn confused_can_add(_tag: &BattlerTag, battle: &Battle, owner: &Combatant) -> bool {
    battle.arena.terrain_type() != Some(TerrainType::Misty) || !battle.is_grounded(owner)
}

fn confused_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " became confused!");
}

fn confused_overlap(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " is already confused!");
}

fn confused_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " snapped out of confusion!");
}

/// Typeless 40-power physical hit against the owner's own Defense
pub fn confusion_damage(pokemon: &Combatant, roll: u32) -> u32 {
    let level = pokemon.level as f64;
    let atk = pokemon.battle_stat(Stat::Atk) as f64;
    let def = pokemon.battle_stat(Stat::Def).max(1) as f64;
    let base = (2.0 * level / 5.0 + 2.0) * 40.0 * atk / def / 50.0 + 2.0;
    (base * (roll as f64 / 100.0)).ceil() as u32
}

fn confused_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() && count_down(&mut tag.turn_count);
    if !alive {
        return false;
    }

    say(battle, owner, " is confused!");
    if battle.rng().rand_int(3) != 0 {
        let roll = battle.rng().rand_int_range(85, 99);
        battle.phases.message("It hurt itself in its confusion!");
        if let Some(pokemon) = battle.combatant_mut(owner) {
            let damage = confusion_damage(pokemon, roll);
            pokemon.damage(damage);
        }
        event.move_cancelled = true;
    }
    true
}

fn infatuated_can_add(tag: &BattlerTag, battle: &Battle, owner: &Combatant) -> bool {
    tag.source_id
        .and_then(|id| battle.combatant(id))
        .is_some_and(|source| owner.gender.is_opposite(source.gender))
}

fn infatuated_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let Some(source) = source_name(battle, tag) else {
        return;
    };
    say(battle, owner, &format!(" fell in love with {source}!"));
}

fn infatuated_overlap(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " is already in love!");
}

fn infatuated_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " got over its infatuation.");
}

fn infatuated_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if !alive {
        return false;
    }
    let Some(source) = source_name(battle, tag) else {
        return false;
    };

    say(battle, owner, &format!(" is in love with {source}!"));
    if battle.rng().rand_int(2) != 0 {
        say(battle, owner, " is immobilized by love!");
        event.move_cancelled = true;
    }
    true
}

// =========================================================================
// Drains and damage over time
// =========================================================================

fn record_source_index(tag: &mut BattlerTag, battle: &Battle) {
    let index = tag.source_id.and_then(|id| battle.battler_index(id));
    if index.is_none() {
        warn!(tag = %tag.tag_type, source = ?tag.source_id, "inflicter is not on the field");
    }
    tag.data = BattlerTagData::Drain { source_index: index };
}

/// Hurt the owner, then pass the HP to whoever sits in the recorded slot.
///
/// `sap_message` is shown with the heal, or on its own when the slot no
/// longer holds an opponent.
fn drain(tag: &BattlerTag, battle: &mut Battle, owner: CombatantId, amount: fn(&Combatant) -> u32, sap_message: String) {
    let Some(dealt) = hurt(battle, owner, amount) else {
        return;
    };
    let Some(pokemon) = battle.combatant(owner) else {
        return;
    };
    let is_player = pokemon.is_player;
    let reversed = abilities::reverses_drain(pokemon);

    let source_index = match tag.data {
        BattlerTagData::Drain { source_index } => source_index,
        _ => None,
    };
    let source = source_index
        .and_then(|index| battle.at(index).map(|s| (index, s)))
        .filter(|(_, s)| s.is_player != is_player && !s.is_fainted());

    match source {
        Some((index, source)) if reversed => {
            let text = pokemon_message(source, " sucked up the liquid ooze!");
            battle.phases.message(text);
            battle.phases.enqueue_now(Phase::Damage {
                target: index,
                amount: dealt,
                result: HitResult::Other,
            });
        }
        Some((index, _)) => battle.phases.enqueue_now(Phase::Heal {
            target: index,
            amount: dealt,
            message: Some(sap_message),
            full_hp_message: false,
        }),
        None => {
            warn!(tag = %tag.tag_type, slot = ?source_index, "drain source left the field; no heal");
            battle.phases.message(sap_message);
        }
    }
}

fn seeded_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.has_type(Type::Grass)
}

fn seeded_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " was seeded!");
    record_source_index(tag, battle);
}

fn seeded_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive && let Some(pokemon) = battle.combatant(owner) {
        let text = pokemon_message(pokemon, "'s health is sapped by Leech Seed!");
        drain(tag, battle, owner, |p| (p.max_hp / 8).max(1), text);
    }
    alive
}

fn salt_cured_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " is being salt cured!");
    record_source_index(tag, battle);
}

fn salt_cure_damage(pokemon: &Combatant) -> u32 {
    let divisor = if pokemon.has_type(Type::Steel) || pokemon.has_type(Type::Water) { 4 } else { 8 };
    (pokemon.max_hp / divisor).max(1)
}

fn salt_cured_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive && let Some(pokemon) = battle.combatant(owner) {
        let text = pokemon_message(pokemon, &format!(" is hurt by {}!", tag.move_name()));
        drain(tag, battle, owner, salt_cure_damage, text);
    }
    alive
}

fn cursed_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " has been cursed!");
    record_source_index(tag, battle);
}

fn cursed_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive && let Some(pokemon) = battle.combatant(owner) {
        let text = pokemon_message(pokemon, &format!(" is hurt by {}!", tag.move_name()));
        drain(tag, battle, owner, |p| (p.max_hp / 4).max(1), text);
    }
    alive
}

fn nightmare_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " began having a nightmare!");
}

fn nightmare_overlap(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " is already locked in a nightmare!");
}

fn nightmare_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive {
        say(battle, owner, " is locked in a nightmare!");
        hurt(battle, owner, |p| p.max_hp.div_ceil(4));
    }
    alive
}

fn perish_song_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.boss
}

fn perish_song_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, _event: &mut TagEvent) -> bool {
    let alive = count_down(&mut tag.turn_count);
    if alive {
        say(battle, owner, &format!("'s perish count fell to {}.", tag.turn_count));
        return true;
    }

    if let Some(pokemon) = battle.combatant_mut(owner) {
        let hp = pokemon.hp;
        pokemon.damage(hp);
    }
    if let Some(target) = battle.battler_index(owner) {
        battle.phases.enqueue_now(Phase::Faint { target });
    }
    false
}

// =========================================================================
// Trapping
// =========================================================================

fn trapped_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.has_tag(BattlerTagType::Trapped) && !owner.has_type(Type::Ghost)
}

fn ingrain_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.has_tag(BattlerTagType::Trapped)
}

fn damaging_trap_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    !owner.has_type(Type::Ghost) && !owner.tags.iter().any(|t| t.tag_type.is_damaging_trap())
}

fn trap_message(tag: &BattlerTag, battle: &Battle, owner: &Combatant) -> String {
    use BattlerTagType as T;
    let source = tag.source_id.and_then(|id| battle.combatant(id));
    match (tag.tag_type, source) {
        (T::Ingrain, _) => pokemon_message(owner, " planted its roots!"),
        (T::Bind, Some(source)) => {
            pokemon_message(owner, &format!(" was squeezed by {}'s {}!", source.name, tag.move_name()))
        }
        (T::Wrap, Some(source)) => pokemon_message(owner, &format!(" was Wrapped by {}!", source.name)),
        (T::FireSpin | T::Whirlpool, _) => pokemon_message(owner, " was trapped in the vortex!"),
        (T::Clamp, Some(source)) => pokemon_message(source, &format!(" clamped {}!", owner.name)),
        (T::SandTomb, _) => pokemon_message(owner, &format!(" became trapped by {}!", tag.move_name())),
        (T::MagmaStorm, _) => pokemon_message(owner, " became trapped by swirling magma!"),
        (T::SnapTrap, _) => pokemon_message(owner, " got trapped by a snap trap!"),
        (T::ThunderCage, Some(source)) => pokemon_message(
            source,
            &format!(" trapped {}{}!", pokemon_prefix(owner).to_lowercase(), owner.name),
        ),
        (T::Infestation, Some(source)) => pokemon_message(
            owner,
            &format!(
                " has been afflicted with an infestation by {}{}!",
                pokemon_prefix(source),
                source.name
            ),
        ),
        _ => pokemon_message(owner, " can no longer escape!"),
    }
}

fn trap_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    if let Some(pokemon) = battle.combatant(owner) {
        let text = trap_message(tag, battle, pokemon);
        battle.phases.message(text);
    }
}

fn trap_remove(tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, &format!(" was freed from {}!", tag.move_name()));
}

fn damaging_trap_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, _event: &mut TagEvent) -> bool {
    let alive = count_down(&mut tag.turn_count);
    if alive {
        say(battle, owner, &format!(" is hurt by {}!", tag.move_name()));
        hurt(battle, owner, |p| p.max_hp.div_ceil(8));
    }
    alive
}

fn ingrain_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive
        && let Some(pokemon) = battle.combatant(owner)
        && let Some(target) = battle.battler_index(owner)
    {
        let phase = Phase::Heal {
            target,
            amount: pokemon.max_hp / 16,
            message: Some(pokemon_message(pokemon, " absorbed nutrients with its roots!")),
            full_hp_message: true,
        };
        battle.phases.enqueue_now(phase);
    }
    alive
}

// =========================================================================
// Healing and support
// =========================================================================

fn aqua_ring_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " surrounded itself with a veil of water!");
}

fn aqua_ring_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let alive = !event.is_custom() || count_down(&mut tag.turn_count);
    if alive
        && let Some(pokemon) = battle.combatant(owner)
        && let Some(target) = battle.battler_index(owner)
    {
        let phase = Phase::Heal {
            target,
            amount: pokemon.max_hp / 16,
            message: Some(format!("{} restored {}'s HP!", tag.move_name(), pokemon.name)),
            full_hp_message: true,
        };
        battle.phases.enqueue_now(phase);
    }
    alive
}

fn helping_hand_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let Some(target_name) = battle.combatant(owner).map(|p| p.name.clone()) else {
        return;
    };
    let text = tag
        .source_id
        .and_then(|id| battle.combatant(id))
        .map(|source| pokemon_message(source, &format!(" is ready to help {target_name}!")));
    match text {
        Some(text) => battle.phases.message(text),
        None => warn!(tag = %tag.tag_type, source = ?tag.source_id, "helper not found"),
    }
}

fn minimized_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    if battle.combatant(owner).is_some_and(|p| p.dynamaxed) {
        return false;
    }
    !event.is_custom() || count_down(&mut tag.turn_count)
}

fn drowsy_can_add(_tag: &BattlerTag, battle: &Battle, owner: &Combatant) -> bool {
    battle.arena.terrain_type() != Some(TerrainType::Electric) || !battle.is_grounded(owner)
}

fn drowsy_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " grew drowsy!");
}

fn drowsy_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, _event: &mut TagEvent) -> bool {
    if count_down(&mut tag.turn_count) {
        return true;
    }
    battle.try_set_status(owner, StatusEffect::Sleep, None);
    false
}

fn frenzy_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let turns = battle.roll(battle.rules.frenzy_confusion_turns);
    battle.add_battler_tag(owner, BattlerTagType::Confused, turns as i32, None, None);
}

// =========================================================================
// Encore
// =========================================================================

fn encore_can_add(_tag: &BattlerTag, _battle: &Battle, owner: &Combatant) -> bool {
    if owner.dynamaxed {
        return false;
    }
    let Some(last) = owner.last_move() else {
        return false;
    };
    let Some(move_id) = last.move_id else {
        return false;
    };
    if last.virtual_move {
        return false;
    }
    if matches!(
        move_id,
        Move::Mimic | Move::MirrorMove | Move::Transform | Move::Struggle | Move::Sketch | Move::SleepTalk | Move::Encore
    ) {
        return false;
    }
    !(move_id.is_charge_move() && last.result == MoveResult::Other)
}

fn encore_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let Some(pokemon) = battle.combatant(owner) else {
        return;
    };
    let Some(last) = pokemon.last_move() else {
        return;
    };
    let Some(move_id) = last.move_id else {
        return;
    };
    let targets = last.targets.clone();
    let known = pokemon.knows_move(move_id);
    let text = pokemon_message(pokemon, " got an Encore!");

    tag.data = BattlerTagData::Encore { move_id: Some(move_id) };
    battle.phases.message(text);
    if known && let Some(user) = battle.battler_index(owner) {
        battle.phases.enqueue_now(Phase::ReplaceMove { user, move_id, targets });
    }
}

fn encore_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, "'s Encore ended!");
}

fn encore_apply(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match (args, &tag.data) {
        (BattlerTagArgs::ForcedMove { move_id }, BattlerTagData::Encore { move_id: Some(locked) }) => {
            **move_id = Some(*locked);
            true
        }
        _ => false,
    }
}

// =========================================================================
// Protection
// =========================================================================

fn protected_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " protected itself!");
}

fn protected_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    if !event.is_custom() {
        return count_down_turn_scoped(&mut tag.turn_count);
    }

    say(battle, owner, " protected itself!");
    let Some(incoming) = event.incoming.filter(|m| m.makes_contact) else {
        return true;
    };
    let Some(attacker) = battle.combatant(incoming.attacker) else {
        warn!(tag = %tag.tag_type, attacker = %incoming.attacker, "attacker not found");
        return true;
    };
    let Some(target) = battle.battler_index(incoming.attacker) else {
        return true;
    };

    match tag.data {
        BattlerTagData::ContactDamage { damage_ratio } => {
            let amount = attacker.max_hp.div_ceil(damage_ratio.max(1));
            battle.phases.enqueue_now(Phase::Damage {
                target,
                amount,
                result: HitResult::Other,
            });
        }
        BattlerTagData::ContactStatChange { stat, levels } => {
            battle.phases.enqueue_now(Phase::StatChange {
                target,
                self_targeted: true,
                stats: vec![stat],
                levels,
            });
        }
        BattlerTagData::ContactStatus { effect } => {
            if battle.can_set_status(attacker, effect) {
                battle.phases.enqueue_now(Phase::SetStatus {
                    target,
                    effect,
                    source_text: None,
                });
            }
        }
        _ => {}
    }
    true
}

fn enduring_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " braced itself!");
}

fn endure_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    if event.is_custom() {
        say(battle, owner, " endured the hit!");
        return true;
    }
    count_down_turn_scoped(&mut tag.turn_count)
}

// =========================================================================
// Ability tags
// =========================================================================

fn truant_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, event: &mut TagEvent) -> bool {
    let Some(pokemon) = battle.combatant(owner) else {
        return false;
    };
    if !pokemon.has_ability(AbilityId::Truant) {
        return count_down(&mut tag.turn_count);
    }
    let passive = pokemon.is_passive(AbilityId::Truant);
    let acted = pokemon.last_move().is_some_and(|m| m.move_id.is_some());
    if !acted {
        return true;
    }

    event.move_cancelled = true;
    if let Some(target) = battle.battler_index(owner) {
        battle.phases.enqueue_now(Phase::ShowAbility { target, passive });
    }
    say(battle, owner, " is loafing around!");
    if let Some(pokemon) = battle.combatant_mut(owner) {
        pokemon.move_history.push(TurnMove {
            move_id: None,
            targets: Vec::new(),
            result: MoveResult::Fail,
            virtual_move: false,
        });
    }
    true
}

fn slow_start_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " can't get it going!");
}

fn slow_start_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " finally got its act together!");
}

fn slow_start_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, _event: &mut TagEvent) -> bool {
    if !battle.combatant(owner).is_some_and(|p| p.has_ability(AbilityId::SlowStart)) {
        tag.turn_count = 1;
    }
    count_down(&mut tag.turn_count)
}

fn slow_start_apply(_tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match args {
        BattlerTagArgs::StatMultiplier { stat: Stat::Atk | Stat::Spe, multiplier } => {
            **multiplier *= 0.5;
            true
        }
        _ => false,
    }
}

fn boost_ability(tag_type: BattlerTagType) -> AbilityId {
    match tag_type {
        BattlerTagType::QuarkDrive => AbilityId::QuarkDrive,
        _ => AbilityId::Protosynthesis,
    }
}

/// Strictly highest of the five battle stats; the earlier stat wins ties
pub fn highest_stat(pokemon: &Combatant) -> Stat {
    let mut best = Stat::Atk;
    let mut best_value = 0;
    for stat in Stat::BATTLE {
        let value = pokemon.battle_stat(stat);
        if value > best_value {
            best = stat;
            best_value = value;
        }
    }
    best
}

fn highest_stat_add(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let Some(pokemon) = battle.combatant(owner) else {
        return;
    };
    let stat = highest_stat(pokemon);
    let multiplier = if stat == Stat::Spe { 1.5 } else { 1.3 };
    let text = pokemon_message(pokemon, &format!("'s {} was heightened!", stat.name()));

    tag.data = BattlerTagData::HighestStat {
        stat: Some(stat),
        multiplier,
    };
    battle.phases.deferred_message(text);
}

fn highest_stat_remove(tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    let ability = boost_ability(tag.tag_type);
    say(battle, owner, &format!("'s {} wore off!", ability.name()));
}

fn highest_stat_lapse(tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId, _event: &mut TagEvent) -> bool {
    let ability = boost_ability(tag.tag_type);
    if !battle.combatant(owner).is_some_and(|p| p.has_ability(ability)) {
        return false;
    }
    match tag.tag_type {
        BattlerTagType::QuarkDrive => battle.arena.terrain_type() == Some(TerrainType::Electric),
        _ => matches!(
            battle.effective_weather(),
            Some(WeatherType::Sunny | WeatherType::HarshSun)
        ),
    }
}

fn highest_stat_apply(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match (args, &tag.data) {
        (
            BattlerTagArgs::StatMultiplier { stat, multiplier },
            BattlerTagData::HighestStat {
                stat: Some(boosted),
                multiplier: factor,
            },
        ) if stat == boosted => {
            **multiplier *= factor;
            true
        }
        _ => false,
    }
}

// =========================================================================
// Markers and modifiers
// =========================================================================

fn hide_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    if let Some(pokemon) = battle.combatant_mut(owner) {
        pokemon.hidden = true;
    }
}

fn hide_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    if let Some(pokemon) = battle.combatant_mut(owner) {
        pokemon.hidden = false;
    }
}

fn type_boost_apply(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match (args, &tag.data) {
        (
            BattlerTagArgs::MovePower { move_type, power },
            BattlerTagData::TypeBoost {
                boosted_type,
                boost_value,
                ..
            },
        ) if move_type == boosted_type => {
            **power *= boost_value;
            true
        }
        _ => false,
    }
}

fn type_immune_apply(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match (args, &tag.data) {
        (BattlerTagArgs::TypeImmunity { move_type, immune }, BattlerTagData::TypeImmune { immune_type })
            if move_type == immune_type =>
        {
            **immune = true;
            true
        }
        _ => false,
    }
}

fn crit_boost_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " is getting pumped!");
}

fn crit_boost_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " relaxed.");
}

fn crit_apply(tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    let BattlerTagArgs::Crit { stage, always, never } = args else {
        return false;
    };
    match tag.tag_type {
        BattlerTagType::CritBoost => **stage += 2,
        BattlerTagType::AlwaysCrit => **always = true,
        BattlerTagType::NoCrit => **never = true,
        _ => return false,
    }
    true
}

fn ignore_accuracy_apply(_tag: &BattlerTag, args: &mut BattlerTagArgs<'_>) -> bool {
    match args {
        BattlerTagArgs::IgnoreAccuracy { ignore } => {
            **ignore = true;
            true
        }
        _ => false,
    }
}

fn magnet_rise_add(_tag: &mut BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, " levitated with electromagnetism!");
}

fn magnet_rise_remove(_tag: &BattlerTag, battle: &mut Battle, owner: CombatantId) {
    say(battle, owner, "'s electromagnetism wore off!");
}
