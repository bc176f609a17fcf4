//! Field-level tags: screens, hazards, rooms, delayed attacks and wishes

use fieldtag_protocol::{
    ArenaTagRecord, ArenaTagSide, ArenaTagType, BattlerIndex, CombatantId, LoadError, Move, MoveCategory,
    Stat, require,
};
use tracing::warn;

use super::count_down;
use crate::abilities;
use crate::engine::{Battle, HitResult, Phase, PhaseScheduler};
use crate::messages::{pokemon_message, pokemon_possessive};
use crate::types::{Combatant, Effectiveness, StatusEffect, Type};

/// Family-specific state
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaTagData {
    Plain,
    WeakenMoveType {
        weakened_type: Type,
    },
    Trap {
        layers: u8,
        max_layers: u8,
        /// Absorbed by a grounded Poison type; removal is silent
        neutralized: bool,
    },
    DelayedAttack {
        target_index: Option<BattlerIndex>,
    },
    Wish {
        battler_index: Option<BattlerIndex>,
        heal_hp: u32,
        trigger_message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArenaTag {
    pub tag_type: ArenaTagType,
    /// Below 1 means the tag never runs out
    pub turn_count: i32,
    pub source_move: Option<Move>,
    pub source_id: Option<CombatantId>,
    pub side: ArenaTagSide,
    pub data: ArenaTagData,
}

/// Query arguments and output holders for [`ArenaTag::apply`]
#[derive(Debug)]
pub enum ArenaTagArgs<'a> {
    /// A stat drop about to land on the covered side
    StatDrop { blocked: &'a mut bool },
    /// Damage multiplier for a hit against the covered side
    Screen {
        category: MoveCategory,
        /// Weaker screens in double battles
        breaker: bool,
        multiplier: &'a mut f64,
    },
    MoveType { move_type: Type, power: &'a mut f64 },
    SpeedOrder { reversed: &'a mut bool },
}

/// Result of an entry hazard firing on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrapOutcome {
    pub triggered: bool,
    /// The hazard used itself up and must be removed
    pub remove: bool,
}

impl TrapOutcome {
    pub const NONE: Self = Self {
        triggered: false,
        remove: false,
    };

    pub const TRIGGERED: Self = Self {
        triggered: true,
        remove: false,
    };
}

pub type OnAdd = fn(tag: &mut ArenaTag, battle: &mut Battle);
pub type OnOverlap = fn(tag: &mut ArenaTag, battle: &mut Battle);
pub type OnRemove = fn(tag: &ArenaTag, battle: &mut Battle);
pub type Lapse = fn(tag: &mut ArenaTag, battle: &mut Battle) -> bool;
pub type Apply = fn(tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool;
pub type ActivateTrap = fn(tag: &mut ArenaTag, battle: &mut Battle, entrant: CombatantId) -> TrapOutcome;
pub type MatchupScore = fn(tag: &ArenaTag, battle: &Battle, combatant: &Combatant) -> f64;

#[derive(Clone, Copy)]
pub struct ArenaTagHooks {
    pub on_add: Option<OnAdd>,
    pub on_overlap: Option<OnOverlap>,
    pub on_remove: Option<OnRemove>,
    pub lapse: Lapse,
    pub apply: Option<Apply>,
    pub activate_trap: Option<ActivateTrap>,
    pub matchup_score: Option<MatchupScore>,
}

impl ArenaTagHooks {
    /// Plain countdown that announces when it wears off
    pub const BASE: Self = Self {
        on_add: None,
        on_overlap: None,
        on_remove: Some(wore_off),
        lapse: base_lapse,
        apply: None,
        activate_trap: None,
        matchup_score: None,
    };
}

impl ArenaTag {
    pub fn new(
        tag_type: ArenaTagType,
        turn_count: i32,
        source_move: Option<Move>,
        source_id: Option<CombatantId>,
        side: ArenaTagSide,
        data: ArenaTagData,
    ) -> Self {
        Self {
            tag_type,
            turn_count,
            source_move,
            source_id,
            side,
            data,
        }
    }

    pub fn hooks(&self) -> &'static ArenaTagHooks {
        arena_tag_hooks(self.tag_type)
    }

    /// Pure query; never touches the duration
    pub fn apply(&self, args: &mut ArenaTagArgs<'_>) -> bool {
        match self.hooks().apply {
            Some(apply) => apply(self, args),
            None => true,
        }
    }

    pub fn move_name(&self) -> &'static str {
        self.source_move.map_or(self.tag_type.as_str(), |m| m.name())
    }

    pub fn layers(&self) -> Option<u8> {
        match self.data {
            ArenaTagData::Trap { layers, .. } => Some(layers),
            _ => None,
        }
    }

    /// Whether this hazard fires on `entrant` as it enters
    pub fn trap_applies(&self, entrant: &Combatant) -> bool {
        self.hooks().activate_trap.is_some()
            && self.side.covers(entrant.is_player)
            && self.source_id != Some(entrant.id)
    }

    /// Switch-in desirability factor for `combatant` facing this hazard
    pub fn matchup_score(&self, battle: &Battle, combatant: &Combatant) -> f64 {
        self.hooks()
            .matchup_score
            .map_or(1.0, |score| score(self, battle, combatant))
    }

    pub fn to_record(&self) -> ArenaTagRecord {
        let mut record = ArenaTagRecord::new(self.tag_type, self.turn_count, self.side);
        record.source_move = self.source_move;
        record.source_id = self.source_id;
        match &self.data {
            ArenaTagData::Plain | ArenaTagData::WeakenMoveType { .. } => {}
            ArenaTagData::Trap {
                layers,
                max_layers,
                neutralized,
            } => {
                record.layers = Some(*layers);
                record.max_layers = Some(*max_layers);
                record.neutralized = *neutralized;
            }
            ArenaTagData::DelayedAttack { target_index } => record.target_index = *target_index,
            ArenaTagData::Wish {
                battler_index,
                heal_hp,
                trigger_message,
            } => {
                record.battler_index = *battler_index;
                record.heal_hp = Some(*heal_hp);
                record.trigger_message = Some(trigger_message.clone());
            }
        }
        record
    }
}

fn tag_move(tag_type: ArenaTagType) -> Move {
    match tag_type {
        ArenaTagType::Mist => Move::Mist,
        ArenaTagType::MudSport => Move::MudSport,
        ArenaTagType::WaterSport => Move::WaterSport,
        ArenaTagType::Spikes => Move::Spikes,
        ArenaTagType::ToxicSpikes => Move::ToxicSpikes,
        ArenaTagType::FutureSight => Move::FutureSight,
        ArenaTagType::DoomDesire => Move::DoomDesire,
        ArenaTagType::Wish => Move::Wish,
        ArenaTagType::StealthRock => Move::StealthRock,
        ArenaTagType::StickyWeb => Move::StickyWeb,
        ArenaTagType::TrickRoom => Move::TrickRoom,
        ArenaTagType::Gravity => Move::Gravity,
        ArenaTagType::Reflect => Move::Reflect,
        ArenaTagType::LightScreen => Move::LightScreen,
        ArenaTagType::AuroraVeil => Move::AuroraVeil,
        ArenaTagType::Tailwind => Move::Tailwind,
    }
}

fn trap(tag_type: ArenaTagType) -> ArenaTagData {
    ArenaTagData::Trap {
        layers: 1,
        max_layers: tag_type.max_layers().unwrap_or(1),
        neutralized: false,
    }
}

/// Build a fresh tag of `tag_type`.
///
/// Field-wide kinds ignore `side`; hazards never run out; delayed attacks
/// always land after three turns. `target_index` is only read by delayed
/// attacks.
pub fn get_arena_tag(
    tag_type: ArenaTagType,
    turn_count: i32,
    source_move: Option<Move>,
    source_id: Option<CombatantId>,
    side: ArenaTagSide,
    target_index: Option<BattlerIndex>,
) -> ArenaTag {
    let fixed_move = Some(tag_move(tag_type));
    match tag_type {
        ArenaTagType::Mist
        | ArenaTagType::Reflect
        | ArenaTagType::LightScreen
        | ArenaTagType::AuroraVeil
        | ArenaTagType::Tailwind => {
            ArenaTag::new(tag_type, turn_count, fixed_move, source_id, side, ArenaTagData::Plain)
        }
        ArenaTagType::MudSport => ArenaTag::new(
            tag_type,
            turn_count,
            fixed_move,
            source_id,
            ArenaTagSide::Both,
            ArenaTagData::WeakenMoveType {
                weakened_type: Type::Electric,
            },
        ),
        ArenaTagType::WaterSport => ArenaTag::new(
            tag_type,
            turn_count,
            fixed_move,
            source_id,
            ArenaTagSide::Both,
            ArenaTagData::WeakenMoveType {
                weakened_type: Type::Fire,
            },
        ),
        ArenaTagType::Spikes
        | ArenaTagType::ToxicSpikes
        | ArenaTagType::StealthRock
        | ArenaTagType::StickyWeb => ArenaTag::new(tag_type, 0, fixed_move, source_id, side, trap(tag_type)),
        ArenaTagType::FutureSight | ArenaTagType::DoomDesire => ArenaTag::new(
            tag_type,
            3,
            source_move.or(fixed_move),
            source_id,
            ArenaTagSide::Both,
            ArenaTagData::DelayedAttack { target_index },
        ),
        ArenaTagType::Wish => ArenaTag::new(
            tag_type,
            turn_count,
            fixed_move,
            source_id,
            side,
            ArenaTagData::Wish {
                battler_index: None,
                heal_hp: 0,
                trigger_message: String::new(),
            },
        ),
        ArenaTagType::TrickRoom | ArenaTagType::Gravity => {
            ArenaTag::new(tag_type, turn_count, fixed_move, source_id, ArenaTagSide::Both, ArenaTagData::Plain)
        }
    }
}

/// Rebuild a saved tag through the factory, then restore its saved state
pub fn load_arena_tag(record: &ArenaTagRecord) -> Result<ArenaTag, LoadError> {
    let mut tag = get_arena_tag(
        record.tag_type,
        record.turn_count,
        record.source_move,
        record.source_id,
        record.side,
        record.target_index,
    );
    tag.turn_count = record.turn_count;
    match &mut tag.data {
        ArenaTagData::Trap {
            layers,
            max_layers,
            neutralized,
        } => {
            *layers = require(record.layers, record.tag_type, "layers")?;
            if let Some(max) = record.max_layers
                && max != *max_layers
            {
                return Err(LoadError::InvalidField {
                    tag: record.tag_type.to_string(),
                    field: "maxLayers",
                    reason: format!("{} does not match the cap of {}", max, max_layers),
                });
            }
            if *layers == 0 || *layers > *max_layers {
                return Err(LoadError::InvalidField {
                    tag: record.tag_type.to_string(),
                    field: "layers",
                    reason: format!("{} is outside 1..={}", layers, max_layers),
                });
            }
            *neutralized = record.neutralized;
        }
        ArenaTagData::Wish {
            battler_index,
            heal_hp,
            trigger_message,
        } => {
            *battler_index = Some(require(record.battler_index, record.tag_type, "battlerIndex")?);
            *heal_hp = require(record.heal_hp, record.tag_type, "healHp")?;
            *trigger_message = require(record.trigger_message.clone(), record.tag_type, "triggerMessage")?;
        }
        ArenaTagData::Plain | ArenaTagData::WeakenMoveType { .. } | ArenaTagData::DelayedAttack { .. } => {}
    }
    Ok(tag)
}

// =========================================================================
// Hook tables
// =========================================================================

const MIST: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(mist_add),
    apply: Some(mist_apply),
    ..ArenaTagHooks::BASE
};

const MUD_SPORT: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(mud_sport_add),
    on_remove: Some(mud_sport_remove),
    apply: Some(weaken_move_type_apply),
    ..ArenaTagHooks::BASE
};

const WATER_SPORT: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(water_sport_add),
    on_remove: Some(water_sport_remove),
    apply: Some(weaken_move_type_apply),
    ..ArenaTagHooks::BASE
};

const SPIKES: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(scattered_hazard_add),
    on_overlap: Some(trap_overlap),
    activate_trap: Some(spikes_activate),
    matchup_score: Some(trap_matchup_score),
    ..ArenaTagHooks::BASE
};

const TOXIC_SPIKES: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(scattered_hazard_add),
    on_overlap: Some(trap_overlap),
    on_remove: Some(toxic_spikes_remove),
    activate_trap: Some(toxic_spikes_activate),
    matchup_score: Some(toxic_spikes_matchup_score),
    ..ArenaTagHooks::BASE
};

const DELAYED_ATTACK: ArenaTagHooks = ArenaTagHooks {
    on_remove: None,
    lapse: delayed_attack_lapse,
    ..ArenaTagHooks::BASE
};

const WISH: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(wish_add),
    on_remove: Some(wish_remove),
    ..ArenaTagHooks::BASE
};

const STEALTH_ROCK: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(stealth_rock_add),
    on_overlap: Some(trap_overlap),
    activate_trap: Some(stealth_rock_activate),
    matchup_score: Some(stealth_rock_matchup_score),
    ..ArenaTagHooks::BASE
};

const STICKY_WEB: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(sticky_web_add),
    on_overlap: Some(trap_overlap),
    activate_trap: Some(sticky_web_activate),
    matchup_score: Some(trap_matchup_score),
    ..ArenaTagHooks::BASE
};

const TRICK_ROOM: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(trick_room_add),
    on_remove: Some(trick_room_remove),
    apply: Some(trick_room_apply),
    ..ArenaTagHooks::BASE
};

const GRAVITY: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(gravity_add),
    on_remove: Some(gravity_remove),
    ..ArenaTagHooks::BASE
};

const REFLECT: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(screen_add),
    apply: Some(reflect_apply),
    ..ArenaTagHooks::BASE
};

const LIGHT_SCREEN: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(screen_add),
    apply: Some(light_screen_apply),
    ..ArenaTagHooks::BASE
};

const AURORA_VEIL: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(screen_add),
    apply: Some(aurora_veil_apply),
    ..ArenaTagHooks::BASE
};

const TAILWIND: ArenaTagHooks = ArenaTagHooks {
    on_add: Some(tailwind_add),
    on_remove: Some(tailwind_remove),
    ..ArenaTagHooks::BASE
};

pub fn arena_tag_hooks(tag_type: ArenaTagType) -> &'static ArenaTagHooks {
    match tag_type {
        ArenaTagType::Mist => &MIST,
        ArenaTagType::MudSport => &MUD_SPORT,
        ArenaTagType::WaterSport => &WATER_SPORT,
        ArenaTagType::Spikes => &SPIKES,
        ArenaTagType::ToxicSpikes => &TOXIC_SPIKES,
        ArenaTagType::FutureSight | ArenaTagType::DoomDesire => &DELAYED_ATTACK,
        ArenaTagType::Wish => &WISH,
        ArenaTagType::StealthRock => &STEALTH_ROCK,
        ArenaTagType::StickyWeb => &STICKY_WEB,
        ArenaTagType::TrickRoom => &TRICK_ROOM,
        ArenaTagType::Gravity => &GRAVITY,
        ArenaTagType::Reflect => &REFLECT,
        ArenaTagType::LightScreen => &LIGHT_SCREEN,
        ArenaTagType::AuroraVeil => &AURORA_VEIL,
        ArenaTagType::Tailwind => &TAILWIND,
    }
}

// =========================================================================
// Shared behaviour
// =========================================================================

fn base_lapse(tag: &mut ArenaTag, _battle: &mut Battle) -> bool {
    count_down(&mut tag.turn_count)
}

fn side_suffix(side: ArenaTagSide) -> &'static str {
    match side {
        ArenaTagSide::Both => "",
        ArenaTagSide::Player => " on your side",
        ArenaTagSide::Enemy => " on the foe's side",
    }
}

/// Team a side-scoped tag sits under, as seen by the player
fn side_team(side: ArenaTagSide) -> &'static str {
    match side {
        ArenaTagSide::Both => "both teams",
        ArenaTagSide::Player => "your team",
        ArenaTagSide::Enemy => "the opposing team",
    }
}

fn wore_off(tag: &ArenaTag, battle: &mut Battle) {
    battle
        .phases
        .message(format!("{}'s effect wore off{}.", tag.move_name(), side_suffix(tag.side)));
}

fn source_message(tag: &ArenaTag, battle: &mut Battle, content: &str) {
    let text = tag
        .source_id
        .and_then(|id| battle.combatant(id))
        .map(|source| pokemon_message(source, content));
    match text {
        Some(text) => battle.phases.message(text),
        None => warn!(tag = %tag.tag_type, source = ?tag.source_id, "source not found for announcement"),
    }
}

// =========================================================================
// Mist, sports, rooms, tailwind, screens
// =========================================================================

fn mist_add(tag: &mut ArenaTag, battle: &mut Battle) {
    source_message(tag, battle, "'s team became shrouded in mist!");
}

fn mist_apply(_tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    match args {
        ArenaTagArgs::StatDrop { blocked } => {
            **blocked = true;
            true
        }
        _ => false,
    }
}

fn mud_sport_add(_tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message("Electricity's power was weakened!");
}

fn mud_sport_remove(_tag: &ArenaTag, battle: &mut Battle) {
    battle.phases.message("The effects of Mud Sport have faded.");
}

fn water_sport_add(_tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message("Fire's power was weakened!");
}

fn water_sport_remove(_tag: &ArenaTag, battle: &mut Battle) {
    battle.phases.message("The effects of Water Sport have faded.");
}

fn weaken_move_type_apply(tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    let ArenaTagData::WeakenMoveType { weakened_type } = tag.data else {
        return false;
    };
    match args {
        ArenaTagArgs::MoveType { move_type, power } if *move_type == weakened_type => {
            **power *= 0.33;
            true
        }
        _ => false,
    }
}

fn trick_room_add(tag: &mut ArenaTag, battle: &mut Battle) {
    source_message(tag, battle, " twisted the dimensions!");
}

fn trick_room_remove(_tag: &ArenaTag, battle: &mut Battle) {
    battle.phases.message("The twisted dimensions returned to normal!");
}

fn trick_room_apply(_tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    match args {
        ArenaTagArgs::SpeedOrder { reversed } => {
            **reversed = !**reversed;
            true
        }
        _ => false,
    }
}

fn gravity_add(_tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message("Gravity intensified!");
}

fn gravity_remove(_tag: &ArenaTag, battle: &mut Battle) {
    battle.phases.message("Gravity returned to normal!");
}

fn tailwind_add(tag: &mut ArenaTag, battle: &mut Battle) {
    battle
        .phases
        .message(format!("The Tailwind blew from behind {}!", side_team(tag.side)));
}

fn tailwind_remove(tag: &ArenaTag, battle: &mut Battle) {
    let team = match tag.side {
        ArenaTagSide::Player => "Your team's",
        ArenaTagSide::Enemy => "The opposing team's",
        ArenaTagSide::Both => "The",
    };
    battle.phases.message(format!("{team} Tailwind petered out!"));
}

fn screen_add(tag: &mut ArenaTag, battle: &mut Battle) {
    let kind = match tag.tag_type {
        ArenaTagType::Reflect => "physical moves",
        ArenaTagType::LightScreen => "special moves",
        _ => "moves",
    };
    battle.phases.message(format!(
        "{} reduced the damage of {}{}.",
        tag.move_name(),
        kind,
        side_suffix(tag.side)
    ));
}

fn screen_multiplier(breaker: bool) -> f64 {
    if breaker { 2732.0 / 4096.0 } else { 0.5 }
}

fn screen_apply(args: &mut ArenaTagArgs<'_>, weakens: fn(MoveCategory) -> bool) -> bool {
    match args {
        ArenaTagArgs::Screen {
            category,
            breaker,
            multiplier,
        } if weakens(*category) => {
            **multiplier = screen_multiplier(*breaker);
            true
        }
        _ => false,
    }
}

fn reflect_apply(_tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    screen_apply(args, |category| category == MoveCategory::Physical)
}

fn light_screen_apply(_tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    screen_apply(args, |category| category == MoveCategory::Special)
}

fn aurora_veil_apply(_tag: &ArenaTag, args: &mut ArenaTagArgs<'_>) -> bool {
    screen_apply(args, |_| true)
}

// =========================================================================
// Entry hazards
// =========================================================================

fn scattered_hazard_add(tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message(format!(
        "{} were scattered all around the feet of {}!",
        tag.move_name(),
        side_team(tag.side)
    ));
}

fn stealth_rock_add(tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message(format!(
        "Pointed stones float in the air around {}!",
        side_team(tag.side)
    ));
}

fn sticky_web_add(tag: &mut ArenaTag, battle: &mut Battle) {
    battle.phases.message(format!(
        "A {} spreads out on the ground around {}!",
        tag.move_name().to_lowercase(),
        side_team(tag.side)
    ));
}

/// Stack another layer up to the cap, then announce the hazard again
fn trap_overlap(tag: &mut ArenaTag, battle: &mut Battle) {
    if let ArenaTagData::Trap {
        layers, max_layers, ..
    } = &mut tag.data
        && *layers < *max_layers
    {
        *layers += 1;
    }
    if let Some(on_add) = tag.hooks().on_add {
        on_add(tag, battle);
    }
}

fn spikes_activate(tag: &mut ArenaTag, battle: &mut Battle, entrant: CombatantId) -> TrapOutcome {
    let Some(layers) = tag.layers() else {
        return TrapOutcome::NONE;
    };
    let Some(pokemon) = battle.combatant(entrant) else {
        return TrapOutcome::NONE;
    };
    let Some(target) = battle.battler_index(entrant) else {
        return TrapOutcome::NONE;
    };
    if !battle.is_grounded(pokemon) || abilities::blocks_non_direct_damage(pokemon) {
        return TrapOutcome::NONE;
    }

    let damage = pokemon.max_hp.div_ceil(10 - 2 * u32::from(layers.min(3)));
    let message = pokemon_message(pokemon, " is hurt by the spikes!");
    battle.phases.message(message);
    battle.phases.enqueue_now(Phase::Damage {
        target,
        amount: damage,
        result: HitResult::Other,
    });
    TrapOutcome::TRIGGERED
}

fn toxic_spikes_activate(tag: &mut ArenaTag, battle: &mut Battle, entrant: CombatantId) -> TrapOutcome {
    let Some(layers) = tag.layers() else {
        return TrapOutcome::NONE;
    };
    let Some(pokemon) = battle.combatant(entrant) else {
        return TrapOutcome::NONE;
    };
    let Some(target) = battle.battler_index(entrant) else {
        return TrapOutcome::NONE;
    };
    if !battle.is_grounded(pokemon) {
        return TrapOutcome::NONE;
    }

    if pokemon.has_type(Type::Poison) {
        let message = pokemon_message(pokemon, &format!(" absorbed the {}!", tag.move_name()));
        if let ArenaTagData::Trap { neutralized, .. } = &mut tag.data {
            *neutralized = true;
        }
        battle.phases.message(message);
        return TrapOutcome {
            triggered: true,
            remove: true,
        };
    }

    let effect = if layers > 1 {
        StatusEffect::Toxic
    } else {
        StatusEffect::Poison
    };
    if pokemon.status.is_none() && battle.can_set_status(pokemon, effect) {
        battle.phases.enqueue_now(Phase::SetStatus {
            target,
            effect,
            source_text: Some(format!("the {}", tag.move_name())),
        });
        return TrapOutcome::TRIGGERED;
    }
    TrapOutcome::NONE
}

fn toxic_spikes_remove(tag: &ArenaTag, battle: &mut Battle) {
    if !matches!(tag.data, ArenaTagData::Trap { neutralized: true, .. }) {
        wore_off(tag, battle);
    }
}

/// Fraction of max HP Stealth Rock takes from a combatant of these types
pub fn stealth_rock_ratio(types: &[Type]) -> f64 {
    match Effectiveness::of(Type::Rock, types) {
        Effectiveness::Immune => 0.0,
        Effectiveness::Quarter => 0.03125,
        Effectiveness::Half => 0.0625,
        Effectiveness::Neutral => 0.125,
        Effectiveness::Double => 0.25,
        Effectiveness::Quadruple => 0.5,
    }
}

fn stealth_rock_activate(_tag: &mut ArenaTag, battle: &mut Battle, entrant: CombatantId) -> TrapOutcome {
    let Some(pokemon) = battle.combatant(entrant) else {
        return TrapOutcome::NONE;
    };
    let Some(target) = battle.battler_index(entrant) else {
        return TrapOutcome::NONE;
    };
    if abilities::blocks_non_direct_damage(pokemon) {
        return TrapOutcome::NONE;
    }

    let ratio = stealth_rock_ratio(&pokemon.types);
    if ratio > 0.0 {
        let damage = (pokemon.max_hp as f64 * ratio).ceil() as u32;
        let message = format!("Pointed stones dug into {}!", pokemon.name);
        battle.phases.message(message);
        battle.phases.enqueue_now(Phase::Damage {
            target,
            amount: damage,
            result: HitResult::Other,
        });
        return TrapOutcome::TRIGGERED;
    }
    TrapOutcome::NONE
}

fn sticky_web_activate(_tag: &mut ArenaTag, battle: &mut Battle, entrant: CombatantId) -> TrapOutcome {
    let Some(pokemon) = battle.combatant(entrant) else {
        return TrapOutcome::NONE;
    };
    let Some(target) = battle.battler_index(entrant) else {
        return TrapOutcome::NONE;
    };
    if !battle.is_grounded(pokemon) || abilities::protects_stat(pokemon, Stat::Spe) {
        return TrapOutcome::NONE;
    }

    let message = format!("The opposing {} was caught in a sticky web!", pokemon.name);
    battle.phases.message(message);
    battle.phases.enqueue_now(Phase::StatChange {
        target,
        self_targeted: false,
        stats: vec![Stat::Spe],
        levels: -1,
    });
    TrapOutcome::TRIGGERED
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

fn trap_matchup_score(tag: &ArenaTag, battle: &Battle, combatant: &Combatant) -> f64 {
    if battle.is_grounded(combatant) {
        return 1.0;
    }
    let layers = tag.layers().unwrap_or(1) as i32;
    lerp(0.0, 1.0 / 2f64.powi(layers), combatant.hp_ratio().min(0.5) * 2.0)
}

fn toxic_spikes_matchup_score(tag: &ArenaTag, battle: &Battle, combatant: &Combatant) -> f64 {
    if battle.is_grounded(combatant) || !combatant.can_set_status(StatusEffect::Poison) {
        return 1.0;
    }
    if combatant.has_type(Type::Poison) {
        return 1.25;
    }
    trap_matchup_score(tag, battle, combatant)
}

fn stealth_rock_matchup_score(tag: &ArenaTag, battle: &Battle, combatant: &Combatant) -> f64 {
    let ratio = stealth_rock_ratio(&combatant.types);
    lerp(trap_matchup_score(tag, battle, combatant), 1.0, 1.0 - ratio.powf(ratio))
}

// =========================================================================
// Delayed attacks and wishes
// =========================================================================

fn delayed_attack_lapse(tag: &mut ArenaTag, battle: &mut Battle) -> bool {
    let alive = count_down(&mut tag.turn_count);
    if !alive {
        let ArenaTagData::DelayedAttack { target_index } = tag.data else {
            return alive;
        };
        match (tag.source_id, target_index, tag.source_move) {
            (Some(user), Some(target), Some(move_id)) => battle.phases.enqueue_now(Phase::MoveEffect {
                user,
                targets: vec![target],
                move_id,
                virtual_move: true,
            }),
            _ => warn!(tag = %tag.tag_type, "delayed attack has no user or target; dropped"),
        }
    }
    alive
}

fn wish_add(tag: &mut ArenaTag, battle: &mut Battle) {
    let Some(user) = tag.source_id.and_then(|id| battle.combatant(id)) else {
        warn!(tag = %tag.tag_type, source = ?tag.source_id, "wish caster not found");
        return;
    };
    let battler_index = battle.battler_index(user.id);
    let heal_hp = (user.max_hp / 2).max(1);
    let trigger_message = format!("{} wish came true!", pokemon_possessive(user));
    tag.data = ArenaTagData::Wish {
        battler_index,
        heal_hp,
        trigger_message,
    };
}

fn wish_remove(tag: &ArenaTag, battle: &mut Battle) {
    let ArenaTagData::Wish {
        battler_index: Some(index),
        heal_hp,
        trigger_message,
    } = &tag.data
    else {
        return;
    };
    let active = battle.at(*index).is_some_and(|target| !target.is_fainted());
    if active {
        battle.phases.message(trigger_message.clone());
        battle.phases.enqueue_now(Phase::Heal {
            target: *index,
            amount: *heal_hp,
            message: None,
            full_hp_message: true,
        });
    }
}
