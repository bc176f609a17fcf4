//! Turn-level scenarios driving tags through the [`Battle`] lifecycle

use fieldtag_protocol::{
    ArenaTagRecord, ArenaTagSide, ArenaTagType, BattlerIndex, BattlerTagLapseType, BattlerTagType, CombatantId, Move,
    MoveCategory, Stat,
};

use super::{Battle, Phase, PhaseQueue, PhaseScheduler};
use crate::abilities::AbilityId;
use crate::berry::{BerryType, eat_berry};
use crate::config::TagRules;
use crate::rng::ScriptedRng;
use crate::tags::arena::ArenaTagData;
use crate::tags::battler::confusion_damage;
use crate::tags::{ArenaTagArgs, IncomingMove, load_arena_tag, load_battler_tag};
use crate::types::{
    BaseStats, Combatant, Gender, MoveResult, StatusEffect, TerrainType, TurnMove, Type, WeatherType,
};

const ALLY: CombatantId = CombatantId(1);
const FOE: CombatantId = CombatantId(3);
const BENCH: CombatantId = CombatantId(4);

fn pokemon(id: CombatantId, name: &str, types: &[Type], max_hp: u32) -> Combatant {
    let mut pokemon = Combatant::new(id, name, types.to_vec(), max_hp);
    pokemon.stats = BaseStats::new(100, 100, 100, 100, 100);
    pokemon
}

/// A singles battle: `ally` in the first player slot, `foe` in the first
/// enemy slot, with an empty phase queue
fn singles(ally: Combatant, foe: Combatant) -> Battle {
    let mut battle = Battle::with_rng(TagRules::default(), ScriptedRng::default());
    let ally_id = battle.add_combatant(ally);
    let foe_id = battle.add_combatant(foe.enemy());
    battle.switch_in(ally_id, BattlerIndex::Player);
    battle.switch_in(foe_id, BattlerIndex::Enemy);
    battle.phases.drain();
    battle
}

fn default_singles() -> Battle {
    singles(
        pokemon(ALLY, "Blissey", &[Type::Normal], 400),
        pokemon(FOE, "Snorlax", &[Type::Normal], 320),
    )
}

/// Record a successful use of `move_id` against the first enemy slot
fn used_move(battle: &mut Battle, id: CombatantId, move_id: Move) {
    if let Some(pokemon) = battle.combatant_mut(id) {
        pokemon
            .move_history
            .push(TurnMove::used(move_id, vec![BattlerIndex::Enemy], MoveResult::Success));
    }
}

fn hp(battle: &Battle, id: CombatantId) -> u32 {
    battle.combatant(id).map_or(0, |c| c.hp)
}

fn has_tag(battle: &Battle, id: CombatantId, tag_type: BattlerTagType) -> bool {
    battle.combatant(id).is_some_and(|c| c.has_tag(tag_type))
}

fn damage_phases(phases: &[Phase]) -> Vec<(BattlerIndex, u32)> {
    phases
        .iter()
        .filter_map(|phase| match phase {
            Phase::Damage { target, amount, .. } => Some((*target, *amount)),
            _ => None,
        })
        .collect()
}

fn heal_phases(phases: &[Phase]) -> Vec<(BattlerIndex, u32)> {
    phases
        .iter()
        .filter_map(|phase| match phase {
            Phase::Heal { target, amount, .. } => Some((*target, *amount)),
            _ => None,
        })
        .collect()
}

// =========================================================================
// Arena tags
// =========================================================================

#[test]
fn test_spikes_stack_to_three_layers() {
    let mut battle = default_singles();

    assert!(battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None));
    assert!(!battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None));
    assert!(!battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None));
    let spikes = battle.get_arena_tag(ArenaTagType::Spikes, ArenaTagSide::Enemy);
    assert_eq!(spikes.and_then(|t| t.layers()), Some(3));

    // A fourth application changes nothing but still announces the hazard
    battle.phases.drain();
    let before = battle.arena.tags.clone();
    assert!(!battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None));
    assert_eq!(battle.arena.tags, before);
    assert_eq!(
        battle.phases.messages(),
        vec!["Spikes were scattered all around the feet of the opposing team!"]
    );
}

#[test]
fn test_spikes_damage_grounded_entrant() {
    let mut battle = default_singles();
    for _ in 0..3 {
        battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    }
    battle.add_combatant(pokemon(BENCH, "Golem", &[Type::Rock, Type::Ground], 301).enemy());
    battle.phases.drain();

    assert!(battle.switch_in(BENCH, BattlerIndex::Enemy));
    let phases = battle.phases.drain();
    assert_eq!(damage_phases(&phases), vec![(BattlerIndex::Enemy, 76)]);
    assert!(matches!(&phases[0], Phase::Message(text) if text == "Foe Golem is hurt by the spikes!"));

    // The previous occupant left the field
    assert!(!battle.is_on_field(FOE));
}

#[test]
fn test_spikes_skip_airborne_entrant() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Pidgeot", &[Type::Normal, Type::Flying], 300).enemy());
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert!(damage_phases(&battle.phases.drain()).is_empty());
}

#[test]
fn test_hazards_spare_the_other_side() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::StealthRock, 0, None, Some(FOE), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Charizard", &[Type::Fire, Type::Flying], 300));
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Player2);
    assert!(battle.phases.is_empty());
}

#[test]
fn test_reflect_halves_physical_only() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Reflect, 5, None, Some(ALLY), ArenaTagSide::Player, None);

    assert_eq!(battle.screen_multiplier(ALLY, MoveCategory::Physical), 0.5);
    assert_eq!(battle.screen_multiplier(FOE, MoveCategory::Physical), 1.0);

    let mut multiplier = 1.0;
    let applied = battle.apply_arena_tags(
        ArenaTagType::Reflect,
        ArenaTagSide::Player,
        &mut ArenaTagArgs::Screen {
            category: MoveCategory::Special,
            breaker: false,
            multiplier: &mut multiplier,
        },
    );
    assert!(!applied);
    assert_eq!(multiplier, 1.0);
}

#[test]
fn test_screens_weaker_in_doubles() {
    let mut battle = default_singles();
    battle.rules.double_battle = true;
    battle.add_arena_tag(ArenaTagType::LightScreen, 5, None, Some(ALLY), ArenaTagSide::Player, None);
    assert_eq!(battle.screen_multiplier(ALLY, MoveCategory::Special), 2732.0 / 4096.0);
}

#[test]
fn test_screen_wears_off() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Reflect, 2, None, Some(ALLY), ArenaTagSide::Player, None);
    battle.phases.drain();

    battle.lapse_arena_tags();
    assert!(battle.arena.has_tag(ArenaTagType::Reflect));
    battle.lapse_arena_tags();
    assert!(!battle.arena.has_tag(ArenaTagType::Reflect));
    assert_eq!(battle.phases.messages(), vec!["Reflect's effect wore off on your side."]);
}

#[test]
fn test_wish_heals_whoever_holds_the_slot() {
    let mut battle = singles(
        pokemon(ALLY, "Togekiss", &[Type::Fairy, Type::Flying], 200),
        pokemon(FOE, "Snorlax", &[Type::Normal], 320),
    );
    battle.add_combatant(pokemon(BENCH, "Garchomp", &[Type::Dragon, Type::Ground], 300));
    battle.add_arena_tag(ArenaTagType::Wish, 2, None, Some(ALLY), ArenaTagSide::Player, None);

    battle.switch_out(ALLY);
    battle.switch_in(BENCH, BattlerIndex::Player);
    battle.phases.drain();

    battle.lapse_arena_tags();
    assert!(battle.phases.is_empty());
    battle.lapse_arena_tags();

    let phases = battle.phases.drain();
    assert_eq!(heal_phases(&phases), vec![(BattlerIndex::Player, 100)]);
    assert!(matches!(&phases[0], Phase::Message(text) if text == "Togekiss's wish came true!"));
    assert_eq!(battle.at(BattlerIndex::Player).map(|c| c.id), Some(BENCH));
}

#[test]
fn test_delayed_attack_lands_after_three_turns() {
    let mut battle = default_singles();
    battle.add_arena_tag(
        ArenaTagType::FutureSight,
        0,
        None,
        Some(ALLY),
        ArenaTagSide::Enemy,
        Some(BattlerIndex::Enemy),
    );
    battle.phases.drain();

    battle.lapse_arena_tags();
    battle.lapse_arena_tags();
    assert!(battle.phases.is_empty());
    battle.lapse_arena_tags();

    let phases = battle.phases.drain();
    assert!(phases.contains(&Phase::MoveEffect {
        user: ALLY,
        targets: vec![BattlerIndex::Enemy],
        move_id: Move::FutureSight,
        virtual_move: true,
    }));
    assert!(!battle.arena.has_tag(ArenaTagType::FutureSight));
}

#[test]
fn test_toxic_spikes_absorbed_by_poison_type() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::ToxicSpikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Muk", &[Type::Poison], 300).enemy());
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert!(!battle.arena.has_tag(ArenaTagType::ToxicSpikes));
    let phases = battle.phases.drain();
    assert!(!phases.iter().any(|p| matches!(p, Phase::SetStatus { .. })));
    assert_eq!(
        phases,
        vec![Phase::Message("Foe Muk absorbed the Toxic Spikes!".to_string())]
    );
}

#[test]
fn test_toxic_spikes_badly_poison_with_two_layers() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::ToxicSpikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_arena_tag(ArenaTagType::ToxicSpikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Slowbro", &[Type::Water, Type::Psychic], 300).enemy());
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    let phases = battle.phases.drain();
    assert!(phases.iter().any(|p| matches!(
        p,
        Phase::SetStatus {
            target: BattlerIndex::Enemy,
            effect: StatusEffect::Toxic,
            ..
        }
    )));
    assert!(battle.arena.has_tag(ArenaTagType::ToxicSpikes));
}

#[test]
fn test_stealth_rock_quadruple_weakness() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::StealthRock, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Charizard", &[Type::Fire, Type::Flying], 301).enemy());
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert_eq!(damage_phases(&battle.phases.drain()), vec![(BattlerIndex::Enemy, 151)]);
}

#[test]
fn test_stealth_rock_blocked_by_magic_guard() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::StealthRock, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    let clefable = pokemon(BENCH, "Clefable", &[Type::Fairy], 300)
        .enemy()
        .with_ability(AbilityId::MagicGuard);
    battle.add_combatant(clefable);
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert!(damage_phases(&battle.phases.drain()).is_empty());
}

#[test]
fn test_sticky_web_lowers_speed() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::StickyWeb, 0, None, Some(ALLY), ArenaTagSide::Enemy, None);
    battle.add_combatant(pokemon(BENCH, "Jolteon", &[Type::Electric], 250).enemy());
    battle.phases.drain();

    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert!(battle.phases.drain().contains(&Phase::StatChange {
        target: BattlerIndex::Enemy,
        self_targeted: false,
        stats: vec![Stat::Spe],
        levels: -1,
    }));
}

#[test]
fn test_field_queries() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::TrickRoom, 5, None, Some(ALLY), ArenaTagSide::Player, None);
    battle.add_arena_tag(ArenaTagType::Mist, 5, None, Some(ALLY), ArenaTagSide::Player, None);
    battle.add_arena_tag(ArenaTagType::Tailwind, 4, None, Some(FOE), ArenaTagSide::Enemy, None);

    assert!(battle.is_speed_order_reversed());
    assert!(battle.is_stat_drop_blocked(ALLY));
    assert!(!battle.is_stat_drop_blocked(FOE));
    assert_eq!(battle.tailwind_multiplier(FOE), 2.0);
    assert_eq!(battle.tailwind_multiplier(ALLY), 1.0);
}

#[test]
fn test_remove_all_arena_tags() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Gravity, 5, None, None, ArenaTagSide::Both, None);
    battle.add_arena_tag(ArenaTagType::Spikes, 0, None, None, ArenaTagSide::Player, None);
    battle.phases.drain();

    battle.remove_all_arena_tags();
    assert!(battle.arena.tags.is_empty());
    assert_eq!(
        battle.phases.messages(),
        vec!["Gravity returned to normal!", "Spikes's effect wore off on your side."]
    );
}

// =========================================================================
// Battler tags
// =========================================================================

#[test]
fn test_confusion_self_hit() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Confused, 3, Some(Move::ConfuseRay), Some(FOE));
    battle.phases.drain();

    // Chance check hits (1 of 0..3), then the roll lands on 99
    battle.set_rng(ScriptedRng::new(vec![1, 14]));
    let expected = battle.combatant(ALLY).map_or(0, |c| confusion_damage(c, 99));
    let event = battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);

    assert!(event.move_cancelled);
    assert_eq!(expected, 20);
    assert_eq!(hp(&battle, ALLY), 380);
    assert_eq!(
        battle.phases.messages(),
        vec!["Blissey is confused!", "It hurt itself in its confusion!"]
    );
    assert!(has_tag(&battle, ALLY, BattlerTagType::Confused));
}

#[test]
fn test_confusion_no_self_hit_and_expiry() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Confused, 2, None, None);
    assert_eq!(battle.phases.drain(), vec![Phase::Message("Blissey became confused!".to_string())]);

    let event = battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);
    assert!(!event.move_cancelled);
    assert_eq!(hp(&battle, ALLY), 400);

    battle.phases.drain();
    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Confused));
    assert_eq!(battle.phases.messages(), vec!["Blissey snapped out of confusion!"]);
}

#[test]
fn test_confusion_overlap_and_misty_terrain() {
    let mut battle = default_singles();
    battle.add_battler_tag(FOE, BattlerTagType::Confused, 3, None, None);
    battle.phases.drain();
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::Confused, 3, None, None));
    assert_eq!(battle.phases.messages(), vec!["Foe Snorlax is already confused!"]);

    battle.set_terrain(Some(TerrainType::Misty), true);
    battle.phases.drain();
    assert!(!battle.add_battler_tag(ALLY, BattlerTagType::Confused, 3, None, None));
    assert!(battle.phases.is_empty());
}

#[test]
fn test_infatuation_needs_opposite_gender() {
    let mut ally = pokemon(ALLY, "Nidoking", &[Type::Poison, Type::Ground], 300);
    ally.gender = Gender::Male;
    let mut foe = pokemon(FOE, "Nidoqueen", &[Type::Poison, Type::Ground], 300);
    foe.gender = Gender::Male;
    let mut battle = singles(ally, foe);

    assert!(!battle.add_battler_tag(ALLY, BattlerTagType::Infatuated, 0, Some(Move::Attract), Some(FOE)));
    if let Some(foe) = battle.combatant_mut(FOE) {
        foe.gender = Gender::Female;
    }
    assert!(battle.add_battler_tag(ALLY, BattlerTagType::Infatuated, 0, Some(Move::Attract), Some(FOE)));
    assert_eq!(battle.phases.messages(), vec!["Nidoking fell in love with Foe Nidoqueen!"]);

    battle.phases.drain();
    battle.set_rng(ScriptedRng::new(vec![1]));
    let event = battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);
    assert!(event.move_cancelled);

    // Leaving the field ends the infatuation it caused
    battle.phases.drain();
    battle.switch_out(FOE);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Infatuated));
    assert_eq!(battle.phases.messages(), vec!["Nidoking got over its infatuation."]);
}

#[test]
fn test_leech_seed_drains_to_seeder() {
    let mut battle = default_singles();
    assert!(battle.add_battler_tag(FOE, BattlerTagType::Seeded, 0, None, Some(ALLY)));
    battle.phases.drain();

    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 280);
    let phases = battle.phases.drain();
    assert_eq!(heal_phases(&phases), vec![(BattlerIndex::Player, 40)]);
    assert!(phases.iter().any(|p| matches!(
        p,
        Phase::Heal { message: Some(text), .. } if text == "Foe Snorlax's health is sapped by Leech Seed!"
    )));
    assert!(has_tag(&battle, FOE, BattlerTagType::Seeded));
}

#[test]
fn test_leech_seed_without_seeder_still_hurts() {
    let mut battle = default_singles();
    battle.add_battler_tag(FOE, BattlerTagType::Seeded, 0, None, Some(ALLY));
    battle.switch_out(ALLY);
    battle.phases.drain();

    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 280);
    let phases = battle.phases.drain();
    assert!(heal_phases(&phases).is_empty());
    assert_eq!(
        phases,
        vec![Phase::Message("Foe Snorlax's health is sapped by Leech Seed!".to_string())]
    );
}

#[test]
fn test_leech_seed_rejects_grass_and_reverses_on_liquid_ooze() {
    let mut battle = singles(
        pokemon(ALLY, "Venusaur", &[Type::Grass, Type::Poison], 300),
        pokemon(FOE, "Tentacruel", &[Type::Water, Type::Poison], 320).with_ability(AbilityId::LiquidOoze),
    );
    assert!(!battle.add_battler_tag(ALLY, BattlerTagType::Seeded, 0, None, Some(FOE)));

    battle.add_battler_tag(FOE, BattlerTagType::Seeded, 0, None, Some(ALLY));
    battle.phases.drain();
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);

    let phases = battle.phases.drain();
    assert!(heal_phases(&phases).is_empty());
    assert_eq!(damage_phases(&phases), vec![(BattlerIndex::Player, 40)]);
    assert!(matches!(&phases[0], Phase::Message(text) if text == "Venusaur sucked up the liquid ooze!"));
}

#[test]
fn test_salt_cure_hurts_steel_harder() {
    let mut battle = singles(
        pokemon(ALLY, "Garganacl", &[Type::Rock], 300),
        pokemon(FOE, "Skarmory", &[Type::Steel, Type::Flying], 320),
    );
    battle.add_battler_tag(FOE, BattlerTagType::SaltCured, 0, None, Some(ALLY));
    battle.phases.drain();

    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 240);
}

#[test]
fn test_drain_tags_deal_at_least_one() {
    for tag_type in [BattlerTagType::Seeded, BattlerTagType::SaltCured, BattlerTagType::Cursed] {
        let mut battle = singles(
            pokemon(ALLY, "Shedinja", &[Type::Bug, Type::Ghost], 4),
            pokemon(FOE, "Snorlax", &[Type::Normal], 320),
        );
        assert!(battle.add_battler_tag(ALLY, tag_type, 0, None, Some(FOE)));
        battle.phases.drain();

        battle.lapse_battler_tags(ALLY, BattlerTagLapseType::TurnEnd);
        assert_eq!(hp(&battle, ALLY), 3, "{tag_type}");
        assert_eq!(heal_phases(&battle.phases.drain()), vec![(BattlerIndex::Enemy, 1)], "{tag_type}");
    }
}

#[test]
fn test_magic_guard_blocks_nightmare_and_binding() {
    let mut battle = singles(
        pokemon(ALLY, "Gengar", &[Type::Ghost, Type::Poison], 300),
        pokemon(FOE, "Clefable", &[Type::Fairy], 320).with_ability(AbilityId::MagicGuard),
    );
    battle.add_battler_tag(FOE, BattlerTagType::Nightmare, 0, None, Some(ALLY));
    battle.add_battler_tag(FOE, BattlerTagType::Wrap, 5, None, Some(ALLY));

    battle.lapse_battler_tags(FOE, BattlerTagLapseType::AfterMove);
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 320);
}

#[test]
fn test_binding_damage_and_release() {
    let mut battle = default_singles();
    assert!(battle.add_battler_tag(FOE, BattlerTagType::Bind, 3, None, Some(ALLY)));
    assert_eq!(battle.phases.messages(), vec!["Foe Snorlax was squeezed by Blissey's Bind!"]);
    assert!(!battle.can_switch(FOE));

    // A second binding move cannot stack
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::FireSpin, 3, None, Some(ALLY)));

    battle.phases.drain();
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 280);
    assert_eq!(battle.phases.messages(), vec!["Foe Snorlax is hurt by Bind!"]);

    battle.phases.drain();
    battle.switch_out(ALLY);
    assert!(battle.can_switch(FOE));
    assert_eq!(battle.phases.messages(), vec!["Foe Snorlax was freed from Bind!"]);
}

#[test]
fn test_open_durations_roll_from_rules() {
    let mut battle = default_singles();
    battle.set_rng(ScriptedRng::new(vec![1]));

    assert!(battle.add_battler_tag(FOE, BattlerTagType::Bind, 0, None, Some(ALLY)));
    assert!(battle.add_battler_tag(ALLY, BattlerTagType::Confused, 0, None, None));

    let turns = |battle: &Battle, id: CombatantId, tag_type: BattlerTagType| {
        battle.combatant(id).and_then(|c| c.get_tag(tag_type)).map(|t| t.turn_count)
    };
    assert_eq!(turns(&battle, FOE, BattlerTagType::Bind), Some(5));
    assert_eq!(turns(&battle, ALLY, BattlerTagType::Confused), Some(2));

    // An explicit duration is kept as given
    assert!(battle.add_battler_tag(FOE, BattlerTagType::Confused, 3, None, None));
    assert_eq!(turns(&battle, FOE, BattlerTagType::Confused), Some(3));
}

#[test]
fn test_ghosts_cannot_be_trapped() {
    let mut battle = singles(
        pokemon(ALLY, "Umbreon", &[Type::Dark], 300),
        pokemon(FOE, "Gengar", &[Type::Ghost, Type::Poison], 260),
    );
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::Trapped, 0, Some(Move::MeanLook), Some(ALLY)));
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::Whirlpool, 4, None, Some(ALLY)));
    assert!(battle.can_switch(FOE));
}

#[test]
fn test_spiky_shield_punishes_contact() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::SpikyShield, 0, Some(Move::SpikyShield), Some(ALLY));
    battle.phases.drain();

    assert!(battle.protect_against(ALLY, IncomingMove::new(FOE, Move::Tackle)));
    let phases = battle.phases.drain();
    assert_eq!(damage_phases(&phases), vec![(BattlerIndex::Enemy, 40)]);

    // Non-contact moves are blocked without punishment
    assert!(battle.protect_against(ALLY, IncomingMove::new(FOE, Move::Thunderbolt)));
    assert!(damage_phases(&battle.phases.drain()).is_empty());
}

#[test]
fn test_kings_shield_and_baneful_bunker() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::KingsShield, 0, Some(Move::KingsShield), Some(ALLY));
    battle.phases.drain();
    battle.protect_against(ALLY, IncomingMove::new(FOE, Move::Scratch));
    assert!(battle.phases.drain().contains(&Phase::StatChange {
        target: BattlerIndex::Enemy,
        self_targeted: true,
        stats: vec![Stat::Atk],
        levels: -1,
    }));

    battle.clear_turn_scoped_tags();
    assert!(!has_tag(&battle, ALLY, BattlerTagType::KingsShield));

    battle.add_battler_tag(ALLY, BattlerTagType::BanefulBunker, 0, Some(Move::BanefulBunker), Some(ALLY));
    battle.phases.drain();
    battle.protect_against(ALLY, IncomingMove::new(FOE, Move::Tackle));
    assert!(battle.phases.drain().iter().any(|p| matches!(
        p,
        Phase::SetStatus {
            target: BattlerIndex::Enemy,
            effect: StatusEffect::Poison,
            ..
        }
    )));
}

#[test]
fn test_unprotected_target() {
    let mut battle = default_singles();
    assert!(!battle.protect_against(ALLY, IncomingMove::new(FOE, Move::Tackle)));
}

#[test]
fn test_endure_lasts_one_turn() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Enduring, 0, Some(Move::Endure), Some(ALLY));
    assert_eq!(battle.phases.messages(), vec!["Blissey braced itself!"]);
    battle.phases.drain();

    assert!(battle.endure_hit(ALLY));
    assert_eq!(battle.phases.messages(), vec!["Blissey endured the hit!"]);

    battle.end_turn();
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Enduring));
    assert!(!battle.endure_hit(ALLY));
}

#[test]
fn test_perish_song_counts_down_then_faints() {
    let mut battle = default_singles();
    battle.add_battler_tag(FOE, BattlerTagType::PerishSong, 4, None, Some(ALLY));

    for count in [3, 2, 1] {
        battle.phases.drain();
        battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
        let expected = format!("Foe Snorlax's perish count fell to {count}.");
        assert_eq!(battle.phases.messages(), vec![expected.as_str()]);
    }

    battle.phases.drain();
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(hp(&battle, FOE), 0);
    assert!(battle.phases.drain().contains(&Phase::Faint { target: BattlerIndex::Enemy }));
    assert!(!has_tag(&battle, FOE, BattlerTagType::PerishSong));
}

#[test]
fn test_perish_song_skips_bosses() {
    let mut foe = pokemon(FOE, "Eternatus", &[Type::Poison, Type::Dragon], 900);
    foe.boss = true;
    let mut battle = singles(pokemon(ALLY, "Lapras", &[Type::Water, Type::Ice], 300), foe);
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::PerishSong, 4, None, Some(ALLY)));
}

#[test]
fn test_encore_locks_last_move() {
    let ally = pokemon(ALLY, "Starmie", &[Type::Water, Type::Psychic], 260).with_moves(&[Move::Surf, Move::Tackle]);
    let mut battle = singles(ally, pokemon(FOE, "Wobbuffet", &[Type::Psychic], 400));
    used_move(&mut battle, ALLY, Move::Surf);

    assert!(battle.add_battler_tag(ALLY, BattlerTagType::Encore, 0, None, Some(FOE)));
    assert_eq!(battle.forced_move(ALLY), Some(Move::Surf));
    let phases = battle.phases.drain();
    assert!(phases.contains(&Phase::ReplaceMove {
        user: BattlerIndex::Player,
        move_id: Move::Surf,
        targets: vec![BattlerIndex::Enemy],
    }));

    for _ in 0..3 {
        battle.lapse_battler_tags(ALLY, BattlerTagLapseType::AfterMove);
    }
    assert_eq!(battle.forced_move(ALLY), None);
    assert!(battle.phases.messages().contains(&"Starmie's Encore ended!"));
}

#[test]
fn test_encore_rejects_struggle_and_switch_in() {
    let mut battle = singles(
        pokemon(ALLY, "Snorlax", &[Type::Normal], 400),
        pokemon(FOE, "Wobbuffet", &[Type::Psychic], 400),
    );
    used_move(&mut battle, ALLY, Move::Struggle);
    assert!(!battle.add_battler_tag(ALLY, BattlerTagType::Encore, 0, None, Some(FOE)));

    // Only a switch-in on record
    assert!(!battle.add_battler_tag(FOE, BattlerTagType::Encore, 0, None, Some(ALLY)));
}

#[test]
fn test_truant_loafs_every_other_turn() {
    let ally = pokemon(ALLY, "Slaking", &[Type::Normal], 400).with_ability(AbilityId::Truant);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    used_move(&mut battle, ALLY, Move::Tackle);
    battle.add_battler_tag(ALLY, BattlerTagType::Truant, 0, None, None);

    let event = battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);
    assert!(event.move_cancelled);
    assert!(battle.phases.messages().contains(&"Slaking is loafing around!"));
    assert!(battle.phases.iter().any(|p| matches!(p, Phase::ShowAbility { target: BattlerIndex::Player, passive: false })));

    let event = battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Move);
    assert!(!event.move_cancelled);
    assert!(has_tag(&battle, ALLY, BattlerTagType::Truant));
}

#[test]
fn test_recharge_and_flinch_cancel_once() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Recharging, 0, Some(Move::HyperBeam), Some(ALLY));
    battle.add_battler_tag(FOE, BattlerTagType::Flinched, 0, None, Some(ALLY));

    assert!(battle.lapse_battler_tags(ALLY, BattlerTagLapseType::PreMove).move_cancelled);
    assert!(battle.lapse_battler_tags(FOE, BattlerTagLapseType::PreMove).move_cancelled);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Recharging));
    assert!(!has_tag(&battle, FOE, BattlerTagType::Flinched));
    assert!(!battle.lapse_battler_tags(FOE, BattlerTagLapseType::PreMove).move_cancelled);
}

#[test]
fn test_steadfast_speeds_up_on_flinch() {
    let mut battle = singles(
        pokemon(ALLY, "Lucario", &[Type::Fighting, Type::Steel], 280).with_ability(AbilityId::Steadfast),
        pokemon(FOE, "Snorlax", &[Type::Normal], 400),
    );
    battle.add_battler_tag(ALLY, BattlerTagType::Flinched, 0, None, Some(FOE));
    let phases = battle.phases.drain();
    assert!(phases.contains(&Phase::StatChange {
        target: BattlerIndex::Player,
        self_targeted: true,
        stats: vec![Stat::Spe],
        levels: 1,
    }));
}

#[test]
fn test_drowsy_falls_asleep() {
    let mut battle = default_singles();
    battle.add_battler_tag(FOE, BattlerTagType::Drowsy, 0, Some(Move::Yawn), Some(ALLY));
    assert_eq!(battle.phases.messages(), vec!["Foe Snorlax grew drowsy!"]);

    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert!(battle.combatant(FOE).is_some_and(|c| c.status.is_none()));
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    let status = battle.combatant(FOE).and_then(|c| c.status);
    assert_eq!(status.map(|s| s.effect), Some(StatusEffect::Sleep));
    assert!(!has_tag(&battle, FOE, BattlerTagType::Drowsy));
}

#[test]
fn test_frenzy_ends_in_confusion() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Frenzy, 0, Some(Move::Outrage), Some(ALLY));

    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::Custom);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Frenzy));
    assert!(has_tag(&battle, ALLY, BattlerTagType::Confused));
    let turns = battle
        .combatant(ALLY)
        .and_then(|c| c.get_tag(BattlerTagType::Confused))
        .map(|t| t.turn_count);
    assert_eq!(turns, Some(2));
}

#[test]
fn test_protosynthesis_follows_the_sun() {
    let mut ally = pokemon(ALLY, "Great Tusk", &[Type::Ground, Type::Fighting], 300).with_ability(AbilityId::Protosynthesis);
    ally.stats = BaseStats::new(131, 131, 53, 53, 87);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    battle.set_weather(Some(WeatherType::Sunny), true);
    battle.phases.drain();

    battle.add_battler_tag(ALLY, BattlerTagType::Protosynthesis, 0, None, None);
    assert_eq!(battle.phases.messages(), vec!["Great Tusk's Attack was heightened!"]);
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Atk), 1.3);
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Def), 1.0);

    assert!(battle.lapse_battler_tag(ALLY, BattlerTagType::Protosynthesis, BattlerTagLapseType::Custom));
    battle.phases.drain();

    // Clearing the sun ends the boost on the spot
    battle.set_weather(None, false);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Protosynthesis));
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Atk), 1.0);
    assert_eq!(
        battle.phases.messages(),
        vec!["The sunlight faded.", "Great Tusk's Protosynthesis wore off!"]
    );
}

#[test]
fn test_quark_drive_ends_with_electric_terrain() {
    let ally = pokemon(ALLY, "Iron Valiant", &[Type::Fairy, Type::Fighting], 300).with_ability(AbilityId::QuarkDrive);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    battle.set_terrain(Some(TerrainType::Electric), true);
    battle.add_battler_tag(ALLY, BattlerTagType::QuarkDrive, 0, None, None);
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Atk), 1.3);

    for _ in 1..battle.rules.terrain_turns {
        battle.lapse_terrain();
    }
    assert!(has_tag(&battle, ALLY, BattlerTagType::QuarkDrive));

    battle.lapse_terrain();
    assert!(battle.arena.terrain.is_none());
    assert!(!has_tag(&battle, ALLY, BattlerTagType::QuarkDrive));
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Atk), 1.0);
}

#[test]
fn test_weather_suppressor_entry_ends_protosynthesis() {
    let ally = pokemon(ALLY, "Great Tusk", &[Type::Ground, Type::Fighting], 300).with_ability(AbilityId::Protosynthesis);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    battle.set_weather(Some(WeatherType::Sunny), true);
    battle.add_battler_tag(ALLY, BattlerTagType::Protosynthesis, 0, None, None);
    assert!(has_tag(&battle, ALLY, BattlerTagType::Protosynthesis));

    battle.add_combatant(pokemon(BENCH, "Golduck", &[Type::Water], 300).with_ability(AbilityId::CloudNine).enemy());
    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Protosynthesis));
}

#[test]
fn test_slow_start_expires_without_ability() {
    let ally = pokemon(ALLY, "Regigigas", &[Type::Normal], 400).with_ability(AbilityId::SlowStart);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    battle.add_battler_tag(ALLY, BattlerTagType::SlowStart, 0, None, None);
    assert_eq!(battle.stat_multiplier(ALLY, Stat::Spe), 0.5);

    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::TurnEnd);
    assert!(has_tag(&battle, ALLY, BattlerTagType::SlowStart));

    if let Some(regigigas) = battle.combatant_mut(ALLY) {
        regigigas.ability = AbilityId::None;
    }
    battle.phases.drain();
    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::TurnEnd);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::SlowStart));
    assert_eq!(battle.phases.messages(), vec!["Regigigas finally got its act together!"]);
}

#[test]
fn test_hidden_tags_toggle_visibility() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Underground, 1, Some(Move::Dig), Some(ALLY));
    assert!(battle.combatant(ALLY).is_some_and(|c| c.hidden));

    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::MoveEffect);
    assert!(battle.combatant(ALLY).is_some_and(|c| !c.hidden));
}

#[test]
fn test_charge_is_spent_by_one_electric_move() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Charged, 0, Some(Move::Charge), Some(ALLY));

    assert_eq!(battle.move_power_multiplier(ALLY, Type::Water), 1.0);
    assert!(has_tag(&battle, ALLY, BattlerTagType::Charged));
    assert_eq!(battle.move_power_multiplier(ALLY, Type::Electric), 2.0);
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Charged));
}

#[test]
fn test_mud_sport_weakens_electric() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::MudSport, 5, None, Some(ALLY), ArenaTagSide::Player, None);
    assert!((battle.move_power_multiplier(FOE, Type::Electric) - 0.33).abs() < 1e-9);
}

#[test]
fn test_magnet_rise_grants_ground_immunity() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::MagnetRisen, 0, Some(Move::MagnetRise), Some(ALLY));
    assert!(battle.is_type_immune(ALLY, Type::Ground));
    assert!(!battle.is_type_immune(ALLY, Type::Fire));
    assert!(battle.combatant(ALLY).is_some_and(|c| !battle.is_grounded(c)));
}

#[test]
fn test_crit_and_accuracy_queries() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::CritBoost, 0, Some(Move::FocusEnergy), Some(ALLY));
    battle.add_battler_tag(ALLY, BattlerTagType::IgnoreAccuracy, 0, Some(Move::LockOn), Some(ALLY));
    battle.add_battler_tag(FOE, BattlerTagType::AlwaysCrit, 0, Some(Move::LaserFocus), Some(FOE));

    assert_eq!(battle.crit_modifiers(ALLY).stage, 2);
    assert!(battle.ignores_accuracy(ALLY));
    assert!(battle.crit_modifiers(FOE).always);
    assert!(!battle.ignores_accuracy(FOE));
}

#[test]
fn test_faint_clears_tags() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::AquaRing, 0, Some(Move::AquaRing), Some(ALLY));
    battle.add_battler_tag(FOE, BattlerTagType::Bind, 4, None, Some(ALLY));

    battle.faint(ALLY);
    assert!(battle.combatant(ALLY).is_some_and(|c| c.tags.is_empty()));
    assert!(!has_tag(&battle, FOE, BattlerTagType::Bind));
    assert!(!battle.is_on_field(ALLY));
}

#[test]
fn test_aqua_ring_and_ingrain_heal() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::AquaRing, 0, Some(Move::AquaRing), Some(ALLY));
    battle.add_battler_tag(FOE, BattlerTagType::Ingrain, 0, Some(Move::Ingrain), Some(FOE));
    battle.phases.drain();

    battle.lapse_battler_tags(ALLY, BattlerTagLapseType::TurnEnd);
    battle.lapse_battler_tags(FOE, BattlerTagLapseType::TurnEnd);
    assert_eq!(
        heal_phases(&battle.phases.drain()),
        vec![(BattlerIndex::Player, 25), (BattlerIndex::Enemy, 20)]
    );
    assert!(!battle.can_switch(FOE));
}

#[test]
fn test_interrupted_only_while_flying() {
    let mut battle = default_singles();
    assert!(!battle.add_battler_tag(ALLY, BattlerTagType::Interrupted, 0, None, Some(FOE)));

    battle.add_battler_tag(ALLY, BattlerTagType::Flying, 1, Some(Move::Fly), Some(ALLY));
    assert!(battle.add_battler_tag(ALLY, BattlerTagType::Interrupted, 0, None, Some(FOE)));
    let last = battle.combatant(ALLY).and_then(|c| c.last_move().cloned());
    assert_eq!(last.map(|m| m.result), Some(MoveResult::Other));
    assert!(battle.lapse_battler_tags(ALLY, BattlerTagLapseType::PreMove).move_cancelled);
}

// =========================================================================
// Weather, berries and turn flow
// =========================================================================

#[test]
fn test_sandstorm_chips_non_immune() {
    let mut battle = singles(
        pokemon(ALLY, "Tyranitar", &[Type::Rock, Type::Dark], 320),
        pokemon(FOE, "Snorlax", &[Type::Normal], 320),
    );
    assert!(battle.set_weather(Some(WeatherType::Sandstorm), true));
    assert!(!battle.set_weather(Some(WeatherType::Sandstorm), true));
    battle.phases.drain();

    battle.lapse_weather();
    let phases = battle.phases.drain();
    assert_eq!(damage_phases(&phases), vec![(BattlerIndex::Enemy, 20)]);
    assert!(matches!(&phases[0], Phase::Message(text) if text == "The sandstorm rages."));
}

#[test]
fn test_weather_expires() {
    let mut battle = default_singles();
    battle.rules.weather_turns = 2;
    battle.set_weather(Some(WeatherType::Rain), true);
    battle.phases.drain();

    battle.lapse_weather();
    battle.lapse_weather();
    assert_eq!(battle.arena.weather, None);
    assert!(battle.phases.messages().contains(&"The rain stopped."));
}

#[test]
fn test_field_power_multipliers() {
    let mut battle = singles(
        pokemon(ALLY, "Raichu", &[Type::Electric], 260),
        pokemon(FOE, "Dragonite", &[Type::Dragon, Type::Flying], 320),
    );
    battle.set_weather(Some(WeatherType::Rain), true);
    battle.set_terrain(Some(TerrainType::Electric), true);

    assert_eq!(battle.field_power_multiplier(ALLY, FOE, Type::Water), 1.5);
    assert!((battle.field_power_multiplier(ALLY, FOE, Type::Electric) - 1.3).abs() < 1e-9);
    // Airborne attackers get no terrain boost
    assert_eq!(battle.field_power_multiplier(FOE, ALLY, Type::Electric), 1.0);

    assert!(!battle.is_move_weather_cancelled(Type::Fire));
    battle.set_weather(Some(WeatherType::HeavyRain), false);
    assert!(battle.is_move_weather_cancelled(Type::Fire));
}

#[test]
fn test_lum_berry_cures_confusion() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Confused, 4, None, None);
    if let Some(ally) = battle.combatant_mut(ALLY) {
        ally.status = Some(crate::types::Status::new(StatusEffect::Burn));
    }
    battle.phases.drain();

    assert!(eat_berry(&mut battle, ALLY, BerryType::Lum));
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Confused));
    assert_eq!(
        battle.phases.messages(),
        vec!["Blissey was healed of its burn!", "Blissey snapped out of confusion!"]
    );
    let ally = battle.combatant(ALLY);
    assert!(ally.is_some_and(|c| c.status.is_none() && c.berries_eaten == vec![BerryType::Lum]));
}

#[test]
fn test_sitrus_doubled_by_ripen() {
    let ally = pokemon(ALLY, "Appletun", &[Type::Grass, Type::Dragon], 400).with_ability(AbilityId::Ripen);
    let mut battle = singles(ally, pokemon(FOE, "Snorlax", &[Type::Normal], 400));
    eat_berry(&mut battle, ALLY, BerryType::Sitrus);
    assert_eq!(heal_phases(&battle.phases.drain()), vec![(BattlerIndex::Player, 200)]);
}

#[test]
fn test_lansat_adds_crit_boost() {
    let mut battle = default_singles();
    eat_berry(&mut battle, ALLY, BerryType::Lansat);
    assert!(has_tag(&battle, ALLY, BattlerTagType::CritBoost));
    assert_eq!(battle.phases.messages(), vec!["Blissey is getting pumped!"]);
}

#[test]
fn test_end_turn_order() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Reflect, 1, None, Some(ALLY), ArenaTagSide::Player, None);
    battle.add_battler_tag(FOE, BattlerTagType::Seeded, 0, None, Some(ALLY));
    battle.add_battler_tag(ALLY, BattlerTagType::Protected, 0, Some(Move::Protect), Some(ALLY));
    battle.phases.drain();

    battle.end_turn();
    assert_eq!(battle.turn, 1);
    assert!(!battle.arena.has_tag(ArenaTagType::Reflect));
    assert!(!has_tag(&battle, ALLY, BattlerTagType::Protected));
    assert!(has_tag(&battle, FOE, BattlerTagType::Seeded));
}

#[test]
fn test_checkpoint_lapse_and_flush() {
    let mut battle = default_singles();
    battle.add_battler_tag(ALLY, BattlerTagType::Recharging, 0, Some(Move::HyperBeam), Some(ALLY));
    battle.phases.drain();

    let mut scheduler = PhaseQueue::new();
    assert!(battle.lapse_for_checkpoint(&scheduler, ALLY).is_none());

    scheduler.set_checkpoint(Some(BattlerTagLapseType::PreMove));
    let event = battle.lapse_for_checkpoint(&scheduler, ALLY);
    assert!(event.is_some_and(|e| e.move_cancelled));

    battle.flush_phases(&mut scheduler);
    assert!(battle.phases.is_empty());
    assert_eq!(scheduler.messages(), vec!["Blissey must recharge!"]);
    assert_eq!(scheduler.current_checkpoint(), Some(BattlerTagLapseType::PreMove));
}

#[test]
fn test_saved_tags_survive_reload() {
    let mut battle = default_singles();
    battle.add_arena_tag(ArenaTagType::Wish, 2, None, Some(ALLY), ArenaTagSide::Player, None);
    battle.add_battler_tag(FOE, BattlerTagType::Seeded, 0, None, Some(ALLY));

    let wish = battle
        .get_arena_tag(ArenaTagType::Wish, ArenaTagSide::Player)
        .cloned()
        .expect("wish installed");
    let loaded = load_arena_tag(&wish.to_record()).unwrap();
    assert_eq!(loaded, wish);
    assert!(matches!(
        loaded.data,
        ArenaTagData::Wish { battler_index: Some(BattlerIndex::Player), heal_hp: 200, .. }
    ));

    let seeded = battle
        .combatant(FOE)
        .and_then(|c| c.get_tag(BattlerTagType::Seeded))
        .cloned()
        .expect("seeded tag present");
    assert_eq!(load_battler_tag(&seeded.to_record()).unwrap(), seeded);
}

#[test]
fn test_reloaded_spikes_keep_their_cap() {
    let mut battle = default_singles();
    let mut record = ArenaTagRecord::new(ArenaTagType::Spikes, 0, ArenaTagSide::Enemy);
    record.layers = Some(3);
    record.max_layers = Some(5);
    assert!(load_arena_tag(&record).is_err());

    record.max_layers = Some(3);
    let spikes = load_arena_tag(&record).unwrap();
    battle.arena.tags.push(spikes);
    for _ in 0..2 {
        assert!(!battle.add_arena_tag(ArenaTagType::Spikes, 0, None, Some(ALLY), ArenaTagSide::Enemy, None));
    }
    let layers = battle.get_arena_tag(ArenaTagType::Spikes, ArenaTagSide::Enemy).and_then(|t| t.layers());
    assert_eq!(layers, Some(3));

    battle.add_combatant(pokemon(BENCH, "Golem", &[Type::Rock, Type::Ground], 301).enemy());
    battle.phases.drain();
    battle.switch_in(BENCH, BattlerIndex::Enemy);
    assert_eq!(damage_phases(&battle.phases.drain()), vec![(BattlerIndex::Enemy, 76)]);
}

#[test]
fn test_every_arena_tag_survives_reload() {
    for tag_type in ArenaTagType::ALL {
        let mut battle = default_singles();
        assert!(
            battle.add_arena_tag(tag_type, 4, None, Some(ALLY), ArenaTagSide::Enemy, Some(BattlerIndex::Enemy)),
            "{tag_type}"
        );
        let tag = battle
            .arena
            .tags
            .iter()
            .find(|t| t.tag_type == tag_type)
            .cloned()
            .expect("tag installed");

        let record = tag.to_record();
        assert_eq!(load_arena_tag(&record).unwrap(), tag, "{tag_type}");
    }
}

#[test]
fn test_every_battler_tag_survives_reload() {
    for tag_type in BattlerTagType::ALL {
        let mut ally = pokemon(ALLY, "Smeargle", &[Type::Normal], 300).with_moves(&[Move::Tackle]);
        ally.gender = Gender::Male;
        let mut foe = pokemon(FOE, "Snorlax", &[Type::Normal], 320);
        foe.gender = Gender::Female;
        let mut battle = singles(ally, foe);
        used_move(&mut battle, ALLY, Move::Tackle);
        if tag_type == BattlerTagType::Interrupted {
            battle.add_battler_tag(ALLY, BattlerTagType::Flying, 1, Some(Move::Fly), Some(ALLY));
        }

        assert!(battle.add_battler_tag(ALLY, tag_type, 3, None, Some(FOE)), "{tag_type}");
        let tag = battle
            .combatant(ALLY)
            .and_then(|c| c.get_tag(tag_type))
            .cloned()
            .expect("tag installed");

        let record = tag.to_record();
        assert_eq!(load_battler_tag(&record).unwrap(), tag, "{tag_type}");
    }
}
