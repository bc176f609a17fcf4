//! Held berries: when they trigger and what eating one does

use fieldtag_protocol::{BattlerTagLapseType, BattlerTagType, CombatantId, Stat};
use serde::{Deserialize, Serialize};

use crate::abilities;
use crate::engine::{Battle, HitResult, Phase, PhaseScheduler};
use crate::messages::{pokemon_message, pokemon_possessive};
use crate::types::Combatant;

/// HP ratio below which pinch berries are eaten
const PINCH_THRESHOLD: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BerryType {
    Sitrus,
    Lum,
    Enigma,
    Liechi,
    Ganlon,
    Petaya,
    Apicot,
    Salac,
    Lansat,
    Starf,
    Leppa,
}

impl BerryType {
    pub const ALL: [BerryType; 11] = [
        BerryType::Sitrus,
        BerryType::Lum,
        BerryType::Enigma,
        BerryType::Liechi,
        BerryType::Ganlon,
        BerryType::Petaya,
        BerryType::Apicot,
        BerryType::Salac,
        BerryType::Lansat,
        BerryType::Starf,
        BerryType::Leppa,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BerryType::Sitrus => "Sitrus Berry",
            BerryType::Lum => "Lum Berry",
            BerryType::Enigma => "Enigma Berry",
            BerryType::Liechi => "Liechi Berry",
            BerryType::Ganlon => "Ganlon Berry",
            BerryType::Petaya => "Petaya Berry",
            BerryType::Apicot => "Apicot Berry",
            BerryType::Salac => "Salac Berry",
            BerryType::Lansat => "Lansat Berry",
            BerryType::Starf => "Starf Berry",
            BerryType::Leppa => "Leppa Berry",
        }
    }

    /// Stat raised by the stat pinch berries
    pub fn boosted_stat(&self) -> Option<Stat> {
        match self {
            BerryType::Liechi => Some(Stat::Atk),
            BerryType::Ganlon => Some(Stat::Def),
            BerryType::Petaya => Some(Stat::Spa),
            BerryType::Apicot => Some(Stat::Spd),
            BerryType::Salac => Some(Stat::Spe),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            BerryType::Sitrus => "Restores 25% HP if HP is below 50%".to_string(),
            BerryType::Lum => "Cures any non-volatile status condition and confusion".to_string(),
            BerryType::Enigma => "Restores 25% HP if hit by a super effective move".to_string(),
            BerryType::Lansat => "Raises critical hit ratio if HP is below 25%".to_string(),
            BerryType::Starf => "Sharply raises a random stat if HP is below 25%".to_string(),
            BerryType::Leppa => "Restores 10 PP to a move if its PP reaches 0".to_string(),
            _ => match self.boosted_stat() {
                Some(stat) => format!("Raises {} if HP is below 25%", stat.name()),
                None => String::new(),
            },
        }
    }

    /// Whether `pokemon` would eat this berry right now
    pub fn can_activate(&self, pokemon: &Combatant) -> bool {
        let pinch = || pokemon.hp_ratio() < abilities::berry_threshold(pokemon, PINCH_THRESHOLD);
        match self {
            BerryType::Sitrus => pokemon.hp_ratio() < 0.5,
            BerryType::Lum => pokemon.status.is_some() || pokemon.has_tag(BattlerTagType::Confused),
            BerryType::Enigma => pokemon
                .turn_data
                .attacks_received
                .contains(&HitResult::SuperEffective),
            BerryType::Lansat => pinch() && !pokemon.has_tag(BattlerTagType::CritBoost),
            BerryType::Starf => pinch(),
            BerryType::Leppa => pokemon.moveset.iter().any(|slot| slot.pp_left() == 0),
            _ => match self.boosted_stat() {
                Some(stat) => pinch() && pokemon.stages.get(stat) < 6,
                None => false,
            },
        }
    }
}

impl std::fmt::Display for BerryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Eat `berry`. Returns false when the eater is not in the battle.
pub fn eat_berry(battle: &mut Battle, eater: CombatantId, berry: BerryType) -> bool {
    let Some(pokemon) = battle.combatant_mut(eater) else {
        return false;
    };
    pokemon.berries_eaten.push(berry);
    let target = battle.battler_index(eater);

    match berry {
        BerryType::Sitrus | BerryType::Enigma => {
            let Some(pokemon) = battle.combatant(eater) else {
                return false;
            };
            let mut amount = (pokemon.max_hp / 4) as f64;
            abilities::apply_berry_effect(pokemon, &mut amount);
            let message = format!("{} {} restored its health!", pokemon_possessive(pokemon), berry.name());
            if let Some(target) = target {
                battle.phases.enqueue_now(Phase::Heal {
                    target,
                    amount: amount as u32,
                    message: Some(message),
                    full_hp_message: true,
                });
            }
        }
        BerryType::Lum => {
            if let Some(pokemon) = battle.combatant_mut(eater)
                && let Some(status) = pokemon.status.take()
            {
                let text = pokemon_message(pokemon, status.effect.heal_text());
                battle.phases.message(text);
            }
            battle.lapse_battler_tag(eater, BattlerTagType::Confused, BattlerTagLapseType::Custom);
        }
        BerryType::Lansat => {
            battle.add_battler_tag(eater, BattlerTagType::CritBoost, 0, None, Some(eater));
        }
        BerryType::Starf => {
            let stat = Stat::BATTLE[battle.rng().rand_int(Stat::BATTLE.len() as u32) as usize];
            raise_stat(battle, eater, target, stat, 2.0);
        }
        BerryType::Leppa => {
            let Some(pokemon) = battle.combatant_mut(eater) else {
                return false;
            };
            let Some(slot) = pokemon.moveset.iter_mut().find(|slot| slot.pp_left() == 0) else {
                return true;
            };
            slot.pp_used = slot.pp_used.saturating_sub(10);
            let move_name = slot.move_id.name();
            let text = pokemon_message(pokemon, &format!(" restored PP to {move_name} using its {}!", berry.name()));
            battle.phases.message(text);
        }
        _ => {
            if let Some(stat) = berry.boosted_stat() {
                raise_stat(battle, eater, target, stat, 1.0);
            }
        }
    }
    true
}

fn raise_stat(
    battle: &mut Battle,
    eater: CombatantId,
    target: Option<fieldtag_protocol::BattlerIndex>,
    stat: Stat,
    base_levels: f64,
) {
    let (Some(pokemon), Some(target)) = (battle.combatant(eater), target) else {
        return;
    };
    let mut levels = base_levels;
    abilities::apply_berry_effect(pokemon, &mut levels);
    battle.phases.enqueue_now(Phase::StatChange {
        target,
        self_targeted: true,
        stats: vec![stat],
        levels: levels as i8,
    });
}
