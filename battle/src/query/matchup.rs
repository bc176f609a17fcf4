//! Hazard and type matchup helpers

use crate::engine::Battle;
use crate::tags::ArenaTag;
use crate::types::{Combatant, TYPE_CHART, Type};

/// Entry hazards that would fire on a combatant of this team
pub fn hazards_facing(battle: &Battle, is_player: bool) -> Vec<&ArenaTag> {
    battle
        .arena
        .tags
        .iter()
        .filter(|tag| tag.tag_type.is_entry_hazard() && tag.side.covers(is_player))
        .collect()
}

/// Switch-in desirability for `combatant`: the product of every facing
/// hazard's score. 1.0 means the hazards do not matter to it.
pub fn hazard_matchup_score(battle: &Battle, combatant: &Combatant) -> f64 {
    hazards_facing(battle, combatant.is_player)
        .into_iter()
        .map(|tag| tag.matchup_score(battle, combatant))
        .product()
}

/// Check if defender is immune (0x effectiveness) to a type
pub fn is_immune_to(defender_types: &[Type], attacking_type: Type) -> bool {
    attacking_type.effectiveness_against(defender_types) == 0.0
}

/// Get all types that are super effective against the defender
pub fn weaknesses(defender_types: &[Type]) -> Vec<Type> {
    Type::ALL
        .iter()
        .copied()
        .filter(|t| t.effectiveness_against(defender_types) > 1.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldtag_protocol::{ArenaTagSide, ArenaTagType, CombatantId};

    fn battle_with_hazards(hazards: &[ArenaTagType]) -> Battle {
        let mut battle = Battle::new(3);
        for hazard in hazards {
            battle.add_arena_tag(*hazard, 0, None, None, ArenaTagSide::Enemy, None);
        }
        battle.phases.drain();
        battle
    }

    #[test]
    fn test_no_hazards_scores_one() {
        let battle = battle_with_hazards(&[]);
        let pokemon = Combatant::new(CombatantId(1), "Charizard", vec![Type::Fire, Type::Flying], 100).enemy();
        assert_eq!(hazard_matchup_score(&battle, &pokemon), 1.0);
    }

    #[test]
    fn test_hazards_only_face_covered_side() {
        let battle = battle_with_hazards(&[ArenaTagType::Spikes, ArenaTagType::StealthRock]);
        assert_eq!(hazards_facing(&battle, false).len(), 2);
        assert!(hazards_facing(&battle, true).is_empty());
    }

    #[test]
    fn test_stealth_rock_weak_scores_below_neutral() {
        let battle = battle_with_hazards(&[ArenaTagType::StealthRock]);
        let mut weak = Combatant::new(CombatantId(1), "Charizard", vec![Type::Fire, Type::Flying], 100).enemy();
        weak.hp = 50;
        let mut neutral = Combatant::new(CombatantId(2), "Snorlax", vec![Type::Normal], 100).enemy();
        neutral.hp = 50;

        let weak_score = hazard_matchup_score(&battle, &weak);
        let neutral_score = hazard_matchup_score(&battle, &neutral);
        assert!(weak_score < neutral_score);
        assert!(neutral_score <= 1.0);
    }

    #[test]
    fn test_type_queries() {
        assert!(is_immune_to(&[Type::Ghost], Type::Normal));
        assert!(!is_immune_to(&[Type::Water], Type::Electric));
        let weak = weaknesses(&[Type::Water]);
        assert!(weak.contains(&Type::Electric));
        assert!(weak.contains(&Type::Grass));
        assert_eq!(TYPE_CHART.len(), 18);
    }
}
