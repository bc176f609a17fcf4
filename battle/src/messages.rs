//! Battle text helpers

use crate::types::Combatant;

/// "Foe " for a trainer's combatant, "Wild " for a wild one, nothing for the player's
pub fn pokemon_prefix(combatant: &Combatant) -> &'static str {
    match (combatant.is_player, combatant.has_trainer) {
        (true, _) => "",
        (false, true) => "Foe ",
        (false, false) => "Wild ",
    }
}

/// Prefixed name followed by `content`, e.g. "Foe Gengar is hurt by poison!"
pub fn pokemon_message(combatant: &Combatant, content: &str) -> String {
    format!("{}{}{}", pokemon_prefix(combatant), combatant.name, content)
}

/// Possessive name, e.g. "Foe Gengar's"
pub fn pokemon_possessive(combatant: &Combatant) -> String {
    format!("{}{}'s", pokemon_prefix(combatant), combatant.name)
}
