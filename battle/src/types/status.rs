//! Non-volatile status conditions

use serde::{Deserialize, Serialize};

/// Non-volatile status condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusEffect {
    Poison,
    Toxic,
    Paralysis,
    Sleep,
    Freeze,
    Burn,
    Faint,
}

impl StatusEffect {
    /// "was poisoned by Toxic Spikes!" style text, without the combatant's name
    pub fn obtain_text(&self, source_text: Option<&str>) -> String {
        let source_clause = match source_text {
            Some(source) if *self == StatusEffect::Sleep => format!(" from {source}"),
            Some(source) => format!(" by {source}"),
            None => String::new(),
        };
        match self {
            StatusEffect::Poison => format!(" was poisoned{source_clause}!"),
            StatusEffect::Toxic => format!(" was badly poisoned{source_clause}!"),
            StatusEffect::Paralysis => {
                format!(" was paralyzed{source_clause}! It may be unable to move!")
            }
            StatusEffect::Sleep => format!(" fell asleep{source_clause}!"),
            StatusEffect::Freeze => format!(" was frozen solid{source_clause}!"),
            StatusEffect::Burn => format!(" was burned{source_clause}!"),
            StatusEffect::Faint => String::new(),
        }
    }

    pub fn activation_text(&self) -> &'static str {
        match self {
            StatusEffect::Poison | StatusEffect::Toxic => " is hurt by poison!",
            StatusEffect::Paralysis => " is paralyzed! It can't move!",
            StatusEffect::Sleep => " is fast asleep.",
            StatusEffect::Freeze => " is frozen solid!",
            StatusEffect::Burn => " is hurt by its burn!",
            StatusEffect::Faint => "",
        }
    }

    pub fn overlap_text(&self) -> &'static str {
        match self {
            StatusEffect::Poison | StatusEffect::Toxic => " is already poisoned!",
            StatusEffect::Paralysis => " is already paralyzed!",
            StatusEffect::Sleep => " is already asleep!",
            StatusEffect::Freeze => " is already frozen!",
            StatusEffect::Burn => " is already burned!",
            StatusEffect::Faint => "",
        }
    }

    pub fn heal_text(&self) -> &'static str {
        match self {
            StatusEffect::Poison | StatusEffect::Toxic => " was cured of its poison!",
            StatusEffect::Paralysis => " was healed of paralysis!",
            StatusEffect::Sleep => " woke up!",
            StatusEffect::Freeze => " was defrosted!",
            StatusEffect::Burn => " was healed of its burn!",
            StatusEffect::Faint => "",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            StatusEffect::Poison | StatusEffect::Toxic => "poisoning",
            StatusEffect::Paralysis => "paralysis",
            StatusEffect::Sleep => "sleep",
            StatusEffect::Freeze => "freezing",
            StatusEffect::Burn => "burn",
            StatusEffect::Faint => "fainting",
        }
    }

    pub fn catch_rate_multiplier(&self) -> f64 {
        match self {
            StatusEffect::Poison | StatusEffect::Toxic | StatusEffect::Paralysis | StatusEffect::Burn => 1.5,
            StatusEffect::Sleep | StatusEffect::Freeze => 2.5,
            StatusEffect::Faint => 1.0,
        }
    }
}

impl std::fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.descriptor())
    }
}

/// A status condition with its duration bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub effect: StatusEffect,
    pub turn_count: u32,
    /// Turn on which a sleeping combatant wakes up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cure_turn: Option<u32>,
}

impl Status {
    pub fn new(effect: StatusEffect) -> Self {
        Self {
            effect,
            turn_count: 0,
            cure_turn: None,
        }
    }

    pub fn with_cure_turn(effect: StatusEffect, cure_turn: u32) -> Self {
        Self {
            effect,
            turn_count: 0,
            cure_turn: Some(cure_turn),
        }
    }

    pub fn increment_turn(&mut self) {
        self.turn_count += 1;
    }

    /// Whether the status deals damage after the holder moves
    pub fn is_post_turn(&self) -> bool {
        matches!(
            self.effect,
            StatusEffect::Poison | StatusEffect::Toxic | StatusEffect::Burn
        )
    }

    /// Whether the cure turn has been reached
    pub fn is_cured(&self) -> bool {
        self.cure_turn.is_some_and(|turn| self.turn_count >= turn)
    }

    /// Post-turn damage for a holder with `max_hp`; zero for other statuses
    pub fn post_turn_damage(&self, max_hp: u32) -> u32 {
        let damage = match self.effect {
            StatusEffect::Poison => max_hp / 8,
            StatusEffect::Toxic => max_hp * self.turn_count.clamp(1, 15) / 16,
            StatusEffect::Burn => max_hp / 16,
            _ => return 0,
        };
        damage.max(1)
    }
}
