//! Tunable durations and battle format

use fieldtag_protocol::BattlerTagType;
use serde::Deserialize;

use crate::rng::BattleRng;

/// Inclusive range of turns an effect can last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TurnRange {
    pub min: u32,
    pub max: u32,
}

impl TurnRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll(&self, rng: &mut dyn BattleRng) -> u32 {
        rng.rand_int_range(self.min, self.max)
    }
}

/// Durations handed to tags and field conditions
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TagRules {
    pub weather_turns: u32,
    pub terrain_turns: u32,
    /// Binding moves
    pub trap_turns: TurnRange,
    pub confusion_turns: TurnRange,
    /// Confusion that follows a rampage
    pub frenzy_confusion_turns: TurnRange,
    pub sleep_turns: TurnRange,
    /// Screens are weaker in double battles
    pub double_battle: bool,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            weather_turns: 5,
            terrain_turns: 5,
            trap_turns: TurnRange::new(4, 5),
            confusion_turns: TurnRange::new(2, 5),
            frenzy_confusion_turns: TurnRange::new(2, 4),
            sleep_turns: TurnRange::new(2, 4),
            double_battle: false,
        }
    }
}

impl TagRules {
    /// Range rolled for a tag added without a duration
    pub fn open_duration(&self, tag_type: BattlerTagType) -> Option<TurnRange> {
        if tag_type.is_damaging_trap() {
            Some(self.trap_turns)
        } else if tag_type == BattlerTagType::Confused {
            Some(self.confusion_turns)
        } else {
            None
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let rules: TagRules = serde_json::from_str(json)?;
        for (name, range) in [
            ("trap_turns", rules.trap_turns),
            ("confusion_turns", rules.confusion_turns),
            ("frenzy_confusion_turns", rules.frenzy_confusion_turns),
            ("sleep_turns", rules.sleep_turns),
        ] {
            if range.min > range.max {
                anyhow::bail!("{} has min {} above max {}", name, range.min, range.max);
            }
        }
        Ok(rules)
    }
}
