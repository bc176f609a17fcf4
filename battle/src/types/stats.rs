//! Calculated stats and their stage modifiers

use fieldtag_protocol::Stat;

/// Calculated (non-HP) stats of a combatant before stage modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl BaseStats {
    pub fn new(atk: u32, def: u32, spa: u32, spd: u32, spe: u32) -> Self {
        Self { atk, def, spa, spd, spe }
    }

    /// Raw value of a stat; accuracy and evasion have no base value
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy | Stat::Evasion => 1,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(100, 100, 100, 100, 100)
    }
}

/// Stat stages (-6 to +6)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i8 {
        match stat {
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        *self.slot(stat) = value.clamp(-6, 6);
    }

    /// Shift a stage by `amount`, returning the change actually applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(-6, 6);
        self.set(stat, new_value);
        new_value - current
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply a stage to a raw stat value, flooring the result
    pub fn apply(value: u32, stage: i8) -> u32 {
        let stage = stage.clamp(-6, 6) as i32;
        let (num, den) = if stage >= 0 { (2 + stage, 2) } else { (2, 2 - stage) };
        (value as u64 * num as u64 / den as u64) as u32
    }
}
