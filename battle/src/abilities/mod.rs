//! Ability hooks consulted by tags, weather and berries.
//!
//! Each ability that matters to the effect engine has an entry in
//! [`ABILITY_REGISTRY`] holding one optional function per hook kind. The
//! dispatch functions below walk a combatant's main ability and then its
//! passive, so either slot can trigger a hook.

use fieldtag_protocol::Stat;
use serde::{Deserialize, Serialize};

use crate::types::Combatant;

pub mod hooks;
pub mod registry;

pub use hooks::AbilityHooks;
pub use registry::ABILITY_REGISTRY;

/// Abilities known to the effect engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AbilityId {
    #[default]
    None = 0,
    Levitate,
    MagicGuard,
    LiquidOoze,
    ClearBody,
    WhiteSmoke,
    FullMetalBody,
    Steadfast,
    CloudNine,
    AirLock,
    Ripen,
    Gluttony,
    Truant,
    SlowStart,
    Protosynthesis,
    QuarkDrive,
}

impl AbilityId {
    pub const COUNT: usize = 16;

    pub fn name(&self) -> &'static str {
        match self {
            AbilityId::None => "No Ability",
            AbilityId::Levitate => "Levitate",
            AbilityId::MagicGuard => "Magic Guard",
            AbilityId::LiquidOoze => "Liquid Ooze",
            AbilityId::ClearBody => "Clear Body",
            AbilityId::WhiteSmoke => "White Smoke",
            AbilityId::FullMetalBody => "Full Metal Body",
            AbilityId::Steadfast => "Steadfast",
            AbilityId::CloudNine => "Cloud Nine",
            AbilityId::AirLock => "Air Lock",
            AbilityId::Ripen => "Ripen",
            AbilityId::Gluttony => "Gluttony",
            AbilityId::Truant => "Truant",
            AbilityId::SlowStart => "Slow Start",
            AbilityId::Protosynthesis => "Protosynthesis",
            AbilityId::QuarkDrive => "Quark Drive",
        }
    }

    /// Hook table for this ability, if it has any
    pub fn hooks(&self) -> Option<&'static AbilityHooks> {
        ABILITY_REGISTRY[*self as usize].as_ref()
    }
}

impl std::fmt::Display for AbilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Hook kinds, for callers that only need to know whether a hook is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityHook {
    BlockNonDirectDamage,
    ReverseDrain,
    ProtectStat,
    FlinchEffect,
    SuppressWeatherEffect,
    DoubleBerryEffect,
    ReduceBerryUseThreshold,
}

fn hook_tables(combatant: &Combatant) -> impl Iterator<Item = &'static AbilityHooks> + '_ {
    combatant.abilities().filter_map(|ability| ability.hooks())
}

/// Whether any of the combatant's abilities carries `hook`
pub fn has_hook(combatant: &Combatant, hook: AbilityHook) -> bool {
    hook_tables(combatant).any(|hooks| match hook {
        AbilityHook::BlockNonDirectDamage => hooks.on_block_non_direct_damage.is_some(),
        AbilityHook::ReverseDrain => hooks.on_reverse_drain.is_some(),
        AbilityHook::ProtectStat => hooks.on_protect_stat.is_some(),
        AbilityHook::FlinchEffect => hooks.on_flinch.is_some(),
        AbilityHook::SuppressWeatherEffect => hooks.on_suppress_weather.is_some(),
        AbilityHook::DoubleBerryEffect => hooks.on_berry_effect.is_some(),
        AbilityHook::ReduceBerryUseThreshold => hooks.on_berry_threshold.is_some(),
    })
}

/// Whether chip damage (hazards, weather, drains, binding) is cancelled
pub fn blocks_non_direct_damage(combatant: &Combatant) -> bool {
    let mut cancelled = false;
    for hooks in hook_tables(combatant) {
        if let Some(hook) = hooks.on_block_non_direct_damage {
            hook(&mut cancelled);
        }
    }
    cancelled
}

/// Whether draining this combatant hurts the drainer instead of healing it
pub fn reverses_drain(combatant: &Combatant) -> bool {
    let mut reversed = false;
    for hooks in hook_tables(combatant) {
        if let Some(hook) = hooks.on_reverse_drain {
            hook(&mut reversed);
        }
    }
    reversed
}

/// Whether a drop to `stat` caused by another combatant is blocked
pub fn protects_stat(combatant: &Combatant, stat: Stat) -> bool {
    let mut blocked = false;
    for hooks in hook_tables(combatant) {
        if let Some(hook) = hooks.on_protect_stat {
            hook(stat, &mut blocked);
        }
    }
    blocked
}

/// Stat change the combatant gains from flinching, if any
pub fn flinch_effect(combatant: &Combatant) -> Option<(Stat, i8)> {
    hook_tables(combatant).find_map(|hooks| hooks.on_flinch.map(|hook| hook()))
}

/// Whether the combatant's presence nullifies the given weather
pub fn suppresses_weather(combatant: &Combatant, immutable: bool) -> bool {
    hook_tables(combatant).any(|hooks| hooks.on_suppress_weather.is_some_and(|hook| hook(immutable)))
}

/// Scale a berry effect value by the eater's abilities
pub fn apply_berry_effect(combatant: &Combatant, value: &mut f64) {
    for hooks in hook_tables(combatant) {
        if let Some(hook) = hooks.on_berry_effect {
            hook(value);
        }
    }
}

/// HP ratio below which a pinch berry is eaten, starting from `base`
pub fn berry_threshold(combatant: &Combatant, base: f64) -> f64 {
    let mut threshold = base;
    for hooks in hook_tables(combatant) {
        if let Some(hook) = hooks.on_berry_threshold {
            hook(&mut threshold);
        }
    }
    threshold
}
