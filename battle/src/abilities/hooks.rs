use fieldtag_protocol::Stat;

/// Cancels chip damage that does not come from a direct hit
pub type OnBlockNonDirectDamage = fn(cancelled: &mut bool);

/// Turns a drain heal into damage dealt to the drainer
pub type OnReverseDrain = fn(reversed: &mut bool);

/// Blocks a stat drop inflicted by another combatant
pub type OnProtectStat = fn(stat: Stat, blocked: &mut bool);

/// Stat change granted to the holder when it flinches
pub type OnFlinch = fn() -> (Stat, i8);

/// Whether the holder's presence nullifies weather; receives whether the weather is immutable
pub type OnSuppressWeather = fn(immutable: bool) -> bool;

/// Scales the value of a berry effect
pub type OnBerryEffect = fn(value: &mut f64);

/// Adjusts the HP ratio below which a pinch berry is eaten
pub type OnBerryThreshold = fn(threshold: &mut f64);

#[derive(Clone, Copy, Default)]
pub struct AbilityHooks {
    pub on_block_non_direct_damage: Option<OnBlockNonDirectDamage>,
    pub on_reverse_drain: Option<OnReverseDrain>,
    pub on_protect_stat: Option<OnProtectStat>,
    pub on_flinch: Option<OnFlinch>,
    pub on_suppress_weather: Option<OnSuppressWeather>,
    pub on_berry_effect: Option<OnBerryEffect>,
    pub on_berry_threshold: Option<OnBerryThreshold>,
}

impl AbilityHooks {
    /// Empty hooks (default)
    pub const NONE: Self = Self {
        on_block_non_direct_damage: None,
        on_reverse_drain: None,
        on_protect_stat: None,
        on_flinch: None,
        on_suppress_weather: None,
        on_berry_effect: None,
        on_berry_threshold: None,
    };
}
