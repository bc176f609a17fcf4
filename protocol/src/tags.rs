//! Tag discriminators shared by the engine and the save format

use serde::{Deserialize, Serialize};

/// Kind of field-level effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArenaTagType {
    Mist,
    MudSport,
    WaterSport,
    Spikes,
    ToxicSpikes,
    FutureSight,
    DoomDesire,
    Wish,
    StealthRock,
    StickyWeb,
    TrickRoom,
    Gravity,
    Reflect,
    LightScreen,
    AuroraVeil,
    Tailwind,
}

impl ArenaTagType {
    pub const ALL: [ArenaTagType; 16] = [
        ArenaTagType::Mist,
        ArenaTagType::MudSport,
        ArenaTagType::WaterSport,
        ArenaTagType::Spikes,
        ArenaTagType::ToxicSpikes,
        ArenaTagType::FutureSight,
        ArenaTagType::DoomDesire,
        ArenaTagType::Wish,
        ArenaTagType::StealthRock,
        ArenaTagType::StickyWeb,
        ArenaTagType::TrickRoom,
        ArenaTagType::Gravity,
        ArenaTagType::Reflect,
        ArenaTagType::LightScreen,
        ArenaTagType::AuroraVeil,
        ArenaTagType::Tailwind,
    ];

    /// Entry hazards that trigger on switch-in
    pub fn is_entry_hazard(&self) -> bool {
        matches!(
            self,
            ArenaTagType::Spikes
                | ArenaTagType::ToxicSpikes
                | ArenaTagType::StealthRock
                | ArenaTagType::StickyWeb
        )
    }

    /// Layer cap of a hazard family, `None` for non-hazards
    pub fn max_layers(&self) -> Option<u8> {
        match self {
            ArenaTagType::Spikes => Some(3),
            ArenaTagType::ToxicSpikes => Some(2),
            ArenaTagType::StealthRock | ArenaTagType::StickyWeb => Some(1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaTagType::Mist => "MIST",
            ArenaTagType::MudSport => "MUD_SPORT",
            ArenaTagType::WaterSport => "WATER_SPORT",
            ArenaTagType::Spikes => "SPIKES",
            ArenaTagType::ToxicSpikes => "TOXIC_SPIKES",
            ArenaTagType::FutureSight => "FUTURE_SIGHT",
            ArenaTagType::DoomDesire => "DOOM_DESIRE",
            ArenaTagType::Wish => "WISH",
            ArenaTagType::StealthRock => "STEALTH_ROCK",
            ArenaTagType::StickyWeb => "STICKY_WEB",
            ArenaTagType::TrickRoom => "TRICK_ROOM",
            ArenaTagType::Gravity => "GRAVITY",
            ArenaTagType::Reflect => "REFLECT",
            ArenaTagType::LightScreen => "LIGHT_SCREEN",
            ArenaTagType::AuroraVeil => "AURORA_VEIL",
            ArenaTagType::Tailwind => "TAILWIND",
        }
    }
}

impl std::fmt::Display for ArenaTagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of combatant-scoped effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattlerTagType {
    Recharging,
    Flinched,
    Interrupted,
    Confused,
    Infatuated,
    Seeded,
    Nightmare,
    Frenzy,
    Charging,
    Encore,
    HelpingHand,
    Ingrain,
    AquaRing,
    Drowsy,
    Trapped,
    Bind,
    Wrap,
    FireSpin,
    Whirlpool,
    Clamp,
    SandTomb,
    MagmaStorm,
    SnapTrap,
    ThunderCage,
    Infestation,
    Protected,
    SpikyShield,
    KingsShield,
    Obstruct,
    SilkTrap,
    BanefulBunker,
    BurningBulwark,
    Enduring,
    Sturdy,
    PerishSong,
    Truant,
    SlowStart,
    Protosynthesis,
    QuarkDrive,
    Flying,
    Underground,
    Underwater,
    Hidden,
    FireBoost,
    CritBoost,
    AlwaysCrit,
    NoCrit,
    IgnoreAccuracy,
    BypassSleep,
    IgnoreFlying,
    Grounded,
    SaltCured,
    Cursed,
    Charged,
    MagnetRisen,
    Minimized,
}

impl BattlerTagType {
    pub const ALL: [BattlerTagType; 56] = [
        BattlerTagType::Recharging,
        BattlerTagType::Flinched,
        BattlerTagType::Interrupted,
        BattlerTagType::Confused,
        BattlerTagType::Infatuated,
        BattlerTagType::Seeded,
        BattlerTagType::Nightmare,
        BattlerTagType::Frenzy,
        BattlerTagType::Charging,
        BattlerTagType::Encore,
        BattlerTagType::HelpingHand,
        BattlerTagType::Ingrain,
        BattlerTagType::AquaRing,
        BattlerTagType::Drowsy,
        BattlerTagType::Trapped,
        BattlerTagType::Bind,
        BattlerTagType::Wrap,
        BattlerTagType::FireSpin,
        BattlerTagType::Whirlpool,
        BattlerTagType::Clamp,
        BattlerTagType::SandTomb,
        BattlerTagType::MagmaStorm,
        BattlerTagType::SnapTrap,
        BattlerTagType::ThunderCage,
        BattlerTagType::Infestation,
        BattlerTagType::Protected,
        BattlerTagType::SpikyShield,
        BattlerTagType::KingsShield,
        BattlerTagType::Obstruct,
        BattlerTagType::SilkTrap,
        BattlerTagType::BanefulBunker,
        BattlerTagType::BurningBulwark,
        BattlerTagType::Enduring,
        BattlerTagType::Sturdy,
        BattlerTagType::PerishSong,
        BattlerTagType::Truant,
        BattlerTagType::SlowStart,
        BattlerTagType::Protosynthesis,
        BattlerTagType::QuarkDrive,
        BattlerTagType::Flying,
        BattlerTagType::Underground,
        BattlerTagType::Underwater,
        BattlerTagType::Hidden,
        BattlerTagType::FireBoost,
        BattlerTagType::CritBoost,
        BattlerTagType::AlwaysCrit,
        BattlerTagType::NoCrit,
        BattlerTagType::IgnoreAccuracy,
        BattlerTagType::BypassSleep,
        BattlerTagType::IgnoreFlying,
        BattlerTagType::Grounded,
        BattlerTagType::SaltCured,
        BattlerTagType::Cursed,
        BattlerTagType::Charged,
        BattlerTagType::MagnetRisen,
        BattlerTagType::Minimized,
    ];

    /// Binding moves that deal damage every turn
    pub fn is_damaging_trap(&self) -> bool {
        matches!(
            self,
            BattlerTagType::Bind
                | BattlerTagType::Wrap
                | BattlerTagType::FireSpin
                | BattlerTagType::Whirlpool
                | BattlerTagType::Clamp
                | BattlerTagType::SandTomb
                | BattlerTagType::MagmaStorm
                | BattlerTagType::SnapTrap
                | BattlerTagType::ThunderCage
                | BattlerTagType::Infestation
        )
    }

    /// Anything that prevents the holder from switching out
    pub fn is_trapping(&self) -> bool {
        matches!(self, BattlerTagType::Trapped | BattlerTagType::Ingrain) || self.is_damaging_trap()
    }

    /// Protect and its variants
    pub fn is_protection(&self) -> bool {
        matches!(
            self,
            BattlerTagType::Protected
                | BattlerTagType::SpikyShield
                | BattlerTagType::KingsShield
                | BattlerTagType::Obstruct
                | BattlerTagType::SilkTrap
                | BattlerTagType::BanefulBunker
                | BattlerTagType::BurningBulwark
        )
    }

    /// Semi-invulnerable states during a charge turn
    pub fn is_hidden(&self) -> bool {
        matches!(
            self,
            BattlerTagType::Flying
                | BattlerTagType::Underground
                | BattlerTagType::Underwater
                | BattlerTagType::Hidden
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattlerTagType::Recharging => "RECHARGING",
            BattlerTagType::Flinched => "FLINCHED",
            BattlerTagType::Interrupted => "INTERRUPTED",
            BattlerTagType::Confused => "CONFUSED",
            BattlerTagType::Infatuated => "INFATUATED",
            BattlerTagType::Seeded => "SEEDED",
            BattlerTagType::Nightmare => "NIGHTMARE",
            BattlerTagType::Frenzy => "FRENZY",
            BattlerTagType::Charging => "CHARGING",
            BattlerTagType::Encore => "ENCORE",
            BattlerTagType::HelpingHand => "HELPING_HAND",
            BattlerTagType::Ingrain => "INGRAIN",
            BattlerTagType::AquaRing => "AQUA_RING",
            BattlerTagType::Drowsy => "DROWSY",
            BattlerTagType::Trapped => "TRAPPED",
            BattlerTagType::Bind => "BIND",
            BattlerTagType::Wrap => "WRAP",
            BattlerTagType::FireSpin => "FIRE_SPIN",
            BattlerTagType::Whirlpool => "WHIRLPOOL",
            BattlerTagType::Clamp => "CLAMP",
            BattlerTagType::SandTomb => "SAND_TOMB",
            BattlerTagType::MagmaStorm => "MAGMA_STORM",
            BattlerTagType::SnapTrap => "SNAP_TRAP",
            BattlerTagType::ThunderCage => "THUNDER_CAGE",
            BattlerTagType::Infestation => "INFESTATION",
            BattlerTagType::Protected => "PROTECTED",
            BattlerTagType::SpikyShield => "SPIKY_SHIELD",
            BattlerTagType::KingsShield => "KINGS_SHIELD",
            BattlerTagType::Obstruct => "OBSTRUCT",
            BattlerTagType::SilkTrap => "SILK_TRAP",
            BattlerTagType::BanefulBunker => "BANEFUL_BUNKER",
            BattlerTagType::BurningBulwark => "BURNING_BULWARK",
            BattlerTagType::Enduring => "ENDURING",
            BattlerTagType::Sturdy => "STURDY",
            BattlerTagType::PerishSong => "PERISH_SONG",
            BattlerTagType::Truant => "TRUANT",
            BattlerTagType::SlowStart => "SLOW_START",
            BattlerTagType::Protosynthesis => "PROTOSYNTHESIS",
            BattlerTagType::QuarkDrive => "QUARK_DRIVE",
            BattlerTagType::Flying => "FLYING",
            BattlerTagType::Underground => "UNDERGROUND",
            BattlerTagType::Underwater => "UNDERWATER",
            BattlerTagType::Hidden => "HIDDEN",
            BattlerTagType::FireBoost => "FIRE_BOOST",
            BattlerTagType::CritBoost => "CRIT_BOOST",
            BattlerTagType::AlwaysCrit => "ALWAYS_CRIT",
            BattlerTagType::NoCrit => "NO_CRIT",
            BattlerTagType::IgnoreAccuracy => "IGNORE_ACCURACY",
            BattlerTagType::BypassSleep => "BYPASS_SLEEP",
            BattlerTagType::IgnoreFlying => "IGNORE_FLYING",
            BattlerTagType::Grounded => "GROUNDED",
            BattlerTagType::SaltCured => "SALT_CURED",
            BattlerTagType::Cursed => "CURSED",
            BattlerTagType::Charged => "CHARGED",
            BattlerTagType::MagnetRisen => "MAGNET_RISEN",
            BattlerTagType::Minimized => "MINIMIZED",
        }
    }
}

impl std::fmt::Display for BattlerTagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checkpoint in the turn at which a combatant's tags are counted down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattlerTagLapseType {
    Faint,
    Move,
    PreMove,
    AfterMove,
    MoveEffect,
    TurnEnd,
    /// Only lapsed when a caller asks for it explicitly
    #[default]
    Custom,
}

impl BattlerTagLapseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattlerTagLapseType::Faint => "FAINT",
            BattlerTagLapseType::Move => "MOVE",
            BattlerTagLapseType::PreMove => "PRE_MOVE",
            BattlerTagLapseType::AfterMove => "AFTER_MOVE",
            BattlerTagLapseType::MoveEffect => "MOVE_EFFECT",
            BattlerTagLapseType::TurnEnd => "TURN_END",
            BattlerTagLapseType::Custom => "CUSTOM",
        }
    }
}

impl std::fmt::Display for BattlerTagLapseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
