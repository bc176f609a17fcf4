//! Shared identifiers for combatants, field slots, stats and moves

use serde::{Deserialize, Serialize};

/// Stable identity of a combatant for the whole battle.
///
/// Tags hold this as a weak back-reference: the combatant it names may have
/// fainted or left the field, so every lookup through it can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatantId(pub u32);

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Field slot a combatant occupies (two per side)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattlerIndex {
    Player,
    Player2,
    Enemy,
    Enemy2,
}

impl BattlerIndex {
    pub const ALL: [BattlerIndex; 4] = [
        BattlerIndex::Player,
        BattlerIndex::Player2,
        BattlerIndex::Enemy,
        BattlerIndex::Enemy2,
    ];

    /// Position in a four-slot field array
    pub fn slot(&self) -> usize {
        match self {
            BattlerIndex::Player => 0,
            BattlerIndex::Player2 => 1,
            BattlerIndex::Enemy => 2,
            BattlerIndex::Enemy2 => 3,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, BattlerIndex::Player | BattlerIndex::Player2)
    }

    /// The side this slot belongs to
    pub fn side(&self) -> ArenaTagSide {
        if self.is_player() {
            ArenaTagSide::Player
        } else {
            ArenaTagSide::Enemy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BattlerIndex::Player => "player",
            BattlerIndex::Player2 => "player2",
            BattlerIndex::Enemy => "enemy",
            BattlerIndex::Enemy2 => "enemy2",
        }
    }
}

/// Which half of the field an arena effect covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArenaTagSide {
    #[default]
    Both,
    Player,
    Enemy,
}

impl ArenaTagSide {
    /// Side for a combatant, given which team it fights for
    pub fn for_team(is_player: bool) -> Self {
        if is_player {
            ArenaTagSide::Player
        } else {
            ArenaTagSide::Enemy
        }
    }

    /// Whether an effect on this side reaches a combatant of the given team
    pub fn covers(&self, is_player: bool) -> bool {
        match self {
            ArenaTagSide::Both => true,
            ArenaTagSide::Player => is_player,
            ArenaTagSide::Enemy => !is_player,
        }
    }

    /// The other team's side; `Both` stays `Both`
    pub fn opposite(&self) -> Self {
        match self {
            ArenaTagSide::Both => ArenaTagSide::Both,
            ArenaTagSide::Player => ArenaTagSide::Enemy,
            ArenaTagSide::Enemy => ArenaTagSide::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaTagSide::Both => "both",
            ArenaTagSide::Player => "player",
            ArenaTagSide::Enemy => "enemy",
        }
    }
}

impl std::fmt::Display for ArenaTagSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Battle stat that can carry a stage modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    /// The five stats that have a base value (no accuracy/evasion)
    pub const BATTLE: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    /// Display name used in battle messages
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::Spa => "Sp. Atk",
            Stat::Spd => "Sp. Def",
            Stat::Spe => "Speed",
            Stat::Accuracy => "Accuracy",
            Stat::Evasion => "Evasiveness",
        }
    }

    /// Wording for a stage change of `levels`, e.g. "sharply rose"
    pub fn change_description(levels: i8, up: bool) -> &'static str {
        match (up, levels) {
            (true, 1) => "rose",
            (true, 2) => "sharply rose",
            (true, 3..=6) => "rose drastically",
            (true, _) => "won't go any higher",
            (false, 1) => "fell",
            (false, 2) => "harshly fell",
            (false, 3..=6) => "severely fell",
            (false, _) => "won't go any lower",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Moves that install, consult or interact with tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    // Field and side effects
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
    // Volatile effects
    LeechSeed,
    Nightmare,
    Encore,
    HelpingHand,
    Ingrain,
    AquaRing,
    Minimize,
    Yawn,
    PerishSong,
    SaltCure,
    Curse,
    ConfuseRay,
    Attract,
    FocusEnergy,
    MagnetRise,
    Charge,
    LockOn,
    LaserFocus,
    SmackDown,
    MeanLook,
    // Binding moves
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
    // Protection
    Protect,
    Detect,
    SpikyShield,
    KingsShield,
    Obstruct,
    SilkTrap,
    BanefulBunker,
    BurningBulwark,
    Endure,
    // Multi-turn and semi-invulnerable
    HyperBeam,
    Outrage,
    Thrash,
    PetalDance,
    SolarBeam,
    Fly,
    Dig,
    Dive,
    PhantomForce,
    ShadowForce,
    // Moves Encore refuses to lock
    Mimic,
    MirrorMove,
    Transform,
    Struggle,
    Sketch,
    SleepTalk,
    // Plain attacks
    Tackle,
    Scratch,
    Earthquake,
    Thunderbolt,
    Flamethrower,
    Surf,
}

impl Move {
    pub fn name(&self) -> &'static str {
        match self {
            Move::Mist => "Mist",
            Move::MudSport => "Mud Sport",
            Move::WaterSport => "Water Sport",
            Move::Spikes => "Spikes",
            Move::ToxicSpikes => "Toxic Spikes",
            Move::FutureSight => "Future Sight",
            Move::DoomDesire => "Doom Desire",
            Move::Wish => "Wish",
            Move::StealthRock => "Stealth Rock",
            Move::StickyWeb => "Sticky Web",
            Move::TrickRoom => "Trick Room",
            Move::Gravity => "Gravity",
            Move::Reflect => "Reflect",
            Move::LightScreen => "Light Screen",
            Move::AuroraVeil => "Aurora Veil",
            Move::Tailwind => "Tailwind",
            Move::LeechSeed => "Leech Seed",
            Move::Nightmare => "Nightmare",
            Move::Encore => "Encore",
            Move::HelpingHand => "Helping Hand",
            Move::Ingrain => "Ingrain",
            Move::AquaRing => "Aqua Ring",
            Move::Minimize => "Minimize",
            Move::Yawn => "Yawn",
            Move::PerishSong => "Perish Song",
            Move::SaltCure => "Salt Cure",
            Move::Curse => "Curse",
            Move::ConfuseRay => "Confuse Ray",
            Move::Attract => "Attract",
            Move::FocusEnergy => "Focus Energy",
            Move::MagnetRise => "Magnet Rise",
            Move::Charge => "Charge",
            Move::LockOn => "Lock-On",
            Move::LaserFocus => "Laser Focus",
            Move::SmackDown => "Smack Down",
            Move::MeanLook => "Mean Look",
            Move::Bind => "Bind",
            Move::Wrap => "Wrap",
            Move::FireSpin => "Fire Spin",
            Move::Whirlpool => "Whirlpool",
            Move::Clamp => "Clamp",
            Move::SandTomb => "Sand Tomb",
            Move::MagmaStorm => "Magma Storm",
            Move::SnapTrap => "Snap Trap",
            Move::ThunderCage => "Thunder Cage",
            Move::Infestation => "Infestation",
            Move::Protect => "Protect",
            Move::Detect => "Detect",
            Move::SpikyShield => "Spiky Shield",
            Move::KingsShield => "King's Shield",
            Move::Obstruct => "Obstruct",
            Move::SilkTrap => "Silk Trap",
            Move::BanefulBunker => "Baneful Bunker",
            Move::BurningBulwark => "Burning Bulwark",
            Move::Endure => "Endure",
            Move::HyperBeam => "Hyper Beam",
            Move::Outrage => "Outrage",
            Move::Thrash => "Thrash",
            Move::PetalDance => "Petal Dance",
            Move::SolarBeam => "Solar Beam",
            Move::Fly => "Fly",
            Move::Dig => "Dig",
            Move::Dive => "Dive",
            Move::PhantomForce => "Phantom Force",
            Move::ShadowForce => "Shadow Force",
            Move::Mimic => "Mimic",
            Move::MirrorMove => "Mirror Move",
            Move::Transform => "Transform",
            Move::Struggle => "Struggle",
            Move::Sketch => "Sketch",
            Move::SleepTalk => "Sleep Talk",
            Move::Tackle => "Tackle",
            Move::Scratch => "Scratch",
            Move::Earthquake => "Earthquake",
            Move::Thunderbolt => "Thunderbolt",
            Move::Flamethrower => "Flamethrower",
            Move::Surf => "Surf",
        }
    }

    pub fn category(&self) -> MoveCategory {
        match self {
            Move::FutureSight
            | Move::DoomDesire
            | Move::FireSpin
            | Move::Whirlpool
            | Move::MagmaStorm
            | Move::ThunderCage
            | Move::Infestation
            | Move::PetalDance
            | Move::SolarBeam
            | Move::HyperBeam
            | Move::Thunderbolt
            | Move::Flamethrower
            | Move::Surf => MoveCategory::Special,
            Move::Bind
            | Move::Wrap
            | Move::Clamp
            | Move::SandTomb
            | Move::SnapTrap
            | Move::SaltCure
            | Move::SmackDown
            | Move::Outrage
            | Move::Thrash
            | Move::Fly
            | Move::Dig
            | Move::Dive
            | Move::PhantomForce
            | Move::ShadowForce
            | Move::Struggle
            | Move::Tackle
            | Move::Scratch
            | Move::Earthquake => MoveCategory::Physical,
            _ => MoveCategory::Status,
        }
    }

    /// Whether the move touches its target
    pub fn makes_contact(&self) -> bool {
        matches!(
            self,
            Move::Bind
                | Move::Wrap
                | Move::Clamp
                | Move::SnapTrap
                | Move::Infestation
                | Move::Outrage
                | Move::Thrash
                | Move::PetalDance
                | Move::Fly
                | Move::Dig
                | Move::Dive
                | Move::PhantomForce
                | Move::ShadowForce
                | Move::Struggle
                | Move::Tackle
                | Move::Scratch
        )
    }

    /// Moves that spend a turn charging before they hit
    pub fn is_charge_move(&self) -> bool {
        matches!(
            self,
            Move::SolarBeam
                | Move::Fly
                | Move::Dig
                | Move::Dive
                | Move::PhantomForce
                | Move::ShadowForce
        )
    }

    /// Base PP of the move
    pub fn pp(&self) -> u8 {
        match self {
            Move::Tackle | Move::Scratch | Move::Minimize | Move::Spikes | Move::StealthRock => 35,
            Move::Thunderbolt | Move::Flamethrower | Move::Surf | Move::Earthquake => 15,
            Move::HyperBeam | Move::FutureSight | Move::DoomDesire | Move::PerishSong => 5,
            _ => 10,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
