//! Field-wide conditions: weather and terrain

use serde::{Deserialize, Serialize};

use super::pokemon_type::Type;

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherType {
    Sunny,
    Rain,
    Sandstorm,
    Hail,
    Snow,
    Fog,
    HeavyRain,   // Primordial Sea
    HarshSun,    // Desolate Land
    StrongWinds, // Delta Stream
}

impl WeatherType {
    /// Primal weather that never runs out on its own
    pub fn is_immutable(&self) -> bool {
        matches!(
            self,
            WeatherType::HeavyRain | WeatherType::HarshSun | WeatherType::StrongWinds
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherType::Sunny => "Sunny",
            WeatherType::Rain => "Rain",
            WeatherType::Sandstorm => "Sandstorm",
            WeatherType::Hail => "Hail",
            WeatherType::Snow => "Snow",
            WeatherType::Fog => "Fog",
            WeatherType::HeavyRain => "Heavy Rain",
            WeatherType::HarshSun => "Harsh Sun",
            WeatherType::StrongWinds => "Strong Winds",
        }
    }
}

impl std::fmt::Display for WeatherType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Active weather and its remaining duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub weather_type: WeatherType,
    /// 0 means the weather only ends when replaced
    pub turns_left: u32,
}

impl Weather {
    pub fn new(weather_type: WeatherType, turns_left: u32) -> Self {
        let turns_left = if weather_type.is_immutable() { 0 } else { turns_left };
        Self {
            weather_type,
            turns_left,
        }
    }

    /// Count down one turn; false once the weather has run out
    pub fn lapse(&mut self) -> bool {
        if self.is_immutable() {
            return true;
        }
        if self.turns_left > 0 {
            self.turns_left -= 1;
            return self.turns_left > 0;
        }
        true
    }

    pub fn is_immutable(&self) -> bool {
        self.weather_type.is_immutable()
    }

    /// Deals chip damage at the end of each turn
    pub fn is_damaging(&self) -> bool {
        matches!(self.weather_type, WeatherType::Sandstorm | WeatherType::Hail)
    }

    /// Whether a combatant of this type ignores the chip damage
    pub fn is_type_damage_immune(&self, t: Type) -> bool {
        match self.weather_type {
            WeatherType::Sandstorm => matches!(t, Type::Ground | Type::Rock | Type::Steel),
            WeatherType::Hail => t == Type::Ice,
            _ => false,
        }
    }

    /// Power multiplier for an attack of `attack_type`
    pub fn attack_type_multiplier(&self, attack_type: Type) -> f64 {
        match (self.weather_type, attack_type) {
            (WeatherType::Sunny | WeatherType::HarshSun, Type::Fire) => 1.5,
            (WeatherType::Sunny | WeatherType::HarshSun, Type::Water) => 0.5,
            (WeatherType::Rain | WeatherType::HeavyRain, Type::Fire) => 0.5,
            (WeatherType::Rain | WeatherType::HeavyRain, Type::Water) => 1.5,
            _ => 1.0,
        }
    }

    /// Primal weather evaporates or douses attacks of the opposing element
    pub fn is_move_weather_cancelled(&self, move_type: Type, is_attack: bool) -> bool {
        if !is_attack {
            return false;
        }
        match self.weather_type {
            WeatherType::HarshSun => move_type == Type::Water,
            WeatherType::HeavyRain => move_type == Type::Fire,
            _ => false,
        }
    }

    pub fn start_message(weather_type: WeatherType) -> &'static str {
        match weather_type {
            WeatherType::Sunny => "The sunlight got bright!",
            WeatherType::Rain => "A heavy rain started to fall!",
            WeatherType::Sandstorm => "A sandstorm brewed!",
            WeatherType::Hail => "It started to hail!",
            WeatherType::Snow => "It started to snow!",
            WeatherType::Fog => "A thick fog emerged!",
            WeatherType::HeavyRain => "A heavy downpour started!",
            WeatherType::HarshSun => "The sunlight got hot!",
            WeatherType::StrongWinds => "A heavy wind began!",
        }
    }

    pub fn lapse_message(weather_type: WeatherType) -> &'static str {
        match weather_type {
            WeatherType::Sunny => "The sunlight is strong.",
            WeatherType::Rain => "The downpour continues.",
            WeatherType::Sandstorm => "The sandstorm rages.",
            WeatherType::Hail => "Hail continues to fall.",
            WeatherType::Snow => "The snow is falling down.",
            WeatherType::Fog => "The fog continues.",
            WeatherType::HeavyRain => "The rain continues to fall heavily.",
            WeatherType::HarshSun => "The sun is scorching hot.",
            WeatherType::StrongWinds => "The wind blows intensely.",
        }
    }

    /// Chip damage text, without the combatant's name
    pub fn damage_message(weather_type: WeatherType) -> Option<&'static str> {
        match weather_type {
            WeatherType::Sandstorm => Some(" is buffeted by the sandstorm!"),
            WeatherType::Hail => Some(" is pelted by the hail!"),
            _ => None,
        }
    }

    pub fn clear_message(weather_type: WeatherType) -> &'static str {
        match weather_type {
            WeatherType::Sunny => "The sunlight faded.",
            WeatherType::Rain => "The rain stopped.",
            WeatherType::Sandstorm => "The sandstorm subsided.",
            WeatherType::Hail => "The hail stopped.",
            WeatherType::Snow => "The snow stopped.",
            WeatherType::Fog => "The fog disappeared.",
            WeatherType::HeavyRain => "The heavy rain stopped.",
            WeatherType::HarshSun => "The harsh sunlight faded.",
            WeatherType::StrongWinds => "The heavy wind stopped.",
        }
    }
}

/// Terrain conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainType {
    Misty,
    Electric,
    Grassy,
    Psychic,
}

impl TerrainType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainType::Misty => "Misty",
            TerrainType::Electric => "Electric",
            TerrainType::Grassy => "Grassy",
            TerrainType::Psychic => "Psychic",
        }
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Terrain", self.as_str())
    }
}

/// Active terrain and its remaining duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Terrain {
    pub terrain_type: TerrainType,
    pub turns_left: u32,
}

impl Terrain {
    pub fn new(terrain_type: TerrainType, turns_left: u32) -> Self {
        Self {
            terrain_type,
            turns_left,
        }
    }

    /// Same countdown rule as weather: 0 never runs out
    pub fn lapse(&mut self) -> bool {
        if self.turns_left > 0 {
            self.turns_left -= 1;
            return self.turns_left > 0;
        }
        true
    }

    /// Boost for a grounded attacker using a move of `attack_type`
    pub fn attacker_multiplier(&self, attack_type: Type) -> f64 {
        match (self.terrain_type, attack_type) {
            (TerrainType::Electric, Type::Electric)
            | (TerrainType::Grassy, Type::Grass)
            | (TerrainType::Psychic, Type::Psychic) => 1.3,
            _ => 1.0,
        }
    }

    /// Reduction for a grounded target hit by a move of `attack_type`
    pub fn defender_multiplier(&self, attack_type: Type) -> f64 {
        match (self.terrain_type, attack_type) {
            (TerrainType::Misty, Type::Dragon) => 0.5,
            _ => 1.0,
        }
    }

    pub fn start_message(terrain_type: TerrainType) -> &'static str {
        match terrain_type {
            TerrainType::Misty => "Mist swirled about the battlefield!",
            TerrainType::Electric => "An electric current ran across the battlefield!",
            TerrainType::Grassy => "Grass grew to cover the battlefield!",
            TerrainType::Psychic => "The battlefield got weird!",
        }
    }

    pub fn clear_message(terrain_type: TerrainType) -> &'static str {
        match terrain_type {
            TerrainType::Misty => "The mist disappeared from the battlefield.",
            TerrainType::Electric => "The electricity disappeared from the battlefield.",
            TerrainType::Grassy => "The grass disappeared from the battlefield.",
            TerrainType::Psychic => "The weirdness disappeared from the battlefield!",
        }
    }

    /// Text shown when the terrain stops a status, without the combatant's name
    pub fn block_message(terrain_type: TerrainType) -> String {
        match terrain_type {
            TerrainType::Misty => " surrounds itself with a protective mist!".to_string(),
            other => format!(" is protected by the {other}!"),
        }
    }
}
