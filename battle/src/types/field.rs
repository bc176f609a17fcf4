//! Shared battlefield state

use fieldtag_protocol::{ArenaTagSide, ArenaTagType};

use super::conditions::{Terrain, TerrainType, Weather, WeatherType};
use crate::tags::ArenaTag;

/// Field-wide state: at most one weather, at most one terrain, and the
/// installed arena tags in installation order
#[derive(Debug, Clone, Default)]
pub struct Arena {
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub tags: Vec<ArenaTag>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weather_type(&self) -> Option<WeatherType> {
        self.weather.map(|w| w.weather_type)
    }

    pub fn terrain_type(&self) -> Option<TerrainType> {
        self.terrain.map(|t| t.terrain_type)
    }

    /// First tag of this type on any side
    pub fn get_tag(&self, tag_type: ArenaTagType) -> Option<&ArenaTag> {
        self.tags.iter().find(|tag| tag.tag_type == tag_type)
    }

    /// The tag installed on exactly `side`
    pub fn get_tag_on_side(&self, tag_type: ArenaTagType, side: ArenaTagSide) -> Option<&ArenaTag> {
        self.tags
            .iter()
            .find(|tag| tag.tag_type == tag_type && tag.side == side)
    }

    pub fn position(&self, tag_type: ArenaTagType, side: ArenaTagSide) -> Option<usize> {
        self.tags
            .iter()
            .position(|tag| tag.tag_type == tag_type && tag.side == side)
    }

    /// Tags of this type whose side reaches a combatant of the given team
    pub fn tags_covering(&self, tag_type: ArenaTagType, is_player: bool) -> impl Iterator<Item = &ArenaTag> {
        self.tags
            .iter()
            .filter(move |tag| tag.tag_type == tag_type && tag.side.covers(is_player))
    }

    pub fn has_tag(&self, tag_type: ArenaTagType) -> bool {
        self.get_tag(tag_type).is_some()
    }
}
