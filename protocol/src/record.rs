//! Serialized forms of installed tags
//!
//! Records are flat: the common fields every tag carries, plus optional
//! fields that only some tag families use. A field a family needs but a
//! record lacks is reported as [`LoadError::MissingField`] when the engine
//! rebuilds the tag.

use serde::{Deserialize, Serialize};

use crate::LoadError;
use crate::battle::{ArenaTagSide, BattlerIndex, CombatantId, Move, Stat};
use crate::tags::{ArenaTagType, BattlerTagLapseType, BattlerTagType};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Saved field-level tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaTagRecord {
    pub tag_type: ArenaTagType,
    pub turn_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_move: Option<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<CombatantId>,
    #[serde(default)]
    pub side: ArenaTagSide,

    // === Entry hazards ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layers: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_layers: Option<u8>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub neutralized: bool,

    // === Delayed attacks ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_index: Option<BattlerIndex>,

    // === Wish ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battler_index: Option<BattlerIndex>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal_hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_message: Option<String>,
}

impl ArenaTagRecord {
    /// Record with only the common fields set
    pub fn new(tag_type: ArenaTagType, turn_count: i32, side: ArenaTagSide) -> Self {
        Self {
            tag_type,
            turn_count,
            source_move: None,
            source_id: None,
            side,
            layers: None,
            max_layers: None,
            neutralized: false,
            target_index: None,
            battler_index: None,
            heal_hp: None,
            trigger_message: None,
        }
    }

    fn validate(&self) -> Result<(), LoadError> {
        let cap = self.tag_type.max_layers();
        if let Some(max) = self.max_layers
            && cap != Some(max)
        {
            return Err(LoadError::InvalidField {
                tag: self.tag_type.to_string(),
                field: "maxLayers",
                reason: match cap {
                    Some(cap) => format!("{max} does not match the cap of {cap}"),
                    None => format!("{max} given for a tag without layers"),
                },
            });
        }
        if let (Some(layers), Some(cap)) = (self.layers, cap)
            && (layers == 0 || layers > cap)
        {
            return Err(LoadError::InvalidField {
                tag: self.tag_type.to_string(),
                field: "layers",
                reason: format!("{layers} is outside 1..={cap}"),
            });
        }
        Ok(())
    }
}

/// Saved combatant-scoped tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlerTagRecord {
    pub tag_type: BattlerTagType,
    #[serde(default)]
    pub lapse_type: BattlerTagLapseType,
    pub turn_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_move: Option<Move>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<CombatantId>,

    /// Slot of the seeder, for drain effects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_index: Option<BattlerIndex>,
    /// Move locked in by Encore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_id: Option<Move>,
    /// Stat picked by a highest-stat boost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<Stat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl BattlerTagRecord {
    /// Record with only the common fields set
    pub fn new(tag_type: BattlerTagType, lapse_type: BattlerTagLapseType, turn_count: i32) -> Self {
        Self {
            tag_type,
            lapse_type,
            turn_count,
            source_move: None,
            source_id: None,
            source_index: None,
            move_id: None,
            stat: None,
            multiplier: None,
        }
    }

    fn validate(&self) -> Result<(), LoadError> {
        if let Some(multiplier) = self.multiplier {
            if !multiplier.is_finite() || multiplier <= 0.0 {
                return Err(LoadError::InvalidField {
                    tag: self.tag_type.to_string(),
                    field: "multiplier",
                    reason: format!("{multiplier} is not a positive finite factor"),
                });
            }
        }
        Ok(())
    }
}

/// Unwrap a family-specific field or report it missing
pub fn require<T>(value: Option<T>, tag: impl std::fmt::Display, field: &'static str) -> Result<T, LoadError> {
    value.ok_or_else(|| LoadError::MissingField {
        tag: tag.to_string(),
        field,
    })
}

/// Parse a JSON array of field-level tags
pub fn parse_arena_tags(json: &str) -> anyhow::Result<Vec<ArenaTagRecord>> {
    let records: Vec<ArenaTagRecord> = serde_json::from_str(json).map_err(LoadError::from)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Parse a JSON array of combatant-scoped tags
pub fn parse_battler_tags(json: &str) -> anyhow::Result<Vec<BattlerTagRecord>> {
    let records: Vec<BattlerTagRecord> = serde_json::from_str(json).map_err(LoadError::from)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Serialize records to a JSON array
pub fn to_json<T: Serialize>(records: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(records).map_err(LoadError::from)?)
}
