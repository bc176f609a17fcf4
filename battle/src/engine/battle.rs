//! Battle - the aggregate the tag hooks read and mutate

use fieldtag_protocol::{BattlerIndex, CombatantId};
use tracing::debug;

use super::queue::PhaseQueue;
use crate::abilities;
use crate::config::{TagRules, TurnRange};
use crate::messages::pokemon_message;
use crate::rng::{BattleRng, SeededRng};
use crate::types::{Arena, Combatant, Status, StatusEffect, Terrain, TerrainType, WeatherType};

/// Everything a tag can observe: the arena, every combatant that has taken
/// part, which of them currently hold a battler slot, and the outbox of
/// follow-on phases.
///
/// Combatants are never dropped from the roster, so a back reference to a
/// combatant that left the field still resolves through [`Battle::combatant`];
/// slot-based lookups ([`Battle::at`], [`Battle::battler_index`]) only see
/// combatants on the field.
#[derive(Debug)]
pub struct Battle {
    // === Configuration ===
    pub rules: TagRules,

    // === State ===
    /// Weather, terrain and field tags
    pub arena: Arena,

    /// Every combatant that has joined the battle, in join order
    pub combatants: Vec<Combatant>,

    /// Occupant of each battler slot, indexed by [`BattlerIndex::slot`]
    pub(crate) field: [Option<CombatantId>; 4],

    /// Current turn number (0 = not started)
    pub turn: u32,

    // === Output ===
    /// Phases produced by tag hooks, waiting to be flushed to the scheduler
    pub phases: PhaseQueue,

    rng: Box<dyn BattleRng>,
}

impl Battle {
    /// Create a battle with default rules and a seeded generator
    pub fn new(seed: u64) -> Self {
        Self::with_rng(TagRules::default(), SeededRng::new(seed))
    }

    pub fn with_rng(rules: TagRules, rng: impl BattleRng + 'static) -> Self {
        Self {
            rules,
            arena: Arena::new(),
            combatants: Vec::new(),
            field: [None; 4],
            turn: 0,
            phases: PhaseQueue::new(),
            rng: Box::new(rng),
        }
    }

    /// Replace the random source, e.g. with a scripted one
    pub fn set_rng(&mut self, rng: impl BattleRng + 'static) {
        self.rng = Box::new(rng);
    }

    pub fn rng(&mut self) -> &mut dyn BattleRng {
        self.rng.as_mut()
    }

    /// Roll a duration from `range`
    pub fn roll(&mut self, range: TurnRange) -> u32 {
        range.roll(self.rng.as_mut())
    }

    // === Roster ===

    /// Add a combatant to the roster without placing it on the field
    pub fn add_combatant(&mut self, combatant: Combatant) -> CombatantId {
        let id = combatant.id;
        self.combatants.retain(|c| c.id != id);
        self.combatants.push(combatant);
        id
    }

    /// Look up any combatant by identity, on the field or not
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    // === Field ===

    /// Slot currently held by `id`, if it is on the field
    pub fn battler_index(&self, id: CombatantId) -> Option<BattlerIndex> {
        BattlerIndex::ALL
            .into_iter()
            .find(|index| self.field[index.slot()] == Some(id))
    }

    /// Combatant in a battler slot
    pub fn at(&self, index: BattlerIndex) -> Option<&Combatant> {
        self.field[index.slot()].and_then(|id| self.combatant(id))
    }

    pub fn is_on_field(&self, id: CombatantId) -> bool {
        self.battler_index(id).is_some()
    }

    /// Identities of the combatants on the field, in slot order
    pub fn active_ids(&self) -> Vec<CombatantId> {
        self.field.iter().flatten().copied().collect()
    }

    /// Combatants on the field, in slot order
    pub fn active(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.field
            .iter()
            .flatten()
            .filter_map(|id| self.combatant(*id))
    }

    /// On-field combatants fighting against `id`
    pub fn opponents(&self, id: CombatantId) -> Vec<&Combatant> {
        let Some(me) = self.combatant(id) else {
            return Vec::new();
        };
        let is_player = me.is_player;
        self.active().filter(|c| c.is_player != is_player).collect()
    }

    // === Field-aware combatant queries ===

    /// Grounded, taking Gravity into account
    pub fn is_grounded(&self, combatant: &Combatant) -> bool {
        self.arena.has_tag(fieldtag_protocol::ArenaTagType::Gravity) || combatant.is_grounded()
    }

    /// Whether `effect` could be inflicted right now, terrain included
    pub fn can_set_status(&self, combatant: &Combatant, effect: StatusEffect) -> bool {
        if !combatant.can_set_status(effect) {
            return false;
        }
        match self.arena.terrain_type() {
            Some(TerrainType::Misty) => !self.is_grounded(combatant),
            Some(TerrainType::Electric) if effect == StatusEffect::Sleep => !self.is_grounded(combatant),
            _ => true,
        }
    }

    /// Inflict `effect` directly on `id`.
    ///
    /// Sleep rolls its cure turn from the configured range. Returns false
    /// when the status could not be applied.
    pub fn try_set_status(&mut self, id: CombatantId, effect: StatusEffect, source_text: Option<&str>) -> bool {
        let Some(pokemon) = self.combatant(id) else {
            return false;
        };
        if !self.can_set_status(pokemon, effect) {
            return false;
        }

        let status = if effect == StatusEffect::Sleep {
            let cure_turn = self.roll(self.rules.sleep_turns);
            Status::with_cure_turn(effect, cure_turn)
        } else {
            Status::new(effect)
        };
        let Some(pokemon) = self.combatant_mut(id) else {
            return false;
        };
        pokemon.status = Some(status);
        let text = pokemon_message(pokemon, &effect.obtain_text(source_text));
        debug!(combatant = %id, status = %effect, "status set");
        self.phases.message(text);
        true
    }

    // === Weather and terrain ===

    /// Whether an on-field ability is cancelling the current weather
    pub fn is_weather_suppressed(&self) -> bool {
        let Some(weather) = self.arena.weather else {
            return false;
        };
        let immutable = weather.is_immutable();
        self.active()
            .any(|c| abilities::suppresses_weather(c, immutable))
    }

    /// Weather as seen by effects: none while suppressed
    pub fn effective_weather(&self) -> Option<WeatherType> {
        if self.is_weather_suppressed() {
            return None;
        }
        self.arena.weather_type()
    }

    pub fn terrain(&self) -> Option<&Terrain> {
        self.arena.terrain.as_ref()
    }
}
