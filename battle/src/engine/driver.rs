//! Tag lifecycle: add, overlap, apply, lapse and remove for both registries,
//! plus switching, weather and terrain upkeep.
//!
//! A hook receives the whole [`Battle`] mutably, so the tag it runs for is
//! taken out of its owner's list for the duration of the call and put back
//! at the same position afterwards (or dropped, with `on_remove`, once it
//! has expired).

use fieldtag_protocol::{
    ArenaTagSide, ArenaTagType, BattlerIndex, BattlerTagLapseType, BattlerTagType, CombatantId, Move,
    MoveCategory, Stat,
};
use tracing::{debug, trace, warn};

use super::battle::Battle;
use super::phase::{HitResult, Phase, PhaseScheduler};
use crate::abilities;
use crate::messages::pokemon_message;
use crate::tags::{
    ArenaTag, ArenaTagArgs, BattlerTag, BattlerTagArgs, BattlerTagData, IncomingMove, TagEvent, get_arena_tag,
    get_battler_tag,
};
use crate::types::{Terrain, TerrainType, TurnMove, Type, Weather, WeatherType};

/// Critical-hit modifiers gathered from a combatant's tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CritModifiers {
    pub stage: i8,
    pub always: bool,
    pub never: bool,
}

impl Battle {
    // =====================================================================
    // Arena tags
    // =====================================================================

    /// Install an arena tag, or run its overlap hook if one of the same type
    /// already covers the same side.
    ///
    /// Returns true only when a new tag was created.
    pub fn add_arena_tag(
        &mut self,
        tag_type: ArenaTagType,
        turn_count: i32,
        source_move: Option<Move>,
        source_id: Option<CombatantId>,
        side: ArenaTagSide,
        target_index: Option<BattlerIndex>,
    ) -> bool {
        let mut tag = get_arena_tag(tag_type, turn_count, source_move, source_id, side, target_index);

        if let Some(position) = self.arena.position(tag_type, tag.side) {
            let mut existing = self.arena.tags.remove(position);
            if let Some(on_overlap) = existing.hooks().on_overlap {
                on_overlap(&mut existing, self);
            }
            debug!(tag = %tag_type, side = %existing.side, layers = ?existing.layers(), "arena tag overlapped");
            self.reinsert_arena_tag(position, existing);
            return false;
        }

        if let Some(on_add) = tag.hooks().on_add {
            on_add(&mut tag, self);
        }
        debug!(tag = %tag_type, side = %tag.side, turn_count = tag.turn_count, "arena tag added");
        self.arena.tags.push(tag);
        true
    }

    /// Put a tag back where it was taken from, unless a hook installed a
    /// replacement in the meantime
    fn reinsert_arena_tag(&mut self, position: usize, tag: ArenaTag) {
        if self.arena.position(tag.tag_type, tag.side).is_some() {
            debug!(tag = %tag.tag_type, side = %tag.side, "arena tag replaced while detached");
            return;
        }
        let position = position.min(self.arena.tags.len());
        self.arena.tags.insert(position, tag);
    }

    /// Tag of this type on exactly `side`
    pub fn get_arena_tag(&self, tag_type: ArenaTagType, side: ArenaTagSide) -> Option<&ArenaTag> {
        self.arena.get_tag_on_side(tag_type, side)
    }

    /// Run `apply` on every tag of `tag_type` that reaches `side`.
    ///
    /// `Both` queries every tag of the type. Returns whether any tag applied.
    pub fn apply_arena_tags(&self, tag_type: ArenaTagType, side: ArenaTagSide, args: &mut ArenaTagArgs<'_>) -> bool {
        let mut applied = false;
        for tag in self.arena.tags.iter().filter(|tag| {
            tag.tag_type == tag_type
                && (side == ArenaTagSide::Both || tag.side == ArenaTagSide::Both || tag.side == side)
        }) {
            applied |= tag.apply(args);
        }
        trace!(tag = %tag_type, side = %side, applied, "arena tag query");
        applied
    }

    /// End-of-turn lapse of every arena tag, in installation order
    pub fn lapse_arena_tags(&mut self) {
        trace!(tags = self.arena.tags.len(), "lapsing arena tags");
        let mut position = 0;
        while position < self.arena.tags.len() {
            let mut tag = self.arena.tags.remove(position);
            let lapse = tag.hooks().lapse;
            if lapse(&mut tag, self) {
                self.reinsert_arena_tag(position, tag);
                position += 1;
            } else {
                debug!(tag = %tag.tag_type, side = %tag.side, "arena tag expired");
                if let Some(on_remove) = tag.hooks().on_remove {
                    on_remove(&tag, self);
                }
            }
        }
    }

    /// Remove the tag of this type on `side`, running its removal hook
    pub fn remove_arena_tag_on_side(&mut self, tag_type: ArenaTagType, side: ArenaTagSide) -> bool {
        let Some(position) = self.arena.position(tag_type, side) else {
            return false;
        };
        let tag = self.arena.tags.remove(position);
        self.finish_arena_tag(tag);
        true
    }

    /// Remove the first tag of this type on any side
    pub fn remove_arena_tag(&mut self, tag_type: ArenaTagType) -> bool {
        let Some(position) = self.arena.tags.iter().position(|tag| tag.tag_type == tag_type) else {
            return false;
        };
        let tag = self.arena.tags.remove(position);
        self.finish_arena_tag(tag);
        true
    }

    /// Remove every arena tag, e.g. when the battle ends
    pub fn remove_all_arena_tags(&mut self) {
        for tag in std::mem::take(&mut self.arena.tags) {
            self.finish_arena_tag(tag);
        }
    }

    fn finish_arena_tag(&mut self, tag: ArenaTag) {
        debug!(tag = %tag.tag_type, side = %tag.side, "arena tag removed");
        if let Some(on_remove) = tag.hooks().on_remove {
            on_remove(&tag, self);
        }
    }

    /// Fire the entry hazards covering `entrant`'s side.
    ///
    /// Returns whether any hazard took effect.
    pub fn apply_entry_hazards(&mut self, entrant: CombatantId) -> bool {
        let mut triggered = false;
        let mut position = 0;
        while position < self.arena.tags.len() {
            let applies = self
                .combatant(entrant)
                .is_some_and(|pokemon| self.arena.tags[position].trap_applies(pokemon));
            let activate = self.arena.tags[position].hooks().activate_trap;
            let (true, Some(activate)) = (applies, activate) else {
                position += 1;
                continue;
            };

            let mut tag = self.arena.tags.remove(position);
            let outcome = activate(&mut tag, self, entrant);
            triggered |= outcome.triggered;
            if outcome.remove {
                self.finish_arena_tag(tag);
            } else {
                self.reinsert_arena_tag(position, tag);
                position += 1;
            }
        }
        triggered
    }

    // =====================================================================
    // Battler tags
    // =====================================================================

    /// Install a battler tag on `id`.
    ///
    /// An existing tag of the same type runs its overlap hook instead. A
    /// failed `can_add` is a silent no-op. Returns true only when a new tag
    /// was created.
    pub fn add_battler_tag(
        &mut self,
        id: CombatantId,
        tag_type: BattlerTagType,
        turn_count: i32,
        source_move: Option<Move>,
        source_id: Option<CombatantId>,
    ) -> bool {
        let Some(pokemon) = self.combatant(id) else {
            warn!(combatant = %id, tag = %tag_type, "cannot add tag to unknown combatant");
            return false;
        };

        if let Some(position) = pokemon.tags.iter().position(|tag| tag.tag_type == tag_type) {
            let Some(mut existing) = self.detach_battler_tag(id, position) else {
                return false;
            };
            if let Some(on_overlap) = existing.hooks().on_overlap {
                on_overlap(&mut existing, self, id);
            }
            debug!(battler = %id, tag = %tag_type, "battler tag overlapped");
            self.reattach_battler_tag(id, position, existing);
            return false;
        }

        let mut tag = get_battler_tag(tag_type, turn_count, source_move, source_id);
        if !tag.can_add(self, pokemon) {
            trace!(battler = %id, tag = %tag_type, "battler tag rejected");
            return false;
        }
        if turn_count <= 0
            && let Some(range) = self.rules.open_duration(tag_type)
        {
            tag.turn_count = self.roll(range) as i32;
        }

        if let Some(on_add) = tag.hooks().on_add {
            on_add(&mut tag, self, id);
        }
        debug!(battler = %id, tag = %tag_type, turn_count = tag.turn_count, "battler tag added");
        if let Some(pokemon) = self.combatant_mut(id) {
            pokemon.tags.push(tag);
        }
        true
    }

    fn detach_battler_tag(&mut self, id: CombatantId, position: usize) -> Option<BattlerTag> {
        let pokemon = self.combatant_mut(id)?;
        (position < pokemon.tags.len()).then(|| pokemon.tags.remove(position))
    }

    fn reattach_battler_tag(&mut self, id: CombatantId, position: usize, tag: BattlerTag) {
        let Some(pokemon) = self.combatant_mut(id) else {
            return;
        };
        if pokemon.has_tag(tag.tag_type) {
            debug!(battler = %id, tag = %tag.tag_type, "battler tag replaced while detached");
            return;
        }
        let position = position.min(pokemon.tags.len());
        pokemon.tags.insert(position, tag);
    }

    fn finish_battler_tag(&mut self, id: CombatantId, tag: BattlerTag) {
        debug!(battler = %id, tag = %tag.tag_type, "battler tag removed");
        if let Some(on_remove) = tag.hooks().on_remove {
            on_remove(&tag, self, id);
        }
    }

    /// Lapse one detached tag; reattach it if it survives
    fn lapse_detached(&mut self, id: CombatantId, position: usize, mut tag: BattlerTag, event: &mut TagEvent) -> bool {
        let lapse = tag.hooks().lapse;
        let alive = lapse(&mut tag, self, id, event);
        if alive {
            self.reattach_battler_tag(id, position, tag);
        } else {
            self.finish_battler_tag(id, tag);
        }
        alive
    }

    /// Lapse every tag on `id` that lapses at `lapse_type`.
    ///
    /// A faint lapse removes every tag regardless of its checkpoint. The
    /// returned event tells the caller whether the pending move was
    /// cancelled.
    pub fn lapse_battler_tags(&mut self, id: CombatantId, lapse_type: BattlerTagLapseType) -> TagEvent {
        self.lapse_battler_tags_with(id, TagEvent::new(lapse_type))
    }

    pub fn lapse_battler_tags_with(&mut self, id: CombatantId, mut event: TagEvent) -> TagEvent {
        let Some(pokemon) = self.combatant(id) else {
            return event;
        };
        trace!(battler = %id, checkpoint = ?event.lapse_type, "lapsing battler tags");

        if event.lapse_type == BattlerTagLapseType::Faint {
            let tags = self.combatant_mut(id).map(|p| std::mem::take(&mut p.tags)).unwrap_or_default();
            for tag in tags {
                self.finish_battler_tag(id, tag);
            }
            return event;
        }

        let matching: Vec<BattlerTagType> = pokemon
            .tags
            .iter()
            .filter(|tag| tag.lapses_at(event.lapse_type))
            .map(|tag| tag.tag_type)
            .collect();
        for tag_type in matching {
            let Some(position) = self
                .combatant(id)
                .and_then(|p| p.tags.iter().position(|tag| tag.tag_type == tag_type))
            else {
                continue;
            };
            if let Some(tag) = self.detach_battler_tag(id, position) {
                self.lapse_detached(id, position, tag, &mut event);
            }
        }
        event
    }

    /// Lapse a single tag, with a CUSTOM event unless told otherwise.
    ///
    /// Returns whether the tag is still present afterwards.
    pub fn lapse_battler_tag(&mut self, id: CombatantId, tag_type: BattlerTagType, lapse_type: BattlerTagLapseType) -> bool {
        let mut event = TagEvent::new(lapse_type);
        self.lapse_battler_tag_with(id, tag_type, &mut event)
    }

    pub fn lapse_battler_tag_with(&mut self, id: CombatantId, tag_type: BattlerTagType, event: &mut TagEvent) -> bool {
        let Some(position) = self
            .combatant(id)
            .and_then(|p| p.tags.iter().position(|tag| tag.tag_type == tag_type))
        else {
            return false;
        };
        match self.detach_battler_tag(id, position) {
            Some(tag) => self.lapse_detached(id, position, tag, event),
            None => false,
        }
    }

    /// Lapse the tags matching the scheduler's current checkpoint
    pub fn lapse_for_checkpoint(&mut self, scheduler: &dyn PhaseScheduler, id: CombatantId) -> Option<TagEvent> {
        let checkpoint = scheduler.current_checkpoint()?;
        Some(self.lapse_battler_tags(id, checkpoint))
    }

    /// Remove a tag from `id`, running its removal hook
    pub fn remove_battler_tag(&mut self, id: CombatantId, tag_type: BattlerTagType) -> bool {
        let Some(position) = self
            .combatant(id)
            .and_then(|p| p.tags.iter().position(|tag| tag.tag_type == tag_type))
        else {
            return false;
        };
        match self.detach_battler_tag(id, position) {
            Some(tag) => {
                self.finish_battler_tag(id, tag);
                true
            }
            None => false,
        }
    }

    /// Remove every tag on `id` matching `predicate`
    pub fn remove_battler_tags_where(&mut self, id: CombatantId, predicate: impl Fn(&BattlerTag) -> bool) {
        let Some(pokemon) = self.combatant_mut(id) else {
            return;
        };
        let (removed, kept): (Vec<BattlerTag>, Vec<BattlerTag>) =
            std::mem::take(&mut pokemon.tags).into_iter().partition(|tag| predicate(tag));
        pokemon.tags = kept;
        for tag in removed {
            self.finish_battler_tag(id, tag);
        }
    }

    /// Run `apply` on every tag `id` holds. Returns whether any tag applied.
    pub fn apply_battler_tags(&self, id: CombatantId, args: &mut BattlerTagArgs<'_>) -> bool {
        let Some(pokemon) = self.combatant(id) else {
            return false;
        };
        let mut applied = false;
        for tag in &pokemon.tags {
            applied |= tag.apply(args);
        }
        trace!(battler = %id, applied, "battler tag query");
        applied
    }

    /// Drop the protection and endurance tags that only last one turn
    pub fn clear_turn_scoped_tags(&mut self) {
        for id in self.active_ids() {
            self.remove_battler_tags_where(id, |tag| {
                tag.tag_type.is_protection() || matches!(tag.tag_type, BattlerTagType::Enduring | BattlerTagType::Sturdy)
            });
        }
    }

    /// Resolve `target`'s protection against an incoming move.
    ///
    /// Returns true when a protection tag blocked it; contact punishments
    /// are queued as phases.
    pub fn protect_against(&mut self, target: CombatantId, incoming: IncomingMove) -> bool {
        let protection = self
            .combatant(target)
            .and_then(|p| p.tags.iter().find(|tag| tag.tag_type.is_protection()))
            .map(|tag| tag.tag_type);
        let Some(tag_type) = protection else {
            return false;
        };
        let mut event = TagEvent::with_incoming(BattlerTagLapseType::Custom, incoming);
        self.lapse_battler_tag_with(target, tag_type, &mut event)
    }

    /// Whether an Endure-style tag lets `target` survive a lethal hit
    pub fn endure_hit(&mut self, target: CombatantId) -> bool {
        [BattlerTagType::Enduring, BattlerTagType::Sturdy]
            .into_iter()
            .any(|tag_type| self.lapse_battler_tag(target, tag_type, BattlerTagLapseType::Custom))
    }

    // =====================================================================
    // Tag-derived modifiers
    // =====================================================================

    /// Damage multiplier from the screens covering `defender`
    pub fn screen_multiplier(&self, defender: CombatantId, category: MoveCategory) -> f64 {
        let Some(pokemon) = self.combatant(defender) else {
            return 1.0;
        };
        let side = ArenaTagSide::for_team(pokemon.is_player);
        let mut multiplier = 1.0;
        for tag_type in [ArenaTagType::Reflect, ArenaTagType::LightScreen, ArenaTagType::AuroraVeil] {
            self.apply_arena_tags(
                tag_type,
                side,
                &mut ArenaTagArgs::Screen {
                    category,
                    breaker: self.rules.double_battle,
                    multiplier: &mut multiplier,
                },
            );
        }
        multiplier
    }

    /// Whether Mist shields `target` from a stat drop
    pub fn is_stat_drop_blocked(&self, target: CombatantId) -> bool {
        let Some(pokemon) = self.combatant(target) else {
            return false;
        };
        let mut blocked = false;
        let side = ArenaTagSide::for_team(pokemon.is_player);
        self.apply_arena_tags(ArenaTagType::Mist, side, &mut ArenaTagArgs::StatDrop { blocked: &mut blocked });
        blocked
    }

    /// Whether Trick Room reverses the move order
    pub fn is_speed_order_reversed(&self) -> bool {
        let mut reversed = false;
        self.apply_arena_tags(
            ArenaTagType::TrickRoom,
            ArenaTagSide::Both,
            &mut ArenaTagArgs::SpeedOrder { reversed: &mut reversed },
        );
        reversed
    }

    /// Speed multiplier from a Tailwind behind `id`
    pub fn tailwind_multiplier(&self, id: CombatantId) -> f64 {
        let covered = self.combatant(id).is_some_and(|pokemon| {
            self.arena
                .tags_covering(ArenaTagType::Tailwind, pokemon.is_player)
                .next()
                .is_some()
        });
        if covered { 2.0 } else { 1.0 }
    }

    /// Power multiplier for a move of `move_type` used by `attacker`.
    ///
    /// Combines the field sports with the attacker's boost tags; one-use
    /// boosts (Charge) are consumed.
    pub fn move_power_multiplier(&mut self, attacker: CombatantId, move_type: Type) -> f64 {
        let mut power = 1.0;
        for tag_type in [ArenaTagType::MudSport, ArenaTagType::WaterSport] {
            self.apply_arena_tags(
                tag_type,
                ArenaTagSide::Both,
                &mut ArenaTagArgs::MoveType {
                    move_type,
                    power: &mut power,
                },
            );
        }

        let Some(pokemon) = self.combatant(attacker) else {
            return power;
        };
        let mut spent = Vec::new();
        for tag in &pokemon.tags {
            let applied = tag.apply(&mut BattlerTagArgs::MovePower {
                move_type,
                power: &mut power,
            });
            if applied && matches!(tag.data, BattlerTagData::TypeBoost { one_use: true, .. }) {
                spent.push(tag.tag_type);
            }
        }
        for tag_type in spent {
            self.remove_battler_tag(attacker, tag_type);
        }
        power
    }

    /// Power multiplier the weather and terrain give an attack of
    /// `move_type` from `attacker` against `defender`
    pub fn field_power_multiplier(&self, attacker: CombatantId, defender: CombatantId, move_type: Type) -> f64 {
        let mut multiplier = 1.0;
        if let Some(weather) = self.arena.weather
            && !self.is_weather_suppressed()
        {
            multiplier *= weather.attack_type_multiplier(move_type);
        }
        if let Some(terrain) = self.arena.terrain {
            if self.combatant(attacker).is_some_and(|p| self.is_grounded(p)) {
                multiplier *= terrain.attacker_multiplier(move_type);
            }
            if self.combatant(defender).is_some_and(|p| self.is_grounded(p)) {
                multiplier *= terrain.defender_multiplier(move_type);
            }
        }
        multiplier
    }

    /// Whether primal weather stops an attack of `move_type` outright
    pub fn is_move_weather_cancelled(&self, move_type: Type) -> bool {
        match self.arena.weather {
            Some(weather) => !self.is_weather_suppressed() && weather.is_move_weather_cancelled(move_type, true),
            None => false,
        }
    }

    /// Stat multiplier from `id`'s tags (Slow Start, Protosynthesis)
    pub fn stat_multiplier(&self, id: CombatantId, stat: Stat) -> f64 {
        let mut multiplier = 1.0;
        self.apply_battler_tags(
            id,
            &mut BattlerTagArgs::StatMultiplier {
                stat,
                multiplier: &mut multiplier,
            },
        );
        multiplier
    }

    /// Whether `id` is immune to moves of `move_type` through a tag
    pub fn is_type_immune(&self, id: CombatantId, move_type: Type) -> bool {
        let mut immune = false;
        self.apply_battler_tags(
            id,
            &mut BattlerTagArgs::TypeImmunity {
                move_type,
                immune: &mut immune,
            },
        );
        immune
    }

    pub fn crit_modifiers(&self, id: CombatantId) -> CritModifiers {
        let mut modifiers = CritModifiers::default();
        self.apply_battler_tags(
            id,
            &mut BattlerTagArgs::Crit {
                stage: &mut modifiers.stage,
                always: &mut modifiers.always,
                never: &mut modifiers.never,
            },
        );
        modifiers
    }

    pub fn ignores_accuracy(&self, id: CombatantId) -> bool {
        let mut ignore = false;
        self.apply_battler_tags(id, &mut BattlerTagArgs::IgnoreAccuracy { ignore: &mut ignore });
        ignore
    }

    /// Move `id` is locked into by Encore, if any
    pub fn forced_move(&self, id: CombatantId) -> Option<Move> {
        let mut move_id = None;
        self.apply_battler_tags(id, &mut BattlerTagArgs::ForcedMove { move_id: &mut move_id });
        move_id
    }

    /// Whether `id` may switch out or flee
    pub fn can_switch(&self, id: CombatantId) -> bool {
        self.combatant(id).is_some_and(|pokemon| !pokemon.is_trapped())
    }

    // =====================================================================
    // Switching
    // =====================================================================

    /// Place `id` into `index` and spring the entry hazards on its side.
    ///
    /// Whoever held the slot is switched out first. Returns false when `id`
    /// is unknown or fainted.
    pub fn switch_in(&mut self, id: CombatantId, index: BattlerIndex) -> bool {
        if !self.combatant(id).is_some_and(|pokemon| !pokemon.is_fainted()) {
            return false;
        }
        if let Some(current) = self.field[index.slot()]
            && current != id
        {
            self.switch_out(current);
        }
        if let Some(previous) = self.battler_index(id) {
            self.field[previous.slot()] = None;
        }

        self.field[index.slot()] = Some(id);
        if let Some(pokemon) = self.combatant_mut(id) {
            pokemon.move_history.push(TurnMove::switch_in());
        }
        debug!(combatant = %id, slot = %index.as_str(), "switched in");
        self.apply_entry_hazards(id);
        // An entering weather suppressor ends sun-driven boosts
        self.refresh_field_boosts();
        true
    }

    /// Take `id` off the field.
    ///
    /// Its own tags are dropped silently; tags it holds other combatants
    /// with (binding, infatuation) end with their removal hooks.
    pub fn switch_out(&mut self, id: CombatantId) {
        if let Some(index) = self.battler_index(id) {
            self.field[index.slot()] = None;
        }
        if let Some(pokemon) = self.combatant_mut(id) {
            pokemon.reset_on_switch();
        }
        for other in self.active_ids() {
            self.remove_battler_tags_where(other, |tag| tag.is_source_linked() && tag.source_id == Some(id));
        }
        debug!(combatant = %id, "switched out");
    }

    /// Knock `id` out: every tag lapses with FAINT and it leaves its slot
    pub fn faint(&mut self, id: CombatantId) {
        self.lapse_battler_tags(id, BattlerTagLapseType::Faint);
        if let Some(index) = self.battler_index(id) {
            self.field[index.slot()] = None;
        }
        for other in self.active_ids() {
            self.remove_battler_tags_where(other, |tag| tag.is_source_linked() && tag.source_id == Some(id));
        }
    }

    // =====================================================================
    // Weather and terrain
    // =====================================================================

    /// Replace the weather. `from_effect` weather lasts the configured
    /// number of turns; otherwise it lasts until replaced.
    ///
    /// Setting the weather already in place does nothing and returns false.
    pub fn set_weather(&mut self, weather_type: Option<WeatherType>, from_effect: bool) -> bool {
        let old = self.arena.weather_type();
        if old == weather_type {
            return false;
        }

        let turns = if from_effect { self.rules.weather_turns } else { 0 };
        self.arena.weather = weather_type.map(|w| Weather::new(w, turns));
        match (weather_type, old) {
            (Some(new), _) => self.phases.message(Weather::start_message(new)),
            (None, Some(old)) => self.phases.message(Weather::clear_message(old)),
            (None, None) => {}
        }
        debug!(old = ?old, new = ?weather_type, turns, "weather changed");
        self.refresh_field_boosts();
        true
    }

    /// End-of-turn weather upkeep: count down, announce, and chip every
    /// on-field combatant that is not immune
    pub fn lapse_weather(&mut self) {
        let Some(mut weather) = self.arena.weather else {
            return;
        };
        if !weather.lapse() {
            self.arena.weather = None;
            self.phases.message(Weather::clear_message(weather.weather_type));
            debug!(weather = %weather.weather_type, "weather expired");
            self.refresh_field_boosts();
            return;
        }
        self.arena.weather = Some(weather);
        if self.is_weather_suppressed() {
            return;
        }

        self.phases.message(Weather::lapse_message(weather.weather_type));
        let Some(damage_text) = Weather::damage_message(weather.weather_type) else {
            return;
        };
        for index in BattlerIndex::ALL {
            let Some(pokemon) = self.at(index) else {
                continue;
            };
            let immune = pokemon.types.iter().any(|t| weather.is_type_damage_immune(*t))
                || abilities::blocks_non_direct_damage(pokemon)
                || pokemon.is_fainted();
            if immune {
                continue;
            }
            let amount = (pokemon.max_hp / 16).max(1);
            let text = pokemon_message(pokemon, damage_text);
            self.phases.message(text);
            self.phases.enqueue_now(Phase::Damage {
                target: index,
                amount,
                result: HitResult::Other,
            });
        }
    }

    /// Replace the terrain; same rules as [`Battle::set_weather`]
    pub fn set_terrain(&mut self, terrain_type: Option<TerrainType>, from_effect: bool) -> bool {
        let old = self.arena.terrain_type();
        if old == terrain_type {
            return false;
        }

        let turns = if from_effect { self.rules.terrain_turns } else { 0 };
        self.arena.terrain = terrain_type.map(|t| Terrain::new(t, turns));
        match (terrain_type, old) {
            (Some(new), _) => self.phases.message(Terrain::start_message(new)),
            (None, Some(old)) => self.phases.message(Terrain::clear_message(old)),
            (None, None) => {}
        }
        debug!(old = ?old, new = ?terrain_type, turns, "terrain changed");
        self.refresh_field_boosts();
        true
    }

    pub fn lapse_terrain(&mut self) {
        let Some(mut terrain) = self.arena.terrain else {
            return;
        };
        if terrain.lapse() {
            self.arena.terrain = Some(terrain);
        } else {
            self.arena.terrain = None;
            self.phases.message(Terrain::clear_message(terrain.terrain_type));
            debug!(terrain = %terrain.terrain_type.as_str(), "terrain expired");
            self.refresh_field_boosts();
        }
    }

    /// Re-check the weather and terrain boosts of every on-field combatant,
    /// ending those whose condition is gone
    fn refresh_field_boosts(&mut self) {
        for id in self.active_ids() {
            for tag_type in [BattlerTagType::Protosynthesis, BattlerTagType::QuarkDrive] {
                self.lapse_battler_tag(id, tag_type, BattlerTagLapseType::Custom);
            }
        }
    }

    // =====================================================================
    // Turn flow
    // =====================================================================

    /// End-of-turn upkeep in order: weather, TURN_END battler tags, arena
    /// tags, terrain, then the one-turn tags
    pub fn end_turn(&mut self) {
        self.lapse_weather();
        for id in self.active_ids() {
            self.lapse_battler_tags(id, BattlerTagLapseType::TurnEnd);
        }
        self.lapse_arena_tags();
        self.lapse_terrain();
        self.clear_turn_scoped_tags();
        for pokemon in &mut self.combatants {
            pokemon.turn_data = Default::default();
        }
        self.turn += 1;
    }

    /// Forward every queued phase to `scheduler`, in order
    pub fn flush_phases(&mut self, scheduler: &mut dyn PhaseScheduler) {
        self.phases.flush_into(scheduler);
    }
}
