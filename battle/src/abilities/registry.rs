use fieldtag_protocol::Stat;

use crate::abilities::AbilityId;
use crate::abilities::hooks::AbilityHooks;

pub static ABILITY_REGISTRY: [Option<AbilityHooks>; AbilityId::COUNT] = {
    let mut registry: [Option<AbilityHooks>; AbilityId::COUNT] = [None; AbilityId::COUNT];

    // =========================================================================
    // Damage and drain
    // =========================================================================
    registry[AbilityId::MagicGuard as usize] = Some(AbilityHooks {
        on_block_non_direct_damage: Some(magic_guard),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::LiquidOoze as usize] = Some(AbilityHooks {
        on_reverse_drain: Some(liquid_ooze),
        ..AbilityHooks::NONE
    });

    // =========================================================================
    // Stat protection
    // =========================================================================
    registry[AbilityId::ClearBody as usize] = Some(AbilityHooks {
        on_protect_stat: Some(protect_all_stats),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::WhiteSmoke as usize] = Some(AbilityHooks {
        on_protect_stat: Some(protect_all_stats),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::FullMetalBody as usize] = Some(AbilityHooks {
        on_protect_stat: Some(protect_all_stats),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::Steadfast as usize] = Some(AbilityHooks {
        on_flinch: Some(steadfast),
        ..AbilityHooks::NONE
    });

    // =========================================================================
    // Weather suppression
    // =========================================================================
    registry[AbilityId::CloudNine as usize] = Some(AbilityHooks {
        on_suppress_weather: Some(suppress_any_weather),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::AirLock as usize] = Some(AbilityHooks {
        on_suppress_weather: Some(suppress_any_weather),
        ..AbilityHooks::NONE
    });

    // =========================================================================
    // Berries
    // =========================================================================
    registry[AbilityId::Ripen as usize] = Some(AbilityHooks {
        on_berry_effect: Some(ripen),
        ..AbilityHooks::NONE
    });
    registry[AbilityId::Gluttony as usize] = Some(AbilityHooks {
        on_berry_threshold: Some(gluttony),
        ..AbilityHooks::NONE
    });

    registry
};

fn magic_guard(cancelled: &mut bool) {
    *cancelled = true;
}

fn liquid_ooze(reversed: &mut bool) {
    *reversed = true;
}

fn protect_all_stats(_stat: Stat, blocked: &mut bool) {
    *blocked = true;
}

fn steadfast() -> (Stat, i8) {
    (Stat::Spe, 1)
}

// Cloud Nine and Air Lock also reach primal weather
fn suppress_any_weather(_immutable: bool) -> bool {
    true
}

fn ripen(value: &mut f64) {
    *value *= 2.0;
}

fn gluttony(threshold: &mut f64) {
    *threshold = 0.5;
}
