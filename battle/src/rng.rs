//! Random draws used by tags

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Integer draws for chance checks and damage rolls
pub trait BattleRng: std::fmt::Debug {
    /// Uniform draw in `0..range`; a range of 0 or 1 always yields 0
    fn rand_int(&mut self, range: u32) -> u32;

    /// Uniform draw in `min..=max`
    fn rand_int_range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        min + self.rand_int(max - min + 1)
    }
}

/// Deterministic generator for a fixed seed
#[derive(Debug, Clone)]
pub struct SeededRng {
    rng: SmallRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattleRng for SeededRng {
    fn rand_int(&mut self, range: u32) -> u32 {
        if range <= 1 {
            return 0;
        }
        self.rng.gen_range(0..range)
    }
}

/// Replays a fixed list of draws, then keeps returning 0
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values: values.into(),
        }
    }
}

impl BattleRng for ScriptedRng {
    fn rand_int(&mut self, range: u32) -> u32 {
        let value = self.values.pop_front().unwrap_or(0);
        if range == 0 { 0 } else { value % range }
    }
}
