//! The effect engine: the [`Battle`] aggregate, the tag lifecycle driver and
//! the phase vocabulary it hands to the turn scheduler.

mod battle;
mod driver;
mod phase;
mod queue;

#[cfg(test)]
mod tests;

pub use battle::Battle;
pub use driver::CritModifiers;
pub use phase::{HitResult, Phase, PhaseScheduler};
pub use queue::PhaseQueue;
