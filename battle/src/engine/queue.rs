use fieldtag_protocol::BattlerTagLapseType;

use super::phase::{Phase, PhaseScheduler};

/// Outbox of phases produced while resolving tags.
///
/// `now` phases jump ahead of `next` phases when drained; within each
/// group phases keep their insertion order.
#[derive(Debug, Default)]
pub struct PhaseQueue {
    now: Vec<Phase>,
    next: Vec<Phase>,
    checkpoint: Option<BattlerTagLapseType>,
}

impl PhaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_checkpoint(&mut self, checkpoint: Option<BattlerTagLapseType>) {
        self.checkpoint = checkpoint;
    }

    /// Show text before anything already scheduled
    pub fn message(&mut self, text: impl Into<String>) {
        self.now.push(Phase::Message(text.into()));
    }

    /// Show text after everything already scheduled
    pub fn deferred_message(&mut self, text: impl Into<String>) {
        self.next.push(Phase::Message(text.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.now.is_empty() && self.next.is_empty()
    }

    pub fn len(&self) -> usize {
        self.now.len() + self.next.len()
    }

    /// Phases in resolution order, without draining
    pub fn iter(&self) -> impl Iterator<Item = &Phase> {
        self.now.iter().chain(self.next.iter())
    }

    /// Text of every queued message, in resolution order
    pub fn messages(&self) -> Vec<&str> {
        self.iter()
            .filter_map(|phase| match phase {
                Phase::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Take every queued phase in resolution order
    pub fn drain(&mut self) -> Vec<Phase> {
        let mut phases: Vec<Phase> = self.now.drain(..).collect();
        phases.append(&mut self.next);
        phases
    }

    /// Forward every queued phase to a real scheduler, preserving order
    pub fn flush_into(&mut self, scheduler: &mut dyn PhaseScheduler) {
        for phase in self.drain() {
            scheduler.enqueue_next(phase);
        }
    }
}

impl PhaseScheduler for PhaseQueue {
    fn enqueue_now(&mut self, phase: Phase) {
        self.now.push(phase);
    }

    fn enqueue_next(&mut self, phase: Phase) {
        self.next.push(phase);
    }

    fn current_checkpoint(&self) -> Option<BattlerTagLapseType> {
        self.checkpoint
    }
}
