//! Cancelable delayed continuations keyed by monotonic ids.
use std::time::Duration;

use bevy::prelude::*;

use super::types::{TimerId, TimerStep};

#[derive(Debug, Clone)]
struct ScheduledTimer {
    id: TimerId,
    step: TimerStep,
    deadline: Duration,
}

/// Timer table advanced by scaled frame deltas.
#[derive(Resource, Debug, Default)]
pub struct FlowTimers {
    entries: Vec<ScheduledTimer>,
    elapsed: Duration,
    next_id: u64,
}

impl FlowTimers {
    pub fn schedule(&mut self, delay: Duration, step: TimerStep) -> TimerId {
        let id = TimerId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(ScheduledTimer {
            id,
            step,
            deadline: self.elapsed + delay,
        });
        id
    }

    /// Removes a pending timer. Returns false when it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Advances time and drains expired timers, earliest deadline first.
    pub fn tick(&mut self, delta: Duration) -> Vec<TimerId> {
        self.elapsed += delta;

        let mut expired = Vec::new();
        let mut still_pending = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.deadline <= self.elapsed {
                expired.push(entry);
            } else {
                still_pending.push(entry);
            }
        }
        self.entries = still_pending;

        expired.sort_by_key(|entry| (entry.deadline, entry.id));
        expired.into_iter().map(|entry| entry.id).collect()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn step(&self, id: TimerId) -> Option<TimerStep> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.step)
    }

    /// Time left before `id` fires.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn remaining(&self, id: TimerId) -> Option<Duration> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.deadline.saturating_sub(self.elapsed))
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
