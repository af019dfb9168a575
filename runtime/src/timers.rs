use std::time::Duration;
use web_time::Instant;

/// Work the render loop defers to a later tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Deferred {
    AnimationStep,
    Reset,
}

/// Pending deadlines, at most one per kind of deferred work.
#[derive(Clone, Debug, Default)]
pub struct Timers {
    animation_step: Option<Instant>,
    reset: Option<Instant>,
}

impl Timers {
    /// Schedules `task` at `at` unless it is already pending.
    pub fn schedule(&mut self, task: Deferred, at: Instant) {
        let slot = self.slot(task);
        if slot.is_none() {
            *slot = Some(at);
        }
    }

    pub fn is_scheduled(&self, task: Deferred) -> bool {
        match task {
            Deferred::AnimationStep => self.animation_step.is_some(),
            Deferred::Reset => self.reset.is_some(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.animation_step, self.reset) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Time left until the nearest deadline, zero when one already passed.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Removes and returns the tasks whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due = Vec::new();
        for task in [Deferred::AnimationStep, Deferred::Reset] {
            let slot = self.slot(task);
            if slot.is_some_and(|at| at <= now) {
                *slot = None;
                due.push(task);
            }
        }
        due
    }

    fn slot(&mut self, task: Deferred) -> &mut Option<Instant> {
        match task {
            Deferred::AnimationStep => &mut self.animation_step,
            Deferred::Reset => &mut self.reset,
        }
    }
}
