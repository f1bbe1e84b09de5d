//! PlaybackSchedule - timed, cancellable replay of a pad sequence.
//!
//! The schedule is a cursor over the sequence plus the time the next action
//! becomes due. It never looks at a clock itself; the engine passes `now`
//! into [`PlaybackSchedule::poll`].
//!
//! ```text
//!   start_at         +delay           +delay           +delay
//!      │               │                │                │
//!   Play(s[0]) ──→ Play(s[1]) ──→ ... Play(s[n-1]) ──→ Finish
//! ```
//!
//! Each delay is measured from the moment the previous play was actually
//! issued, so a late tick pushes the rest of the schedule back instead of
//! firing several sounds at once.

use std::time::Duration;

/// Something the schedule wants done now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// Play this pad
    Play(usize),
    /// The whole sequence has been played and its last delay has elapsed
    Finish,
}

#[derive(Debug, Clone)]
pub struct PlaybackSchedule {
    steps: Vec<usize>,
    /// Index of the next step to play
    cursor: usize,
    next_due: Duration,
    step_delay: Duration,
    finished: bool,
    cancelled: bool,
}

impl PlaybackSchedule {
    /// Plan playback of `steps`, first sound due at `start_at`.
    pub fn new(steps: Vec<usize>, start_at: Duration, step_delay: Duration) -> Self {
        Self {
            steps,
            cursor: 0,
            next_due: start_at,
            step_delay,
            finished: false,
            cancelled: false,
        }
    }

    /// Return the next action if it is due at `now`, at most one per call.
    pub fn poll(&mut self, now: Duration) -> Option<ScheduledAction> {
        if self.cancelled || self.finished || now < self.next_due {
            return None;
        }

        if let Some(&index) = self.steps.get(self.cursor) {
            self.cursor += 1;
            self.next_due = now + self.step_delay;
            return Some(ScheduledAction::Play(index));
        }

        self.finished = true;
        Some(ScheduledAction::Finish)
    }

    /// Drop every pending action. Later polls return `None`.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// True once `Finish` has been returned
    pub fn is_done(&self) -> bool {
        self.finished
    }

    /// Number of steps already played
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// When the next action becomes due
    pub fn next_due(&self) -> Duration {
        self.next_due
    }
}
