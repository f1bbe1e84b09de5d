//! GameEngine - the sequence memory state machine.
//!
//! Each round appends one random pad to the sequence, plays the whole
//! sequence back through a [`PlaybackSchedule`], then collects taps. Input is
//! checked only once the player has tapped as many pads as the sequence is
//! long: an early wrong tap is not caught until the round is fully entered.
//!
//! The engine never owns the sound bank. Every call that may produce sound
//! borrows a [`SoundBoard`] for its duration. A board that stops being ready
//! while a round is running has been released, and the engine halts on the
//! spot: the pending playback step is dropped and no further transition runs.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::{
    clock::Clock,
    config::GameConfig,
    event::GameEvent,
    schedule::{PlaybackSchedule, ScheduledAction},
    source::IndexSource,
    state::{GameSnapshot, GameState, Phase},
};
use crate::{
    error::GameError,
    sound::{SoundBoard, MIN_ASSETS},
};

/// What happened to a tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Dropped: the engine was not waiting for input
    Ignored,
    /// Recorded; the round needs more taps
    Accepted,
    /// Last tap of a correct round; the next round is playing
    RoundComplete,
    /// Last tap of a wrong round
    GameOver,
}

pub struct GameEngine<C: Clock, S: IndexSource> {
    config: GameConfig,
    clock: C,
    source: S,
    state: GameState,
    schedule: Option<PlaybackSchedule>,
    events: VecDeque<GameEvent>,
    halted: bool,
}

impl<C: Clock, S: IndexSource> GameEngine<C, S> {
    pub fn new(config: GameConfig, clock: C, source: S) -> Self {
        Self {
            config,
            clock,
            source,
            state: GameState::default(),
            schedule: None,
            events: VecDeque::new(),
            halted: false,
        }
    }

    /// Begin a new game, abandoning any game in progress.
    ///
    /// Refused with [`GameError::NotReady`] while the board is not ready, and
    /// with [`GameError::TooFewPads`] for a board with fewer than two pads;
    /// the engine then stays where it was.
    pub fn start<B: SoundBoard + ?Sized>(&mut self, board: &mut B) -> Result<(), GameError> {
        if self.halted {
            return Err(GameError::Halted);
        }
        if !board.is_ready() {
            warn!("start refused: sounds not ready");
            self.events.push_back(GameEvent::NotReady);
            return Err(GameError::NotReady);
        }
        let count = board.sound_count();
        if count < MIN_ASSETS {
            warn!(count, "start refused: not enough pads");
            return Err(GameError::TooFewPads {
                count,
                min: MIN_ASSETS,
            });
        }

        if let Some(mut pending) = self.schedule.take() {
            pending.cancel();
        }

        self.state.reset();
        self.events.push_back(GameEvent::ScoreChanged(0));
        info!(pads = board.sound_count(), "game started");

        self.next_round(board);
        Ok(())
    }

    /// Deliver a pad tap.
    ///
    /// Out-of-range pads are rejected in every phase. Taps outside
    /// `AwaitingInput` are dropped, not queued.
    pub fn tap<B: SoundBoard + ?Sized>(
        &mut self,
        index: usize,
        board: &mut B,
    ) -> Result<TapOutcome, GameError> {
        if self.halted || self.board_lost(board) {
            return Err(GameError::Halted);
        }
        let count = board.sound_count();
        if index >= count {
            return Err(GameError::InvalidIndex { index, count });
        }
        if !self.state.phase.accepts_input() {
            debug!(index, phase = ?self.state.phase, "tap ignored");
            return Ok(TapOutcome::Ignored);
        }

        self.play(board, index, true);
        self.state.player_input.push(index);
        debug!(
            index,
            entered = self.state.player_input.len(),
            expected = self.state.sequence.len(),
            "tap"
        );

        if self.state.player_input.len() < self.state.sequence.len() {
            return Ok(TapOutcome::Accepted);
        }

        match self.state.first_mismatch() {
            None => {
                self.state.score += 1;
                self.state.best_score = self.state.best_score.max(self.state.score);
                self.events.push_back(GameEvent::ScoreChanged(self.state.score));
                info!(score = self.state.score, "round complete");
                self.next_round(board);
                Ok(TapOutcome::RoundComplete)
            }
            Some(mismatch_at) => {
                self.fail(mismatch_at, board);
                Ok(TapOutcome::GameOver)
            }
        }
    }

    /// Run every scheduled playback action that is due.
    ///
    /// Call this regularly (every UI frame). Does nothing outside `Playing`.
    pub fn tick<B: SoundBoard + ?Sized>(&mut self, board: &mut B) {
        if self.halted || self.board_lost(board) {
            return;
        }
        let now = self.clock.now();

        while let Some(action) = self.schedule.as_mut().and_then(|s| s.poll(now)) {
            match action {
                ScheduledAction::Play(index) => {
                    debug!(index, "playback step");
                    self.play(board, index, false);
                }
                ScheduledAction::Finish => {
                    self.schedule = None;
                    self.set_phase(Phase::AwaitingInput);
                }
            }
        }
    }

    /// Stop for good: pending playback is cancelled and every later call is
    /// a no-op (`tick`) or refused (`start`, `tap`).
    pub fn halt(&mut self) {
        if self.halted {
            return;
        }
        if let Some(mut pending) = self.schedule.take() {
            pending.cancel();
        }
        self.halted = true;
        info!("game engine halted");
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Sounds already played in the current playback, and how many there are
    pub fn playback_progress(&self) -> Option<(usize, usize)> {
        self.schedule.as_ref().map(|s| (s.position(), s.len()))
    }

    pub fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Halt if the board went away in the middle of a round.
    ///
    /// Outside a round (idle, game over) a board that is not ready is just
    /// still loading, and `start` reports it.
    fn board_lost<B: SoundBoard + ?Sized>(&mut self, board: &B) -> bool {
        let in_round = self.schedule.is_some() || self.state.phase.accepts_input();
        if !in_round || board.is_ready() {
            return false;
        }
        warn!(phase = ?self.state.phase, "sounds released mid-round");
        self.halt();
        true
    }

    /// Append one pad and play the whole sequence back.
    fn next_round<B: SoundBoard + ?Sized>(&mut self, board: &mut B) {
        let count = board.sound_count();
        let next = self.source.next_index(count);
        debug_assert!(next < count, "index source returned {next} for {count} pads");

        self.state.sequence.push(next);
        self.state.player_input.clear();
        debug!(round = self.state.sequence.len(), "sequence extended");

        let start_at = self.clock.now() + self.config.lead_in;
        self.schedule = Some(PlaybackSchedule::new(
            self.state.sequence.clone(),
            start_at,
            self.config.step_delay,
        ));
        self.set_phase(Phase::Playing);
        self.tick(board);
    }

    fn fail<B: SoundBoard + ?Sized>(&mut self, mismatch_at: usize, board: &mut B) {
        let final_score = self.state.score;
        info!(final_score, mismatch_at, "round failed");
        self.events.push_back(GameEvent::RoundFailed {
            final_score,
            mismatch_at,
        });

        self.state.sequence.clear();
        self.state.player_input.clear();
        self.set_phase(Phase::GameOver);

        if self.config.auto_restart {
            // A refusal is already reported through GameEvent::NotReady.
            let _ = self.start(board);
        }
    }

    fn play<B: SoundBoard + ?Sized>(&mut self, board: &mut B, index: usize, feedback: bool) {
        match board.play(index) {
            Ok(()) => self
                .events
                .push_back(GameEvent::SoundPlayed { index, feedback }),
            Err(err) => {
                warn!(index, %err, "pad sound failed");
                self.events.push_back(GameEvent::PlaybackFailed {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase == phase {
            return;
        }
        info!(from = ?self.state.phase, to = ?phase, "phase change");
        self.state.phase = phase;
        self.events.push_back(GameEvent::PhaseChanged(phase));
    }
}
