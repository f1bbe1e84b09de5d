//! Game state and the read-only view handed to the UI.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the engine is in a round
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Generating and playing back the sequence; taps are dropped
    Playing,
    /// Waiting for the player to repeat the sequence
    AwaitingInput,
    /// Last round failed; waiting for a new start
    GameOver,
}

impl Phase {
    pub fn accepts_input(self) -> bool {
        self == Phase::AwaitingInput
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Playing => "Listen",
            Phase::AwaitingInput => "Your turn",
            Phase::GameOver => "Game over",
        }
    }
}

/// Owned by the engine, mutated only by its transition handlers.
#[derive(Debug, Clone, Default)]
pub(crate) struct GameState {
    pub sequence: Vec<usize>,
    pub player_input: Vec<usize>,
    pub score: u32,
    pub best_score: u32,
    pub phase: Phase,
}

impl GameState {
    /// Clear everything a new game starts without. Best score survives.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.player_input.clear();
        self.score = 0;
    }

    /// First position where input and sequence differ, if any.
    pub fn first_mismatch(&self) -> Option<usize> {
        self.player_input
            .iter()
            .zip(&self.sequence)
            .position(|(tap, expected)| tap != expected)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            sequence_len: self.sequence.len(),
            input_len: self.player_input.len(),
            score: self.score,
            best_score: self.best_score,
        }
    }
}

/// Copyable view of the game for rendering.
///
/// Carries lengths only, never the sequence itself, so the UI cannot leak
/// the answer.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub phase: Phase,
    /// Length of the current target sequence (the round number)
    pub sequence_len: usize,
    /// Taps entered so far this round
    pub input_len: usize,
    /// Rounds completed in the current game, or the final score after a game over
    pub score: u32,
    /// Highest score this session
    pub best_score: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_best_score() {
        let mut state = GameState {
            sequence: vec![0, 1],
            player_input: vec![0],
            score: 3,
            best_score: 5,
            phase: Phase::AwaitingInput,
        };
        state.reset();

        assert!(state.sequence.is_empty());
        assert!(state.player_input.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 5);
    }

    #[test]
    fn finds_first_mismatch() {
        let state = GameState {
            sequence: vec![0, 1, 1],
            player_input: vec![0, 0, 0],
            ..Default::default()
        };
        assert_eq!(state.first_mismatch(), Some(1));
    }

    #[test]
    fn only_awaiting_input_accepts_taps() {
        assert!(Phase::AwaitingInput.accepts_input());
        assert!(!Phase::Playing.accepts_input());
        assert!(!Phase::Idle.accepts_input());
        assert!(!Phase::GameOver.accepts_input());
    }

    #[test]
    fn snapshot_counts_rounds_by_sequence_length() {
        let state = GameState {
            sequence: vec![2, 0, 3],
            player_input: vec![2],
            score: 2,
            best_score: 4,
            phase: Phase::AwaitingInput,
        };
        assert_eq!(
            state.snapshot(),
            GameSnapshot {
                phase: Phase::AwaitingInput,
                sequence_len: 3,
                input_len: 1,
                score: 2,
                best_score: 4,
            }
        );
    }
}
