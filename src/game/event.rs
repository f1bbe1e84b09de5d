//! Notifications from the engine to whoever renders it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::state::Phase;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The phase changed; the UI enables taps only in `AwaitingInput`
    PhaseChanged(Phase),
    ScoreChanged(u32),
    /// The player finished a round with a wrong sequence
    RoundFailed {
        final_score: u32,
        /// First position the input differed from the sequence
        mismatch_at: usize,
    },
    /// `start()` was refused because sounds are not loaded
    NotReady,
    /// A pad sound was played, either by playback or as tap feedback
    SoundPlayed { index: usize, feedback: bool },
    /// A pad sound could not be played; the game carries on
    PlaybackFailed { index: usize, reason: String },
}
