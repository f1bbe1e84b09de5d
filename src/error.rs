//! # Error Types
//!
//! Two families, one per layer:
//!
//! - [`SoundError`] - anything that goes wrong while loading or playing pad
//!   sounds. Load failures block the game from starting; playback failures are
//!   reported and otherwise ignored.
//! - [`GameError`] - intents the engine refuses, such as a start before the
//!   sounds are ready or a tap on a pad that does not exist.
//!
//! A wrong answer is not an error. It ends the round through
//! [`GameEvent::RoundFailed`](crate::game::GameEvent::RoundFailed).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SoundError {
    /// The bank needs at least two sounds to make a game.
    ///
    /// ```
    /// # use saavy_recall::SoundError;
    /// let err = SoundError::TooFewAssets { count: 1, min: 2 };
    /// assert_eq!(err.to_string(), "sound bank needs at least 2 assets, got 1");
    /// ```
    #[error("sound bank needs at least {min} assets, got {count}")]
    TooFewAssets { count: usize, min: usize },

    /// One asset failed to render or could not be handed to the device.
    #[error("failed to load sound {index} ({name}): {reason}")]
    AssetLoad {
        index: usize,
        name: String,
        reason: String,
    },

    /// Loading was aborted through a cancel handle or `release()`.
    #[error("sound loading was cancelled")]
    LoadCancelled,

    /// The device refused to play a loaded sound.
    #[error("playback of sound {index} failed: {reason}")]
    Playback { index: usize, reason: String },

    /// Index outside `[0, count)`.
    ///
    /// ```
    /// # use saavy_recall::SoundError;
    /// let err = SoundError::InvalidIndex { index: 4, count: 4 };
    /// assert_eq!(err.to_string(), "sound index 4 out of range (bank holds 4 sounds)");
    /// ```
    #[error("sound index {index} out of range (bank holds {count} sounds)")]
    InvalidIndex { index: usize, count: usize },

    #[error("sounds are not loaded")]
    NotLoaded,

    #[error("sound bank has been released")]
    Released,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// `start()` while the sound bank is not ready.
    #[error("sounds are still loading")]
    NotReady,

    /// `start()` on a board that cannot make a game.
    ///
    /// ```
    /// # use saavy_recall::GameError;
    /// let err = GameError::TooFewPads { count: 1, min: 2 };
    /// assert_eq!(err.to_string(), "need at least 2 pads to play, board has 1");
    /// ```
    #[error("need at least {min} pads to play, board has {count}")]
    TooFewPads { count: usize, min: usize },

    /// Tap on a pad that does not exist.
    #[error("pad {index} out of range (game has {count} pads)")]
    InvalidIndex { index: usize, count: usize },

    /// The engine was halted and accepts no further intents.
    #[error("game engine has been halted")]
    Halted,
}
