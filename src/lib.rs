//! Sound-sequence memory game.
//!
//! The player hears a growing sequence of pad sounds and has to tap it back.
//! Every correct round appends one random pad to the sequence; the first
//! wrong round ends the game.
//!
//! The crate is split the same way the game runs:
//!
//! - [`sound`] owns the pad sounds: synthesized assets, the [`sound::SoundBank`]
//!   that loads them into a [`sound::SoundDevice`], and the realtime mixer.
//! - [`game`] owns the rules: the [`game::GameEngine`] state machine, its
//!   playback scheduler and the clock it is driven by.
//! - [`dsp`] holds the small synthesis primitives used to render assets.
//!
//! # Example
//!
//! ```
//! use saavy_recall::{
//!     game::{GameConfig, GameEngine, ManualClock, Phase, RandomSource},
//!     sound::{presets, NullDevice, SoundBank},
//! };
//!
//! let mut bank = SoundBank::new(presets::classic(), NullDevice::new(48_000.0)).unwrap();
//! bank.load().unwrap();
//!
//! let clock = ManualClock::new();
//! let mut engine = GameEngine::new(GameConfig::new(), clock.clone(), RandomSource::seeded(7));
//! engine.start(&mut bank).unwrap();
//! assert_eq!(engine.snapshot().phase, Phase::Playing);
//! ```

pub mod dsp;
pub mod error;
pub mod game;
pub mod sound;

pub use error::{GameError, SoundError};

/// Largest block the mixer renders in one pass.
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
