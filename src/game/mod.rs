//! The memory game: rules, timing and the state the UI is allowed to see.
//!
//! ```text
//!            start()                 playback done
//!   Idle ─────────────→ Playing ─────────────────→ AwaitingInput
//!                          ↑                           │  │
//!                          │   full, correct input     │  │ full, wrong input
//!                          └───────────────────────────┘  ↓
//!                                                      GameOver ──start()──→ Playing
//! ```
//!
//! The engine is single-threaded and cooperative: the host calls
//! [`GameEngine::tick`] regularly, and every transition happens inside
//! `start`, `tap` or `tick`. Time comes from a [`Clock`], so tests drive the
//! whole game with a [`ManualClock`] instead of sleeping.

pub mod clock;
pub mod config;
pub mod engine;
pub mod event;
pub mod schedule;
pub mod source;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::GameConfig;
pub use engine::{GameEngine, TapOutcome};
pub use event::GameEvent;
pub use schedule::{PlaybackSchedule, ScheduledAction};
pub use source::{IndexSource, RandomSource};
pub use state::{GameSnapshot, Phase};
