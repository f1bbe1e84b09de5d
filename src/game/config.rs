//! Game timing and behaviour knobs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::time::Duration;

/// Default gap between two sounds of the played-back sequence
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(1000);

/// Engine configuration, built fluently:
///
/// ```
/// use std::time::Duration;
/// use saavy_recall::game::GameConfig;
///
/// let config = GameConfig::new()
///     .step_delay(Duration::from_millis(600))
///     .lead_in(Duration::from_millis(400))
///     .auto_restart(true);
/// assert_eq!(config.step_delay, Duration::from_millis(600));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Time from one played sound to the next, and from the last one until
    /// input opens
    pub step_delay: Duration,
    /// Pause between entering playback and the first sound
    pub lead_in: Duration,
    /// Start a new game straight after a game over
    pub auto_restart: bool,
    /// Seed for the pad generator; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            lead_in: Duration::ZERO,
            auto_restart: false,
            seed: None,
        }
    }

    pub fn step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn lead_in(mut self, lead_in: Duration) -> Self {
        self.lead_in = lead_in;
        self
    }

    pub fn auto_restart(mut self, enabled: bool) -> Self {
        self.auto_restart = enabled;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
