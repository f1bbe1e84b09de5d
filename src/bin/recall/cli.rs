use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use saavy_recall::game::GameConfig;

#[derive(Debug, Parser, Clone)]
#[command(name = "recall")]
#[command(about = "Listen to the sequence of sounds, then play it back")]
pub struct Cli {
    /// Pad set to play with (classic, novelty)
    #[arg(long, default_value = "classic")]
    pub preset: String,

    /// Milliseconds between sounds during playback
    #[arg(long, default_value_t = 1000)]
    pub step_delay_ms: u64,

    /// Pause before each playback starts, in milliseconds
    #[arg(long, default_value_t = 600)]
    pub lead_in_ms: u64,

    /// Seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start a new game immediately after a wrong answer
    #[arg(long)]
    pub auto_restart: bool,

    /// Play without opening an audio device
    #[arg(long)]
    pub mute: bool,

    /// Where to write logs (filter with RUST_LOG)
    #[arg(long, default_value = "recall.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        let config = GameConfig::new()
            .step_delay(Duration::from_millis(self.step_delay_ms))
            .lead_in(Duration::from_millis(self.lead_in_ms))
            .auto_restart(self.auto_restart);
        match self.seed {
            Some(seed) => config.seed(seed),
            None => config,
        }
    }
}
