//! App - owns the sound bank, the engine and the terminal loop.
//!
//! Sounds load on a worker thread while the UI is already running; until
//! the bank comes back, the engine plays against a [`LoadingBoard`] that is
//! never ready, so "start" is refused the same way a failed bank refuses it.

use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result as EyreResult};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing::{error, info};

use saavy_recall::{
    game::{GameEngine, GameEvent, MonotonicClock, Phase, RandomSource},
    sound::{presets, CancelHandle, NullDevice, SoundBank, SoundBoard, SoundDevice},
    GameError, SoundError,
};

use super::audio::{self, AudioOutput};
use super::cli::Cli;
use super::ui::{self, LoadState, PadInfo, ViewState};

type Bank = SoundBank<Box<dyn SoundDevice>>;
type LoadResult = (Bank, Result<(), SoundError>);

/// Sample rate used when running muted
const MUTE_SAMPLE_RATE: f32 = 44_100.0;
/// How long a pad stays lit after its sound plays
const FLASH: Duration = Duration::from_millis(350);

/// Stand-in board while the real bank is loading
struct LoadingBoard {
    pads: usize,
}

impl SoundBoard for LoadingBoard {
    fn sound_count(&self) -> usize {
        self.pads
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn play(&mut self, _index: usize) -> Result<(), SoundError> {
        Err(SoundError::NotLoaded)
    }
}

/// Bank being loaded in the background
struct Loader {
    handle: JoinHandle<LoadResult>,
    cancel: CancelHandle,
}

pub struct App {
    engine: GameEngine<MonotonicClock, RandomSource>,
    bank: Option<Bank>,
    loader: Option<Loader>,
    placeholder: LoadingBoard,
    _audio: Option<AudioOutput>,
    view: ViewState,
    flash_until: Option<Instant>,
    should_quit: bool,
}

impl App {
    pub fn new(cli: &Cli) -> EyreResult<Self> {
        let assets = presets::by_name(&cli.preset).ok_or_else(|| {
            eyre!(
                "unknown preset {:?}, expected one of {:?}",
                cli.preset,
                presets::PRESET_NAMES
            )
        })?;
        let pads: Vec<PadInfo> = assets
            .iter()
            .map(|a| PadInfo {
                name: a.name.clone(),
            })
            .collect();

        let (audio, device): (Option<AudioOutput>, Box<dyn SoundDevice>) = if cli.mute {
            (None, Box::new(NullDevice::new(MUTE_SAMPLE_RATE)))
        } else {
            let (output, device) = audio::open(assets.len())?;
            (Some(output), Box::new(device))
        };

        let bank = SoundBank::new(assets, device)?;
        let cancel = bank.cancel_handle();
        let handle = std::thread::spawn(move || {
            let mut bank = bank;
            let result = bank.load();
            (bank, result)
        });

        let config = cli.game_config();
        let source = RandomSource::from_seed(config.seed);
        info!(preset = %cli.preset, pads = pads.len(), muted = cli.mute, "recall starting");

        Ok(Self {
            engine: GameEngine::new(config, MonotonicClock::new(), source),
            bank: None,
            loader: Some(Loader { handle, cancel }),
            placeholder: LoadingBoard { pads: pads.len() },
            _audio: audio,
            view: ViewState::new(pads),
            flash_until: None,
            should_quit: false,
        })
    }

    /// Take over the terminal until the player quits.
    pub fn run(mut self) -> EyreResult<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal);
        ratatui::restore();
        self.shutdown();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_loader();

            let board = Self::board(&mut self.bank, &mut self.placeholder);
            self.engine.tick(board);
            self.apply_events();
            self.update_flash();

            self.view.snapshot = self.engine.snapshot();
            terminal.draw(|frame| ui::render(frame, &self.view))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn board<'a>(
        bank: &'a mut Option<Bank>,
        placeholder: &'a mut LoadingBoard,
    ) -> &'a mut dyn SoundBoard {
        match bank {
            Some(bank) => bank as &mut dyn SoundBoard,
            None => placeholder as &mut dyn SoundBoard,
        }
    }

    /// Pick up the bank once the worker thread is done with it.
    fn poll_loader(&mut self) {
        let finished = self
            .loader
            .as_ref()
            .is_some_and(|loader| loader.handle.is_finished());
        if !finished {
            return;
        }
        let Some(loader) = self.loader.take() else {
            return;
        };

        match loader.handle.join() {
            Ok((bank, result)) => {
                self.view.load_state = match result {
                    Ok(()) => LoadState::Ready,
                    Err(err) => {
                        error!(%err, "sound loading failed");
                        self.view.status = "Failed to load sounds. Restart to try again.".into();
                        LoadState::Failed(err.to_string())
                    }
                };
                self.bank = Some(bank);
            }
            Err(_) => {
                error!("sound loader thread panicked");
                self.view.load_state = LoadState::Failed("loader crashed".into());
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                let board = Self::board(&mut self.bank, &mut self.placeholder);
                match self.engine.start(board) {
                    Ok(()) => self.view.game_over = None,
                    Err(GameError::NotReady) => {}
                    Err(err) => self.view.status = err.to_string(),
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let board = Self::board(&mut self.bank, &mut self.placeholder);
                if let Err(err) = self.engine.tap(index, board) {
                    self.view.status = err.to_string();
                }
            }
            _ => {}
        }
    }

    /// Turn engine notifications into what the screen shows.
    fn apply_events(&mut self) {
        while let Some(event) = self.engine.poll_event() {
            match event {
                GameEvent::PhaseChanged(Phase::Playing) => {
                    self.view.game_over = None;
                    self.view.status = "Listen...".into();
                }
                GameEvent::PhaseChanged(Phase::AwaitingInput) => {
                    self.view.status = format!(
                        "Your turn: repeat {} sound(s)",
                        self.engine.snapshot().sequence_len
                    );
                }
                GameEvent::PhaseChanged(_) | GameEvent::ScoreChanged(_) => {}
                GameEvent::RoundFailed { final_score, .. } => {
                    self.view.game_over = Some(final_score);
                    self.view.status = format!("Wrong! Final score: {final_score}");
                }
                GameEvent::NotReady => {
                    self.view.status = match &self.view.load_state {
                        LoadState::Failed(reason) => format!("Sounds failed to load: {reason}"),
                        _ => "Please wait, the sounds are still loading.".into(),
                    };
                }
                GameEvent::SoundPlayed { index, .. } => {
                    self.view.lit = Some(index);
                    self.flash_until = Some(Instant::now() + FLASH);
                }
                GameEvent::PlaybackFailed { index, reason } => {
                    self.view.status = format!("Playback error on pad {}: {reason}", index + 1);
                }
            }
        }
    }

    fn update_flash(&mut self) {
        if self.flash_until.is_some_and(|until| Instant::now() >= until) {
            self.view.lit = None;
            self.flash_until = None;
        }
    }

    /// Stop the game, abort a load still in flight and free the audio.
    fn shutdown(&mut self) {
        self.engine.halt();

        if let Some(loader) = self.loader.take() {
            loader.cancel.cancel();
            if let Ok((bank, _)) = loader.handle.join() {
                self.bank = Some(bank);
            }
        }
        if let Some(bank) = self.bank.as_mut() {
            bank.release();
        }
        info!("recall stopped");
    }
}
