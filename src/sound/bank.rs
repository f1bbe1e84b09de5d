//! SoundBank - the fixed set of pad sounds and their lifecycle.
//!
//! ```text
//!   Unloaded ──load()──→ Loading ──all ok──→ Ready
//!                           │
//!                           └──any failure / cancel──→ Failed
//!
//!   any ──release()──→ Released   (terminal, idempotent)
//! ```
//!
//! The bank owns its device. The game never sees the bank itself, only the
//! [`SoundBoard`] capability: how many pads there are, whether they are
//! ready, and "play pad i".

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::{debug, error, info, warn};

use super::{asset::AssetSpec, device::SoundDevice};
use crate::error::SoundError;

/// Fewest sounds a game can be played with
pub const MIN_ASSETS: usize = 2;

/// What the game engine needs from the sound layer
pub trait SoundBoard {
    /// Number of playable pads (N)
    fn sound_count(&self) -> usize;

    /// True only when every sound loaded successfully
    fn is_ready(&self) -> bool;

    /// Play pad `index`. Fire-and-forget: returns once the sound is queued.
    fn play(&mut self, index: usize) -> Result<(), SoundError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
    Released,
}

/// Aborts a load running on another thread.
///
/// Cancellation is sticky: a cancelled bank stays not-ready.
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct SoundBank<D: SoundDevice> {
    assets: Vec<AssetSpec>,
    device: D,
    status: BankStatus,
    failures: Vec<SoundError>,
    cancel: CancelHandle,
}

impl<D: SoundDevice> SoundBank<D> {
    /// Create a bank for `assets`, played through `device`. Nothing is
    /// loaded yet.
    pub fn new(assets: Vec<AssetSpec>, device: D) -> Result<Self, SoundError> {
        if assets.len() < MIN_ASSETS {
            return Err(SoundError::TooFewAssets {
                count: assets.len(),
                min: MIN_ASSETS,
            });
        }

        Ok(Self {
            assets,
            device,
            status: BankStatus::Unloaded,
            failures: Vec::new(),
            cancel: CancelHandle(Arc::new(AtomicBool::new(false))),
        })
    }

    /// Render every asset and install it into the device.
    ///
    /// Each asset is attempted independently so every failure gets logged;
    /// the first one is returned. The bank is ready only if all succeed.
    /// Checks for cancellation between assets.
    pub fn load(&mut self) -> Result<(), SoundError> {
        if self.status == BankStatus::Released {
            return Err(SoundError::Released);
        }

        self.status = BankStatus::Loading;
        self.failures.clear();
        let sample_rate = self.device.sample_rate();

        for (index, spec) in self.assets.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(index, "sound loading cancelled");
                self.status = BankStatus::Failed;
                return Err(SoundError::LoadCancelled);
            }

            let outcome = spec
                .render(sample_rate)
                .and_then(|sample| self.device.install(index, sample));

            match outcome {
                Ok(()) => info!(index, name = %spec.name, "sound loaded"),
                Err(reason) => {
                    error!(index, name = %spec.name, %reason, "failed to load sound");
                    self.failures.push(SoundError::AssetLoad {
                        index,
                        name: spec.name.clone(),
                        reason,
                    });
                }
            }
        }

        if self.cancel.is_cancelled() {
            self.status = BankStatus::Failed;
            return Err(SoundError::LoadCancelled);
        }

        match self.failures.first() {
            None => {
                self.status = BankStatus::Ready;
                info!(count = self.assets.len(), "sound bank ready");
                Ok(())
            }
            Some(first) => {
                self.status = BankStatus::Failed;
                Err(first.clone())
            }
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop playback, cancel any load in progress and free the device.
    /// Safe to call more than once; only the first call does anything.
    pub fn release(&mut self) {
        if self.status == BankStatus::Released {
            return;
        }
        self.cancel.cancel();
        self.device.release();
        self.status = BankStatus::Released;
        info!("sound bank released");
    }

    pub fn status(&self) -> BankStatus {
        self.status
    }

    /// Per-asset load failures from the last `load()`
    pub fn failures(&self) -> &[SoundError] {
        &self.failures
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: SoundDevice> SoundBoard for SoundBank<D> {
    fn sound_count(&self) -> usize {
        self.assets.len()
    }

    fn is_ready(&self) -> bool {
        self.status == BankStatus::Ready
    }

    fn play(&mut self, index: usize) -> Result<(), SoundError> {
        if index >= self.assets.len() {
            return Err(SoundError::InvalidIndex {
                index,
                count: self.assets.len(),
            });
        }
        match self.status {
            BankStatus::Ready => {}
            BankStatus::Released => return Err(SoundError::Released),
            _ => return Err(SoundError::NotLoaded),
        }

        match self.device.trigger(index) {
            Ok(()) => {
                debug!(index, "sound played");
                Ok(())
            }
            Err(reason) => {
                warn!(index, %reason, "sound playback failed");
                Err(SoundError::Playback { index, reason })
            }
        }
    }
}

impl<D: SoundDevice> Drop for SoundBank<D> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use super::*;
    use crate::dsp::Waveform;
    use crate::sound::{asset::Sample, device::NullDevice, presets};

    /// Device that counts releases and can be told to fail.
    #[derive(Default)]
    struct FlakyDevice {
        fail_install: Option<usize>,
        fail_trigger: bool,
        releases: usize,
        triggers: Vec<usize>,
    }

    impl SoundDevice for FlakyDevice {
        fn sample_rate(&self) -> f32 {
            8_000.0
        }

        fn install(&mut self, index: usize, _sample: Sample) -> Result<(), String> {
            if self.fail_install == Some(index) {
                Err("decoder exploded".into())
            } else {
                Ok(())
            }
        }

        fn trigger(&mut self, index: usize) -> Result<(), String> {
            if self.fail_trigger {
                return Err("device busy".into());
            }
            self.triggers.push(index);
            Ok(())
        }

        fn release(&mut self) {
            self.releases += 1;
        }
    }

    fn two_tones() -> Vec<AssetSpec> {
        vec![
            AssetSpec::tone("low", Waveform::Sine, 220.0),
            AssetSpec::tone("high", Waveform::Sine, 440.0),
        ]
    }

    #[test]
    fn needs_at_least_two_assets() {
        let assets = vec![AssetSpec::tone("solo", Waveform::Sine, 220.0)];
        let err = SoundBank::new(assets, NullDevice::new(8_000.0)).err();
        assert_eq!(err, Some(SoundError::TooFewAssets { count: 1, min: 2 }));
    }

    #[test]
    fn loads_and_becomes_ready() {
        let mut bank = SoundBank::new(presets::classic(), NullDevice::new(8_000.0)).unwrap();
        assert_eq!(bank.status(), BankStatus::Unloaded);
        assert!(!bank.is_ready());

        bank.load().unwrap();
        assert!(bank.is_ready());
        assert_eq!(bank.sound_count(), 4);
        bank.play(3).unwrap();
        assert_eq!(bank.device().triggered(), 1);
    }

    #[test]
    fn failed_asset_blocks_readiness_and_names_the_asset() {
        let device = FlakyDevice {
            fail_install: Some(1),
            ..Default::default()
        };
        let mut bank = SoundBank::new(two_tones(), device).unwrap();

        let err = bank.load().unwrap_err();
        assert_eq!(
            err,
            SoundError::AssetLoad {
                index: 1,
                name: "high".into(),
                reason: "decoder exploded".into(),
            }
        );
        assert!(!bank.is_ready());
        assert_eq!(bank.status(), BankStatus::Failed);
        assert_eq!(bank.play(0), Err(SoundError::NotLoaded));
    }

    #[test]
    fn every_failing_asset_is_reported() {
        let assets = vec![
            AssetSpec::tone("bad", Waveform::Sine, -1.0),
            AssetSpec::tone("worse", Waveform::Sine, 1.0e6),
        ];
        let mut bank = SoundBank::new(assets, NullDevice::new(8_000.0)).unwrap();
        assert!(bank.load().is_err());
        assert_eq!(bank.failures().len(), 2);
    }

    #[test]
    fn play_rejects_out_of_range_index() {
        let mut bank = SoundBank::new(two_tones(), NullDevice::new(8_000.0)).unwrap();
        bank.load().unwrap();
        assert_eq!(
            bank.play(2),
            Err(SoundError::InvalidIndex { index: 2, count: 2 })
        );
    }

    #[test]
    fn playback_failure_is_reported_without_losing_readiness() {
        let device = FlakyDevice {
            fail_trigger: true,
            ..Default::default()
        };
        let mut bank = SoundBank::new(two_tones(), device).unwrap();
        bank.load().unwrap();

        assert!(matches!(bank.play(0), Err(SoundError::Playback { index: 0, .. })));
        assert!(bank.is_ready());
    }

    #[test]
    fn release_is_idempotent() {
        let mut bank = SoundBank::new(two_tones(), FlakyDevice::default()).unwrap();
        bank.load().unwrap();
        bank.release();
        bank.release();

        assert_eq!(bank.device().releases, 1);
        assert_eq!(bank.status(), BankStatus::Released);
        assert_eq!(bank.play(0), Err(SoundError::Released));
        assert_eq!(bank.load(), Err(SoundError::Released));
    }

    #[test]
    fn cancelled_load_leaves_bank_not_ready() {
        let mut bank = SoundBank::new(two_tones(), NullDevice::new(8_000.0)).unwrap();
        bank.cancel_handle().cancel();

        assert_eq!(bank.load(), Err(SoundError::LoadCancelled));
        assert_eq!(bank.status(), BankStatus::Failed);
        assert!(!bank.is_ready());
    }

    /// Fires the bank's cancel handle while the first sound is installed.
    struct CancelsMidLoad {
        cancel: Arc<OnceLock<CancelHandle>>,
        installed: Vec<usize>,
    }

    impl SoundDevice for CancelsMidLoad {
        fn sample_rate(&self) -> f32 {
            8_000.0
        }

        fn install(&mut self, index: usize, _sample: Sample) -> Result<(), String> {
            if index == 0 {
                if let Some(cancel) = self.cancel.get() {
                    cancel.cancel();
                }
            }
            self.installed.push(index);
            Ok(())
        }

        fn trigger(&mut self, _index: usize) -> Result<(), String> {
            Ok(())
        }

        fn release(&mut self) {}
    }

    #[test]
    fn load_cancelled_mid_flight_is_reported_not_half_ready() {
        let cancel = Arc::new(OnceLock::new());
        let device = CancelsMidLoad {
            cancel: Arc::clone(&cancel),
            installed: Vec::new(),
        };
        let bank = SoundBank::new(presets::classic(), device).unwrap();
        let _ = cancel.set(bank.cancel_handle());

        let worker = std::thread::spawn(move || {
            let mut bank = bank;
            let result = bank.load();
            (bank, result)
        });
        let (mut bank, result) = worker.join().unwrap();

        assert_eq!(result, Err(SoundError::LoadCancelled));
        assert_eq!(bank.device().installed, vec![0], "stopped after the first sound");
        assert_eq!(bank.status(), BankStatus::Failed);
        assert!(!bank.is_ready());
        assert_eq!(bank.play(0), Err(SoundError::NotLoaded));
    }
}
