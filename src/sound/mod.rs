//! Pad sounds: what they are, how they load and how they reach the speakers.
//!
//! - [`AssetSpec`] describes one synthesized sound; rendering it is "loading".
//! - [`SoundDevice`] is the audio output the rendered samples are installed
//!   into and triggered on.
//! - [`SoundBank`] owns the asset list, loads it into a device, reports
//!   readiness and exposes the [`SoundBoard`] capability the game plays through.
//! - [`Mixer`] is the realtime side of [`MixerDevice`]; it runs inside the
//!   audio callback.

pub mod asset;
pub mod bank;
pub mod device;
#[cfg(feature = "rtrb")]
pub mod mixer;
pub mod presets;

pub use asset::{AssetSpec, EnvelopeShape, Sample};
pub use bank::{BankStatus, CancelHandle, SoundBank, SoundBoard, MIN_ASSETS};
pub use device::{NullDevice, SoundDevice};
#[cfg(feature = "rtrb")]
pub use mixer::{mixer_pair, Mixer, MixerCommand, MixerDevice};
