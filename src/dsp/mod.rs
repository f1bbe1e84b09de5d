//! Low-level DSP primitives used to render pad sounds.
//!
//! These components are allocation-free and deterministic: rendering the same
//! asset twice yields the same samples, which keeps loading reproducible and
//! testable.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeState};
pub use oscillator::{Oscillator, Waveform};
