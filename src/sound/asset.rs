//! Asset - one pad sound, described by parameters and rendered on load.
//!
//! Assets are synthesized rather than decoded: an oscillator (optionally
//! gliding between two pitches) shaped by an ADSR envelope. Rendering produces
//! an immutable [`Sample`] that can be shared with the audio thread without
//! copying.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::sync::Arc;
use std::time::Duration;

use crate::dsp::{Envelope, Oscillator, Waveform};

/// Envelope parameters in seconds (sustain is a level).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack_secs: f32,
    pub decay_secs: f32,
    pub sustain_level: f32,
    pub release_secs: f32,
}

impl EnvelopeShape {
    pub const fn new(attack_secs: f32, decay_secs: f32, sustain_level: f32, release_secs: f32) -> Self {
        Self {
            attack_secs,
            decay_secs,
            sustain_level,
            release_secs,
        }
    }

    /// Short attack, gentle decay: a clean "beep".
    pub const fn pluck() -> Self {
        Self::new(0.005, 0.08, 0.6, 0.12)
    }

    fn build(&self) -> Envelope {
        Envelope::adsr(
            self.attack_secs,
            self.decay_secs,
            self.sustain_level,
            self.release_secs,
        )
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::pluck()
    }
}

/// Description of one loadable sound.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSpec {
    /// Display / log name
    pub name: String,
    pub waveform: Waveform,
    /// Start pitch in Hz (ignored by noise)
    pub frequency_hz: f32,
    /// If set, pitch glides linearly to this value over the sound's length
    pub sweep_to_hz: Option<f32>,
    pub duration_secs: f32,
    pub envelope: EnvelopeShape,
    /// Output gain (0.0 - 1.0)
    pub gain: f32,
}

impl AssetSpec {
    /// A pitched tone with default envelope, 400 ms long.
    pub fn tone(name: impl Into<String>, waveform: Waveform, frequency_hz: f32) -> Self {
        Self {
            name: name.into(),
            waveform,
            frequency_hz,
            sweep_to_hz: None,
            duration_secs: 0.4,
            envelope: EnvelopeShape::default(),
            gain: 0.5,
        }
    }

    pub fn duration(mut self, secs: f32) -> Self {
        self.duration_secs = secs;
        self
    }

    pub fn envelope(mut self, envelope: EnvelopeShape) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    pub fn sweep_to(mut self, frequency_hz: f32) -> Self {
        self.sweep_to_hz = Some(frequency_hz);
        self
    }

    /// Check that the parameters can be rendered at `sample_rate`.
    pub fn validate(&self, sample_rate: f32) -> Result<(), String> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(format!("invalid sample rate {sample_rate}"));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(format!("invalid duration {}s", self.duration_secs));
        }
        if !self.gain.is_finite() || !(0.0..=1.0).contains(&self.gain) {
            return Err(format!("gain {} outside 0.0..=1.0", self.gain));
        }
        if self.waveform.is_pitched() {
            let nyquist = sample_rate / 2.0;
            let pitches = std::iter::once(self.frequency_hz).chain(self.sweep_to_hz);
            for hz in pitches {
                if !hz.is_finite() || hz <= 0.0 {
                    return Err(format!("invalid frequency {hz} Hz"));
                }
                if hz >= nyquist {
                    return Err(format!("frequency {hz} Hz at or above Nyquist ({nyquist} Hz)"));
                }
            }
        }
        Ok(())
    }

    /// Render the sound into a shareable buffer.
    ///
    /// The gate closes `release_secs` before the end so the tail reaches
    /// silence inside the buffer.
    pub fn render(&self, sample_rate: f32) -> Result<Sample, String> {
        self.validate(sample_rate)?;

        let total = ((self.duration_secs * sample_rate).round() as usize).max(1);
        let levels = self.envelope.build().one_shot(total, sample_rate);

        let mut osc = Oscillator::new(self.waveform);
        let start = self.frequency_hz;
        let end = self.sweep_to_hz.unwrap_or(start);

        let data: Vec<f32> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let t = i as f32 / total as f32;
                let frequency = start + (end - start) * t;
                osc.next_sample(frequency, sample_rate) * level * self.gain
            })
            .collect();

        Ok(Sample::new(data, sample_rate))
    }
}

/// Rendered PCM, mono, shared between the loader and the audio thread.
#[derive(Debug, Clone)]
pub struct Sample {
    data: Arc<[f32]>,
    sample_rate: f32,
}

impl Sample {
    pub fn new(data: impl Into<Arc<[f32]>>, sample_rate: f32) -> Self {
        Self {
            data: data.into(),
            sample_rate,
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.data.len() as f64 / self.sample_rate as f64)
    }

    /// Largest absolute sample value
    pub fn peak(&self) -> f32 {
        self.data.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn renders_requested_length() {
        let spec = AssetSpec::tone("a", Waveform::Sine, 440.0).duration(0.25);
        let sample = spec.render(SAMPLE_RATE).unwrap();
        assert_eq!(sample.len(), 12_000);
        assert_eq!(sample.duration(), Duration::from_millis(250));
    }

    #[test]
    fn output_respects_gain() {
        let spec = AssetSpec::tone("a", Waveform::Square, 300.0).gain(0.25);
        let sample = spec.render(SAMPLE_RATE).unwrap();
        assert!(sample.peak() <= 0.25 + 1e-6);
        assert!(sample.peak() > 0.2);
    }

    #[test]
    fn tail_decays_to_silence() {
        let spec = AssetSpec::tone("a", Waveform::Triangle, 330.0);
        let sample = spec.render(SAMPLE_RATE).unwrap();
        let last = *sample.as_slice().last().unwrap();
        assert!(last.abs() < 1e-3, "tail should be silent, got {last}");
    }

    #[test]
    fn rejects_frequency_above_nyquist() {
        let spec = AssetSpec::tone("shrill", Waveform::Sine, 30_000.0);
        let err = spec.render(SAMPLE_RATE).unwrap_err();
        assert!(err.contains("Nyquist"), "{err}");
    }

    #[test]
    fn rejects_bad_sweep_target() {
        let spec = AssetSpec::tone("glide", Waveform::Saw, 200.0).sweep_to(-5.0);
        assert!(spec.validate(SAMPLE_RATE).is_err());
    }

    #[test]
    fn noise_ignores_frequency() {
        let spec = AssetSpec::tone("hiss", Waveform::Noise, 0.0);
        assert!(spec.render(SAMPLE_RATE).is_ok());
    }

    #[test]
    fn rejects_zero_duration_and_bad_gain() {
        let base = AssetSpec::tone("a", Waveform::Sine, 440.0);
        assert!(base.clone().duration(0.0).validate(SAMPLE_RATE).is_err());
        assert!(base.clone().gain(1.5).validate(SAMPLE_RATE).is_err());
        assert!(base.validate(0.0).is_err());
    }
}
