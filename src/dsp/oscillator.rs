#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

/*
Pad Oscillator
==============

A phase accumulator that turns a frequency into a repeating waveform.

  phase      Position inside one cycle, kept in [0.0, 1.0).
  increment  How far the phase moves per sample: frequency / sample_rate.

Each sample we read the waveform at the current phase, then advance:

    phase += increment
    if phase >= 1.0 { phase -= 1.0 }

Waveforms
---------

  Sine      sin(2π · phase)               pure, soft
  Square    +1 first half, -1 second half  hollow, buzzy
  Triangle  linear up then down            mellow
  Saw       ramp from -1 to +1             bright
  Noise     xorshift random in [-1, 1]     unpitched (ignores frequency)

Noise uses a fixed seed so every render of the same asset is identical.
*/

const NOISE_SEED: u32 = 0x9E37_79B9;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Saw,
    Noise,
}

impl Waveform {
    /// Whether the waveform follows the oscillator frequency.
    pub fn is_pitched(self) -> bool {
        !matches!(self, Waveform::Noise)
    }
}

pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    noise_state: u32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise_state: NOISE_SEED,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let value = match self.waveform {
            Waveform::Sine => (TAU * self.phase).sin(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 1.0 - 4.0 * (self.phase - 0.5).abs(),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Noise => self.next_noise(),
        };

        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        value
    }

    /// Fill `out` with a constant-frequency signal.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.noise_state = NOISE_SEED;
    }

    fn next_noise(&mut self) -> f32 {
        // xorshift32
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.noise_state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}
