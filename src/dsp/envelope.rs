use crate::MIN_TIME;

/*
ADSR Envelope
=============

Shapes the loudness of a pad sound over its lifetime.

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Ramps are linear. The per-sample step is

    increment = target_change / (time_seconds * sample_rate)

Stages move Idle → Attack → Decay → Sustain, and `gate_off` jumps to Release
from wherever the envelope currently is. Release interpolates from the level
it started at down to exactly 0.0, then the envelope goes back to Idle.

Pad sounds have a fixed length, so `one_shot` opens the gate, holds it for
`len - release`, closes it and keeps rendering until Idle.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeState,
    level: f32,

    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            sustain_level: sustain.clamp(0.0, 1.0),
            release_time: release.max(MIN_TIME),

            stage: EnvelopeState::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Gate high: restart the attack from zero.
    pub fn gate_on(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: release from the current level.
    pub fn gate_off(&mut self, sample_rate: f32) {
        if self.stage == EnvelopeState::Idle {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance by one sample and return the new level.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.attack_time * sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level;
                self.level -= (1.0 - target) / (self.decay_time * sample_rate);
                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Level curve for a sound of `len` samples.
    ///
    /// The gate closes one release time before the end, so the last level is
    /// 0.0 whenever `len` is long enough to hold the release.
    pub fn one_shot(&mut self, len: usize, sample_rate: f32) -> Vec<f32> {
        let release_samples = (self.release_time * sample_rate).round() as usize;
        let gate_off_at = len.saturating_sub(release_samples);

        self.gate_on();
        (0..len)
            .map(|i| {
                if i == gate_off_at {
                    self.gate_off(sample_rate);
                }
                self.next_sample(sample_rate)
            })
            .collect()
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 8_000.0;

    fn peak(levels: &[f32]) -> (usize, f32) {
        levels
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0.0), |best, (i, l)| if l > best.1 { (i, l) } else { best })
    }

    #[test]
    fn pad_contour_ends_in_silence() {
        let mut env = Envelope::adsr(0.005, 0.08, 0.6, 0.12);
        let levels = env.one_shot(3_200, SAMPLE_RATE);

        assert_eq!(levels.len(), 3_200);
        assert_eq!(levels.last(), Some(&0.0));
        assert!(!env.is_active());
    }

    #[test]
    fn pad_contour_peaks_early_then_holds_sustain() {
        let mut env = Envelope::adsr(0.005, 0.08, 0.6, 0.12);
        let levels = env.one_shot(3_200, SAMPLE_RATE);

        // 40 attack samples at 8 kHz
        let (at, level) = peak(&levels);
        assert!(level > 0.99);
        assert!(at <= 41, "peak at sample {at}");

        // Decay is over by sample 680; the gate closes at 2240
        assert!((levels[1_000] - 0.6).abs() < 1e-6);
        assert!((levels[2_239] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn short_pad_releases_from_the_level_it_reached() {
        // 400-sample attack, but the gate closes at sample 120
        let mut env = Envelope::adsr(0.05, 0.05, 0.5, 0.01);
        let levels = env.one_shot(200, SAMPLE_RATE);

        let (at, level) = peak(&levels);
        assert!(at <= 120);
        assert!((level - 0.3).abs() < 0.01, "reached {level}");
        assert!(levels[120..].windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(levels.last(), Some(&0.0));
    }

    #[test]
    fn gate_off_while_idle_is_ignored() {
        let mut env = Envelope::adsr(0.01, 0.05, 0.5, 0.03);
        env.gate_off(SAMPLE_RATE);
        assert_eq!(env.state(), EnvelopeState::Idle);
    }
}
