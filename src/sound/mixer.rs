//! Mixer - realtime playback of installed pad sounds.
//!
//! The UI thread owns a [`MixerDevice`] and pushes [`MixerCommand`]s into a
//! lock-free ring buffer; the audio callback owns the [`Mixer`], drains the
//! ring at the top of every block and sums the sounding voices.
//!
//! ```text
//!   UI thread                         audio thread
//!   ─────────                         ────────────
//!   MixerDevice::trigger(i) ──rtrb──→ Mixer::render_block(out)
//! ```
//!
//! The mixer never allocates or frees while rendering: slot and voice storage
//! is sized when the pair is created, and sounds it lets go of (replaced by a
//! new install, or cleared by `StopAll`) travel back over a second ring to be
//! dropped on the UI thread.
//!
//! ```text
//!   MixerDevice ←──rtrb── retired Samples ── Mixer
//! ```

use rtrb::{Consumer, Producer, RingBuffer};

use super::{asset::Sample, device::SoundDevice};

/// Commands sent from the UI thread to the audio thread
#[derive(Debug, Clone)]
pub enum MixerCommand {
    /// Make a rendered sound playable at `index`
    Install { index: usize, sample: Sample },
    /// Start a new voice for the sound at `index`
    Trigger { index: usize },
    /// Silence every voice and drop installed sounds
    StopAll,
}

/// Create a connected device / mixer pair.
///
/// - `slots`: number of sounds the mixer can hold
/// - `max_voices`: sounds allowed to ring at once; the oldest is stolen
/// - `queue_capacity`: pending commands before `trigger` starts failing
pub fn mixer_pair(
    sample_rate: f32,
    slots: usize,
    max_voices: usize,
    queue_capacity: usize,
) -> (MixerDevice, Mixer) {
    let (tx, rx) = RingBuffer::new(queue_capacity.max(1));
    // Every retired sample was installed through `tx`, plus one StopAll's worth
    let (retire_tx, retire_rx) = RingBuffer::new(queue_capacity.max(1) + slots.max(1));
    let device = MixerDevice {
        tx,
        retired: retire_rx,
        sample_rate,
        slots,
        released: false,
    };
    let mixer = Mixer {
        rx,
        retired: retire_tx,
        slots: vec![None; slots],
        voices: Vec::with_capacity(max_voices.max(1)),
        max_voices: max_voices.max(1),
        frame_counter: 0,
    };
    (device, mixer)
}

/// UI-side handle of the mixer
pub struct MixerDevice {
    tx: Producer<MixerCommand>,
    retired: Consumer<Sample>,
    sample_rate: f32,
    slots: usize,
    released: bool,
}

impl MixerDevice {
    fn send(&mut self, command: MixerCommand) -> Result<(), String> {
        if self.released {
            return Err("device released".into());
        }
        self.collect_retired();
        self.tx
            .push(command)
            .map_err(|_| "mixer command queue is full".to_string())
    }

    /// Free sounds the audio thread no longer uses.
    fn collect_retired(&mut self) {
        while let Ok(sample) = self.retired.pop() {
            drop(sample);
        }
    }
}

impl SoundDevice for MixerDevice {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn install(&mut self, index: usize, sample: Sample) -> Result<(), String> {
        if index >= self.slots {
            return Err(format!("mixer has {} slots, cannot install at {index}", self.slots));
        }
        if sample.sample_rate() != self.sample_rate {
            return Err(format!(
                "sample rendered at {} Hz, device runs at {} Hz",
                sample.sample_rate(),
                self.sample_rate
            ));
        }
        self.send(MixerCommand::Install { index, sample })
    }

    fn trigger(&mut self, index: usize) -> Result<(), String> {
        if index >= self.slots {
            return Err(format!("mixer has {} slots, cannot trigger {index}", self.slots));
        }
        self.send(MixerCommand::Trigger { index })
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        // If the ring is full the audio side is gone or stalled; nothing left to stop.
        let _ = self.tx.push(MixerCommand::StopAll);
        self.released = true;
    }
}

/// One sounding instance of an installed sound
#[derive(Debug, Clone, Copy)]
struct Voice {
    slot: usize,
    position: usize,
    started_at: u64,
}

/// Audio-thread side: owns installed sounds and the voice pool
pub struct Mixer {
    rx: Consumer<MixerCommand>,
    retired: Producer<Sample>,
    slots: Vec<Option<Sample>>,
    voices: Vec<Voice>,
    max_voices: usize,
    frame_counter: u64,
}

impl Mixer {
    /// Apply pending commands, then mix every voice into `out` (overwrites it).
    pub fn render_block(&mut self, out: &mut [f32]) {
        self.process_commands();

        out.fill(0.0);
        for voice in &mut self.voices {
            let Some(sample) = self.slots.get(voice.slot).and_then(Option::as_ref) else {
                voice.position = usize::MAX;
                continue;
            };
            let data = sample.as_slice();
            let start = voice.position.min(data.len());
            let end = (start + out.len()).min(data.len());
            for (o, s) in out.iter_mut().zip(&data[start..end]) {
                *o += s;
            }
            voice.position = end;
        }

        self.voices.retain(|voice| {
            self.slots
                .get(voice.slot)
                .and_then(Option::as_ref)
                .is_some_and(|sample| voice.position < sample.len())
        });

        for o in out.iter_mut() {
            *o = o.clamp(-1.0, 1.0);
        }

        self.frame_counter += out.len() as u64;
    }

    /// Number of voices currently sounding
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn installed(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn process_commands(&mut self) {
        while let Ok(command) = self.rx.pop() {
            match command {
                MixerCommand::Install { index, sample } => {
                    if let Some(slot) = self.slots.get_mut(index) {
                        if let Some(old) = slot.replace(sample) {
                            retire(&mut self.retired, old);
                        }
                    }
                }
                MixerCommand::Trigger { index } => {
                    if self.slots.get(index).is_some_and(Option::is_some) {
                        self.start_voice(index);
                    }
                }
                MixerCommand::StopAll => {
                    self.voices.clear();
                    for slot in &mut self.slots {
                        if let Some(old) = slot.take() {
                            retire(&mut self.retired, old);
                        }
                    }
                }
            }
        }
    }

    fn start_voice(&mut self, slot: usize) {
        let voice = Voice {
            slot,
            position: 0,
            started_at: self.frame_counter,
        };

        if self.voices.len() < self.max_voices {
            self.voices.push(voice);
            return;
        }

        // Steal the oldest voice
        if let Some(oldest) = self.voices.iter_mut().min_by_key(|v| v.started_at) {
            *oldest = voice;
        }
    }
}

fn retire(ring: &mut Producer<Sample>, sample: Sample) {
    // A full ring means the UI side stopped collecting; the sample drops here.
    let _ = ring.push(sample);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn ramp(len: usize) -> Sample {
        Sample::new((0..len).map(|i| i as f32 / 100.0).collect::<Vec<_>>(), SAMPLE_RATE)
    }

    #[test]
    fn trigger_plays_installed_sample() {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, 2, 4, 16);
        device.install(0, ramp(8)).unwrap();
        device.trigger(0).unwrap();

        let mut out = [0.0f32; 4];
        mixer.render_block(&mut out);
        assert_eq!(out, [0.0, 0.01, 0.02, 0.03]);
        assert_eq!(mixer.active_voices(), 1);

        mixer.render_block(&mut out);
        assert_eq!(out, [0.04, 0.05, 0.06, 0.07]);
        assert_eq!(mixer.active_voices(), 0, "voice ends with its sample");
    }

    #[test]
    fn overlapping_triggers_are_summed() {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, 1, 4, 16);
        device.install(0, Sample::new(vec![0.25; 16], SAMPLE_RATE)).unwrap();
        device.trigger(0).unwrap();
        device.trigger(0).unwrap();

        let mut out = [0.0f32; 4];
        mixer.render_block(&mut out);
        assert!(out.iter().all(|&s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn oldest_voice_is_stolen_when_full() {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, 1, 1, 16);
        device.install(0, Sample::new(vec![0.1; 64], SAMPLE_RATE)).unwrap();
        device.trigger(0).unwrap();

        let mut out = [0.0f32; 8];
        mixer.render_block(&mut out);
        device.trigger(0).unwrap();
        mixer.render_block(&mut out);

        assert_eq!(mixer.active_voices(), 1);
        assert!(out.iter().all(|&s| (s - 0.1).abs() < 1e-6));
    }

    #[test]
    fn full_queue_reports_failure() {
        let (mut device, _mixer) = mixer_pair(SAMPLE_RATE, 1, 1, 1);
        device.trigger(0).unwrap();
        assert!(device.trigger(0).is_err());
    }

    #[test]
    fn rejects_mismatched_sample_rate_and_slot() {
        let (mut device, _mixer) = mixer_pair(SAMPLE_RATE, 1, 1, 4);
        assert!(device.install(0, Sample::new(vec![0.0; 4], 44_100.0)).is_err());
        assert!(device.install(3, ramp(4)).is_err());
    }

    #[test]
    fn release_silences_and_refuses_more_work() {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, 1, 2, 8);
        device.install(0, ramp(64)).unwrap();
        device.trigger(0).unwrap();
        device.release();
        device.release();

        let mut out = [1.0f32; 4];
        mixer.render_block(&mut out);
        assert_eq!(out, [0.0; 4]);
        assert_eq!(mixer.installed(), 0);
        assert!(device.trigger(0).is_err());
    }

    #[test]
    fn replaced_sounds_are_handed_back_to_the_ui_side() {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, 1, 1, 8);
        device.install(0, ramp(4)).unwrap();
        device.install(0, ramp(8)).unwrap();

        let mut out = [0.0f32; 4];
        mixer.render_block(&mut out);
        assert_eq!(device.retired.slots(), 1, "first ramp waits for the UI side");

        device.trigger(0).unwrap();
        assert_eq!(device.retired.slots(), 0);

        device.release();
        mixer.render_block(&mut out);
        assert_eq!(device.retired.slots(), 1);
        assert_eq!(mixer.installed(), 0);
    }
}
