//! SoundDevice - the audio output the bank loads into and plays through.

use super::asset::Sample;

/// Audio output capable of holding a fixed set of sounds and playing them
/// by index.
///
/// Playback is fire-and-forget: `trigger` returns as soon as the sound is
/// queued and never waits for it to finish.
pub trait SoundDevice: Send {
    /// Rate assets must be rendered at
    fn sample_rate(&self) -> f32;

    /// Make `sample` playable as `index`, replacing anything already there.
    fn install(&mut self, index: usize, sample: Sample) -> Result<(), String>;

    /// Start playing the sound installed at `index`.
    fn trigger(&mut self, index: usize) -> Result<(), String>;

    /// Stop everything and drop device resources. Called at most once.
    fn release(&mut self);
}

/// Allow boxed devices to be used as devices (for dynamic dispatch)
impl SoundDevice for Box<dyn SoundDevice> {
    fn sample_rate(&self) -> f32 {
        (**self).sample_rate()
    }

    fn install(&mut self, index: usize, sample: Sample) -> Result<(), String> {
        (**self).install(index, sample)
    }

    fn trigger(&mut self, index: usize) -> Result<(), String> {
        (**self).trigger(index)
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Device that accepts everything and outputs nothing.
///
/// Used for `--mute` runs and headless tests. It still tracks what was
/// installed so triggering an empty slot fails like a real device would.
#[derive(Debug, Default)]
pub struct NullDevice {
    sample_rate: f32,
    installed: Vec<bool>,
    triggered: u64,
    released: bool,
}

impl NullDevice {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Number of successful triggers
    pub fn triggered(&self) -> u64 {
        self.triggered
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl SoundDevice for NullDevice {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn install(&mut self, index: usize, _sample: Sample) -> Result<(), String> {
        if self.released {
            return Err("device released".into());
        }
        if self.installed.len() <= index {
            self.installed.resize(index + 1, false);
        }
        self.installed[index] = true;
        Ok(())
    }

    fn trigger(&mut self, index: usize) -> Result<(), String> {
        if self.released {
            return Err("device released".into());
        }
        if !self.installed.get(index).copied().unwrap_or(false) {
            return Err(format!("no sound installed at slot {index}"));
        }
        self.triggered += 1;
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
        self.installed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_device_requires_install_before_trigger() {
        let mut device = NullDevice::new(44_100.0);
        assert!(device.trigger(0).is_err());

        device.install(0, Sample::new(vec![0.0; 4], 44_100.0)).unwrap();
        device.trigger(0).unwrap();
        assert_eq!(device.triggered(), 1);
    }

    #[test]
    fn released_null_device_refuses_playback() {
        let mut device: Box<dyn SoundDevice> = Box::new(NullDevice::new(44_100.0));
        device.install(1, Sample::new(vec![0.0; 4], 44_100.0)).unwrap();
        device.release();
        assert!(device.trigger(1).is_err());
    }
}
