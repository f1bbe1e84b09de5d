//! Audio output - cpal stream driving the pad mixer.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use saavy_recall::{sound::mixer_pair, sound::MixerDevice, MAX_BLOCK_SIZE};

/// Sounds allowed to ring at the same time
const MAX_VOICES: usize = 8;
/// Pending mixer commands before triggers start failing
const QUEUE_CAPACITY: usize = 64;

/// Keeps the stream alive; dropping it stops audio.
pub struct AudioOutput {
    _stream: cpal::Stream,
}

/// Open the default output device and start a stream rendering the mixer.
pub fn open(slots: usize) -> EyreResult<(AudioOutput, MixerDevice)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let (mixer_device, mut mixer) = mixer_pair(sample_rate, slots, MAX_VOICES, QUEUE_CAPACITY);
    let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let mono = &mut block[..frames];
                    mixer.render_block(mono);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in mono.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames;
                }
            },
            |err| tracing::error!(%err, "audio stream error"),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    tracing::info!(sample_rate, channels, "audio output started");

    Ok((
        AudioOutput { _stream: stream },
        mixer_device,
    ))
}
