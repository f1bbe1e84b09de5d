#![cfg(feature = "rtrb")]

use saavy_recall::{
    sound::{mixer_pair, presets, SoundBank, SoundBoard},
    SoundError, MAX_BLOCK_SIZE,
};

const SAMPLE_RATE: f32 = 48_000.0;

#[test]
fn loaded_pad_is_audible_through_the_mixer() {
    let (device, mut mixer) = mixer_pair(SAMPLE_RATE, 4, 8, 16);
    let mut bank = SoundBank::new(presets::classic(), device).unwrap();
    bank.load().unwrap();

    let mut out = vec![0.0f32; MAX_BLOCK_SIZE];
    mixer.render_block(&mut out);
    assert_eq!(mixer.installed(), 4);
    assert!(out.iter().all(|&s| s == 0.0), "silent until triggered");

    bank.play(1).unwrap();
    mixer.render_block(&mut out);
    assert!(out.iter().any(|s| s.abs() > 0.0));
    assert!(out.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn stalled_audio_thread_surfaces_as_playback_error() {
    let (device, mut mixer) = mixer_pair(SAMPLE_RATE, 2, 2, 4);
    let mut bank = SoundBank::new(presets::novelty(), device).unwrap();
    bank.load().unwrap();

    // Two installs are still queued; two triggers fill the ring
    bank.play(0).unwrap();
    bank.play(1).unwrap();
    assert!(matches!(bank.play(0), Err(SoundError::Playback { index: 0, .. })));
    assert!(bank.is_ready());

    let mut out = vec![0.0f32; 256];
    mixer.render_block(&mut out);
    bank.play(0).unwrap();
}

#[test]
fn release_silences_the_mixer() {
    let (device, mut mixer) = mixer_pair(SAMPLE_RATE, 4, 8, 16);
    let mut bank = SoundBank::new(presets::classic(), device).unwrap();
    bank.load().unwrap();
    bank.play(0).unwrap();

    let mut out = vec![0.0f32; 512];
    mixer.render_block(&mut out);
    assert_eq!(mixer.active_voices(), 1);

    bank.release();
    mixer.render_block(&mut out);
    assert_eq!(mixer.active_voices(), 0);
    assert!(out.iter().all(|&s| s == 0.0));
}
