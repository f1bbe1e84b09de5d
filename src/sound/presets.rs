//! Ready-made pad sets.
//!
//! # Example
//!
//! ```
//! use saavy_recall::sound::presets;
//!
//! let pads = presets::classic();
//! assert_eq!(pads.len(), 4);
//! assert!(presets::by_name("novelty").is_some());
//! ```

use super::asset::{AssetSpec, EnvelopeShape};
use crate::dsp::Waveform;

/// Names accepted by [`by_name`]
pub const PRESET_NAMES: &[&str] = &["classic", "novelty"];

/// The four tones of the classic colour-pad memory game.
///
/// Green E4, red A4, yellow C#4, blue E3: all notes of an A major chord so
/// any pair sounds consonant.
pub fn classic() -> Vec<AssetSpec> {
    let pad = |name: &str, hz: f32| {
        AssetSpec::tone(name, Waveform::Triangle, hz)
            .duration(0.42)
            .envelope(EnvelopeShape::new(0.01, 0.1, 0.7, 0.12))
            .gain(0.6)
    };

    vec![
        pad("green", 329.63),
        pad("red", 440.0),
        pad("yellow", 277.18),
        pad("blue", 164.81),
    ]
}

/// Two silly sound effects: a noise burst and a falling raspberry.
pub fn novelty() -> Vec<AssetSpec> {
    vec![
        AssetSpec::tone("boom", Waveform::Noise, 0.0)
            .duration(0.7)
            .envelope(EnvelopeShape::new(0.002, 0.25, 0.2, 0.35))
            .gain(0.7),
        AssetSpec::tone("raspberry", Waveform::Square, 140.0)
            .sweep_to(60.0)
            .duration(0.6)
            .envelope(EnvelopeShape::new(0.02, 0.1, 0.8, 0.15))
            .gain(0.35),
    ]
}

pub fn by_name(name: &str) -> Option<Vec<AssetSpec>> {
    match name {
        "classic" => Some(classic()),
        "novelty" => Some(novelty()),
        _ => None,
    }
}
