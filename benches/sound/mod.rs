use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_recall::sound::{mixer_pair, presets, SoundDevice};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sound/render");

    for name in presets::PRESET_NAMES {
        let assets = presets::by_name(name).unwrap_or_default();
        group.bench_function(*name, |b| {
            b.iter(|| {
                for asset in &assets {
                    black_box(asset.render(black_box(SAMPLE_RATE)).ok());
                }
            })
        });
    }

    group.finish();
}

pub fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("sound/mixer");
    let assets = presets::classic();

    for &size in BLOCK_SIZES {
        let (mut device, mut mixer) = mixer_pair(SAMPLE_RATE, assets.len(), 8, 1024);
        for (index, asset) in assets.iter().enumerate() {
            if let Ok(sample) = asset.render(SAMPLE_RATE) {
                let _ = device.install(index, sample);
            }
        }
        let mut buffer = vec![0.0f32; size];

        // Four pads ringing at once, retriggered when they run out
        group.bench_with_input(BenchmarkId::new("four_voices", size), &size, |b, _| {
            b.iter(|| {
                if mixer.active_voices() == 0 {
                    for index in 0..assets.len() {
                        let _ = device.trigger(index);
                    }
                }
                mixer.render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
