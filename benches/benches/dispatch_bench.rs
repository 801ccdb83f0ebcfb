//! # Dispatch Benchmarks
//!
//! Construção de efeitos e despacho pelo contexto até o backend simulado.
//!
//! Run: `cargo bench --bench dispatch_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vibes_core::types::{PredefinedEffect, Primitive};
use vibes_core::{DeviceProfile, Gesture, MockPlatform, Vibes, VibesConfig};
use vibes_web::{SimulatedNavigator, WebPlatform};

fn context(profile: DeviceProfile) -> (Vibes, vibes_core::MockHandle) {
    let platform = MockPlatform::new(profile);
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, VibesConfig::default());
    vibes.init();
    (vibes, handle)
}

/// Validação sem backend
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let (vibes, _) = context(DeviceProfile::modern());
    let builder = vibes.effect_builder().expect("initialized");

    group.bench_function("one_shot", |b| {
        b.iter(|| black_box(builder.one_shot(black_box(120), black_box(200))))
    });

    for len in [2usize, 16, 128] {
        let pattern: Vec<u64> = (0..len as u64).map(|i| 10 + i).collect();
        let amplitudes: Vec<i32> = (0..len as i32).map(|i| (i * 37) % 300).collect();
        group.bench_with_input(BenchmarkId::new("waveform", len), &len, |b, _| {
            b.iter(|| black_box(builder.waveform(&pattern, Some(&amplitudes), -1)))
        });
    }

    let primitives = [Primitive::Click, Primitive::Tick, Primitive::LowTick, Primitive::Thud];
    group.bench_function("composition", |b| {
        b.iter(|| black_box(builder.composition(&primitives, Some(&[0.5, 0.7, 1.2, -1.0]), None)))
    });

    group.finish();
}

/// Despacho completo
fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let (mut modern, handle) = context(DeviceProfile::modern());
    group.bench_function("vibrate_modern", |b| {
        b.iter(|| {
            handle.clear();
            black_box(modern.vibrate(black_box(80), -1, true))
        })
    });

    group.bench_function("predefined_modern", |b| {
        b.iter(|| {
            handle.clear();
            black_box(modern.vibrate_predefined(PredefinedEffect::Click, false))
        })
    });

    let (mut legacy, legacy_handle) = context(DeviceProfile::legacy(22));
    group.bench_function("vibrate_legacy", |b| {
        b.iter(|| {
            legacy_handle.clear();
            black_box(legacy.vibrate(black_box(80), -1, false))
        })
    });

    let navigator = SimulatedNavigator::default();
    let mut web = Vibes::new(WebPlatform::new(navigator.clone()), VibesConfig::default());
    web.init();
    group.bench_function("pattern_web", |b| {
        b.iter(|| {
            navigator.clear();
            black_box(web.vibrate_pattern(&[0, 50, 100, 50], None, -1, false))
        })
    });

    group.finish();
}

/// Cadeias de fallback
fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("gestures");

    for (name, profile) in [
        ("modern", DeviceProfile::modern()),
        ("api_30", DeviceProfile::legacy(30)),
        ("api_22", DeviceProfile::legacy(22)),
        ("ios", DeviceProfile::ios()),
    ] {
        let (mut vibes, handle) = context(profile);
        for gesture in [Gesture::Pop, Gesture::Nope] {
            group.bench_function(BenchmarkId::new(format!("{:?}", gesture), name), |b| {
                b.iter(|| {
                    handle.clear();
                    black_box(vibes.vibrate_gesture(gesture))
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_dispatch, bench_gestures);
criterion_main!(benches);
