//! # Capability Benchmarks
//!
//! Sondagem do dispositivo e consulta às tabelas de suporte.
//!
//! Run: `cargo bench --bench capability_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vibes_core::capability;
use vibes_core::types::{HapticFeedback, PredefinedEffect, Primitive};
use vibes_core::{DeviceProfile, FeatureId, MockPlatform, SupportReport, VibesLog};

/// Sondagem completa por nível de API
fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe");
    let log = VibesLog::default();

    for api in [20u32, 26, 29, 30, 31, 34] {
        let profile = DeviceProfile::legacy(api);
        group.bench_with_input(BenchmarkId::new("legacy", api), &profile, |b, profile| {
            b.iter(|| {
                let mut platform = MockPlatform::new(profile.clone());
                black_box(capability::probe(&mut platform, &log))
            })
        });
    }

    group.bench_function("dual_vibrator", |b| {
        b.iter(|| {
            let mut platform = MockPlatform::new(DeviceProfile::dual_vibrator());
            black_box(capability::probe(&mut platform, &log))
        })
    });

    group.bench_function("no_vibrator", |b| {
        b.iter(|| {
            let mut platform = MockPlatform::new(DeviceProfile::no_vibrator(34));
            black_box(capability::probe(&mut platform, &log))
        })
    });

    group.finish();
}

/// Consultas ao snapshot
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let log = VibesLog::default();
    let mut platform = MockPlatform::default();
    let caps = capability::probe(&mut platform, &log).capabilities;

    group.bench_function("haptic_all", |b| {
        b.iter(|| {
            for &haptic in HapticFeedback::ALL {
                black_box(caps.haptic(haptic));
            }
        })
    });

    group.bench_function("predefined_all", |b| {
        b.iter(|| {
            for &effect in PredefinedEffect::ALL {
                black_box(caps.predefined(effect));
            }
        })
    });

    group.bench_function("primitive_from_raw", |b| {
        b.iter(|| black_box(Primitive::from_raw(black_box(8))))
    });

    group.bench_function("support_report_json", |b| {
        b.iter(|| {
            let report = SupportReport::new(&caps, black_box(caps.haptic(HapticFeedback::Confirm)), Vec::new());
            black_box(report.to_json())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_probe, bench_lookup);
criterion_main!(benches);
