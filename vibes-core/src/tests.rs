//! Integration tests for vibes-core

use crate::*;
use crate::types::{
    HapticFeedback, HapticFeedbackFlag, PredefinedEffect, Primitive, Usage,
};
use crate::types::{ImpactStyle, NotificationStyle};

fn config() -> VibesConfig {
    VibesConfig::default()
        .with_log_level(LogLevel::All)
        .with_captured_logs()
}

/// Contexto inicializado com o registro de chamadas limpo
fn ready(profile: DeviceProfile) -> (Vibes, MockHandle) {
    let platform = MockPlatform::new(profile);
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    assert!(vibes.init());
    handle.clear();
    vibes.log().clear();
    (vibes, handle)
}

fn vibrated(handle: &MockHandle) -> Vec<EffectDescriptor> {
    handle
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            MockCall::Vibrate { effect, .. } => Some(effect),
            _ => None,
        })
        .collect()
}

fn one_shot(duration_ms: u64, amplitude: Amplitude) -> EffectDescriptor {
    EffectDescriptor::new(EffectKind::OneShot {
        duration_ms,
        amplitude,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// CAPABILITY REGISTRY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_tables_are_complete_at_every_level() {
    for profile in [
        DeviceProfile::modern(),
        DeviceProfile::legacy(20),
        DeviceProfile::legacy(29),
        DeviceProfile::legacy(31),
        DeviceProfile::no_vibrator(34),
    ] {
        let (vibes, _) = ready(profile);
        let caps = vibes.capabilities().unwrap();
        assert_eq!(caps.haptic_table().len(), HapticFeedback::ALL.len());
        assert_eq!(caps.predefined_table().len(), PredefinedEffect::ALL.len());
        assert_eq!(caps.primitive_table().len(), Primitive::ALL.len());
        assert_eq!(caps.usage_table().len(), Usage::ALL.len());
    }
}

#[test]
fn test_no_vibrator_short_circuits_probe() {
    let platform = MockPlatform::new(DeviceProfile::no_vibrator(34));
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    assert_eq!(
        handle.calls(),
        vec![MockCall::OsVersion, MockCall::DefaultVibrator, MockCall::HasVibrator(0)]
    );

    let caps = vibes.capabilities().unwrap();
    assert!(!caps.has_vibrator());
    assert!(!caps.supports_effects());
    assert!(caps.haptic_table().iter().all(|(_, v)| v == SupportVerdict::No));
    assert!(caps.predefined_table().iter().all(|(_, v)| v == SupportVerdict::No));
    assert!(vibes.vibrators().is_empty());
    assert_eq!(vibes.haptic_status(), SupportVerdict::No);

    handle.clear();
    assert!(!vibes.vibrate(100, -1, false));
    assert!(!vibes.vibrate_cancel());
    assert!(!vibes.vibrate_pop());
    assert!(handle.actuations().is_empty());
}

#[test]
fn test_init_is_idempotent() {
    let platform = MockPlatform::default();
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());

    assert!(vibes.init());
    let first = handle.calls();
    assert!(vibes.init());
    assert!(vibes.init());

    assert_eq!(handle.calls(), first);
    assert_eq!(handle.count(|c| *c == MockCall::OsVersion), 1);
}

#[test]
fn test_probe_order_on_modern_device() {
    let platform = MockPlatform::default();
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    assert_eq!(
        handle.calls(),
        vec![
            MockCall::OsVersion,
            MockCall::DefaultVibrator,
            MockCall::HasVibrator(0),
            MockCall::HasAmplitudeControl(0),
            MockCall::AreEffectsSupported(0),
            MockCall::ArePrimitivesSupported(0),
            MockCall::NativeFeedbackSupported,
            MockCall::VibratorIds,
        ]
    );
}

#[test]
fn test_api_level_gating() {
    let (vibes, handle) = ready(DeviceProfile::legacy(25));
    let caps = vibes.capabilities().unwrap();

    assert!(caps.supports_haptic_feedback());
    assert!(!caps.supports_effects());
    assert!(!caps.has_amplitude_control());
    assert_eq!(caps.haptic(HapticFeedback::ContextClick), SupportVerdict::Yes);
    assert_eq!(caps.haptic(HapticFeedback::KeyboardRelease), SupportVerdict::No);
    assert_eq!(caps.predefined(PredefinedEffect::Click), SupportVerdict::No);
    assert_eq!(caps.primitive(Primitive::Click), SupportVerdict::No);
    assert_eq!(caps.usage(Usage::Touch), SupportVerdict::No);
    assert!(handle.calls().is_empty());
}

#[test]
fn test_predefined_unknown_before_query_level() {
    for api in [29, 30] {
        let platform = MockPlatform::new(DeviceProfile::legacy(api));
        let handle = platform.handle();
        let mut vibes = Vibes::new(platform, config());
        vibes.init();

        let caps = vibes.capabilities().unwrap();
        assert!(caps.predefined_table().iter().all(|(_, v)| v == SupportVerdict::Unknown));
        assert_eq!(handle.count(|c| matches!(c, MockCall::AreEffectsSupported(_))), 0);
    }

    let platform = MockPlatform::new(DeviceProfile::legacy(31));
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    vibes.init();
    assert_eq!(handle.count(|c| matches!(c, MockCall::AreEffectsSupported(_))), 1);
    assert_eq!(
        vibes.capabilities().unwrap().predefined(PredefinedEffect::Click),
        SupportVerdict::Yes
    );
}

#[test]
fn test_device_reported_effect_verdicts() {
    let profile = DeviceProfile::modern()
        .with_effect_verdict(PredefinedEffect::HeavyClick, SupportVerdict::No)
        .with_effect_verdict(PredefinedEffect::DoubleClick, SupportVerdict::Unknown);
    let (vibes, _) = ready(profile);
    let caps = vibes.capabilities().unwrap();

    assert_eq!(caps.predefined(PredefinedEffect::Click), SupportVerdict::Yes);
    assert_eq!(caps.predefined(PredefinedEffect::HeavyClick), SupportVerdict::No);
    assert_eq!(caps.predefined(PredefinedEffect::DoubleClick), SupportVerdict::Unknown);
}

#[test]
fn test_primitive_needs_level_and_device_support() {
    let (vibes, _) = ready(DeviceProfile::legacy(30).without_primitive(Primitive::Tick));
    let caps = vibes.capabilities().unwrap();

    assert_eq!(caps.primitive(Primitive::Click), SupportVerdict::Yes);
    assert_eq!(caps.primitive(Primitive::Tick), SupportVerdict::No);
    // LowTick exige API 31
    assert_eq!(caps.primitive(Primitive::LowTick), SupportVerdict::No);
}

#[test]
fn test_failing_queries_degrade_to_family_defaults() {
    let platform = MockPlatform::default().with_failures(MockFailures {
        amplitude_query: true,
        effects_query: true,
        primitives_query: true,
        vibrator_ids: true,
        ..MockFailures::default()
    });
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    let caps = vibes.capabilities().unwrap();
    assert!(caps.has_vibrator());
    assert!(!caps.has_amplitude_control());
    assert!(caps.predefined_table().iter().all(|(_, v)| v == SupportVerdict::Unknown));
    assert!(caps.primitive_table().iter().all(|(_, v)| v == SupportVerdict::No));
    assert_eq!(vibes.vibrators(), vec![0]);
    assert!(vibes.log().count(LogLevel::Warning) >= 4);
}

#[test]
fn test_short_replies_degrade() {
    let platform = MockPlatform::default().with_failures(MockFailures {
        short_replies: true,
        ..MockFailures::default()
    });
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    let caps = vibes.capabilities().unwrap();
    assert_eq!(caps.predefined(PredefinedEffect::Click), SupportVerdict::Unknown);
    assert_eq!(caps.primitive(Primitive::Click), SupportVerdict::No);
}

#[test]
fn test_os_version_failure_means_legacy() {
    let platform = MockPlatform::default().with_failures(MockFailures {
        os_version: true,
        ..MockFailures::default()
    });
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    assert_eq!(vibes.capabilities().unwrap().os_version(), 0);
    assert!(!vibes.capabilities().unwrap().supports_haptic_feedback());

    handle.clear();
    assert!(vibes.vibrate(80, -1, false));
    assert_eq!(
        handle.actuations(),
        vec![MockCall::VibrateFor { vibrator: 0, duration_ms: 80 }]
    );
}

#[test]
fn test_has_vibrator_failure_means_no_vibrator() {
    let platform = MockPlatform::default().with_failures(MockFailures {
        has_vibrator: true,
        ..MockFailures::default()
    });
    let mut vibes = Vibes::new(platform, config());
    vibes.init();

    assert!(!vibes.can_vibrate());
    assert!(vibes.vibrators().is_empty());
}

#[test]
fn test_multiple_vibrators_discovered() {
    let (vibes, _) = ready(DeviceProfile::dual_vibrator());
    assert_eq!(vibes.vibrators(), vec![1, 2]);

    let (vibes, _) = ready(DeviceProfile::dual_vibrator().with_os_version(30));
    assert_eq!(vibes.vibrators(), vec![1]);
}

// ═══════════════════════════════════════════════════════════════════════════
// DISPATCHER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_uninitialized_operations_fail() {
    let platform = MockPlatform::default();
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());

    assert!(!vibes.vibrate(100, -1, false));
    assert!(!vibes.vibrate_pattern(&[0, 100], None, -1, false));
    assert!(!vibes.vibrate_predefined(PredefinedEffect::Click, false));
    assert!(!vibes.vibrate_composition(&[Primitive::Click], None, None, false));
    assert!(!vibes.perform_haptic_feedback(HapticFeedback::Confirm, HapticFeedbackFlag::None, false));
    assert!(!vibes.vibrate_cancel());
    assert!(!vibes.vibrate_nope());
    assert!(!vibes.log_support());
    assert!(vibes.capabilities().is_none());
    assert!(vibes.support_report().is_none());

    assert!(handle.calls().is_empty());
    assert!(vibes.log().count(LogLevel::Warning) >= 7);
}

#[test]
fn test_amplitude_clamping() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert!(vibes.vibrate(100, 300, false));
    assert!(vibes.vibrate(100, -1, false));
    assert!(vibes.vibrate(100, 77, false));
    assert!(!vibes.vibrate(100, -5, false));
    assert!(!vibes.vibrate(100, 0, false));

    assert_eq!(
        vibrated(&handle),
        vec![
            one_shot(100, Amplitude::Level(255)),
            one_shot(100, Amplitude::Default),
            one_shot(100, Amplitude::Level(77)),
        ]
    );
    assert_eq!(vibes.log().count(LogLevel::Warning), 2);
}

#[test]
fn test_amplitude_without_control_uses_default() {
    let (mut vibes, handle) = ready(DeviceProfile::modern().with_amplitude_control(false));

    assert!(vibes.vibrate(60, 128, false));
    assert_eq!(vibrated(&handle), vec![one_shot(60, Amplitude::Default)]);
    assert_eq!(vibes.log().count(LogLevel::Warning), 1);
}

#[test]
fn test_waveform_validation() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert!(!vibes.vibrate_pattern(&[], None, -1, false));
    assert!(!vibes.vibrate_pattern(&[0, 100, 50], Some(&[0, 255]), -1, false));
    assert!(!vibes.vibrate_pattern(&[0, 100, 50], None, 3, false));
    assert!(!vibes.vibrate_pattern(&[0, 100, 50], None, -2, false));
    assert!(vibrated(&handle).is_empty());
    assert_eq!(vibes.log().count(LogLevel::Error), 4);

    assert!(vibes.vibrate_pattern(&[0, 100, 50], Some(&[0, 400, -9]), 1, false));
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Waveform {
            timings: vec![0, 100, 50],
            amplitudes: Some(vec![0, 255, 0]),
            repeat: Some(1),
        })]
    );
}

#[test]
fn test_waveform_drops_amplitudes_without_control() {
    let (mut vibes, handle) = ready(DeviceProfile::modern().with_amplitude_control(false));

    assert!(vibes.vibrate_pattern(&[0, 100], Some(&[0, 200]), -1, false));
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Waveform {
            timings: vec![0, 100],
            amplitudes: None,
            repeat: None,
        })]
    );
}

#[test]
fn test_legacy_pattern_is_validated() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(22));

    assert!(!vibes.vibrate_pattern(&[0, 100], None, 4, false));
    assert!(vibes.vibrate_pattern(&[0, 100, 20, 100], Some(&[1, 2, 3, 4]), 0, false));

    assert_eq!(
        handle.actuations(),
        vec![MockCall::VibratePattern {
            vibrator: 0,
            pattern: vec![0, 100, 20, 100],
            repeat: Some(0),
        }]
    );
}

#[test]
fn test_cancel_then_play_ordering() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert!(vibes.vibrate(100, -1, true));
    assert_eq!(
        handle.actuations(),
        vec![
            MockCall::Cancel(0),
            MockCall::Vibrate {
                vibrator: 0,
                effect: one_shot(100, Amplitude::Default),
            },
        ]
    );
}

#[test]
fn test_failed_cancel_aborts() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    handle.update_failures(|f| f.cancel = true);

    assert!(!vibes.vibrate(100, -1, true));
    assert!(!vibes.vibrate_predefined(PredefinedEffect::Click, true));
    assert!(!vibes.vibrate_cancel());
    assert_eq!(handle.count(|c| matches!(c, MockCall::Vibrate { .. })), 0);

    // sem pedido de cancelamento o efeito toca
    assert!(vibes.vibrate(100, -1, false));
}

#[test]
fn test_backend_failure_returns_false() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    handle.update_failures(|f| f.vibrate = true);

    assert!(!vibes.vibrate(100, -1, false));
    assert_eq!(vibes.log().count(LogLevel::Error), 1);
}

#[test]
fn test_predefined_is_tried_despite_verdict() {
    let profile = DeviceProfile::modern()
        .with_effect_verdict(PredefinedEffect::HeavyClick, SupportVerdict::No);
    let (mut vibes, handle) = ready(profile);

    assert!(vibes.vibrate_predefined(PredefinedEffect::HeavyClick, false));
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Predefined(PredefinedEffect::HeavyClick))]
    );
    assert_eq!(vibes.log().count(LogLevel::Warning), 1);
}

#[test]
fn test_predefined_unknown_warns_and_plays() {
    let (mut vibes, _) = ready(DeviceProfile::legacy(29));

    assert!(vibes.vibrate_predefined(PredefinedEffect::Tick, false));
    assert_eq!(vibes.log().count(LogLevel::Warning), 1);
}

#[test]
fn test_predefined_below_level_fails() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(28));

    assert!(!vibes.vibrate_predefined(PredefinedEffect::Click, false));
    assert!(handle.actuations().is_empty());
    assert_eq!(vibes.log().count(LogLevel::Error), 1);
}

#[test]
fn test_composition_all_or_nothing() {
    let (mut vibes, handle) = ready(DeviceProfile::modern().without_primitive(Primitive::Thud));

    assert!(!vibes.vibrate_composition(&[Primitive::Click, Primitive::Thud], None, None, false));
    assert!(vibrated(&handle).is_empty());

    assert!(vibes.vibrate_composition(
        &[Primitive::Click, Primitive::Tick],
        Some(&[2.0, -1.0]),
        Some(&[-10, 40]),
        false,
    ));
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Composition(vec![
            PrimitiveStep {
                primitive: Primitive::Click,
                scale: PrimitiveScale::Explicit(1.0),
                delay_ms: 0,
            },
            PrimitiveStep {
                primitive: Primitive::Tick,
                scale: PrimitiveScale::Default,
                delay_ms: 40,
            },
        ]))]
    );
}

#[test]
fn test_composition_length_mismatch() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert!(!vibes.vibrate_composition(&[Primitive::Click], Some(&[0.5, 0.5]), None, false));
    assert!(!vibes.vibrate_composition(&[Primitive::Click], None, Some(&[1, 2]), false));
    assert!(!vibes.vibrate_composition(&[], None, None, false));
    assert!(vibrated(&handle).is_empty());
}

#[test]
fn test_composition_builder() {
    let (vibes, _) = ready(DeviceProfile::modern());
    let builder = vibes.effect_builder().unwrap();

    assert_eq!(builder.compose().compose(), Err(BuildFailure::EmptyComposition));

    let effect = builder
        .compose()
        .add_primitive(Primitive::QuickRise)
        .add_primitive_with(Primitive::Spin, 0.25, 15)
        .compose()
        .unwrap();
    match effect.kind() {
        EffectKind::Composition(steps) => assert_eq!(steps.len(), 2),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_haptic_feedback_flag_replacement() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    assert!(vibes.perform_haptic_feedback(
        HapticFeedback::Confirm,
        HapticFeedbackFlag::IgnoreGlobalSetting,
        false,
    ));
    assert_eq!(
        handle.actuations(),
        vec![MockCall::PerformHapticFeedback {
            haptic: HapticFeedback::Confirm,
            flag: HapticFeedbackFlag::None,
        }]
    );

    let (mut vibes, handle) = ready(DeviceProfile::legacy(30));
    assert!(vibes.perform_haptic_feedback(
        HapticFeedback::Confirm,
        HapticFeedbackFlag::IgnoreGlobalSetting,
        false,
    ));
    assert_eq!(
        handle.actuations(),
        vec![MockCall::PerformHapticFeedback {
            haptic: HapticFeedback::Confirm,
            flag: HapticFeedbackFlag::IgnoreGlobalSetting,
        }]
    );
}

#[test]
fn test_unsupported_haptic_fails() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(27));

    assert!(!vibes.perform_haptic_feedback(HapticFeedback::Confirm, HapticFeedbackFlag::None, false));
    assert!(handle.actuations().is_empty());
    assert_eq!(vibes.log().count(LogLevel::Error), 1);
}

#[test]
fn test_refused_haptic_returns_false() {
    let (mut vibes, _) = ready(DeviceProfile::modern().with_haptic_accepted(false));
    assert!(!vibes.perform_haptic_feedback(HapticFeedback::KeyboardTap, HapticFeedbackFlag::None, false));
}

#[test]
fn test_haptic_status() {
    let (vibes, _) = ready(DeviceProfile::modern());
    assert_eq!(vibes.haptic_status(), SupportVerdict::Unknown);

    let (mut vibes, handle) = ready(DeviceProfile::legacy(30).with_haptic_setting(false));
    assert_eq!(vibes.haptic_status(), SupportVerdict::No);

    handle.update_profile(|p| p.haptic_feedback_enabled = true);
    assert_eq!(vibes.refresh_haptic_status(), SupportVerdict::Yes);
    assert_eq!(vibes.haptic_status(), SupportVerdict::Yes);
}

// ═══════════════════════════════════════════════════════════════════════════
// ATTRIBUTES & EFFECTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_vibrate_effect_with_attributes() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    let attributes = vibes.attributes(Usage::Touch).unwrap();
    let effect = one_shot(40, Amplitude::Default);

    assert!(vibes.vibrate_effect(&effect, Some(attributes), false));
    assert_eq!(vibrated(&handle), vec![effect.with_attributes(attributes)]);
}

#[test]
fn test_usage_gated_by_level() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(31));

    assert!(vibes.attributes(Usage::Accessibility).is_none());
    assert!(vibes.attributes(Usage::Alarm).is_some());

    let effect = one_shot(40, Amplitude::Default);
    let accessibility = VibrationAttributes::for_usage(Usage::Accessibility);
    assert!(!vibes.vibrate_effect(&effect, Some(accessibility), false));
    assert!(vibrated(&handle).is_empty());
}

#[test]
fn test_attributes_stripped_when_unsupported() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(29));
    let effect = EffectDescriptor::new(EffectKind::Predefined(PredefinedEffect::Click));
    let attributes = VibrationAttributes::for_usage(Usage::Touch);

    assert!(vibes.attributes(Usage::Touch).is_none());
    vibes.log().clear();

    assert!(vibes.vibrate_effect(&effect, Some(attributes), false));
    assert_eq!(vibrated(&handle), vec![effect]);
    assert!(vibes.log().count(LogLevel::Warning) >= 1);
}

#[test]
fn test_vibrate_effect_rechecks_descriptor() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(30));
    let effect = EffectDescriptor::new(EffectKind::Composition(vec![PrimitiveStep::new(
        Primitive::Thud,
    )]));

    assert!(!vibes.vibrate_effect(&effect, None, false));
    assert!(vibrated(&handle).is_empty());
}

#[test]
fn test_vibrate_effect_rejects_raw_amplitudes() {
    let waveform = EffectDescriptor::new(EffectKind::Waveform {
        timings: vec![0, 100, 50],
        amplitudes: Some(vec![0, 999, -7]),
        repeat: None,
    });

    let (mut vibes, handle) = ready(DeviceProfile::modern().with_amplitude_control(false));
    assert!(!vibes.vibrate_effect(&waveform, None, false));
    assert!(!vibes.vibrate_effect(&one_shot(100, Amplitude::Level(128)), None, false));
    assert!(vibrated(&handle).is_empty());
    assert_eq!(vibes.log().count(LogLevel::Error), 2);

    let builder = vibes.effect_builder().unwrap();
    assert_eq!(builder.check(&waveform), Err(BuildFailure::AmplitudeOutOfRange(999)));
    assert_eq!(
        builder.check(&one_shot(100, Amplitude::Level(128))),
        Err(BuildFailure::AmplitudeControlUnsupported)
    );
    let in_range = EffectDescriptor::new(EffectKind::Waveform {
        timings: vec![0, 100],
        amplitudes: Some(vec![0, 200]),
        repeat: None,
    });
    assert_eq!(builder.check(&in_range), Err(BuildFailure::AmplitudeControlUnsupported));

    let (mut vibes, handle) = ready(DeviceProfile::modern());
    assert!(!vibes.vibrate_effect(&waveform, None, false));
    assert!(!vibes.vibrate_effect(&one_shot(100, Amplitude::Level(0)), None, false));
    assert_eq!(
        vibes.effect_builder().unwrap().check(&one_shot(100, Amplitude::Level(0))),
        Err(BuildFailure::SilentAmplitude)
    );
    assert!(vibrated(&handle).is_empty());

    // descritores válidos continuam passando
    assert!(vibes.vibrate_effect(&in_range, None, false));
    assert!(vibes.vibrate_effect(&one_shot(100, Amplitude::Level(1)), None, false));
    assert_eq!(vibrated(&handle), vec![in_range, one_shot(100, Amplitude::Level(1))]);
}

#[test]
fn test_combined_vibration() {
    let (mut vibes, handle) = ready(DeviceProfile::dual_vibrator());
    let builder_effect = one_shot(30, Amplitude::Default);

    let combined = CombinedVibration::start_parallel()
        .add_vibrator(1, builder_effect.clone())
        .add_vibrator(2, builder_effect.clone())
        .combine()
        .unwrap();
    assert!(vibes.vibrate_combined(&combined, None, true));
    assert_eq!(
        handle.actuations(),
        vec![
            MockCall::Cancel(1),
            MockCall::VibrateCombined {
                combined: combined.clone(),
                attributes: None,
            },
        ]
    );

    let unknown = CombinedVibration::start_parallel()
        .add_vibrator(9, builder_effect)
        .combine()
        .unwrap();
    assert!(!vibes.vibrate_combined(&unknown, None, false));
}

#[test]
fn test_combined_needs_level() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(30));
    let combined = CombinedVibration::parallel(one_shot(30, Amplitude::Default));

    assert!(!vibes.vibrate_combined(&combined, None, false));
    assert!(handle.actuations().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// GESTURES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_pop_prefers_predefined() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert_eq!(
        vibes.vibrate_gesture(Gesture::Pop),
        Some(GestureRung::Predefined(PredefinedEffect::Tick))
    );
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Predefined(PredefinedEffect::Tick))]
    );
}

#[test]
fn test_pop_falls_back_to_haptic() {
    let profile = DeviceProfile::modern().with_effect_verdict(PredefinedEffect::Tick, SupportVerdict::No);
    let (mut vibes, handle) = ready(profile);

    assert!(vibes.vibrate_pop());
    assert_eq!(
        handle.actuations(),
        vec![MockCall::PerformHapticFeedback {
            haptic: HapticFeedback::KeyboardTap,
            flag: HapticFeedbackFlag::None,
        }]
    );
}

#[test]
fn test_pop_falls_through_refused_haptic() {
    let profile = DeviceProfile::modern()
        .with_effect_verdict(PredefinedEffect::Tick, SupportVerdict::No)
        .with_haptic_accepted(false);
    let (mut vibes, handle) = ready(profile);

    assert_eq!(vibes.vibrate_gesture(Gesture::Pop), Some(GestureRung::Duration(50)));
    assert_eq!(vibrated(&handle), vec![one_shot(50, Amplitude::Default)]);
}

#[test]
fn test_peek_on_legacy_device() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(25));

    assert!(vibes.vibrate_peek());
    assert_eq!(
        handle.actuations(),
        vec![MockCall::VibrateFor { vibrator: 0, duration_ms: 100 }]
    );
}

#[test]
fn test_nope_composition_and_pattern() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    assert!(vibes.vibrate_nope());
    match vibrated(&handle)[0].kind() {
        EffectKind::Composition(steps) => {
            assert_eq!(steps.len(), 3);
            assert!(steps.iter().all(|s| s.primitive == Primitive::LowTick));
        }
        other => panic!("unexpected {:?}", other),
    }

    let (mut vibes, handle) = ready(DeviceProfile::legacy(30));
    assert_eq!(
        vibes.vibrate_gesture(Gesture::Nope),
        Some(GestureRung::Pattern(&[0, 50, 100, 50, 100, 50]))
    );
    assert_eq!(
        vibrated(&handle),
        vec![EffectDescriptor::new(EffectKind::Waveform {
            timings: vec![0, 50, 100, 50, 100, 50],
            amplitudes: None,
            repeat: None,
        })]
    );
}

#[test]
fn test_gesture_restores_logging_state() {
    let profile = DeviceProfile::modern().with_effect_verdict(PredefinedEffect::Tick, SupportVerdict::No);
    let (mut vibes, handle) = ready(profile);
    handle.update_failures(|f| f.haptic = true);

    assert!(vibes.vibrate_pop());
    assert!(!vibes.log().is_paused());
    // a falha do degrau de haptic fica silenciosa
    assert_eq!(vibes.log().count(LogLevel::Error), 0);

    vibes.log_mut().set_paused(true);
    assert!(vibes.vibrate_peek());
    assert!(vibes.log().is_paused());
}

#[test]
fn test_gesture_with_nothing_playable() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());
    handle.update_failures(|f| {
        f.vibrate = true;
        f.haptic = true;
    });

    assert_eq!(vibes.vibrate_gesture(Gesture::Peek), None);
    assert!(!vibes.log().is_paused());
    assert_eq!(vibes.log().count(LogLevel::Warning), 1);
}

#[test]
fn test_vibrate_default_uses_config() {
    let platform = MockPlatform::default();
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config().with_default_duration(350));
    vibes.init();
    handle.clear();

    assert!(vibes.vibrate_default());
    assert_eq!(vibrated(&handle), vec![one_shot(350, Amplitude::Default)]);
}

#[test]
fn test_vibrate_on_off_converts_pattern() {
    let (mut vibes, handle) = ready(DeviceProfile::legacy(24));

    assert!(vibes.vibrate_on_off(&[50, 100, 50]));
    assert_eq!(
        handle.actuations(),
        vec![MockCall::VibratePattern {
            vibrator: 0,
            pattern: vec![0, 50, 100, 50],
            repeat: None,
        }]
    );
}

#[test]
fn test_vibrate_on_off_rejects_empty_pattern() {
    for profile in [DeviceProfile::legacy(22), DeviceProfile::modern()] {
        let (mut vibes, handle) = ready(profile);

        assert!(!vibes.vibrate_on_off(&[]));
        assert!(handle.actuations().is_empty());
        assert_eq!(vibes.log().count(LogLevel::Error), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// NATIVE FEEDBACK
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_ios_profile_capabilities() {
    let (vibes, _) = ready(DeviceProfile::ios());
    let caps = vibes.capabilities().unwrap();

    assert!(vibes.can_vibrate());
    assert!(caps.supports_native_feedback());
    assert!(!caps.supports_effects());
    assert!(!caps.supports_haptic_feedback());
    assert!(vibes.support_report().unwrap().features.native_feedback);

    let (vibes, _) = ready(DeviceProfile::modern());
    assert!(!vibes.capabilities().unwrap().supports_native_feedback());
    assert!(!vibes.support_report().unwrap().features.native_feedback);
}

#[test]
fn test_gestures_prefer_native_on_ios() {
    let (mut vibes, handle) = ready(DeviceProfile::ios());

    for gesture in [Gesture::Pop, Gesture::Peek, Gesture::Nope] {
        assert_eq!(vibes.vibrate_gesture(gesture), Some(GestureRung::Native));
    }
    assert_eq!(
        handle.actuations(),
        vec![
            MockCall::NativeGesture(Gesture::Pop),
            MockCall::NativeGesture(Gesture::Peek),
            MockCall::NativeGesture(Gesture::Nope),
        ]
    );
}

#[test]
fn test_failed_native_gesture_falls_back() {
    let (mut vibes, handle) = ready(DeviceProfile::ios());
    handle.update_failures(|f| f.native = true);

    assert_eq!(vibes.vibrate_gesture(Gesture::Pop), Some(GestureRung::Duration(50)));
    assert_eq!(
        handle.actuations(),
        vec![
            MockCall::NativeGesture(Gesture::Pop),
            MockCall::VibrateFor { vibrator: 0, duration_ms: 50 },
        ]
    );
}

#[test]
fn test_native_query_failure_disables_native_feedback() {
    let platform = MockPlatform::new(DeviceProfile::ios()).with_failures(MockFailures {
        native: true,
        ..MockFailures::default()
    });
    let handle = platform.handle();
    let mut vibes = Vibes::new(platform, config());
    vibes.init();
    handle.clear();

    assert!(!vibes.capabilities().unwrap().supports_native_feedback());
    assert!(vibes.log().count(LogLevel::Warning) >= 1);
    assert!(vibes.vibrate_peek());
    assert_eq!(
        handle.actuations(),
        vec![MockCall::VibrateFor { vibrator: 0, duration_ms: 100 }]
    );
}

#[test]
fn test_impact_notification_and_selection() {
    let (mut vibes, handle) = ready(DeviceProfile::ios());

    assert!(vibes.vibrate_impact(ImpactStyle::Rigid));
    assert!(vibes.vibrate_notification(NotificationStyle::Success));
    assert!(vibes.vibrate_selection_changed());
    assert_eq!(
        handle.actuations(),
        vec![
            MockCall::ImpactFeedback(ImpactStyle::Rigid),
            MockCall::NotificationFeedback(NotificationStyle::Success),
            MockCall::SelectionFeedback,
        ]
    );

    handle.update_failures(|f| f.native = true);
    assert!(!vibes.vibrate_impact(ImpactStyle::Heavy));
    assert_eq!(vibes.log().count(LogLevel::Error), 1);
}

#[test]
fn test_native_feedback_unavailable_on_android() {
    let (mut vibes, handle) = ready(DeviceProfile::modern());

    assert!(!vibes.vibrate_impact(ImpactStyle::Light));
    assert!(!vibes.vibrate_notification(NotificationStyle::Error));
    assert!(!vibes.vibrate_selection_changed());
    assert!(handle.actuations().is_empty());
    assert_eq!(vibes.log().count(LogLevel::Warning), 3);

    let (mut vibes, handle) = ready(DeviceProfile::no_vibrator(0).with_native_feedback(true));
    assert!(!vibes.vibrate_selection_changed());
    assert!(handle.actuations().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// DIAGNOSTICS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_support_report() {
    let (vibes, _) = ready(DeviceProfile::modern());
    let report = vibes.support_report().unwrap();

    assert!(report.features.composition);
    assert_eq!(report.haptic_status, SupportVerdict::Unknown);
    assert_eq!(report.vibrators.len(), 1);
    assert_eq!(report.vibrators[0].resonant_frequency, Some(150.0));
    assert_eq!(
        report.vibrators[0]
            .primitive_durations
            .as_ref()
            .and_then(|d| d.get("SlowRise"))
            .copied(),
        Some(120)
    );

    let json = report.to_json().unwrap();
    let parsed: SupportReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_vibrator_info_by_level() {
    let (vibes, _) = ready(DeviceProfile::legacy(30));
    let info = vibes.vibrator_info(0).unwrap();
    assert_eq!(info.resonant_frequency, None);
    assert_eq!(info.q_factor, None);
    assert_eq!(info.primitive_durations, None);

    assert!(vibes.vibrator_info(5).is_none());
}

#[test]
fn test_log_support_emits_json() {
    let (vibes, _) = ready(DeviceProfile::modern());
    assert!(vibes.log_support());

    let entries = vibes.log().entries();
    let last = entries.last().unwrap();
    assert_eq!(last.level, LogLevel::All);
    assert!(last.message.contains("\"predefined_effects\""));
}

#[test]
fn test_parse_ids_for_dispatch() {
    let primitives: Vec<Primitive> = types::parse_ids(&[8, 8, 8]).unwrap();
    let (mut vibes, _) = ready(DeviceProfile::modern());
    assert!(vibes.vibrate_composition(&primitives, None, None, false));

    let err = types::parse_ids::<Primitive>(&[8, 42]).unwrap_err();
    assert_eq!(err.to_string(), "Value 42 is not defined in Primitive");
}

#[test]
fn test_isolated_contexts() {
    let (mut modern, modern_calls) = ready(DeviceProfile::modern());
    let (mut legacy, legacy_calls) = ready(DeviceProfile::legacy(22));

    assert!(modern.vibrate(10, -1, false));
    assert!(legacy.vibrate(10, -1, false));

    assert_eq!(modern_calls.actuations().len(), 1);
    assert!(matches!(legacy_calls.actuations()[0], MockCall::VibrateFor { .. }));
}
