//! Backend simulado
//!
//! Simula um dispositivo Android em qualquer nível de API, ou um iOS com
//! feedback nativo ([`DeviceProfile::ios`]). Todas as chamadas
//! ficam registradas em estado compartilhado, inspecionável por um
//! [`MockHandle`] mesmo depois que a plataforma foi entregue ao contexto.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::attributes::VibrationAttributes;
use crate::backend::{PlatformBackend, VibratorBackend};
use crate::combined::CombinedVibration;
use crate::effect::EffectDescriptor;
use crate::error::{BackendError, BackendResult};
use crate::types::{
    Gesture, HapticFeedback, HapticFeedbackFlag, ImpactStyle, NotificationStyle, PredefinedEffect,
    Primitive, SupportVerdict,
};

// ═══════════════════════════════════════════════════════════════════════════════
// PERFIL
// ═══════════════════════════════════════════════════════════════════════════════

/// Perfil do dispositivo simulado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub os_version: u32,
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
    /// Veredictos que diferem de `Yes`
    pub effect_verdicts: Vec<(PredefinedEffect, SupportVerdict)>,
    pub unsupported_primitives: Vec<Primitive>,
    /// Primeiro id é o vibrador padrão
    pub vibrator_ids: Vec<i32>,
    pub haptic_feedback_enabled: bool,
    /// Resposta de `perform_haptic_feedback`
    pub haptic_accepted: bool,
    pub resonant_frequency: Option<f32>,
    pub q_factor: Option<f32>,
    /// Gestos e geradores de feedback da plataforma
    pub native_feedback: bool,
}

impl DeviceProfile {
    /// Dispositivo atual (API 34), com tudo suportado
    pub fn modern() -> Self {
        Self {
            os_version: 34,
            has_vibrator: true,
            has_amplitude_control: true,
            effect_verdicts: Vec::new(),
            unsupported_primitives: Vec::new(),
            vibrator_ids: vec![0],
            haptic_feedback_enabled: true,
            haptic_accepted: true,
            resonant_frequency: Some(150.0),
            q_factor: Some(12.5),
            native_feedback: false,
        }
    }

    /// Dispositivo num nível de API antigo
    pub fn legacy(os_version: u32) -> Self {
        Self {
            os_version,
            has_amplitude_control: os_version >= 26,
            resonant_frequency: None,
            q_factor: None,
            ..Self::modern()
        }
    }

    pub fn no_vibrator(os_version: u32) -> Self {
        Self {
            has_vibrator: false,
            has_amplitude_control: false,
            ..Self::legacy(os_version)
        }
    }

    /// iPhone: sem nível de API Android, só chamadas legadas e feedback nativo
    pub fn ios() -> Self {
        Self {
            native_feedback: true,
            ..Self::legacy(0)
        }
    }

    /// Dois motores (ids 1 e 2)
    pub fn dual_vibrator() -> Self {
        Self {
            vibrator_ids: vec![1, 2],
            ..Self::modern()
        }
    }

    pub fn with_os_version(mut self, os_version: u32) -> Self {
        self.os_version = os_version;
        self
    }

    pub fn with_amplitude_control(mut self, enabled: bool) -> Self {
        self.has_amplitude_control = enabled;
        self
    }

    pub fn with_effect_verdict(mut self, effect: PredefinedEffect, verdict: SupportVerdict) -> Self {
        self.effect_verdicts.retain(|(e, _)| *e != effect);
        self.effect_verdicts.push((effect, verdict));
        self
    }

    pub fn without_primitive(mut self, primitive: Primitive) -> Self {
        self.unsupported_primitives.push(primitive);
        self
    }

    pub fn with_vibrator_ids(mut self, ids: Vec<i32>) -> Self {
        self.vibrator_ids = ids;
        self
    }

    pub fn with_haptic_setting(mut self, enabled: bool) -> Self {
        self.haptic_feedback_enabled = enabled;
        self
    }

    pub fn with_haptic_accepted(mut self, accepted: bool) -> Self {
        self.haptic_accepted = accepted;
        self
    }

    pub fn with_native_feedback(mut self, enabled: bool) -> Self {
        self.native_feedback = enabled;
        self
    }

    pub fn default_vibrator_id(&self) -> i32 {
        self.vibrator_ids.first().copied().unwrap_or(0)
    }

    fn effect_verdict(&self, effect: PredefinedEffect) -> SupportVerdict {
        self.effect_verdicts
            .iter()
            .find(|(e, _)| *e == effect)
            .map(|(_, v)| *v)
            .unwrap_or(SupportVerdict::Yes)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::modern()
    }
}

/// Falhas injetáveis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockFailures {
    pub os_version: bool,
    pub default_vibrator: bool,
    pub has_vibrator: bool,
    pub amplitude_query: bool,
    pub effects_query: bool,
    pub primitives_query: bool,
    /// Respostas de consulta com um elemento a menos
    pub short_replies: bool,
    pub vibrator_ids: bool,
    pub vibrate: bool,
    pub cancel: bool,
    pub haptic: bool,
    /// Consulta e chamadas de feedback nativo
    pub native: bool,
}

/// Chamada registrada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MockCall {
    OsVersion,
    DefaultVibrator,
    VibratorIds,
    Vibrator(i32),
    HasVibrator(i32),
    HasAmplitudeControl(i32),
    AreEffectsSupported(i32),
    ArePrimitivesSupported(i32),
    Vibrate { vibrator: i32, effect: EffectDescriptor },
    VibrateFor { vibrator: i32, duration_ms: u64 },
    VibratePattern { vibrator: i32, pattern: Vec<u64>, repeat: Option<usize> },
    Cancel(i32),
    PerformHapticFeedback { haptic: HapticFeedback, flag: HapticFeedbackFlag },
    HapticFeedbackEnabled,
    VibrateCombined { combined: CombinedVibration, attributes: Option<VibrationAttributes> },
    PrimitiveDurations(i32),
    ResonantFrequency(i32),
    QFactor(i32),
    NativeFeedbackSupported,
    NativeGesture(Gesture),
    ImpactFeedback(ImpactStyle),
    NotificationFeedback(NotificationStyle),
    SelectionFeedback,
}

impl MockCall {
    /// Chamada que aciona o motor (ou o cancela)
    pub fn is_actuation(&self) -> bool {
        matches!(
            self,
            MockCall::Vibrate { .. }
                | MockCall::VibrateFor { .. }
                | MockCall::VibratePattern { .. }
                | MockCall::Cancel(_)
                | MockCall::PerformHapticFeedback { .. }
                | MockCall::VibrateCombined { .. }
                | MockCall::NativeGesture(_)
                | MockCall::ImpactFeedback(_)
                | MockCall::NotificationFeedback(_)
                | MockCall::SelectionFeedback
        )
    }
}

#[derive(Debug)]
struct MockState {
    profile: DeviceProfile,
    failures: MockFailures,
    calls: Vec<MockCall>,
}

type SharedState = Arc<Mutex<MockState>>;

fn lock(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn fail_if(failing: bool, what: &str) -> BackendResult<()> {
    if failing {
        Err(BackendError::CallFailed(format!("simulated {} failure", what)))
    } else {
        Ok(())
    }
}

fn query_fail_if(failing: bool, what: &str) -> BackendResult<()> {
    if failing {
        Err(BackendError::QueryFailed(format!("simulated {} failure", what)))
    } else {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLATAFORMA
// ═══════════════════════════════════════════════════════════════════════════════

/// Plataforma simulada
#[derive(Debug, Clone)]
pub struct MockPlatform {
    state: SharedState,
}

impl MockPlatform {
    pub fn new(profile: DeviceProfile) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                profile,
                failures: MockFailures::default(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_failures(self, failures: MockFailures) -> Self {
        lock(&self.state).failures = failures;
        self
    }

    /// Handle de inspeção que compartilha o estado
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: Arc::clone(&self.state),
        }
    }

    fn record(&self, call: MockCall) {
        lock(&self.state).calls.push(call);
    }

    fn native_call(&self, call: MockCall) -> BackendResult<()> {
        self.record(call);
        let state = lock(&self.state);
        if !state.profile.native_feedback {
            return Err(BackendError::Unsupported("native feedback".into()));
        }
        fail_if(state.failures.native, "native feedback")
    }

    fn vibrator_for(&self, id: i32) -> Box<dyn VibratorBackend> {
        Box::new(MockVibrator {
            id,
            state: Arc::clone(&self.state),
        })
    }
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new(DeviceProfile::modern())
    }
}

impl PlatformBackend for MockPlatform {
    fn os_version(&self) -> BackendResult<u32> {
        self.record(MockCall::OsVersion);
        let state = lock(&self.state);
        query_fail_if(state.failures.os_version, "os version")?;
        Ok(state.profile.os_version)
    }

    fn default_vibrator(&mut self) -> BackendResult<Box<dyn VibratorBackend>> {
        self.record(MockCall::DefaultVibrator);
        let id = {
            let state = lock(&self.state);
            query_fail_if(state.failures.default_vibrator, "default vibrator")?;
            state.profile.default_vibrator_id()
        };
        Ok(self.vibrator_for(id))
    }

    fn vibrator_ids(&self) -> BackendResult<Vec<i32>> {
        self.record(MockCall::VibratorIds);
        let state = lock(&self.state);
        query_fail_if(state.failures.vibrator_ids, "vibrator ids")?;
        Ok(state.profile.vibrator_ids.clone())
    }

    fn vibrator(&mut self, id: i32) -> BackendResult<Box<dyn VibratorBackend>> {
        self.record(MockCall::Vibrator(id));
        if !lock(&self.state).profile.vibrator_ids.contains(&id) {
            return Err(BackendError::VibratorNotFound(id));
        }
        Ok(self.vibrator_for(id))
    }

    fn perform_haptic_feedback(
        &mut self,
        haptic: HapticFeedback,
        flag: HapticFeedbackFlag,
    ) -> BackendResult<bool> {
        self.record(MockCall::PerformHapticFeedback { haptic, flag });
        let state = lock(&self.state);
        fail_if(state.failures.haptic, "haptic feedback")?;
        Ok(state.profile.haptic_accepted)
    }

    fn haptic_feedback_enabled(&self) -> BackendResult<bool> {
        self.record(MockCall::HapticFeedbackEnabled);
        Ok(lock(&self.state).profile.haptic_feedback_enabled)
    }

    fn vibrate_combined(
        &mut self,
        combined: &CombinedVibration,
        attributes: Option<&VibrationAttributes>,
    ) -> BackendResult<()> {
        self.record(MockCall::VibrateCombined {
            combined: combined.clone(),
            attributes: attributes.copied(),
        });
        fail_if(lock(&self.state).failures.vibrate, "vibrate")
    }

    fn supports_native_feedback(&self) -> BackendResult<bool> {
        self.record(MockCall::NativeFeedbackSupported);
        let state = lock(&self.state);
        query_fail_if(state.failures.native, "native feedback query")?;
        Ok(state.profile.native_feedback)
    }

    fn native_gesture(&mut self, gesture: Gesture) -> BackendResult<()> {
        self.native_call(MockCall::NativeGesture(gesture))
    }

    fn impact_feedback(&mut self, style: ImpactStyle) -> BackendResult<()> {
        self.native_call(MockCall::ImpactFeedback(style))
    }

    fn notification_feedback(&mut self, style: NotificationStyle) -> BackendResult<()> {
        self.native_call(MockCall::NotificationFeedback(style))
    }

    fn selection_feedback(&mut self) -> BackendResult<()> {
        self.native_call(MockCall::SelectionFeedback)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIBRADOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Vibrador simulado
#[derive(Debug)]
pub struct MockVibrator {
    id: i32,
    state: SharedState,
}

impl MockVibrator {
    fn record(&self, call: MockCall) {
        lock(&self.state).calls.push(call);
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }
}

impl VibratorBackend for MockVibrator {
    fn id(&self) -> i32 {
        self.id
    }

    fn has_vibrator(&self) -> BackendResult<bool> {
        self.record(MockCall::HasVibrator(self.id));
        let state = self.state();
        query_fail_if(state.failures.has_vibrator, "hasVibrator")?;
        Ok(state.profile.has_vibrator)
    }

    fn has_amplitude_control(&self) -> BackendResult<bool> {
        self.record(MockCall::HasAmplitudeControl(self.id));
        let state = self.state();
        query_fail_if(state.failures.amplitude_query, "hasAmplitudeControl")?;
        Ok(state.profile.has_amplitude_control)
    }

    fn are_effects_supported(&self, effects: &[PredefinedEffect]) -> BackendResult<Vec<SupportVerdict>> {
        self.record(MockCall::AreEffectsSupported(self.id));
        let state = self.state();
        query_fail_if(state.failures.effects_query, "areEffectsSupported")?;
        let mut verdicts: Vec<_> = effects.iter().map(|&e| state.profile.effect_verdict(e)).collect();
        if state.failures.short_replies {
            verdicts.pop();
        }
        Ok(verdicts)
    }

    fn are_primitives_supported(&self, primitives: &[Primitive]) -> BackendResult<Vec<bool>> {
        self.record(MockCall::ArePrimitivesSupported(self.id));
        let state = self.state();
        query_fail_if(state.failures.primitives_query, "arePrimitivesSupported")?;
        let mut reported: Vec<_> = primitives
            .iter()
            .map(|p| !state.profile.unsupported_primitives.contains(p))
            .collect();
        if state.failures.short_replies {
            reported.pop();
        }
        Ok(reported)
    }

    fn vibrate(&mut self, effect: &EffectDescriptor) -> BackendResult<()> {
        self.record(MockCall::Vibrate {
            vibrator: self.id,
            effect: effect.clone(),
        });
        fail_if(self.state().failures.vibrate, "vibrate")
    }

    fn vibrate_for(&mut self, duration_ms: u64) -> BackendResult<()> {
        self.record(MockCall::VibrateFor {
            vibrator: self.id,
            duration_ms,
        });
        fail_if(self.state().failures.vibrate, "vibrate")
    }

    fn vibrate_pattern(&mut self, pattern: &[u64], repeat: Option<usize>) -> BackendResult<()> {
        self.record(MockCall::VibratePattern {
            vibrator: self.id,
            pattern: pattern.to_vec(),
            repeat,
        });
        fail_if(self.state().failures.vibrate, "vibrate")
    }

    fn cancel(&mut self) -> BackendResult<()> {
        self.record(MockCall::Cancel(self.id));
        fail_if(self.state().failures.cancel, "cancel")
    }

    fn primitive_durations(&self, primitives: &[Primitive]) -> BackendResult<Vec<u32>> {
        self.record(MockCall::PrimitiveDurations(self.id));
        if self.state().profile.os_version < crate::types::api::PRIMITIVE_DURATIONS {
            return Err(BackendError::Unsupported("primitive durations".into()));
        }
        Ok(primitives.iter().map(|p| match p {
            Primitive::Click | Primitive::Tick | Primitive::LowTick => 12,
            Primitive::Thud => 30,
            Primitive::Spin => 60,
            Primitive::QuickRise | Primitive::QuickFall => 40,
            Primitive::SlowRise => 120,
        }).collect())
    }

    fn resonant_frequency(&self) -> BackendResult<f32> {
        self.record(MockCall::ResonantFrequency(self.id));
        self.state()
            .profile
            .resonant_frequency
            .ok_or_else(|| BackendError::Unsupported("resonant frequency".into()))
    }

    fn q_factor(&self) -> BackendResult<f32> {
        self.record(MockCall::QFactor(self.id));
        self.state()
            .profile
            .q_factor
            .ok_or_else(|| BackendError::Unsupported("q factor".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INSPEÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Acesso ao estado simulado
#[derive(Debug, Clone)]
pub struct MockHandle {
    state: SharedState,
}

impl MockHandle {
    pub fn calls(&self) -> Vec<MockCall> {
        lock(&self.state).calls.clone()
    }

    /// Apenas chamadas que acionam o motor
    pub fn actuations(&self) -> Vec<MockCall> {
        lock(&self.state)
            .calls
            .iter()
            .filter(|c| c.is_actuation())
            .cloned()
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        lock(&self.state).calls.iter().filter(|c| predicate(c)).count()
    }

    pub fn clear(&self) {
        lock(&self.state).calls.clear();
    }

    pub fn set_failures(&self, failures: MockFailures) {
        lock(&self.state).failures = failures;
    }

    pub fn update_failures(&self, f: impl FnOnce(&mut MockFailures)) {
        f(&mut lock(&self.state).failures);
    }

    pub fn update_profile(&self, f: impl FnOnce(&mut DeviceProfile)) {
        f(&mut lock(&self.state).profile);
    }
}
