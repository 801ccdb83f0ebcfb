//! Plataforma web
//!
//! O navegador não tem níveis de API: a plataforma reporta versão 0, o que
//! leva o dispatcher pelas chamadas legadas (`vibrate_for`, `vibrate_pattern`).
//! Sem controle de amplitude, efeitos predefinidos, primitivas ou haptic feedback.

use vibes_core::pattern;
use vibes_core::types::{HapticFeedback, HapticFeedbackFlag, PredefinedEffect, Primitive, SupportVerdict};
use vibes_core::{BackendResult, EffectDescriptor, EffectKind, PlatformBackend, VibratorBackend};

use crate::api::VibrateApi;
use crate::error::{WebError, WebResult};

/// Id do único vibrador exposto
pub const WEB_VIBRATOR_ID: i32 = 0;

/// Nível reportado ao núcleo
pub const WEB_OS_VERSION: u32 = 0;

fn to_ms(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLATAFORMA
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct WebPlatform<A> {
    api: A,
}

impl<A: VibrateApi + Clone + 'static> WebPlatform<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

impl<A: VibrateApi + Clone + 'static> PlatformBackend for WebPlatform<A> {
    fn os_version(&self) -> BackendResult<u32> {
        Ok(WEB_OS_VERSION)
    }

    fn default_vibrator(&mut self) -> BackendResult<Box<dyn VibratorBackend>> {
        Ok(Box::new(WebVibrator::new(self.api.clone())))
    }

    fn perform_haptic_feedback(
        &mut self,
        _haptic: HapticFeedback,
        _flag: HapticFeedbackFlag,
    ) -> BackendResult<bool> {
        Err(WebError::Unsupported("haptic feedback").into())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIBRADOR
// ═══════════════════════════════════════════════════════════════════════════════

/// O motor do dispositivo, visto pelo navegador
#[derive(Debug, Clone)]
pub struct WebVibrator<A> {
    api: A,
}

impl<A: VibrateApi> WebVibrator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    fn accepted(&self, accepted: bool) -> WebResult<()> {
        if accepted {
            Ok(())
        } else {
            log::debug!(target: "vibes", "navigator.vibrate returned false");
            Err(WebError::Rejected)
        }
    }

    fn duration(&self, duration_ms: u64) -> WebResult<()> {
        self.accepted(self.api.vibrate_ms(to_ms(duration_ms)))
    }

    /// Recebe off/on, envia on/off
    fn pattern(&self, off_on: &[u64], repeat: Option<usize>) -> WebResult<()> {
        if repeat.is_some() {
            return Err(WebError::RepeatUnsupported);
        }
        let on_off: Vec<u32> = pattern::off_on_to_on_off(off_on)
            .into_iter()
            .map(to_ms)
            .collect();
        self.accepted(self.api.vibrate_pattern(&on_off))
    }
}

impl<A: VibrateApi> VibratorBackend for WebVibrator<A> {
    fn id(&self) -> i32 {
        WEB_VIBRATOR_ID
    }

    fn has_vibrator(&self) -> BackendResult<bool> {
        Ok(self.api.is_available())
    }

    fn has_amplitude_control(&self) -> BackendResult<bool> {
        Ok(false)
    }

    fn are_effects_supported(&self, _effects: &[PredefinedEffect]) -> BackendResult<Vec<SupportVerdict>> {
        Err(WebError::Unsupported("predefined effects").into())
    }

    fn are_primitives_supported(&self, _primitives: &[Primitive]) -> BackendResult<Vec<bool>> {
        Err(WebError::Unsupported("composition primitives").into())
    }

    /// Só one-shots e waveforms sem repetição; amplitudes são ignoradas
    fn vibrate(&mut self, effect: &EffectDescriptor) -> BackendResult<()> {
        match effect.kind() {
            EffectKind::OneShot { duration_ms, .. } => self.duration(*duration_ms)?,
            EffectKind::Waveform { timings, repeat, .. } => self.pattern(timings, *repeat)?,
            EffectKind::Predefined(_) => return Err(WebError::Unsupported("predefined effects").into()),
            EffectKind::Composition(_) => return Err(WebError::Unsupported("compositions").into()),
        }
        Ok(())
    }

    fn vibrate_for(&mut self, duration_ms: u64) -> BackendResult<()> {
        self.duration(duration_ms).map_err(Into::into)
    }

    fn vibrate_pattern(&mut self, pattern: &[u64], repeat: Option<usize>) -> BackendResult<()> {
        self.pattern(pattern, repeat).map_err(Into::into)
    }

    fn cancel(&mut self) -> BackendResult<()> {
        self.duration(0).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NavigatorCall, SimulatedNavigator};
    use vibes_core::Amplitude;

    #[test]
    fn test_to_ms_saturates() {
        assert_eq!(to_ms(250), 250);
        assert_eq!(to_ms(u64::MAX), u32::MAX);
    }

    #[test]
    fn test_vibrator_translates_effects() {
        let navigator = SimulatedNavigator::default();
        let mut vibrator = WebVibrator::new(navigator.clone());

        let one_shot = EffectDescriptor::new(EffectKind::OneShot {
            duration_ms: 90,
            amplitude: Amplitude::Level(10),
        });
        vibrator.vibrate(&one_shot).unwrap();

        let waveform = EffectDescriptor::new(EffectKind::Waveform {
            timings: vec![0, 40, 20, 40],
            amplitudes: Some(vec![0, 255, 0, 255]),
            repeat: None,
        });
        vibrator.vibrate(&waveform).unwrap();

        assert_eq!(
            navigator.calls(),
            vec![NavigatorCall::Duration(90), NavigatorCall::Pattern(vec![40, 20, 40])]
        );

        let predefined = EffectDescriptor::new(EffectKind::Predefined(PredefinedEffect::Click));
        assert!(vibrator.vibrate(&predefined).is_err());
    }
}
