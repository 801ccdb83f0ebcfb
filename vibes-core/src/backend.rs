//! Backends de plataforma
//!
//! O núcleo não vibra nada sozinho: toda chamada termina em um
//! [`VibratorBackend`] (um atuador) ou no [`PlatformBackend`] (o dispositivo).
//!
//! ## Pré-condição
//!
//! As chamadas devem partir da thread designada pela plataforma (por exemplo a
//! thread de UI no Android). O núcleo não agenda nada.

use std::fmt;

use crate::attributes::VibrationAttributes;
use crate::combined::CombinedVibration;
use crate::effect::EffectDescriptor;
use crate::error::{BackendError, BackendResult};
use crate::logging::VibesLog;
use crate::types::{
    Gesture, HapticFeedback, HapticFeedbackFlag, ImpactStyle, NotificationStyle, PredefinedEffect,
    Primitive, SupportVerdict,
};

/// Um atuador físico
pub trait VibratorBackend: Send + fmt::Debug {
    /// Id do vibrador (0 no vibrador padrão de dispositivos com um só motor)
    fn id(&self) -> i32;

    fn has_vibrator(&self) -> BackendResult<bool>;

    fn has_amplitude_control(&self) -> BackendResult<bool>;

    /// Um veredicto por efeito, na ordem pedida
    fn are_effects_supported(&self, effects: &[PredefinedEffect]) -> BackendResult<Vec<SupportVerdict>>;

    /// Um booleano por primitiva, na ordem pedida
    fn are_primitives_supported(&self, primitives: &[Primitive]) -> BackendResult<Vec<bool>>;

    /// Toca um efeito (com atributos, se o descritor carregar algum)
    fn vibrate(&mut self, effect: &EffectDescriptor) -> BackendResult<()>;

    /// Vibração legada por duração
    fn vibrate_for(&mut self, duration_ms: u64) -> BackendResult<()>;

    /// Vibração legada por padrão off/on
    fn vibrate_pattern(&mut self, pattern: &[u64], repeat: Option<usize>) -> BackendResult<()>;

    fn cancel(&mut self) -> BackendResult<()>;

    /// Duração de cada primitiva em ms
    fn primitive_durations(&self, _primitives: &[Primitive]) -> BackendResult<Vec<u32>> {
        Err(BackendError::Unsupported("primitive durations".into()))
    }

    /// Frequência de ressonância (Hz)
    fn resonant_frequency(&self) -> BackendResult<f32> {
        Err(BackendError::Unsupported("resonant frequency".into()))
    }

    fn q_factor(&self) -> BackendResult<f32> {
        Err(BackendError::Unsupported("q factor".into()))
    }
}

/// O dispositivo
pub trait PlatformBackend: Send + fmt::Debug {
    /// Nível de API do sistema
    fn os_version(&self) -> BackendResult<u32>;

    fn default_vibrator(&mut self) -> BackendResult<Box<dyn VibratorBackend>>;

    /// Ids de todos os vibradores (plataformas com múltiplos motores)
    fn vibrator_ids(&self) -> BackendResult<Vec<i32>> {
        Err(BackendError::Unsupported("vibrator ids".into()))
    }

    fn vibrator(&mut self, id: i32) -> BackendResult<Box<dyn VibratorBackend>> {
        Err(BackendError::VibratorNotFound(id))
    }

    /// Haptic feedback pela view; `Ok(false)` se a plataforma recusou
    fn perform_haptic_feedback(
        &mut self,
        haptic: HapticFeedback,
        flag: HapticFeedbackFlag,
    ) -> BackendResult<bool>;

    /// Configuração de haptic feedback do usuário
    fn haptic_feedback_enabled(&self) -> BackendResult<bool> {
        Err(BackendError::Unsupported("haptic feedback setting".into()))
    }

    fn vibrate_combined(
        &mut self,
        _combined: &CombinedVibration,
        _attributes: Option<&VibrationAttributes>,
    ) -> BackendResult<()> {
        Err(BackendError::Unsupported("combined vibration".into()))
    }

    // Feedback nativo (iOS): gestos e geradores de feedback tocados pela plataforma

    /// Se a plataforma toca gestos e estilos de feedback por conta própria
    fn supports_native_feedback(&self) -> BackendResult<bool> {
        Ok(false)
    }

    fn native_gesture(&mut self, _gesture: Gesture) -> BackendResult<()> {
        Err(BackendError::Unsupported("native gestures".into()))
    }

    fn impact_feedback(&mut self, _style: ImpactStyle) -> BackendResult<()> {
        Err(BackendError::Unsupported("impact feedback".into()))
    }

    fn notification_feedback(&mut self, _style: NotificationStyle) -> BackendResult<()> {
        Err(BackendError::Unsupported("notification feedback".into()))
    }

    fn selection_feedback(&mut self) -> BackendResult<()> {
        Err(BackendError::Unsupported("selection feedback".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// HANDLE
// ═══════════════════════════════════════════════════════════════════════════════

/// Handle de um vibrador descoberto na inicialização
///
/// Dono do backend; o recurso é liberado quando o handle sai de escopo.
#[derive(Debug)]
pub struct VibratorHandle {
    backend: Box<dyn VibratorBackend>,
}

impl VibratorHandle {
    pub fn new(backend: Box<dyn VibratorBackend>) -> Self {
        Self { backend }
    }

    pub fn id(&self) -> i32 {
        self.backend.id()
    }

    pub fn backend(&self) -> &dyn VibratorBackend {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> &mut dyn VibratorBackend {
        self.backend.as_mut()
    }

    /// Toca o efeito; atributos sem suporte são descartados com aviso
    pub fn play(
        &mut self,
        effect: &EffectDescriptor,
        attributes_supported: bool,
        log: &VibesLog,
    ) -> BackendResult<()> {
        if effect.attributes().is_some() && !attributes_supported {
            log.warn("This device has no support for Vibration Attributes, vibrating without them");
            let plain = effect.clone().without_attributes();
            return self.backend.vibrate(&plain);
        }
        self.backend.vibrate(effect)
    }

    pub fn vibrate_for(&mut self, duration_ms: u64) -> BackendResult<()> {
        self.backend.vibrate_for(duration_ms)
    }

    pub fn vibrate_pattern(&mut self, pattern: &[u64], repeat: Option<usize>) -> BackendResult<()> {
        self.backend.vibrate_pattern(pattern, repeat)
    }

    pub fn cancel(&mut self) -> BackendResult<()> {
        self.backend.cancel()
    }
}
