//! Dispatcher: contexto de vibração
//!
//! Dono do backend de plataforma, do snapshot de capacidades e dos handles de
//! vibrador. Cada operação devolve `bool`: se a chamada pôde ser emitida, não
//! se o motor de fato se moveu.
//!
//! ## Protocolo por operação
//!
//! 1. cancelar antes, se pedido; cancelamento falho aborta sem tocar nada
//! 2. abaixo da API de efeitos, chamadas legadas (`vibrate_for`, `vibrate_pattern`)
//! 3. construção do efeito; falha devolve `false` sem chamar o backend
//! 4. envio ao vibrador padrão, com atributos quando suportados

use crate::attributes::VibrationAttributes;
use crate::backend::{PlatformBackend, VibratorHandle};
use crate::capability::{self, DeviceCapabilities};
use crate::combined::CombinedVibration;
use crate::config::VibesConfig;
use crate::effect::{self, EffectBuilder, EffectDescriptor, NO_REPEAT};
use crate::error::{BackendResult, BuildFailure};
use crate::logging::VibesLog;
use crate::pattern;
use crate::report::{SupportReport, VibratorInfo};
use crate::types::{
    api, Amplitude, FeatureId, Gesture, HapticFeedback, HapticFeedbackFlag, ImpactStyle,
    NotificationStyle, PredefinedEffect, Primitive, SupportVerdict, Usage,
};

// ═══════════════════════════════════════════════════════════════════════════════
// GESTOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Degrau de uma cadeia de fallback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureRung {
    /// Gesto tocado pela própria plataforma (iOS)
    Native,
    Predefined(PredefinedEffect),
    Haptic(HapticFeedback),
    Composition(&'static [Primitive]),
    Duration(u64),
    /// Padrão off/on
    Pattern(&'static [u64]),
}

const POP: &[GestureRung] = &[
    GestureRung::Native,
    GestureRung::Predefined(PredefinedEffect::Tick),
    GestureRung::Haptic(HapticFeedback::KeyboardTap),
    GestureRung::Duration(50),
];

const PEEK: &[GestureRung] = &[
    GestureRung::Native,
    GestureRung::Predefined(PredefinedEffect::Click),
    GestureRung::Haptic(HapticFeedback::Confirm),
    GestureRung::Duration(100),
];

const NOPE: &[GestureRung] = &[
    GestureRung::Native,
    GestureRung::Composition(&[Primitive::LowTick, Primitive::LowTick, Primitive::LowTick]),
    GestureRung::Pattern(&[0, 50, 100, 50, 100, 50]),
];

impl Gesture {
    /// Degraus em ordem de preferência
    pub fn rungs(self) -> &'static [GestureRung] {
        match self {
            Gesture::Pop => POP,
            Gesture::Peek => PEEK,
            Gesture::Nope => NOPE,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXTO
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
struct Ready {
    caps: DeviceCapabilities,
    vibrators: Vec<VibratorHandle>,
    haptic_status: SupportVerdict,
}

#[derive(Debug)]
enum VibesState {
    Uninitialized,
    Ready(Ready),
}

/// Contexto de vibração
///
/// Deve ser usado a partir da thread designada pela plataforma.
#[derive(Debug)]
pub struct Vibes {
    platform: Box<dyn PlatformBackend>,
    config: VibesConfig,
    log: VibesLog,
    state: VibesState,
}

impl Vibes {
    pub fn new(platform: impl PlatformBackend + 'static, config: VibesConfig) -> Self {
        let mut log = VibesLog::new(config.log_level);
        if config.capture_logs {
            log = log.capturing();
        }
        log.set_paused(config.pause_logging);

        Self {
            platform: Box::new(platform),
            config,
            log,
            state: VibesState::Uninitialized,
        }
    }

    /// Contexto com configuração lida do ambiente
    pub fn from_env(platform: impl PlatformBackend + 'static) -> Self {
        Self::new(platform, VibesConfig::from_env())
    }

    /// Sonda o dispositivo uma única vez; chamadas seguintes não fazem nada
    pub fn init(&mut self) -> bool {
        if self.is_initialized() {
            return true;
        }

        let outcome = capability::probe(&mut *self.platform, &self.log);
        let haptic_status =
            read_haptic_status(&outcome.capabilities, &*self.platform, &self.log);

        self.log.info(format!(
            "Vibration initialized: os_version {}, has_vibrator {}, {} vibrator(s)",
            outcome.capabilities.os_version(),
            outcome.capabilities.has_vibrator(),
            outcome.vibrators.len()
        ));

        self.state = VibesState::Ready(Ready {
            caps: outcome.capabilities,
            vibrators: outcome.vibrators,
            haptic_status,
        });
        true
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, VibesState::Ready(_))
    }

    pub fn config(&self) -> &VibesConfig {
        &self.config
    }

    pub fn log(&self) -> &VibesLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut VibesLog {
        &mut self.log
    }

    fn ready(&self) -> Option<&Ready> {
        match &self.state {
            VibesState::Ready(ready) => Some(ready),
            VibesState::Uninitialized => None,
        }
    }

    pub fn capabilities(&self) -> Option<&DeviceCapabilities> {
        self.ready().map(|r| &r.caps)
    }

    pub fn can_vibrate(&self) -> bool {
        self.capabilities().is_some_and(DeviceCapabilities::has_vibrator)
    }

    /// Ids dos vibradores descobertos (padrão primeiro)
    pub fn vibrators(&self) -> Vec<i32> {
        self.ready()
            .map(|r| r.vibrators.iter().map(VibratorHandle::id).collect())
            .unwrap_or_default()
    }

    /// Configuração de haptic feedback do usuário (`No` antes do init)
    pub fn haptic_status(&self) -> SupportVerdict {
        self.ready().map_or(SupportVerdict::No, |r| r.haptic_status)
    }

    pub fn effect_builder(&self) -> Option<EffectBuilder<'_>> {
        self.ready().map(|r| EffectBuilder::new(&r.caps, &self.log))
    }

    /// Atributos validados para o uso; `None` (com log de erro) se não suportado
    pub fn attributes(&self, usage: Usage) -> Option<VibrationAttributes> {
        let builder = self.effect_builder()?;
        builder
            .attributes(usage)
            .map_err(|failure| self.log.error(failure.to_string()))
            .ok()
    }

    fn session(&mut self, op: &str) -> Option<Session<'_>> {
        let Self {
            platform,
            log,
            state,
            ..
        } = self;

        match state {
            VibesState::Ready(ready) => Some(Session {
                caps: &ready.caps,
                vibrators: &mut ready.vibrators,
                haptic_status: &mut ready.haptic_status,
                platform,
                log,
            }),
            VibesState::Uninitialized => {
                log.warn(format!(
                    "{} called before the vibration context was initialized",
                    op
                ));
                None
            }
        }
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Operações
    // ───────────────────────────────────────────────────────────────────────────

    /// Vibra por uma duração; amplitude -1 usa o padrão do dispositivo
    pub fn vibrate(&mut self, duration_ms: u64, amplitude: i32, cancel: bool) -> bool {
        self.log.info(format!(
            "vibrate called with duration_ms: {}, amplitude: {}, cancel: {}",
            duration_ms, amplitude, cancel
        ));
        let Some(mut s) = self.session("vibrate") else {
            return false;
        };
        if !s.require_vibrator() || !s.cancel_first(cancel) {
            return false;
        }
        if !s.caps.supports_effects() {
            return s.legacy_for(duration_ms);
        }

        match s.builder().one_shot(duration_ms, amplitude) {
            Ok(Some(effect)) => s.play(&effect),
            Ok(None) => false,
            Err(failure) => s.build_failed(failure),
        }
    }

    /// Vibra um padrão off/on; `repeat` -1 para não repetir
    pub fn vibrate_pattern(
        &mut self,
        pattern: &[u64],
        amplitudes: Option<&[i32]>,
        repeat: i32,
        cancel: bool,
    ) -> bool {
        if self.log.all_enabled() {
            self.log.info(format!(
                "vibrate_pattern called with pattern: {:?}, amplitudes: {:?}, repeat: {}, cancel: {}",
                pattern, amplitudes, repeat, cancel
            ));
        }
        let Some(mut s) = self.session("vibrate_pattern") else {
            return false;
        };
        if !s.require_vibrator() || !s.cancel_first(cancel) {
            return false;
        }

        if !s.caps.supports_effects() {
            if amplitudes.is_some() {
                s.log.warn("Amplitudes need the vibration effects API, they are ignored");
            }
            return match effect::validate_pattern(pattern.len(), None, repeat) {
                Ok(repeat) => s.legacy_pattern(pattern, repeat),
                Err(failure) => s.build_failed(failure),
            };
        }

        match s.builder().waveform(pattern, amplitudes, repeat) {
            Ok(effect) => s.play(&effect),
            Err(failure) => s.build_failed(failure),
        }
    }

    /// Vibra um padrão on/off (convenção web)
    pub fn vibrate_on_off(&mut self, pattern: &[u64]) -> bool {
        if pattern.is_empty() {
            self.log.error(BuildFailure::EmptyPattern.to_string());
            return false;
        }
        let converted = pattern::on_off_to_off_on(pattern);
        self.vibrate_pattern(&converted, None, NO_REPEAT, false)
    }

    pub fn vibrate_predefined(&mut self, predefined: PredefinedEffect, cancel: bool) -> bool {
        self.log.info(format!(
            "vibrate_predefined called with predefined: {:?}, cancel: {}",
            predefined, cancel
        ));
        let Some(mut s) = self.session("vibrate_predefined") else {
            return false;
        };
        if !s.require_vibrator() || !s.cancel_first(cancel) {
            return false;
        }

        match s.builder().predefined(predefined) {
            Ok(effect) => s.play(&effect),
            Err(failure) => s.build_failed(failure),
        }
    }

    /// Composição tudo-ou-nada; escalas e atrasos, se dados, têm o tamanho de `primitives`
    pub fn vibrate_composition(
        &mut self,
        primitives: &[Primitive],
        scales: Option<&[f32]>,
        delays: Option<&[i32]>,
        cancel: bool,
    ) -> bool {
        if self.log.all_enabled() {
            self.log.info(format!(
                "vibrate_composition called with primitives: {:?}, scales: {:?}, delays: {:?}, cancel: {}",
                primitives, scales, delays, cancel
            ));
        }
        let Some(mut s) = self.session("vibrate_composition") else {
            return false;
        };
        if !s.require_vibrator() || !s.cancel_first(cancel) {
            return false;
        }

        match s.builder().composition(primitives, scales, delays) {
            Ok(effect) => s.play(&effect),
            Err(failure) => s.build_failed(failure),
        }
    }

    /// Vibra um efeito já construído, opcionalmente com atributos
    pub fn vibrate_effect(
        &mut self,
        effect: &EffectDescriptor,
        attributes: Option<VibrationAttributes>,
        cancel: bool,
    ) -> bool {
        self.log.info(format!("vibrate_effect called with cancel: {}", cancel));
        let Some(mut s) = self.session("vibrate_effect") else {
            return false;
        };
        if !s.require_vibrator() || !s.cancel_first(cancel) {
            return false;
        }

        let effect = match attributes {
            Some(attributes) => effect.clone().with_attributes(attributes),
            None => effect.clone(),
        };
        match s.builder().check(&effect) {
            Ok(()) => s.play(&effect),
            Err(failure) => s.build_failed(failure),
        }
    }

    /// Vibração combinada em múltiplos vibradores (API 31+)
    pub fn vibrate_combined(
        &mut self,
        combined: &CombinedVibration,
        attributes: Option<VibrationAttributes>,
        cancel: bool,
    ) -> bool {
        self.log.info(format!("vibrate_combined called with cancel: {}", cancel));
        let Some(mut s) = self.session("vibrate_combined") else {
            return false;
        };
        if !s.require_vibrator() {
            return false;
        }
        if !s.caps.supports_combined() {
            s.log.warn("This device has no support for Vibration Combination Effects");
            return false;
        }
        if !s.cancel_first(cancel) {
            return false;
        }

        if let Err(failure) = s.check_combined(combined, attributes.as_ref()) {
            return s.build_failed(failure);
        }
        let result = s.platform.vibrate_combined(combined, attributes.as_ref());
        s.issued(result, "vibrate_combined")
    }

    /// Haptic feedback pela view
    pub fn perform_haptic_feedback(
        &mut self,
        haptic: HapticFeedback,
        flag: HapticFeedbackFlag,
        cancel: bool,
    ) -> bool {
        self.log.info(format!(
            "perform_haptic_feedback called with haptic: {:?}, flag: {:?}, cancel: {}",
            haptic, flag, cancel
        ));
        let Some(mut s) = self.session("perform_haptic_feedback") else {
            return false;
        };
        if !s.caps.supports_haptic_feedback() {
            s.log.warn("This device has no support for Haptics Effects");
            return false;
        }
        if !s.caps.haptic(haptic).is_yes() {
            s.log.error(format!(
                "This device has no support for the given haptic: {:?}",
                haptic
            ));
            return false;
        }
        if !s.cancel_first(cancel) {
            return false;
        }

        let flag = if flag == HapticFeedbackFlag::IgnoreGlobalSetting
            && s.caps.os_version() >= api::HAPTIC_SETTING_HIDDEN
        {
            s.log.warn(format!(
                "The flag {:?} has no effect from API {}, using {:?}",
                flag,
                api::HAPTIC_SETTING_HIDDEN,
                HapticFeedbackFlag::None
            ));
            HapticFeedbackFlag::None
        } else {
            flag
        };

        match s.platform.perform_haptic_feedback(haptic, flag) {
            Ok(true) => true,
            Ok(false) => {
                s.log.warn(format!("The platform refused the haptic feedback {:?}", haptic));
                false
            }
            Err(e) => {
                s.log.error(format!("perform_haptic_feedback failed: {}", e));
                false
            }
        }
    }

    /// Cancela qualquer vibração em andamento
    pub fn vibrate_cancel(&mut self) -> bool {
        self.log.info("vibrate_cancel called");
        match self.session("vibrate_cancel") {
            Some(mut s) => s.cancel(),
            None => false,
        }
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Gestos
    // ───────────────────────────────────────────────────────────────────────────

    /// Vibração simples com a duração configurada
    pub fn vibrate_default(&mut self) -> bool {
        let duration_ms = self.config.default_duration_ms;
        self.vibrate(duration_ms, Amplitude::DEFAULT, false)
    }

    pub fn vibrate_pop(&mut self) -> bool {
        self.vibrate_gesture(Gesture::Pop).is_some()
    }

    pub fn vibrate_peek(&mut self) -> bool {
        self.vibrate_gesture(Gesture::Peek).is_some()
    }

    pub fn vibrate_nope(&mut self) -> bool {
        self.vibrate_gesture(Gesture::Nope).is_some()
    }

    /// Percorre a cadeia do gesto; devolve o degrau que tocou
    ///
    /// O log fica pausado durante a tentativa e volta ao estado anterior ao fim.
    pub fn vibrate_gesture(&mut self, gesture: Gesture) -> Option<GestureRung> {
        self.log.info(format!("vibrate_gesture called with gesture: {:?}", gesture));
        let available: Vec<GestureRung> = {
            let s = self.session("vibrate_gesture")?;
            if !s.require_vibrator() {
                return None;
            }
            gesture
                .rungs()
                .iter()
                .copied()
                .filter(|rung| s.rung_available(rung))
                .collect()
        };

        let previous = self.log.set_paused(true);
        let played = available.into_iter().find(|&rung| self.play_rung(gesture, rung));
        self.log.set_paused(previous);

        if played.is_none() {
            self.log.warn(format!("No fallback could play the gesture {:?}", gesture));
        }
        played
    }

    fn play_rung(&mut self, gesture: Gesture, rung: GestureRung) -> bool {
        match rung {
            GestureRung::Native => self.native("native_gesture", |p| p.native_gesture(gesture)),
            GestureRung::Predefined(effect) => self.vibrate_predefined(effect, false),
            GestureRung::Haptic(haptic) => {
                self.perform_haptic_feedback(haptic, HapticFeedbackFlag::None, false)
            }
            GestureRung::Composition(primitives) => {
                self.vibrate_composition(primitives, None, None, false)
            }
            GestureRung::Duration(duration_ms) => {
                self.vibrate(duration_ms, Amplitude::DEFAULT, false)
            }
            GestureRung::Pattern(pattern) => self.vibrate_pattern(pattern, None, NO_REPEAT, false),
        }
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Feedback nativo
    // ───────────────────────────────────────────────────────────────────────────

    pub fn vibrate_impact(&mut self, style: ImpactStyle) -> bool {
        self.log.info(format!("vibrate_impact called with style: {:?}", style));
        self.native("vibrate_impact", |p| p.impact_feedback(style))
    }

    pub fn vibrate_notification(&mut self, style: NotificationStyle) -> bool {
        self.log.info(format!("vibrate_notification called with style: {:?}", style));
        self.native("vibrate_notification", |p| p.notification_feedback(style))
    }

    pub fn vibrate_selection_changed(&mut self) -> bool {
        self.log.info("vibrate_selection_changed called");
        self.native("vibrate_selection_changed", |p| p.selection_feedback())
    }

    /// Chamada de feedback nativo; sem suporte, aviso e `false`
    fn native(
        &mut self,
        op: &str,
        call: impl FnOnce(&mut dyn PlatformBackend) -> BackendResult<()>,
    ) -> bool {
        let Some(mut s) = self.session(op) else {
            return false;
        };
        if !s.require_vibrator() {
            return false;
        }
        if !s.caps.supports_native_feedback() {
            s.log.warn("This device has no support for native haptic feedback");
            return false;
        }
        let result = call(&mut **s.platform);
        s.issued(result, op)
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Diagnóstico
    // ───────────────────────────────────────────────────────────────────────────

    /// Relê a configuração de haptic feedback do usuário
    pub fn refresh_haptic_status(&mut self) -> SupportVerdict {
        let Some(s) = self.session("refresh_haptic_status") else {
            return SupportVerdict::No;
        };
        let status = read_haptic_status(s.caps, &**s.platform, s.log);
        if status != *s.haptic_status {
            s.log.info(format!(
                "Haptic status has been set from {} to {}",
                s.haptic_status, status
            ));
        }
        *s.haptic_status = status;
        status
    }

    /// Informações de um vibrador descoberto
    pub fn vibrator_info(&self, id: i32) -> Option<VibratorInfo> {
        let ready = self.ready()?;
        let handle = ready.vibrators.iter().find(|v| v.id() == id)?;
        Some(describe_vibrator(&ready.caps, handle))
    }

    pub fn support_report(&self) -> Option<SupportReport> {
        let ready = self.ready()?;
        let vibrators = ready
            .vibrators
            .iter()
            .map(|v| describe_vibrator(&ready.caps, v))
            .collect();
        Some(SupportReport::new(&ready.caps, ready.haptic_status, vibrators))
    }

    /// Emite o relatório de suporte em JSON no nível `All`
    pub fn log_support(&self) -> bool {
        let Some(report) = self.support_report() else {
            self.log.warn("log_support called before the vibration context was initialized");
            return false;
        };
        match report.to_json() {
            Ok(json) => self.log.info(json),
            Err(e) => {
                self.log.error(format!("Unable to serialize the support report: {}", e));
                false
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Empréstimo disjunto do contexto pronto
struct Session<'a> {
    caps: &'a DeviceCapabilities,
    vibrators: &'a mut Vec<VibratorHandle>,
    haptic_status: &'a mut SupportVerdict,
    platform: &'a mut Box<dyn PlatformBackend>,
    log: &'a VibesLog,
}

impl<'a> Session<'a> {
    fn builder(&self) -> EffectBuilder<'a> {
        EffectBuilder::new(self.caps, self.log)
    }

    fn require_vibrator(&self) -> bool {
        if self.caps.has_vibrator() && !self.vibrators.is_empty() {
            return true;
        }
        self.log.error("This device has no support for Vibration");
        false
    }

    fn cancel(&mut self) -> bool {
        if !self.require_vibrator() {
            return false;
        }
        let log = self.log;
        match self.vibrators.first_mut() {
            Some(vibrator) => issued(vibrator.cancel(), log, "cancel"),
            None => false,
        }
    }

    fn cancel_first(&mut self, cancel: bool) -> bool {
        !cancel || self.cancel()
    }

    fn play(&mut self, effect: &EffectDescriptor) -> bool {
        let attributes_supported = self.caps.supports_attributes();
        let log = self.log;
        match self.vibrators.first_mut() {
            Some(vibrator) => issued(vibrator.play(effect, attributes_supported, log), log, "vibrate"),
            None => false,
        }
    }

    fn legacy_for(&mut self, duration_ms: u64) -> bool {
        let log = self.log;
        match self.vibrators.first_mut() {
            Some(vibrator) => issued(vibrator.vibrate_for(duration_ms), log, "vibrate"),
            None => false,
        }
    }

    fn legacy_pattern(&mut self, pattern: &[u64], repeat: Option<usize>) -> bool {
        let log = self.log;
        match self.vibrators.first_mut() {
            Some(vibrator) => issued(vibrator.vibrate_pattern(pattern, repeat), log, "vibrate_pattern"),
            None => false,
        }
    }

    fn issued(&self, result: BackendResult<()>, op: &str) -> bool {
        issued(result, self.log, op)
    }

    fn build_failed(&self, failure: BuildFailure) -> bool {
        self.log.error(failure.to_string());
        false
    }

    fn check_combined(
        &self,
        combined: &CombinedVibration,
        attributes: Option<&VibrationAttributes>,
    ) -> Result<(), BuildFailure> {
        let builder = self.builder();
        if let Some(&unknown) = combined
            .vibrator_ids()
            .iter()
            .find(|&&id| !self.vibrators.iter().any(|v| v.id() == id))
        {
            return Err(BuildFailure::UnknownVibrator(unknown));
        }
        for effect in combined.effects() {
            builder.check(effect)?;
        }
        if let Some(attributes) = attributes {
            builder.validate_attributes(attributes)?;
        }
        Ok(())
    }

    fn rung_available(&self, rung: &GestureRung) -> bool {
        let caps = self.caps;
        match rung {
            GestureRung::Native => caps.supports_native_feedback(),
            GestureRung::Predefined(effect) => {
                caps.supports_predefined() && !caps.predefined(*effect).is_no()
            }
            GestureRung::Haptic(haptic) => {
                caps.supports_haptic_feedback() && caps.haptic(*haptic).is_yes()
            }
            GestureRung::Composition(primitives) => {
                caps.supports_composition() && primitives.iter().all(|p| caps.primitive(*p).is_yes())
            }
            GestureRung::Duration(_) | GestureRung::Pattern(_) => caps.has_vibrator(),
        }
    }
}

fn issued(result: BackendResult<()>, log: &VibesLog, op: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log.error(format!("{} failed: {}", op, e));
            false
        }
    }
}

/// Configuração de haptic feedback: legível abaixo da API 33, `Unknown` depois
fn read_haptic_status(
    caps: &DeviceCapabilities,
    platform: &dyn PlatformBackend,
    log: &VibesLog,
) -> SupportVerdict {
    if !caps.supports_haptic_feedback() {
        return SupportVerdict::No;
    }
    if caps.os_version() >= api::HAPTIC_SETTING_HIDDEN {
        log.warn(format!(
            "The haptic feedback setting is not readable from API {}, reporting UNKNOWN",
            api::HAPTIC_SETTING_HIDDEN
        ));
        return SupportVerdict::Unknown;
    }
    match platform.haptic_feedback_enabled() {
        Ok(enabled) => SupportVerdict::from_bool(enabled),
        Err(e) => {
            log.warn(format!("Unable to read the haptic feedback setting: {}", e));
            SupportVerdict::Unknown
        }
    }
}

fn describe_vibrator(caps: &DeviceCapabilities, handle: &VibratorHandle) -> VibratorInfo {
    let backend = handle.backend();
    let resonance = caps.os_version() >= api::RESONANCE_QUERY;

    let primitive_durations = if caps.supports_composition()
        && caps.os_version() >= api::PRIMITIVE_DURATIONS
    {
        backend
            .primitive_durations(Primitive::ALL)
            .ok()
            .filter(|d| d.len() == Primitive::ALL.len())
            .map(|durations| {
                Primitive::ALL
                    .iter()
                    .zip(durations)
                    .map(|(p, d)| (format!("{:?}", p), d))
                    .collect()
            })
    } else {
        None
    };

    VibratorInfo {
        id: handle.id(),
        resonant_frequency: resonance.then(|| backend.resonant_frequency().ok()).flatten(),
        q_factor: resonance.then(|| backend.q_factor().ok()).flatten(),
        primitive_durations,
    }
}
