//! Registro de capacidades
//!
//! Sondagem feita uma vez por contexto. Ordem estrita, cada passo condicionado
//! ao anterior:
//!
//! 1. versão do sistema, vibrador padrão, `has_vibrator`
//! 2. famílias por nível de API (constantes de haptic feedback, usos de atributos)
//! 3. famílias atrás de uma flag (amplitude, predefinidos, primitivas)
//! 4. feedback nativo da plataforma (iOS)
//! 5. descoberta de múltiplos vibradores (API 31+)
//!
//! Sem vibrador, todo veredicto é `No` e nenhuma outra consulta é feita.
//! Consulta que falha cai no padrão da família e gera aviso.

use serde::{Deserialize, Serialize};

use crate::backend::{PlatformBackend, VibratorBackend, VibratorHandle};
use crate::logging::VibesLog;
use crate::types::{
    api, ApiGated, FeatureId, HapticFeedback, PredefinedEffect, Primitive, SupportTable,
    SupportVerdict, Usage,
};

/// Snapshot imutável das capacidades do dispositivo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCapabilities {
    os_version: u32,
    has_vibrator: bool,
    has_amplitude_control: bool,
    haptics: SupportTable<HapticFeedback>,
    predefined: SupportTable<PredefinedEffect>,
    primitives: SupportTable<Primitive>,
    usages: SupportTable<Usage>,
    native_feedback: bool,
}

impl DeviceCapabilities {
    /// Dispositivo sem vibrador: tudo `No`
    pub fn without_vibrator(os_version: u32) -> Self {
        Self {
            os_version,
            has_vibrator: false,
            has_amplitude_control: false,
            haptics: SupportTable::uniform(SupportVerdict::No),
            predefined: SupportTable::uniform(SupportVerdict::No),
            primitives: SupportTable::uniform(SupportVerdict::No),
            usages: SupportTable::uniform(SupportVerdict::No),
            native_feedback: false,
        }
    }

    pub fn os_version(&self) -> u32 {
        self.os_version
    }

    pub fn has_vibrator(&self) -> bool {
        self.has_vibrator
    }

    pub fn has_amplitude_control(&self) -> bool {
        self.has_amplitude_control
    }

    fn at_level(&self, level: u32) -> bool {
        self.has_vibrator && self.os_version >= level
    }

    pub fn supports_haptic_feedback(&self) -> bool {
        self.at_level(api::HAPTIC_FEEDBACK)
    }

    pub fn supports_effects(&self) -> bool {
        self.at_level(api::VIBRATION_EFFECTS)
    }

    pub fn supports_predefined(&self) -> bool {
        self.at_level(api::PREDEFINED_EFFECTS)
    }

    pub fn supports_composition(&self) -> bool {
        self.at_level(api::COMPOSITION)
    }

    pub fn supports_attributes(&self) -> bool {
        self.at_level(api::ATTRIBUTES)
    }

    pub fn supports_combined(&self) -> bool {
        self.at_level(api::COMBINED_VIBRATION)
    }

    pub fn supports_multiple_vibrators(&self) -> bool {
        self.at_level(api::VIBRATOR_MANAGER)
    }

    /// Gestos, impacto, notificação e seleção tocados pela plataforma
    pub fn supports_native_feedback(&self) -> bool {
        self.has_vibrator && self.native_feedback
    }

    pub fn haptic(&self, haptic: HapticFeedback) -> SupportVerdict {
        self.haptics.get(haptic)
    }

    pub fn predefined(&self, effect: PredefinedEffect) -> SupportVerdict {
        self.predefined.get(effect)
    }

    pub fn primitive(&self, primitive: Primitive) -> SupportVerdict {
        self.primitives.get(primitive)
    }

    pub fn usage(&self, usage: Usage) -> SupportVerdict {
        self.usages.get(usage)
    }

    pub fn haptic_table(&self) -> &SupportTable<HapticFeedback> {
        &self.haptics
    }

    pub fn predefined_table(&self) -> &SupportTable<PredefinedEffect> {
        &self.predefined
    }

    pub fn primitive_table(&self) -> &SupportTable<Primitive> {
        &self.primitives
    }

    pub fn usage_table(&self) -> &SupportTable<Usage> {
        &self.usages
    }

    /// Resumo serializável
    pub fn summary(&self) -> FeatureSummary {
        FeatureSummary {
            os_version: self.os_version,
            has_vibrator: self.has_vibrator,
            has_amplitude_control: self.has_amplitude_control,
            haptic_feedback: self.supports_haptic_feedback(),
            effects: self.supports_effects(),
            predefined: self.supports_predefined(),
            composition: self.supports_composition(),
            attributes: self.supports_attributes(),
            combined: self.supports_combined(),
            multiple_vibrators: self.supports_multiple_vibrators(),
            native_feedback: self.supports_native_feedback(),
        }
    }
}

/// Flags de recurso derivadas do snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub os_version: u32,
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
    pub haptic_feedback: bool,
    pub effects: bool,
    pub predefined: bool,
    pub composition: bool,
    pub attributes: bool,
    pub combined: bool,
    pub multiple_vibrators: bool,
    pub native_feedback: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// SONDAGEM
// ═══════════════════════════════════════════════════════════════════════════════

/// Resultado da sondagem: snapshot e handles descobertos (padrão primeiro)
#[derive(Debug)]
pub struct ProbeOutcome {
    pub capabilities: DeviceCapabilities,
    pub vibrators: Vec<VibratorHandle>,
}

/// Sonda o dispositivo
pub fn probe(platform: &mut dyn PlatformBackend, log: &VibesLog) -> ProbeOutcome {
    let os_version = platform.os_version().unwrap_or_else(|e| {
        log.warn(format!("Unable to read the OS version, assuming 0: {}", e));
        0
    });

    let default = match platform.default_vibrator() {
        Ok(vibrator) => Some(vibrator),
        Err(e) => {
            log.warn(format!("Unable to acquire the default vibrator: {}", e));
            None
        }
    };

    let has_vibrator = default.as_ref().is_some_and(|vibrator| {
        vibrator.has_vibrator().unwrap_or_else(|e| {
            log.warn(format!("Unable to query hasVibrator, assuming false: {}", e));
            false
        })
    });

    let Some(default) = default.filter(|_| has_vibrator) else {
        log.warn("This device has no support for Vibration");
        return ProbeOutcome {
            capabilities: DeviceCapabilities::without_vibrator(os_version),
            vibrators: Vec::new(),
        };
    };

    let haptics = level_table::<HapticFeedback>(os_version);
    let usages = if os_version >= api::ATTRIBUTES {
        level_table::<Usage>(os_version)
    } else {
        SupportTable::uniform(SupportVerdict::No)
    };

    let has_amplitude_control = os_version >= api::VIBRATION_EFFECTS
        && default.has_amplitude_control().unwrap_or_else(|e| {
            log.warn(format!("Unable to query amplitude control, assuming false: {}", e));
            false
        });

    let predefined = predefined_table(default.as_ref(), os_version, log);
    let primitives = primitive_table(default.as_ref(), os_version, log);

    let native_feedback = platform.supports_native_feedback().unwrap_or_else(|e| {
        log.warn(format!("Unable to query native feedback support, assuming false: {}", e));
        false
    });

    let capabilities = DeviceCapabilities {
        os_version,
        has_vibrator,
        has_amplitude_control,
        haptics,
        predefined,
        primitives,
        usages,
        native_feedback,
    };

    let vibrators = discover_vibrators(platform, default, os_version, log);

    ProbeOutcome {
        capabilities,
        vibrators,
    }
}

/// `Yes` se o nível exigido pelo item for atingido
fn level_table<K: ApiGated>(os_version: u32) -> SupportTable<K> {
    SupportTable::from_fn(|id: K| SupportVerdict::from_bool(id.required_level() <= os_version))
}

fn predefined_table(
    vibrator: &dyn VibratorBackend,
    os_version: u32,
    log: &VibesLog,
) -> SupportTable<PredefinedEffect> {
    if os_version < api::PREDEFINED_EFFECTS {
        return SupportTable::uniform(SupportVerdict::No);
    }
    if os_version < api::EFFECT_SUPPORT_QUERY {
        return SupportTable::uniform(SupportVerdict::Unknown);
    }

    match vibrator.are_effects_supported(PredefinedEffect::ALL) {
        Ok(verdicts) if verdicts.len() == PredefinedEffect::ALL.len() => {
            SupportTable::from_fn(|effect: PredefinedEffect| {
                SupportVerdict::Yes.and(verdicts[effect.index()])
            })
        }
        Ok(verdicts) => {
            log.warn(format!(
                "areEffectsSupported returned {} verdicts for {} effects, assuming UNKNOWN",
                verdicts.len(),
                PredefinedEffect::ALL.len()
            ));
            SupportTable::uniform(SupportVerdict::Unknown)
        }
        Err(e) => {
            log.warn(format!("Unable to query predefined effect support, assuming UNKNOWN: {}", e));
            SupportTable::uniform(SupportVerdict::Unknown)
        }
    }
}

fn primitive_table(
    vibrator: &dyn VibratorBackend,
    os_version: u32,
    log: &VibesLog,
) -> SupportTable<Primitive> {
    if os_version < api::COMPOSITION {
        return SupportTable::uniform(SupportVerdict::No);
    }

    match vibrator.are_primitives_supported(Primitive::ALL) {
        Ok(reported) if reported.len() == Primitive::ALL.len() => {
            SupportTable::from_fn(|primitive: Primitive| {
                SupportVerdict::from_bool(
                    primitive.required_level() <= os_version && reported[primitive.index()],
                )
            })
        }
        Ok(reported) => {
            log.warn(format!(
                "arePrimitivesSupported returned {} values for {} primitives, assuming NO",
                reported.len(),
                Primitive::ALL.len()
            ));
            SupportTable::uniform(SupportVerdict::No)
        }
        Err(e) => {
            log.warn(format!("Unable to query primitive support, assuming NO: {}", e));
            SupportTable::uniform(SupportVerdict::No)
        }
    }
}

/// Handles de todos os vibradores; o padrão vem primeiro e é reaproveitado
fn discover_vibrators(
    platform: &mut dyn PlatformBackend,
    default: Box<dyn VibratorBackend>,
    os_version: u32,
    log: &VibesLog,
) -> Vec<VibratorHandle> {
    let default = VibratorHandle::new(default);
    if os_version < api::VIBRATOR_MANAGER {
        return vec![default];
    }

    let ids = match platform.vibrator_ids() {
        Ok(ids) => ids,
        Err(e) => {
            log.warn(format!("Unable to list vibrator ids, using the default vibrator only: {}", e));
            return vec![default];
        }
    };

    let mut vibrators = vec![default];
    for id in ids {
        if vibrators.iter().any(|v| v.id() == id) {
            continue;
        }
        match platform.vibrator(id) {
            Ok(backend) => vibrators.push(VibratorHandle::new(backend)),
            Err(e) => {
                log.warn(format!("Unable to acquire vibrator {}: {}", id, e));
            }
        }
    }
    vibrators
}
