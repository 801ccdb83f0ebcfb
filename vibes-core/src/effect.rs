//! Construção de efeitos de vibração
//!
//! [`EffectBuilder`] valida a entrada contra o snapshot de capacidades e produz
//! um [`EffectDescriptor`] imutável, ou uma [`BuildFailure`].
//!
//! ## Regras
//!
//! - One-shot: amplitude -1 usa o padrão do dispositivo, 1..=255 é aceito, acima
//!   de 255 é limitado a 255, 0 ou menor que -1 não vibra (`Ok(None)`)
//! - Waveform: padrão não vazio, amplitudes do mesmo tamanho, repeat em -1 ou `0..len`
//! - Predefinido: veredicto `No`/`Unknown` só gera aviso, o efeito é tentado
//! - Composição: tudo ou nada; uma primitiva sem suporte derruba a composição

use serde::{Deserialize, Serialize};

use crate::attributes::VibrationAttributes;
use crate::capability::DeviceCapabilities;
use crate::error::{BuildFailure, BuildResult};
use crate::logging::VibesLog;
use crate::types::{Amplitude, PredefinedEffect, Primitive, SupportVerdict, Usage};

/// Sem repetição (índice cru)
pub const NO_REPEAT: i32 = -1;

// ═══════════════════════════════════════════════════════════════════════════════
// DESCRITORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Escala de intensidade de uma primitiva
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveScale {
    /// Escala padrão do dispositivo
    Default,
    /// Escala explícita em [0.0, 1.0]
    Explicit(f32),
}

impl PrimitiveScale {
    /// Normaliza escala crua: > 1 vira 1, < 0 (ou NaN) vira padrão
    pub fn from_raw(raw: f32) -> Self {
        if raw.is_nan() || raw < 0.0 {
            PrimitiveScale::Default
        } else {
            PrimitiveScale::Explicit(raw.min(1.0))
        }
    }
}

/// Passo de uma composição
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveStep {
    pub primitive: Primitive,
    pub scale: PrimitiveScale,
    /// Espera antes do passo, a partir do fim do anterior (ms)
    pub delay_ms: u32,
}

impl PrimitiveStep {
    pub fn new(primitive: Primitive) -> Self {
        Self {
            primitive,
            scale: PrimitiveScale::Default,
            delay_ms: 0,
        }
    }

    /// Passo a partir de valores crus (escala e atraso normalizados)
    pub fn from_raw(primitive: Primitive, scale: f32, delay_ms: i32) -> Self {
        Self {
            primitive,
            scale: PrimitiveScale::from_raw(scale),
            delay_ms: delay_ms.max(0) as u32,
        }
    }
}

/// Tipo do efeito
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EffectKind {
    OneShot {
        duration_ms: u64,
        amplitude: Amplitude,
    },
    /// Tempos no formato off/on; amplitudes já normalizadas
    Waveform {
        timings: Vec<u64>,
        amplitudes: Option<Vec<i32>>,
        repeat: Option<usize>,
    },
    Predefined(PredefinedEffect),
    Composition(Vec<PrimitiveStep>),
}

/// Efeito pronto para despacho
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    kind: EffectKind,
    attributes: Option<VibrationAttributes>,
}

impl EffectDescriptor {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            attributes: None,
        }
    }

    pub fn with_attributes(mut self, attributes: VibrationAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn without_attributes(mut self) -> Self {
        self.attributes = None;
        self
    }

    pub fn kind(&self) -> &EffectKind {
        &self.kind
    }

    pub fn attributes(&self) -> Option<&VibrationAttributes> {
        self.attributes.as_ref()
    }

    /// Duração total estimada em ms (`None` para efeitos sem duração conhecida)
    pub fn duration_ms(&self) -> Option<u64> {
        match &self.kind {
            EffectKind::OneShot { duration_ms, .. } => Some(*duration_ms),
            EffectKind::Waveform { repeat: Some(_), .. } => None,
            EffectKind::Waveform { timings, .. } => Some(timings.iter().sum()),
            EffectKind::Predefined(_) | EffectKind::Composition(_) => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDAÇÃO DE PADRÃO
// ═══════════════════════════════════════════════════════════════════════════════

/// Valida padrão, amplitudes e índice de repetição; devolve o repeat normalizado
pub fn validate_pattern(
    pattern_len: usize,
    amplitudes_len: Option<usize>,
    repeat: i32,
) -> BuildResult<Option<usize>> {
    if pattern_len == 0 {
        return Err(BuildFailure::EmptyPattern);
    }

    if let Some(amplitudes) = amplitudes_len {
        if amplitudes != pattern_len {
            return Err(BuildFailure::AmplitudeLengthMismatch {
                pattern: pattern_len,
                amplitudes,
            });
        }
    }

    match repeat {
        NO_REPEAT => Ok(None),
        r if r >= 0 && (r as usize) < pattern_len => Ok(Some(r as usize)),
        r => Err(BuildFailure::RepeatIndexOutOfRange {
            index: r,
            len: pattern_len,
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BUILDER
// ═══════════════════════════════════════════════════════════════════════════════

/// Construtor de efeitos ligado a um snapshot de capacidades
#[derive(Debug, Clone, Copy)]
pub struct EffectBuilder<'a> {
    caps: &'a DeviceCapabilities,
    log: &'a VibesLog,
}

impl<'a> EffectBuilder<'a> {
    pub fn new(caps: &'a DeviceCapabilities, log: &'a VibesLog) -> Self {
        Self { caps, log }
    }

    pub fn capabilities(&self) -> &'a DeviceCapabilities {
        self.caps
    }

    fn require_effects(&self) -> BuildResult<()> {
        if self.caps.supports_effects() {
            Ok(())
        } else {
            Err(BuildFailure::EffectsUnsupported)
        }
    }

    /// Vibração única; `Ok(None)` quando a amplitude não gera vibração
    pub fn one_shot(&self, duration_ms: u64, amplitude: i32) -> BuildResult<Option<EffectDescriptor>> {
        self.require_effects()?;

        let Some(mut amplitude) = Amplitude::from_raw(amplitude) else {
            self.log.warn(format!(
                "The given amplitude of {} will trigger no vibration.",
                amplitude
            ));
            return Ok(None);
        };

        if let Amplitude::Level(level) = amplitude {
            if !self.caps.has_amplitude_control() {
                if level < u8::MAX {
                    self.log.warn("This device reports no support for Amplitude Control");
                }
                amplitude = Amplitude::Default;
            }
        }

        Ok(Some(EffectDescriptor::new(EffectKind::OneShot {
            duration_ms,
            amplitude,
        })))
    }

    /// Padrão off/on com amplitudes opcionais
    pub fn waveform(
        &self,
        pattern: &[u64],
        amplitudes: Option<&[i32]>,
        repeat: i32,
    ) -> BuildResult<EffectDescriptor> {
        self.require_effects()?;
        let repeat = validate_pattern(pattern.len(), amplitudes.map(<[i32]>::len), repeat)?;

        let amplitudes = match amplitudes {
            Some(_) if !self.caps.has_amplitude_control() => {
                self.log.warn("This device reports no support for Amplitude Control, amplitudes are ignored");
                None
            }
            Some(values) => Some(values.iter().copied().map(Amplitude::clamp_segment).collect()),
            None => None,
        };

        Ok(EffectDescriptor::new(EffectKind::Waveform {
            timings: pattern.to_vec(),
            amplitudes,
            repeat,
        }))
    }

    /// Efeito predefinido (tentado mesmo com veredicto `No`/`Unknown`)
    pub fn predefined(&self, effect: PredefinedEffect) -> BuildResult<EffectDescriptor> {
        if !self.caps.supports_predefined() {
            return Err(BuildFailure::PredefinedUnsupported);
        }

        match self.caps.predefined(effect) {
            SupportVerdict::No => {
                self.log.warn(format!(
                    "This device reports no support for the predefined effect {:?}, but it will still be tried.",
                    effect
                ));
            }
            SupportVerdict::Unknown => {
                self.log.warn(format!(
                    "Support for the predefined effect {:?} is UNKNOWN on this device",
                    effect
                ));
            }
            SupportVerdict::Yes => {}
        }

        Ok(EffectDescriptor::new(EffectKind::Predefined(effect)))
    }

    /// Composição com escalas e atrasos opcionais (mesmo tamanho que `primitives`)
    pub fn composition(
        &self,
        primitives: &[Primitive],
        scales: Option<&[f32]>,
        delays: Option<&[i32]>,
    ) -> BuildResult<EffectDescriptor> {
        if !self.caps.supports_composition() {
            return Err(BuildFailure::CompositionUnsupported);
        }
        if primitives.is_empty() {
            return Err(BuildFailure::EmptyComposition);
        }
        if let Some(scales) = scales {
            if scales.len() != primitives.len() {
                return Err(BuildFailure::ScaleLengthMismatch {
                    primitives: primitives.len(),
                    scales: scales.len(),
                });
            }
        }
        if let Some(delays) = delays {
            if delays.len() != primitives.len() {
                return Err(BuildFailure::DelayLengthMismatch {
                    primitives: primitives.len(),
                    delays: delays.len(),
                });
            }
        }

        let mut composition = self.compose();
        for (i, &primitive) in primitives.iter().enumerate() {
            let scale = scales.map_or(-1.0, |s| s[i]);
            let delay = delays.map_or(0, |d| d[i]);
            composition = composition.add_primitive_with(primitive, scale, delay);
        }
        composition.compose()
    }

    /// Composição passo a passo
    pub fn compose(&self) -> CompositionBuilder<'a> {
        CompositionBuilder {
            builder: *self,
            steps: Vec::new(),
        }
    }

    /// Revalida um descritor construído fora deste builder
    ///
    /// Aplica as mesmas regras de amplitude dos construtores, mas rejeita em vez
    /// de normalizar: nível 0, amplitude de segmento fora de -1..=255, ou
    /// amplitudes explícitas sem controle de amplitude. Atributos só são checados quando o dispositivo os suporta; caso contrário
    /// o handle os descarta no despacho.
    pub fn check(&self, effect: &EffectDescriptor) -> BuildResult<()> {
        match effect.kind() {
            EffectKind::OneShot { amplitude, .. } => {
                self.require_effects()?;
                match amplitude {
                    Amplitude::Level(0) => return Err(BuildFailure::SilentAmplitude),
                    Amplitude::Level(_) if !self.caps.has_amplitude_control() => {
                        return Err(BuildFailure::AmplitudeControlUnsupported);
                    }
                    _ => {}
                }
            }
            EffectKind::Waveform {
                timings,
                amplitudes,
                repeat,
            } => {
                self.require_effects()?;
                let repeat = repeat.map_or(NO_REPEAT, |r| i32::try_from(r).unwrap_or(i32::MAX));
                validate_pattern(timings.len(), amplitudes.as_ref().map(Vec::len), repeat)?;
                if let Some(amplitudes) = amplitudes {
                    let valid = Amplitude::DEFAULT..=Amplitude::MAX;
                    if let Some(&raw) = amplitudes.iter().find(|a| !valid.contains(a)) {
                        return Err(BuildFailure::AmplitudeOutOfRange(raw));
                    }
                    if !self.caps.has_amplitude_control() {
                        return Err(BuildFailure::AmplitudeControlUnsupported);
                    }
                }
            }
            EffectKind::Predefined(_) => {
                if !self.caps.supports_predefined() {
                    return Err(BuildFailure::PredefinedUnsupported);
                }
            }
            EffectKind::Composition(steps) => {
                if !self.caps.supports_composition() {
                    return Err(BuildFailure::CompositionUnsupported);
                }
                if steps.is_empty() {
                    return Err(BuildFailure::EmptyComposition);
                }
                if let Some(step) = steps.iter().find(|s| !self.caps.primitive(s.primitive).is_yes()) {
                    return Err(BuildFailure::UnsupportedPrimitive(step.primitive));
                }
            }
        }

        match effect.attributes() {
            Some(attributes) if self.caps.supports_attributes() => self.validate_attributes(attributes),
            _ => Ok(()),
        }
    }

    /// Atributos para um uso, validados contra o dispositivo
    pub fn attributes(&self, usage: Usage) -> BuildResult<VibrationAttributes> {
        let attributes = VibrationAttributes::for_usage(usage);
        self.validate_attributes(&attributes)?;
        Ok(attributes)
    }

    pub fn validate_attributes(&self, attributes: &VibrationAttributes) -> BuildResult<()> {
        if !self.caps.supports_attributes() {
            return Err(BuildFailure::AttributesUnsupported);
        }
        if !self.caps.usage(attributes.usage()).is_yes() {
            return Err(BuildFailure::UnsupportedUsage(attributes.usage()));
        }
        Ok(())
    }
}

/// Builder de composição
///
/// Cada passo é normalizado na entrada; a verificação de suporte acontece em
/// [`compose`](Self::compose).
#[derive(Debug, Clone)]
pub struct CompositionBuilder<'a> {
    builder: EffectBuilder<'a>,
    steps: Vec<PrimitiveStep>,
}

impl CompositionBuilder<'_> {
    pub fn add_primitive(mut self, primitive: Primitive) -> Self {
        self.steps.push(PrimitiveStep::new(primitive));
        self
    }

    /// Adiciona passo com escala e atraso crus
    pub fn add_primitive_with(mut self, primitive: Primitive, scale: f32, delay_ms: i32) -> Self {
        self.steps.push(PrimitiveStep::from_raw(primitive, scale, delay_ms));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn compose(self) -> BuildResult<EffectDescriptor> {
        let caps = self.builder.caps;
        if !caps.supports_composition() {
            return Err(BuildFailure::CompositionUnsupported);
        }
        if self.steps.is_empty() {
            return Err(BuildFailure::EmptyComposition);
        }
        if let Some(step) = self.steps.iter().find(|s| !caps.primitive(s.primitive).is_yes()) {
            return Err(BuildFailure::UnsupportedPrimitive(step.primitive));
        }
        Ok(EffectDescriptor::new(EffectKind::Composition(self.steps)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pattern() {
        assert_eq!(validate_pattern(0, None, -1), Err(BuildFailure::EmptyPattern));
        assert_eq!(
            validate_pattern(3, Some(2), -1),
            Err(BuildFailure::AmplitudeLengthMismatch { pattern: 3, amplitudes: 2 })
        );
        assert_eq!(
            validate_pattern(3, None, 5),
            Err(BuildFailure::RepeatIndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(
            validate_pattern(3, None, -2),
            Err(BuildFailure::RepeatIndexOutOfRange { index: -2, len: 3 })
        );
        assert_eq!(validate_pattern(3, Some(3), -1), Ok(None));
        assert_eq!(validate_pattern(3, None, 2), Ok(Some(2)));
    }

    #[test]
    fn test_primitive_scale_from_raw() {
        assert_eq!(PrimitiveScale::from_raw(1.5), PrimitiveScale::Explicit(1.0));
        assert_eq!(PrimitiveScale::from_raw(0.0), PrimitiveScale::Explicit(0.0));
        assert_eq!(PrimitiveScale::from_raw(-0.5), PrimitiveScale::Default);
        assert_eq!(PrimitiveScale::from_raw(f32::NAN), PrimitiveScale::Default);
    }

    #[test]
    fn test_step_delay_clamped() {
        let step = PrimitiveStep::from_raw(Primitive::Tick, 0.5, -20);
        assert_eq!(step.delay_ms, 0);
        assert_eq!(step.scale, PrimitiveScale::Explicit(0.5));
    }

    #[test]
    fn test_descriptor_duration() {
        let one_shot = EffectDescriptor::new(EffectKind::OneShot {
            duration_ms: 120,
            amplitude: Amplitude::Default,
        });
        assert_eq!(one_shot.duration_ms(), Some(120));

        let looping = EffectDescriptor::new(EffectKind::Waveform {
            timings: vec![0, 50],
            amplitudes: None,
            repeat: Some(0),
        });
        assert_eq!(looping.duration_ms(), None);
    }
}
