//! Tipos de dados de vibração
//!
//! Famílias de identificadores (constantes de haptic feedback, efeitos predefinidos,
//! primitivas de composição, usos de atributos), veredictos de suporte e tabelas
//! de suporte indexadas por id compacto.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::{VibesError, VibesResult};

/// Níveis de API (Android `SDK_INT`) que habilitam cada recurso
pub mod api {
    /// `View.performHapticFeedback`
    pub const HAPTIC_FEEDBACK: u32 = 3;
    /// `VibrationEffect` (one-shot, waveform)
    pub const VIBRATION_EFFECTS: u32 = 26;
    /// `VibrationEffect.createPredefined`
    pub const PREDEFINED_EFFECTS: u32 = 29;
    /// Consulta `Vibrator.areEffectsSupported`; antes disso os predefinidos são `Unknown`
    pub const EFFECT_SUPPORT_QUERY: u32 = 31;
    /// `VibrationEffect.Composition`
    pub const COMPOSITION: u32 = 30;
    /// `VibrationAttributes`
    pub const ATTRIBUTES: u32 = 30;
    /// `CombinedVibration`
    pub const COMBINED_VIBRATION: u32 = 31;
    /// `VibratorManager` (múltiplos vibradores)
    pub const VIBRATOR_MANAGER: u32 = 31;
    /// `Vibrator.getPrimitiveDurations`
    pub const PRIMITIVE_DURATIONS: u32 = 31;
    /// A partir daqui a configuração de haptic feedback do usuário não é legível
    /// e `FLAG_IGNORE_GLOBAL_SETTING` deixa de ter efeito
    pub const HAPTIC_SETTING_HIDDEN: u32 = 33;
    /// `Vibrator.getResonantFrequency` / `getQFactor`
    pub const RESONANCE_QUERY: u32 = 34;
}

// ═══════════════════════════════════════════════════════════════════════════════
// VEREDICTO DE SUPORTE
// ═══════════════════════════════════════════════════════════════════════════════

/// Veredicto de suporte de um recurso
///
/// `Unknown` significa que a API existe mas a plataforma não sabe dizer se o
/// hardware suporta o recurso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportVerdict {
    Unknown,
    Yes,
    No,
}

impl SupportVerdict {
    /// Valor cru usado pelo Android (`Vibrator.VIBRATION_EFFECT_SUPPORT_*`)
    pub fn raw(self) -> i32 {
        match self {
            SupportVerdict::Unknown => 0,
            SupportVerdict::Yes => 1,
            SupportVerdict::No => 2,
        }
    }

    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(SupportVerdict::Unknown),
            1 => Some(SupportVerdict::Yes),
            2 => Some(SupportVerdict::No),
            _ => None,
        }
    }

    pub fn from_bool(supported: bool) -> Self {
        if supported {
            SupportVerdict::Yes
        } else {
            SupportVerdict::No
        }
    }

    pub fn is_yes(self) -> bool {
        self == SupportVerdict::Yes
    }

    pub fn is_no(self) -> bool {
        self == SupportVerdict::No
    }

    /// Interseção com o suporte de API: nunca promove `No`
    pub fn and(self, other: SupportVerdict) -> SupportVerdict {
        match (self, other) {
            (SupportVerdict::No, _) | (_, SupportVerdict::No) => SupportVerdict::No,
            (SupportVerdict::Yes, SupportVerdict::Yes) => SupportVerdict::Yes,
            _ => SupportVerdict::Unknown,
        }
    }
}

impl fmt::Display for SupportVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SupportVerdict::Unknown => "UNKNOWN",
            SupportVerdict::Yes => "YES",
            SupportVerdict::No => "NO",
        };
        f.write_str(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FAMÍLIAS DE IDENTIFICADORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Família fechada de identificadores com índice compacto
///
/// `index()` é implementado com `match` exaustivo; `ALL` lista as variantes na
/// ordem dos índices.
pub trait FeatureId: Copy + Eq + fmt::Debug + 'static {
    /// Nome da família (para mensagens)
    const FAMILY: &'static str;

    /// Todas as variantes, em ordem de índice
    const ALL: &'static [Self];

    /// Índice compacto em `0..ALL.len()`
    fn index(self) -> usize;

    /// Id cru da plataforma
    fn raw(self) -> i32;

    /// Converte id cru em variante
    fn from_raw(raw: i32) -> VibesResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.raw() == raw)
            .ok_or(VibesError::InvalidId {
                family: Self::FAMILY,
                raw,
            })
    }
}

/// Família cujo suporte é decidido por nível de API por item
pub trait ApiGated: FeatureId {
    fn required_level(self) -> u32;
}

/// Converte ids crus de uma família, falhando no primeiro id desconhecido
pub fn parse_ids<K: FeatureId>(raw: &[i32]) -> VibesResult<Vec<K>> {
    raw.iter().map(|&r| K::from_raw(r)).collect()
}

/// Ids crus de uma lista de variantes
pub fn raw_ids<K: FeatureId>(ids: &[K]) -> Vec<i32> {
    ids.iter().map(|id| id.raw()).collect()
}

/// Constantes de haptic feedback (`HapticFeedbackConstants`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HapticFeedback {
    NoHaptics,
    LongPress,
    VirtualKey,
    KeyboardTap,
    ClockTick,
    ContextClick,
    KeyboardRelease,
    VirtualKeyRelease,
    TextHandleMove,
    GestureStart,
    GestureEnd,
    Confirm,
    Reject,
    ToggleOn,
    ToggleOff,
    GestureThresholdActivate,
    GestureThresholdDeactivate,
    DragStart,
    SegmentTick,
    SegmentFrequentTick,
}

impl FeatureId for HapticFeedback {
    const FAMILY: &'static str = "HapticFeedback";

    const ALL: &'static [Self] = &[
        HapticFeedback::NoHaptics,
        HapticFeedback::LongPress,
        HapticFeedback::VirtualKey,
        HapticFeedback::KeyboardTap,
        HapticFeedback::ClockTick,
        HapticFeedback::ContextClick,
        HapticFeedback::KeyboardRelease,
        HapticFeedback::VirtualKeyRelease,
        HapticFeedback::TextHandleMove,
        HapticFeedback::GestureStart,
        HapticFeedback::GestureEnd,
        HapticFeedback::Confirm,
        HapticFeedback::Reject,
        HapticFeedback::ToggleOn,
        HapticFeedback::ToggleOff,
        HapticFeedback::GestureThresholdActivate,
        HapticFeedback::GestureThresholdDeactivate,
        HapticFeedback::DragStart,
        HapticFeedback::SegmentTick,
        HapticFeedback::SegmentFrequentTick,
    ];

    fn index(self) -> usize {
        match self {
            HapticFeedback::NoHaptics => 0,
            HapticFeedback::LongPress => 1,
            HapticFeedback::VirtualKey => 2,
            HapticFeedback::KeyboardTap => 3,
            HapticFeedback::ClockTick => 4,
            HapticFeedback::ContextClick => 5,
            HapticFeedback::KeyboardRelease => 6,
            HapticFeedback::VirtualKeyRelease => 7,
            HapticFeedback::TextHandleMove => 8,
            HapticFeedback::GestureStart => 9,
            HapticFeedback::GestureEnd => 10,
            HapticFeedback::Confirm => 11,
            HapticFeedback::Reject => 12,
            HapticFeedback::ToggleOn => 13,
            HapticFeedback::ToggleOff => 14,
            HapticFeedback::GestureThresholdActivate => 15,
            HapticFeedback::GestureThresholdDeactivate => 16,
            HapticFeedback::DragStart => 17,
            HapticFeedback::SegmentTick => 18,
            HapticFeedback::SegmentFrequentTick => 19,
        }
    }

    fn raw(self) -> i32 {
        match self {
            HapticFeedback::NoHaptics => -1,
            HapticFeedback::LongPress => 0,
            HapticFeedback::VirtualKey => 1,
            HapticFeedback::KeyboardTap => 3,
            HapticFeedback::ClockTick => 4,
            HapticFeedback::ContextClick => 6,
            HapticFeedback::KeyboardRelease => 7,
            HapticFeedback::VirtualKeyRelease => 8,
            HapticFeedback::TextHandleMove => 9,
            HapticFeedback::GestureStart => 12,
            HapticFeedback::GestureEnd => 13,
            HapticFeedback::Confirm => 16,
            HapticFeedback::Reject => 17,
            HapticFeedback::ToggleOn => 21,
            HapticFeedback::ToggleOff => 22,
            HapticFeedback::GestureThresholdActivate => 23,
            HapticFeedback::GestureThresholdDeactivate => 24,
            HapticFeedback::DragStart => 25,
            HapticFeedback::SegmentTick => 26,
            HapticFeedback::SegmentFrequentTick => 27,
        }
    }
}

impl ApiGated for HapticFeedback {
    fn required_level(self) -> u32 {
        match self {
            HapticFeedback::LongPress => 3,
            HapticFeedback::VirtualKey => 5,
            HapticFeedback::KeyboardTap => 8,
            HapticFeedback::ClockTick => 21,
            HapticFeedback::ContextClick => 23,
            HapticFeedback::KeyboardRelease
            | HapticFeedback::VirtualKeyRelease
            | HapticFeedback::TextHandleMove => 27,
            HapticFeedback::GestureStart
            | HapticFeedback::GestureEnd
            | HapticFeedback::Confirm
            | HapticFeedback::Reject => 30,
            HapticFeedback::NoHaptics
            | HapticFeedback::ToggleOn
            | HapticFeedback::ToggleOff
            | HapticFeedback::GestureThresholdActivate
            | HapticFeedback::GestureThresholdDeactivate
            | HapticFeedback::DragStart
            | HapticFeedback::SegmentTick
            | HapticFeedback::SegmentFrequentTick => 34,
        }
    }
}

/// Flags opcionais de haptic feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HapticFeedbackFlag {
    /// Sem flag (não é um id do Android)
    #[default]
    None,
    IgnoreViewSetting,
    /// Sem efeito a partir da API 33
    IgnoreGlobalSetting,
}

impl HapticFeedbackFlag {
    pub fn raw(self) -> i32 {
        match self {
            HapticFeedbackFlag::None => 0,
            HapticFeedbackFlag::IgnoreViewSetting => 1,
            HapticFeedbackFlag::IgnoreGlobalSetting => 2,
        }
    }
}

/// Efeitos predefinidos (`VibrationEffect.EFFECT_*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredefinedEffect {
    Click,
    DoubleClick,
    Tick,
    HeavyClick,
}

impl FeatureId for PredefinedEffect {
    const FAMILY: &'static str = "PredefinedEffect";

    const ALL: &'static [Self] = &[
        PredefinedEffect::Click,
        PredefinedEffect::DoubleClick,
        PredefinedEffect::Tick,
        PredefinedEffect::HeavyClick,
    ];

    fn index(self) -> usize {
        match self {
            PredefinedEffect::Click => 0,
            PredefinedEffect::DoubleClick => 1,
            PredefinedEffect::Tick => 2,
            PredefinedEffect::HeavyClick => 3,
        }
    }

    fn raw(self) -> i32 {
        match self {
            PredefinedEffect::Click => 0,
            PredefinedEffect::DoubleClick => 1,
            PredefinedEffect::Tick => 2,
            PredefinedEffect::HeavyClick => 5,
        }
    }
}

/// Primitivas de composição (`VibrationEffect.Composition.PRIMITIVE_*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Click,
    Thud,
    Spin,
    QuickRise,
    SlowRise,
    QuickFall,
    Tick,
    LowTick,
}

impl FeatureId for Primitive {
    const FAMILY: &'static str = "Primitive";

    const ALL: &'static [Self] = &[
        Primitive::Click,
        Primitive::Thud,
        Primitive::Spin,
        Primitive::QuickRise,
        Primitive::SlowRise,
        Primitive::QuickFall,
        Primitive::Tick,
        Primitive::LowTick,
    ];

    fn index(self) -> usize {
        match self {
            Primitive::Click => 0,
            Primitive::Thud => 1,
            Primitive::Spin => 2,
            Primitive::QuickRise => 3,
            Primitive::SlowRise => 4,
            Primitive::QuickFall => 5,
            Primitive::Tick => 6,
            Primitive::LowTick => 7,
        }
    }

    fn raw(self) -> i32 {
        match self {
            Primitive::Click => 1,
            Primitive::Thud => 2,
            Primitive::Spin => 3,
            Primitive::QuickRise => 4,
            Primitive::SlowRise => 5,
            Primitive::QuickFall => 6,
            Primitive::Tick => 7,
            Primitive::LowTick => 8,
        }
    }
}

impl ApiGated for Primitive {
    fn required_level(self) -> u32 {
        match self {
            Primitive::Click
            | Primitive::QuickRise
            | Primitive::SlowRise
            | Primitive::QuickFall
            | Primitive::Tick => 30,
            Primitive::Thud | Primitive::Spin | Primitive::LowTick => 31,
        }
    }
}

/// Usos de atributos de vibração (`VibrationAttributes.USAGE_*`)
///
/// `Unknown` e `ClassUnknown` compartilham o id cru 0; `from_raw(0)` devolve `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Usage {
    Unknown,
    ClassUnknown,
    ClassAlarm,
    ClassFeedback,
    ClassMedia,
    ClassMask,
    Alarm,
    Touch,
    Media,
    Ringtone,
    PhysicalEmulation,
    Notification,
    HardwareFeedback,
    CommunicationRequest,
    Accessibility,
}

impl Usage {
    /// Máscara da classe de uso
    pub const CLASS_MASK: i32 = 0x0F;

    /// Classe do uso (`usage & USAGE_CLASS_MASK`)
    pub fn class(self) -> Usage {
        match self.raw() & Self::CLASS_MASK {
            1 => Usage::ClassAlarm,
            2 => Usage::ClassFeedback,
            3 => Usage::ClassMedia,
            _ => Usage::ClassUnknown,
        }
    }
}

impl FeatureId for Usage {
    const FAMILY: &'static str = "Usage";

    const ALL: &'static [Self] = &[
        Usage::Unknown,
        Usage::ClassUnknown,
        Usage::ClassAlarm,
        Usage::ClassFeedback,
        Usage::ClassMedia,
        Usage::ClassMask,
        Usage::Alarm,
        Usage::Touch,
        Usage::Media,
        Usage::Ringtone,
        Usage::PhysicalEmulation,
        Usage::Notification,
        Usage::HardwareFeedback,
        Usage::CommunicationRequest,
        Usage::Accessibility,
    ];

    fn index(self) -> usize {
        match self {
            Usage::Unknown => 0,
            Usage::ClassUnknown => 1,
            Usage::ClassAlarm => 2,
            Usage::ClassFeedback => 3,
            Usage::ClassMedia => 4,
            Usage::ClassMask => 5,
            Usage::Alarm => 6,
            Usage::Touch => 7,
            Usage::Media => 8,
            Usage::Ringtone => 9,
            Usage::PhysicalEmulation => 10,
            Usage::Notification => 11,
            Usage::HardwareFeedback => 12,
            Usage::CommunicationRequest => 13,
            Usage::Accessibility => 14,
        }
    }

    fn raw(self) -> i32 {
        match self {
            Usage::Unknown | Usage::ClassUnknown => 0,
            Usage::ClassAlarm => 1,
            Usage::ClassFeedback => 2,
            Usage::ClassMedia => 3,
            Usage::ClassMask => 15,
            Usage::Alarm => 17,
            Usage::Touch => 18,
            Usage::Media => 19,
            Usage::Ringtone => 33,
            Usage::PhysicalEmulation => 34,
            Usage::Notification => 49,
            Usage::HardwareFeedback => 50,
            Usage::CommunicationRequest => 65,
            Usage::Accessibility => 66,
        }
    }
}

impl ApiGated for Usage {
    fn required_level(self) -> u32 {
        match self {
            Usage::Accessibility | Usage::ClassMedia | Usage::Media => 33,
            _ => api::ATTRIBUTES,
        }
    }
}

/// Flags de atributos de vibração (a maioria exige app privilegiado)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeFlag {
    BypassInterruptionPolicy,
    BypassUserVibrationIntensityOff,
    InvalidateSettingsCache,
    PipelinedEffect,
    BypassUserVibrationIntensityScale,
}

impl AttributeFlag {
    pub fn bits(self) -> u32 {
        match self {
            AttributeFlag::BypassInterruptionPolicy => 1,
            AttributeFlag::BypassUserVibrationIntensityOff => 2,
            AttributeFlag::InvalidateSettingsCache => 4,
            AttributeFlag::PipelinedEffect => 8,
            AttributeFlag::BypassUserVibrationIntensityScale => 16,
        }
    }

    /// Combina flags em máscara
    pub fn combine(flags: &[AttributeFlag]) -> u32 {
        flags.iter().fold(0, |acc, f| acc | f.bits())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEEDBACK NATIVO
// ═══════════════════════════════════════════════════════════════════════════════

/// Gestos prontos com cadeia de fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gesture {
    /// Toque mínimo
    Pop,
    /// Toque curto
    Peek,
    /// Três toques curtos
    Nope,
}

/// Estilo de impacto (`UIImpactFeedbackGenerator`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpactStyle {
    Heavy,
    Medium,
    Light,
    Rigid,
    Soft,
}

impl ImpactStyle {
    pub const ALL: &'static [ImpactStyle] = &[
        ImpactStyle::Heavy,
        ImpactStyle::Medium,
        ImpactStyle::Light,
        ImpactStyle::Rigid,
        ImpactStyle::Soft,
    ];

    /// Nome entregue à ponte nativa
    pub fn name(self) -> &'static str {
        match self {
            ImpactStyle::Heavy => "Heavy",
            ImpactStyle::Medium => "Medium",
            ImpactStyle::Light => "Light",
            ImpactStyle::Rigid => "Rigid",
            ImpactStyle::Soft => "Soft",
        }
    }
}

/// Estilo de notificação (`UINotificationFeedbackGenerator`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationStyle {
    Error,
    Success,
    Warning,
}

impl NotificationStyle {
    pub const ALL: &'static [NotificationStyle] = &[
        NotificationStyle::Error,
        NotificationStyle::Success,
        NotificationStyle::Warning,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NotificationStyle::Error => "Error",
            NotificationStyle::Success => "Success",
            NotificationStyle::Warning => "Warning",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TABELA DE SUPORTE
// ═══════════════════════════════════════════════════════════════════════════════

/// Tabela de suporte com exatamente um veredicto por identificador da família
#[derive(Clone, PartialEq, Eq)]
pub struct SupportTable<K: FeatureId> {
    verdicts: Box<[SupportVerdict]>,
    family: PhantomData<K>,
}

impl<K: FeatureId> SupportTable<K> {
    /// Mesmo veredicto para toda a família
    pub fn uniform(verdict: SupportVerdict) -> Self {
        Self::from_fn(|_| verdict)
    }

    /// Constrói percorrendo `K::ALL`
    pub fn from_fn(mut f: impl FnMut(K) -> SupportVerdict) -> Self {
        let verdicts = K::ALL.iter().map(|&id| f(id)).collect();
        Self {
            verdicts,
            family: PhantomData,
        }
    }

    pub fn get(&self, id: K) -> SupportVerdict {
        self.verdicts[id.index()]
    }

    pub fn is_supported(&self, id: K) -> bool {
        self.get(id).is_yes()
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, SupportVerdict)> + '_ {
        K::ALL.iter().map(move |&id| (id, self.get(id)))
    }
}

impl<K: FeatureId> fmt::Debug for SupportTable<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// AMPLITUDE
// ═══════════════════════════════════════════════════════════════════════════════

/// Amplitude de vibração one-shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amplitude {
    /// Amplitude padrão do dispositivo (-1)
    Default,
    /// Nível explícito em [1, 255]
    Level(u8),
}

impl Amplitude {
    /// Nenhuma vibração
    pub const NONE: i32 = 0;
    /// Padrão do dispositivo
    pub const DEFAULT: i32 = -1;
    /// Máximo
    pub const MAX: i32 = 255;

    /// Converte valor cru; `None` significa "não vibrar" (0 ou menor que -1)
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::DEFAULT => Some(Amplitude::Default),
            r if r < Self::DEFAULT || r == Self::NONE => None,
            r => Some(Amplitude::Level(r.min(Self::MAX) as u8)),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            Amplitude::Default => Self::DEFAULT,
            Amplitude::Level(level) => level as i32,
        }
    }

    /// Normaliza um segmento de waveform: < -1 vira 0 (sem vibração), > 255 vira 255
    pub fn clamp_segment(raw: i32) -> i32 {
        if raw < Self::DEFAULT {
            Self::NONE
        } else {
            raw.min(Self::MAX)
        }
    }
}
