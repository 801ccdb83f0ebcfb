//! Erros da camada de vibração
//!
//! Três famílias distintas:
//! - [`BackendError`]: falhas reportadas pelo backend de plataforma (consulta ou chamada)
//! - [`BuildFailure`]: validação de efeitos (entrada inválida, recurso não suportado)
//! - [`VibesError`]: erros de programação (ids crus inválidos) e erros de backend propagados

use thiserror::Error;

use crate::types::{Primitive, Usage};

pub type VibesResult<T> = Result<T, VibesError>;
pub type BackendResult<T> = Result<T, BackendError>;
pub type BuildResult<T> = Result<T, BuildFailure>;

/// Erros de backend de plataforma
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Operação não existe nesta plataforma
    #[error("Unsupported by backend: {0}")]
    Unsupported(String),

    /// Consulta de capacidade falhou
    #[error("Capability query failed: {0}")]
    QueryFailed(String),

    /// Chamada de vibração falhou
    #[error("Backend call failed: {0}")]
    CallFailed(String),

    /// Nenhum vibrador presente
    #[error("No vibrator present")]
    NoVibrator,

    /// Vibrador não encontrado
    #[error("Vibrator {0} not found")]
    VibratorNotFound(i32),
}

/// Falha de construção de efeito
///
/// Sempre recuperável: o dispatcher converte em `false` e registra em nível Error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildFailure {
    #[error("Vibration effects are not supported on this device")]
    EffectsUnsupported,

    #[error("Predefined effects are not supported on this device")]
    PredefinedUnsupported,

    #[error("Vibration effect composition is not supported on this device")]
    CompositionUnsupported,

    #[error("The pattern is empty")]
    EmptyPattern,

    #[error("The length of pattern '{pattern}' does not equal the length of amplitudes '{amplitudes}'")]
    AmplitudeLengthMismatch { pattern: usize, amplitudes: usize },

    #[error("The amplitude of 0 will trigger no vibration")]
    SilentAmplitude,

    #[error("The amplitude '{0}' is outside the range -1..=255")]
    AmplitudeOutOfRange(i32),

    #[error("This device reports no support for Amplitude Control")]
    AmplitudeControlUnsupported,

    #[error("The repeat index of '{index}' is not valid for the length of pattern '{len}'")]
    RepeatIndexOutOfRange { index: i32, len: usize },

    #[error("The composition has no primitives")]
    EmptyComposition,

    #[error("The length of primitives '{primitives}' does not equal the length of scales '{scales}'")]
    ScaleLengthMismatch { primitives: usize, scales: usize },

    #[error("The length of primitives '{primitives}' does not equal the length of delays '{delays}'")]
    DelayLengthMismatch { primitives: usize, delays: usize },

    #[error("The primitive {0:?} is reported as not supported by this device")]
    UnsupportedPrimitive(Primitive),

    #[error("Vibration attributes are not supported on this device")]
    AttributesUnsupported,

    #[error("The usage {0:?} is not supported on this device")]
    UnsupportedUsage(Usage),

    #[error("Combined vibrations are not supported on this device")]
    CombinedUnsupported,

    #[error("The combination has no effects")]
    EmptyCombination,

    #[error("The vibrator {0} is not known to this device")]
    UnknownVibrator(i32),
}

/// Erros de programação e erros de backend propagados
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VibesError {
    /// Id cru não pertence à família
    #[error("Value {raw} is not defined in {family}")]
    InvalidId { family: &'static str, raw: i32 },

    /// Valor de configuração inválido
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Contexto não inicializado
    #[error("Vibration context not initialized")]
    NotInitialized,

    /// Erro do backend
    #[error(transparent)]
    Backend(#[from] BackendError),
}
