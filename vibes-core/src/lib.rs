//! # 📳 vibes-core — Negociação de capacidades e despacho de vibração
//!
//! Descobre, uma vez por contexto, o que o dispositivo suporta em cada nível de
//! API, monta tabelas de suporte imutáveis por família de efeito e encaminha cada
//! pedido de vibração ao mecanismo mais capaz disponível, degradando quando
//! algo falta.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 Vibes (dispatcher)          │
//! │   vibrate · pattern · predefined · gestures │
//! └─────────────────────────────────────────────┘
//!          ↓                         ↓
//! ┌──────────────────┐    ┌──────────────────────┐
//! │  EffectBuilder   │ ←  │ DeviceCapabilities   │
//! │  (validação)     │    │ (SupportTable<K>)    │
//! └──────────────────┘    └──────────────────────┘
//!          ↓                         ↑
//! ┌─────────────────────────────────────────────┐
//! │   PlatformBackend / VibratorBackend (trait) │
//! └─────────────────────────────────────────────┘
//!                      ↓
//!           SO (Android, navegador, mock)
//! ```
//!
//! Todas as camadas registram pelo [`VibesLog`], que filtra por nível e pausa
//! e encaminha para a fachada `log`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use vibes_core::{DeviceProfile, MockPlatform, Vibes, VibesConfig};
//! use vibes_core::types::PredefinedEffect;
//!
//! let platform = MockPlatform::new(DeviceProfile::modern());
//! let mut vibes = Vibes::new(platform, VibesConfig::default());
//! vibes.init();
//!
//! assert!(vibes.can_vibrate());
//! assert!(vibes.vibrate(120, -1, false));
//! assert!(vibes.vibrate_predefined(PredefinedEffect::Click, true));
//! assert!(vibes.vibrate_pop());
//! ```
//!
//! ## Características
//!
//! - **Sem estado global**: contexto explícito, vários contextos isolados por processo
//! - **Famílias fechadas**: enums com índice por `match` e tabela `ALL`
//! - **Fallback**: gestos percorrem cadeias de efeitos até um tocar
//! - **Mock**: [`MockPlatform`] simula Android em qualquer nível de API, ou iOS com feedback nativo

pub mod error;
pub mod types;
pub mod logging;
pub mod config;
pub mod attributes;
pub mod effect;
pub mod combined;
pub mod pattern;
pub mod backend;
pub mod capability;
pub mod report;
pub mod dispatcher;
pub mod mock;

pub use error::{BackendError, BackendResult, BuildFailure, BuildResult, VibesError, VibesResult};
pub use types::{Amplitude, FeatureId, Gesture, ImpactStyle, NotificationStyle, SupportTable, SupportVerdict};
pub use logging::{LogEntry, LogLevel, VibesLog};
pub use config::VibesConfig;
pub use attributes::{AttributesBuilder, VibrationAttributes};
pub use effect::{CompositionBuilder, EffectBuilder, EffectDescriptor, EffectKind, PrimitiveScale, PrimitiveStep};
pub use combined::{CombinedVibration, ParallelCombination};
pub use backend::{PlatformBackend, VibratorBackend, VibratorHandle};
pub use capability::{DeviceCapabilities, FeatureSummary};
pub use report::{SupportReport, VibratorInfo};
pub use dispatcher::{GestureRung, Vibes};
pub use mock::{DeviceProfile, MockCall, MockFailures, MockHandle, MockPlatform};

#[cfg(test)]
mod tests;
