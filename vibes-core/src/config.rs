//! Configuração do contexto de vibração
//!
//! Valores vêm de `.env` ou variáveis de ambiente:
//! - `VIBES_LOG_LEVEL` (none, error, warning, all)
//! - `VIBES_PAUSE_LOGGING` (true/false)
//! - `VIBES_DEFAULT_DURATION_MS`
//!
//! Valores inválidos caem no padrão.

use std::env;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Duração padrão da vibração simples (ms)
pub const DEFAULT_DURATION_MS: u64 = 200;

/// Configuração do contexto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibesConfig {
    /// Nível mínimo de log
    #[serde(default)]
    pub log_level: LogLevel,
    /// Começa com log pausado?
    #[serde(default)]
    pub pause_logging: bool,
    /// Duração de `vibrate_default` (ms)
    #[serde(default = "default_duration")]
    pub default_duration_ms: u64,
    /// Guarda mensagens emitidas (inspeção em testes e diagnósticos)
    #[serde(default)]
    pub capture_logs: bool,
}

fn default_duration() -> u64 {
    DEFAULT_DURATION_MS
}

impl Default for VibesConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            pause_logging: false,
            default_duration_ms: DEFAULT_DURATION_MS,
            capture_logs: false,
        }
    }
}

impl VibesConfig {
    /// Lê do ambiente (após carregar `.env` uma vez)
    pub fn from_env() -> Self {
        ensure_loaded();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê de uma função de consulta arbitrária
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("VIBES_LOG_LEVEL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.log_level),
            pause_logging: lookup("VIBES_PAUSE_LOGGING")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.pause_logging),
            default_duration_ms: lookup("VIBES_DEFAULT_DURATION_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.default_duration_ms),
            capture_logs: defaults.capture_logs,
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_default_duration(mut self, ms: u64) -> Self {
        self.default_duration_ms = ms;
        self
    }

    pub fn with_captured_logs(mut self) -> Self {
        self.capture_logs = true;
        self
    }
}
