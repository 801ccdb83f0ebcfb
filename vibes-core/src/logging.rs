//! Sink de log da camada de vibração
//!
//! Filtra por nível mínimo e flag de pausa, depois encaminha para a fachada `log`
//! (target `vibes`). Opcionalmente guarda as mensagens emitidas para inspeção.

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VibesError;

/// Target usado nas macros de `log`
pub const LOG_TARGET: &str = "vibes";

/// Nível de log, ordenado: `None < Error < Warning < All`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LogLevel {
    None,
    Error,
    #[default]
    Warning,
    All,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::None => "none",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = VibesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "0" => Ok(LogLevel::None),
            "error" | "1" => Ok(LogLevel::Error),
            "warning" | "warn" | "2" => Ok(LogLevel::Warning),
            "all" | "info" | "3" => Ok(LogLevel::All),
            other => Err(VibesError::InvalidConfig(format!(
                "unknown log level '{}'",
                other
            ))),
        }
    }
}

/// Mensagem emitida (guardada quando a captura está ligada)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Sink de log
#[derive(Debug, Default)]
pub struct VibesLog {
    level: LogLevel,
    paused: bool,
    captured: Option<RefCell<Vec<LogEntry>>>,
}

impl VibesLog {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            paused: false,
            captured: None,
        }
    }

    /// Liga a captura das mensagens emitidas
    pub fn capturing(mut self) -> Self {
        self.captured = Some(RefCell::new(Vec::new()));
        self
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pausa ou retoma o log; devolve o estado anterior
    pub fn set_paused(&mut self, paused: bool) -> bool {
        std::mem::replace(&mut self.paused, paused)
    }

    /// Todos os níveis habilitados e sem pausa
    pub fn all_enabled(&self) -> bool {
        self.level == LogLevel::All && !self.paused
    }

    /// A mensagem deste nível seria emitida?
    pub fn enabled(&self, level: LogLevel) -> bool {
        !self.paused && level != LogLevel::None && level <= self.level
    }

    /// Emite a mensagem se o nível e a pausa permitirem; devolve se foi emitida
    pub fn log(&self, message: impl AsRef<str>, level: LogLevel) -> bool {
        if !self.enabled(level) {
            return false;
        }

        let message = message.as_ref();
        match level {
            LogLevel::Error => log::error!(target: LOG_TARGET, "{}", message),
            LogLevel::Warning => log::warn!(target: LOG_TARGET, "{}", message),
            LogLevel::All => log::info!(target: LOG_TARGET, "{}", message),
            LogLevel::None => return false,
        }

        if let Some(captured) = &self.captured {
            captured.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
        true
    }

    pub fn error(&self, message: impl AsRef<str>) -> bool {
        self.log(message, LogLevel::Error)
    }

    pub fn warn(&self, message: impl AsRef<str>) -> bool {
        self.log(message, LogLevel::Warning)
    }

    pub fn info(&self, message: impl AsRef<str>) -> bool {
        self.log(message, LogLevel::All)
    }

    /// Mensagens capturadas até agora (vazio sem captura)
    pub fn entries(&self) -> Vec<LogEntry> {
        self.captured
            .as_ref()
            .map(|c| c.borrow().clone())
            .unwrap_or_default()
    }

    /// Quantas mensagens capturadas têm este nível
    pub fn count(&self, level: LogLevel) -> usize {
        self.captured
            .as_ref()
            .map(|c| c.borrow().iter().filter(|e| e.level == level).count())
            .unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Some(captured) = &self.captured {
            captured.borrow_mut().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::None < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::All);
        assert_eq!(LogLevel::default(), LogLevel::Warning);
    }

    #[test]
    fn test_level_filtering() {
        let log = VibesLog::new(LogLevel::Warning).capturing();
        assert!(log.error("bad"));
        assert!(log.warn("hmm"));
        assert!(!log.info("fyi"));
        assert!(!log.log("nothing", LogLevel::None));
        assert_eq!(log.entries().len(), 2);
    }

    #[test]
    fn test_pause_returns_previous() {
        let mut log = VibesLog::new(LogLevel::All).capturing();
        assert!(log.all_enabled());

        assert!(!log.set_paused(true));
        assert!(!log.error("suppressed"));
        assert!(!log.all_enabled());

        assert!(log.set_paused(false));
        assert!(log.error("emitted"));
        assert_eq!(log.count(LogLevel::Error), 1);
    }

    #[test]
    fn test_level_none_is_silent() {
        let log = VibesLog::new(LogLevel::None).capturing();
        assert!(!log.error("x"));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("all".parse::<LogLevel>().unwrap(), LogLevel::All);
        assert_eq!("0".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
