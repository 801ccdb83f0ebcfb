//! Acesso à Vibration API
//!
//! `navigator.vibrate` recebe uma duração ou um padrão on/off e devolve `false`
//! quando o navegador recusa o pedido (sem gesto do usuário, aba em segundo
//! plano, valores fora do limite).

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

/// Superfície mínima de `navigator.vibrate`
pub trait VibrateApi: Send + fmt::Debug {
    /// `navigator.vibrate` existe
    fn is_available(&self) -> bool;

    /// Vibra por `duration_ms`; 0 cancela
    fn vibrate_ms(&self, duration_ms: u32) -> bool;

    /// Padrão on/off
    fn vibrate_pattern(&self, pattern: &[u32]) -> bool;
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAVEGADOR SIMULADO
// ═══════════════════════════════════════════════════════════════════════════════

/// Chamada recebida pelo navegador simulado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigatorCall {
    Duration(u32),
    Pattern(Vec<u32>),
}

#[derive(Debug)]
struct NavigatorState {
    available: bool,
    accepting: bool,
    calls: Vec<NavigatorCall>,
}

/// Navegador simulado; clones compartilham o mesmo registro
#[derive(Debug, Clone)]
pub struct SimulatedNavigator {
    state: Arc<Mutex<NavigatorState>>,
}

impl SimulatedNavigator {
    pub fn new(available: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(NavigatorState {
                available,
                accepting: true,
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavigatorState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Faz o navegador recusar (ou voltar a aceitar) os pedidos
    pub fn set_accepting(&self, accepting: bool) {
        self.lock().accepting = accepting;
    }

    pub fn calls(&self) -> Vec<NavigatorCall> {
        self.lock().calls.clone()
    }

    pub fn clear(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, call: NavigatorCall) -> bool {
        let mut state = self.lock();
        state.calls.push(call);
        state.available && state.accepting
    }
}

impl Default for SimulatedNavigator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl VibrateApi for SimulatedNavigator {
    fn is_available(&self) -> bool {
        self.lock().available
    }

    fn vibrate_ms(&self, duration_ms: u32) -> bool {
        self.record(NavigatorCall::Duration(duration_ms))
    }

    fn vibrate_pattern(&self, pattern: &[u32]) -> bool {
        self.record(NavigatorCall::Pattern(pattern.to_vec()))
    }
}
