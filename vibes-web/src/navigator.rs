//! `navigator.vibrate` real (feature `wasm`)

use js_sys::{Array, Reflect};
use wasm_bindgen::JsValue;

use crate::api::VibrateApi;

/// Navegador da janela atual
///
/// Não guarda o `Navigator`: valores JS não atravessam threads, então cada
/// chamada busca `window().navigator()` de novo.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    pub fn new() -> Self {
        Self
    }

    fn navigator() -> Option<web_sys::Navigator> {
        web_sys::window().map(|window| window.navigator())
    }
}

impl VibrateApi for BrowserNavigator {
    fn is_available(&self) -> bool {
        Self::navigator().is_some_and(|navigator| {
            Reflect::has(&navigator, &JsValue::from_str("vibrate")).unwrap_or(false)
        })
    }

    fn vibrate_ms(&self, duration_ms: u32) -> bool {
        Self::navigator().is_some_and(|navigator| navigator.vibrate_with_duration(duration_ms))
    }

    fn vibrate_pattern(&self, pattern: &[u32]) -> bool {
        let Some(navigator) = Self::navigator() else {
            return false;
        };
        let values: Array = pattern.iter().map(|&ms| JsValue::from(ms)).collect();
        navigator.vibrate_with_pattern(&values)
    }
}
