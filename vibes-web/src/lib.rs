//! # 🌐 vibes-web — Backend de navegador
//!
//! Liga o núcleo à Web Vibration API (`navigator.vibrate`). O núcleo trabalha
//! com padrões off/on; a API do navegador usa on/off, a conversão fica no
//! [`WebVibrator`].
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use vibes_core::{Vibes, VibesConfig};
//! use vibes_web::{SimulatedNavigator, WebPlatform};
//!
//! let navigator = SimulatedNavigator::default();
//! let mut vibes = Vibes::new(WebPlatform::new(navigator.clone()), VibesConfig::default());
//! vibes.init();
//!
//! assert!(vibes.vibrate(200, -1, false));
//! assert!(vibes.vibrate_on_off(&[100, 50, 100]));
//! ```
//!
//! Com a feature `wasm`, [`browser_context`] monta o contexto sobre o
//! navegador real.

pub mod error;
pub mod api;
pub mod platform;

#[cfg(feature = "wasm")]
pub mod navigator;

pub use error::{WebError, WebResult};
pub use api::{NavigatorCall, SimulatedNavigator, VibrateApi};
pub use platform::{WebPlatform, WebVibrator, WEB_OS_VERSION, WEB_VIBRATOR_ID};

#[cfg(feature = "wasm")]
pub use navigator::BrowserNavigator;

/// Contexto inicializado sobre o navegador atual
#[cfg(feature = "wasm")]
pub fn browser_context(config: vibes_core::VibesConfig) -> vibes_core::Vibes {
    let mut vibes = vibes_core::Vibes::new(WebPlatform::new(BrowserNavigator::new()), config);
    vibes.init();
    vibes
}
