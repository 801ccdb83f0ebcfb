//! Conversão entre convenções de padrão
//!
//! Android usa off/on (o primeiro tempo é uma pausa); a Vibration API da web
//! usa on/off (o primeiro tempo vibra).

/// on/off → off/on: antepõe uma pausa nula
pub fn on_off_to_off_on(pattern: &[u64]) -> Vec<u64> {
    let mut converted = Vec::with_capacity(pattern.len() + 1);
    converted.push(0);
    converted.extend_from_slice(pattern);
    converted
}

/// off/on → on/off: descarta a pausa inicial nula, senão antepõe um pulso nulo
pub fn off_on_to_on_off(pattern: &[u64]) -> Vec<u64> {
    match pattern.split_first() {
        Some((0, rest)) => rest.to_vec(),
        Some(_) => on_off_to_off_on(pattern),
        None => Vec::new(),
    }
}
