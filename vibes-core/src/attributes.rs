//! Atributos de vibração
//!
//! Valor imutável (uso + flags) que acompanha um efeito. A validação contra as
//! capacidades do dispositivo fica no [`EffectBuilder`](crate::effect::EffectBuilder).

use serde::{Deserialize, Serialize};

use crate::types::{AttributeFlag, Usage};

/// Atributos de vibração (`VibrationAttributes`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VibrationAttributes {
    usage: Usage,
    flags: u32,
}

impl VibrationAttributes {
    /// Atributos com apenas o uso definido
    pub fn for_usage(usage: Usage) -> Self {
        Self { usage, flags: 0 }
    }

    pub fn builder() -> AttributesBuilder {
        AttributesBuilder::new()
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn flags(&self) -> u32 {
        self.flags
    }

    pub fn has_flag(&self, flag: AttributeFlag) -> bool {
        self.flags & flag.bits() != 0
    }

    /// Classe do uso (`usage & USAGE_CLASS_MASK`)
    pub fn usage_class(&self) -> Usage {
        self.usage.class()
    }
}

impl Default for VibrationAttributes {
    fn default() -> Self {
        Self::for_usage(Usage::Unknown)
    }
}

/// Builder de [`VibrationAttributes`]
#[derive(Debug, Clone, Default)]
pub struct AttributesBuilder {
    usage: Option<Usage>,
    flags: u32,
}

impl AttributesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parte de atributos existentes
    pub fn from(existing: &VibrationAttributes) -> Self {
        Self {
            usage: Some(existing.usage),
            flags: existing.flags,
        }
    }

    pub fn usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Liga as flags dadas
    pub fn flags(mut self, flags: &[AttributeFlag]) -> Self {
        self.flags |= AttributeFlag::combine(flags);
        self
    }

    /// Define os bits de `mask` com os valores de `flags` (`setFlags(flags, mask)`)
    pub fn masked_flags(mut self, flags: u32, mask: u32) -> Self {
        self.flags = (self.flags & !mask) | (flags & mask);
        self
    }

    pub fn build(self) -> VibrationAttributes {
        VibrationAttributes {
            usage: self.usage.unwrap_or(Usage::Unknown),
            flags: self.flags,
        }
    }
}
