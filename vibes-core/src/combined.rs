//! Vibração combinada em múltiplos vibradores

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::effect::EffectDescriptor;
use crate::error::{BuildFailure, BuildResult};

/// Combinação de efeitos para um ou mais vibradores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombinedVibration {
    /// Mesmo efeito em todos os vibradores
    Parallel(EffectDescriptor),
    /// Um efeito por vibrador, tocados ao mesmo tempo
    PerVibrator(BTreeMap<i32, EffectDescriptor>),
}

impl CombinedVibration {
    pub fn parallel(effect: EffectDescriptor) -> Self {
        CombinedVibration::Parallel(effect)
    }

    pub fn start_parallel() -> ParallelCombination {
        ParallelCombination::new()
    }

    /// Ids de vibrador explicitamente referenciados
    pub fn vibrator_ids(&self) -> Vec<i32> {
        match self {
            CombinedVibration::Parallel(_) => Vec::new(),
            CombinedVibration::PerVibrator(effects) => effects.keys().copied().collect(),
        }
    }

    pub fn effects(&self) -> Vec<&EffectDescriptor> {
        match self {
            CombinedVibration::Parallel(effect) => vec![effect],
            CombinedVibration::PerVibrator(effects) => effects.values().collect(),
        }
    }
}

/// Builder de [`CombinedVibration::PerVibrator`]
#[derive(Debug, Clone, Default)]
pub struct ParallelCombination {
    effects: BTreeMap<i32, EffectDescriptor>,
}

impl ParallelCombination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adiciona ou substitui o efeito do vibrador
    pub fn add_vibrator(mut self, vibrator_id: i32, effect: EffectDescriptor) -> Self {
        self.effects.insert(vibrator_id, effect);
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn combine(self) -> BuildResult<CombinedVibration> {
        if self.effects.is_empty() {
            return Err(BuildFailure::EmptyCombination);
        }
        Ok(CombinedVibration::PerVibrator(self.effects))
    }
}
