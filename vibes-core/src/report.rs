//! Relatório de suporte serializável

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::{DeviceCapabilities, FeatureSummary};
use crate::types::{FeatureId, SupportTable, SupportVerdict};

/// Informações de um vibrador (campos ausentes quando a plataforma não expõe)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibratorInfo {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resonant_frequency: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q_factor: Option<f32>,
    /// Duração (ms) por primitiva
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primitive_durations: Option<BTreeMap<String, u32>>,
}

/// Snapshot completo de suporte
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportReport {
    pub features: FeatureSummary,
    /// Configuração de haptic feedback do usuário
    pub haptic_status: SupportVerdict,
    pub vibrators: Vec<VibratorInfo>,
    pub haptic_feedback: BTreeMap<String, SupportVerdict>,
    pub predefined_effects: BTreeMap<String, SupportVerdict>,
    pub primitives: BTreeMap<String, SupportVerdict>,
    pub usages: BTreeMap<String, SupportVerdict>,
}

impl SupportReport {
    pub fn new(
        caps: &DeviceCapabilities,
        haptic_status: SupportVerdict,
        vibrators: Vec<VibratorInfo>,
    ) -> Self {
        Self {
            features: caps.summary(),
            haptic_status,
            vibrators,
            haptic_feedback: named(caps.haptic_table()),
            predefined_effects: named(caps.predefined_table()),
            primitives: named(caps.primitive_table()),
            usages: named(caps.usage_table()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn named<K: FeatureId>(table: &SupportTable<K>) -> BTreeMap<String, SupportVerdict> {
    table
        .iter()
        .map(|(id, verdict)| (format!("{:?}", id), verdict))
        .collect()
}
