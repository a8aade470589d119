use crate::domain::model::{DistributionEntry, GrowthDistribution};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 成長率分組方式
///
/// `Exact` 以位元完全相同為同一組；數學上相等但最後一位不同的浮點數會被當成不同結果。
/// `RoundTo` 先四捨五入到指定小數位再分組。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum BinningPolicy {
    #[default]
    Exact,
    RoundTo { decimals: u32 },
}

impl BinningPolicy {
    fn bucket(&self, ratio: f64) -> f64 {
        let value = match self {
            Self::Exact => ratio,
            Self::RoundTo { decimals } => {
                let scale = 10f64.powi(*decimals as i32);
                (ratio * scale).round() / scale
            }
        };
        // -0.0 與 0.0 視為同一值
        if value == 0.0 {
            0.0
        } else {
            value
        }
    }
}

pub fn build_distribution(ratios: &[f64]) -> GrowthDistribution {
    build_distribution_with(ratios, BinningPolicy::Exact)
}

pub fn build_distribution_with(ratios: &[f64], policy: BinningPolicy) -> GrowthDistribution {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    let mut observations = 0usize;

    for &ratio in ratios {
        if !ratio.is_finite() {
            tracing::warn!("⚠️ Ignoring non-finite growth ratio: {}", ratio);
            continue;
        }
        let value = policy.bucket(ratio);
        counts.entry(value.to_bits()).or_insert((value, 0)).1 += 1;
        observations += 1;
    }

    let mut entries: Vec<DistributionEntry> = counts
        .into_values()
        .map(|(ratio, count)| DistributionEntry {
            ratio,
            count,
            probability: count as f64 / observations as f64,
        })
        .collect();
    entries.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));

    tracing::debug!(
        "Built growth distribution: {} distinct ratios from {} observations ({:?})",
        entries.len(),
        observations,
        policy
    );

    GrowthDistribution::from_entries(entries, observations)
}
