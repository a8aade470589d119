use crate::domain::model::{GrowthDistribution, SimulationResult};
use crate::utils::error::{ForecastError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// 蒙地卡羅模擬：依分布機率抽出 `sample_count` 個成長率 (可重複)，
/// 乘上 `baseline` 後回傳預測值的平均、最小與最大值。
pub fn simulate<R: Rng + ?Sized>(
    baseline: f64,
    distribution: &GrowthDistribution,
    sample_count: usize,
    rng: &mut R,
) -> Result<SimulationResult> {
    if distribution.is_empty() {
        return Err(ForecastError::EmptyDistribution);
    }
    if sample_count == 0 {
        return Err(ForecastError::InvalidParameter {
            name: "sample_count".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if !baseline.is_finite() || baseline < 0.0 {
        return Err(ForecastError::InvalidParameter {
            name: "baseline".to_string(),
            reason: format!("must be a finite non-negative number, got {}", baseline),
        });
    }

    let entries = distribution.entries();
    let weights = entries.iter().map(|entry| entry.probability);
    let sampler: WeightedIndex<f64> =
        WeightedIndex::new(weights).map_err(|e| ForecastError::InvalidParameter {
            name: "distribution".to_string(),
            reason: format!("probabilities cannot be used as weights: {}", e),
        })?;

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for _ in 0..sample_count {
        let prediction = baseline * entries[sampler.sample(rng)].ratio;
        sum += prediction;
        min = min.min(prediction);
        max = max.max(prediction);
    }

    let result = SimulationResult {
        sample_count,
        baseline,
        mean: sum / sample_count as f64,
        min,
        max,
    };

    tracing::debug!(
        "Simulated {} draws from baseline {}: mean={:.2}, min={:.2}, max={:.2}",
        sample_count,
        baseline,
        result.mean,
        result.min,
        result.max
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::distribution::build_distribution;
    use crate::core::rng::ForecastRng;

    #[test]
    fn test_mean_converges_to_expectation() {
        let dist = build_distribution(&[1.0, 2.0]);
        let mut rng = ForecastRng::seeded(7);

        let result = simulate(100.0, &dist, 100_000, &mut rng).unwrap();

        assert!((result.mean - 150.0).abs() < 150.0 * 0.02);
        assert!(result.min == 100.0 || result.min == 200.0);
        assert!(result.max == 100.0 || result.max == 200.0);
        assert_eq!(result.sample_count, 100_000);
        assert_eq!(result.baseline, 100.0);
    }

    #[test]
    fn test_frequencies_follow_weights() {
        // 0.5 出現 1 次、1.0 出現 3 次
        let dist = build_distribution(&[0.5, 1.0, 1.0, 1.0]);
        let mut rng = ForecastRng::seeded(11);

        let result = simulate(1000.0, &dist, 50_000, &mut rng).unwrap();

        // 期望值 = 1000 * (0.25 * 0.5 + 0.75 * 1.0) = 875
        assert!((result.mean - 875.0).abs() < 875.0 * 0.02);
        assert_eq!(result.min, 500.0);
        assert_eq!(result.max, 1000.0);
    }

    #[test]
    fn test_single_ratio_is_deterministic() {
        let dist = build_distribution(&[1.25]);
        let mut rng = ForecastRng::seeded(3);

        let result = simulate(400.0, &dist, 10, &mut rng).unwrap();
        assert_eq!(result.mean, 500.0);
        assert_eq!(result.min, 500.0);
        assert_eq!(result.max, 500.0);
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        let dist = build_distribution(&[0.9, 1.1, 1.3, 1.1]);

        let first = simulate(1000.0, &dist, 3000, &mut ForecastRng::seeded(99)).unwrap();
        let second = simulate(1000.0, &dist, 3000, &mut ForecastRng::seeded(99)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_distribution_is_rejected() {
        let dist = build_distribution(&[]);
        let err = simulate(100.0, &dist, 10, &mut ForecastRng::seeded(1)).unwrap_err();
        assert!(matches!(err, ForecastError::EmptyDistribution));
    }

    #[test]
    fn test_zero_sample_count_is_invalid() {
        let dist = build_distribution(&[1.0]);
        let err = simulate(100.0, &dist, 0, &mut ForecastRng::seeded(1)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_negative_baseline_is_invalid() {
        let dist = build_distribution(&[1.0]);
        let err = simulate(-1.0, &dist, 10, &mut ForecastRng::seeded(1)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }
}
