use crate::domain::model::{GrowthRatio, YearTotal};

/// 成長率計算結果；`excluded_years` 為前一列總數為 0 或比值非有限而被剔除的年份
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthSeries {
    pub ratios: Vec<GrowthRatio>,
    pub excluded_years: Vec<i32>,
}

/// 相鄰兩列 (依年份排序後) 的比值: total_i / total_{i-1}
///
/// 比較的是排序後的前一列，而非日曆上的前一年，年份有缺口時會跨過缺口。
pub fn extract_growth(totals: &[YearTotal]) -> GrowthSeries {
    let mut sorted: Vec<&YearTotal> = totals.iter().collect();
    sorted.sort_by_key(|total| total.year);

    let mut series = GrowthSeries::default();

    for pair in sorted.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        let ratio = current.total / previous.total;

        if previous.total == 0.0 {
            tracing::warn!(
                "⚠️ Skipping growth for {}: previous total ({}) is zero",
                current.year,
                previous.year
            );
            series.excluded_years.push(current.year);
            continue;
        }
        if !ratio.is_finite() {
            tracing::warn!(
                "⚠️ Skipping growth for {}: ratio {} / {} is not finite",
                current.year,
                current.total,
                previous.total
            );
            series.excluded_years.push(current.year);
            continue;
        }

        series.ratios.push(GrowthRatio {
            year: current.year,
            ratio,
        });
    }

    series
}

pub fn growth_ratios(totals: &[YearTotal]) -> Vec<GrowthRatio> {
    extract_growth(totals).ratios
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_ratio_arithmetic() {
        let totals = vec![
            YearTotal::new(2018, 100.0),
            YearTotal::new(2019, 150.0),
            YearTotal::new(2020, 120.0),
        ];

        let ratios = growth_ratios(&totals);

        assert_eq!(
            ratios,
            vec![
                GrowthRatio { year: 2019, ratio: 1.5 },
                GrowthRatio { year: 2020, ratio: 0.8 },
            ]
        );
    }

    #[test]
    fn test_non_finite_ratio_is_excluded() {
        let totals = vec![
            YearTotal::new(2018, 10.0),
            YearTotal::new(2019, f64::INFINITY),
            YearTotal::new(2020, 20.0),
        ];

        let series = extract_growth(&totals);

        // inf / 10 與 20 / inf (= 0) 分別處理：前者剔除，後者為有限值
        assert_eq!(series.excluded_years, vec![2019]);
        assert_eq!(series.ratios, vec![GrowthRatio { year: 2020, ratio: 0.0 }]);
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let totals = vec![
            YearTotal::new(2020, 120.0),
            YearTotal::new(2018, 100.0),
            YearTotal::new(2019, 150.0),
        ];

        let years: Vec<i32> = growth_ratios(&totals).iter().map(|g| g.year).collect();
        assert_eq!(years, vec![2019, 2020]);
    }

    #[test]
    fn test_year_gap_uses_previous_row() {
        let totals = vec![YearTotal::new(2015, 200.0), YearTotal::new(2018, 300.0)];

        let ratios = growth_ratios(&totals);
        assert_eq!(ratios, vec![GrowthRatio { year: 2018, ratio: 1.5 }]);
    }

    #[test]
    fn test_zero_previous_total_is_excluded() {
        let totals = vec![
            YearTotal::new(2018, 100.0),
            YearTotal::new(2019, 0.0),
            YearTotal::new(2020, 50.0),
            YearTotal::new(2021, 100.0),
        ];

        let series = extract_growth(&totals);

        assert_eq!(series.excluded_years, vec![2020]);
        assert_eq!(
            series.ratios,
            vec![
                GrowthRatio { year: 2019, ratio: 0.0 },
                GrowthRatio { year: 2021, ratio: 2.0 },
            ]
        );
        assert!(series.ratios.iter().all(|g| g.ratio.is_finite()));
    }

    #[test]
    fn test_short_series_yields_nothing() {
        assert!(growth_ratios(&[]).is_empty());
        assert!(growth_ratios(&[YearTotal::new(2020, 10.0)]).is_empty());
    }
}
