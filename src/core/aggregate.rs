use crate::domain::model::{YearTotal, YearlyRecord};
use crate::utils::error::{ForecastError, Result};
use std::collections::BTreeMap;

/// `row` 為輸入序列中從 1 起算的位置
fn validate_record(row: usize, record: &YearlyRecord) -> Result<()> {
    let invalid = |field: &str, value: String, reason: &str| ForecastError::DataValidationError {
        row,
        field: field.to_string(),
        value,
        reason: reason.to_string(),
    };

    if record.year < 0 {
        return Err(invalid("year", record.year.to_string(), "year must not be negative"));
    }
    if !record.amount.is_finite() {
        return Err(invalid("amount", record.amount.to_string(), "amount must be finite"));
    }
    if record.amount < 0.0 {
        return Err(invalid(
            "amount",
            record.amount.to_string(),
            "amount must not be negative",
        ));
    }
    Ok(())
}

/// 依年份彙總各類別人數，輸出依年份遞增排序
///
/// 年份為負、人數為負或非有限值時回傳 `DataValidationError`，不做任何修正。
pub fn aggregate(records: &[YearlyRecord]) -> Result<Vec<YearTotal>> {
    // BTreeMap 保證年份遞增、類別排序穩定
    let mut pivot: BTreeMap<i32, BTreeMap<String, f64>> = BTreeMap::new();

    for (i, record) in records.iter().enumerate() {
        validate_record(i + 1, record)?;
        *pivot
            .entry(record.year)
            .or_default()
            .entry(record.category.clone())
            .or_insert(0.0) += record.amount;
    }

    let totals: Vec<YearTotal> = pivot
        .into_iter()
        .map(|(year, by_category)| YearTotal {
            year,
            total: by_category.values().sum(),
            by_category,
        })
        .collect();

    tracing::debug!(
        "Aggregated {} records into {} yearly totals",
        records.len(),
        totals.len()
    );
    Ok(totals)
}

/// 只保留指定類別；`allowed` 為空時不過濾
pub fn filter_categories(records: Vec<YearlyRecord>, allowed: &[String]) -> Vec<YearlyRecord> {
    if allowed.is_empty() {
        return records;
    }

    let before = records.len();
    let kept: Vec<YearlyRecord> = records
        .into_iter()
        .filter(|record| allowed.iter().any(|category| category == &record.category))
        .collect();

    if kept.len() < before {
        tracing::debug!(
            "Category filter dropped {} of {} records (allowed: {})",
            before - kept.len(),
            before,
            allowed.join(", ")
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<YearlyRecord> {
        vec![
            YearlyRecord::new(2020, "MANCANEGARA", 50.0),
            YearlyRecord::new(2019, "DOMESTIK", 100.0),
            YearlyRecord::new(2019, "MANCANEGARA", 20.0),
            YearlyRecord::new(2020, "DOMESTIK", 70.0),
            YearlyRecord::new(2019, "DOMESTIK", 5.0),
            YearlyRecord::new(2021, "DOMESTIK", 90.0),
        ]
    }

    #[test]
    fn test_aggregate_sums_per_year() {
        let totals = aggregate(&sample_records()).unwrap();

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].year, 2019);
        assert_eq!(totals[0].total, 125.0);
        assert_eq!(totals[0].category_amount("DOMESTIK"), 105.0);
        assert_eq!(totals[1].year, 2020);
        assert_eq!(totals[1].total, 120.0);
        assert_eq!(totals[2].year, 2021);
        assert_eq!(totals[2].total, 90.0);
        assert_eq!(totals[2].category_amount("MANCANEGARA"), 0.0);
    }

    #[test]
    fn test_aggregate_total_matches_raw_sum() {
        let records = sample_records();
        let totals = aggregate(&records).unwrap();

        for total in &totals {
            let expected: f64 = records
                .iter()
                .filter(|record| record.year == total.year)
                .map(|record| record.amount)
                .sum();
            assert!((total.total - expected).abs() < 1e-9);
        }

        let mut years: Vec<i32> = records.iter().map(|record| record.year).collect();
        years.sort();
        years.dedup();
        assert_eq!(totals.iter().map(|t| t.year).collect::<Vec<_>>(), years);
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let records = vec![
            YearlyRecord::new(2019, "DOMESTIK", 100.0),
            YearlyRecord::new(2020, "DOMESTIK", -50.0),
            YearlyRecord::new(2021, "DOMESTIK", 25.0),
        ];

        match aggregate(&records).unwrap_err() {
            ForecastError::DataValidationError { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "amount");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let records = vec![
                YearlyRecord::new(2019, "DOMESTIK", 100.0),
                YearlyRecord::new(2020, "MANCANEGARA", amount),
            ];
            let err = aggregate(&records).unwrap_err();
            assert!(matches!(
                err,
                ForecastError::DataValidationError { row: 2, ref field, .. } if field == "amount"
            ));
        }
    }

    #[test]
    fn test_negative_year_is_rejected() {
        let records = vec![YearlyRecord::new(-1, "DOMESTIK", 10.0)];
        let err = aggregate(&records).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DataValidationError { row: 1, ref field, .. } if field == "year"
        ));
    }

    #[test]
    fn test_filter_categories() {
        let allowed = vec!["DOMESTIK".to_string()];
        let kept = filter_categories(sample_records(), &allowed);
        assert_eq!(kept.len(), 4);
        assert!(kept.iter().all(|record| record.category == "DOMESTIK"));

        assert_eq!(filter_categories(sample_records(), &[]).len(), 6);
    }
}
