use crate::core::engine::ForecastReport;
use crate::domain::model::{GrowthDistribution, YearTotal};
use crate::utils::error::Result;
use std::collections::BTreeSet;
use std::fmt::Write;

/// 歷年總數表，每個類別一欄
pub fn render_history(totals: &[YearTotal]) -> String {
    let categories: BTreeSet<&str> = totals
        .iter()
        .flat_map(|total| total.by_category.keys().map(String::as_str))
        .collect();

    let mut out = String::new();
    let mut header = format!("{:>6}", "year");
    for category in &categories {
        header.push_str(&format!(" {:>14}", category));
    }
    header.push_str(&format!(" {:>14}", "TOTAL"));
    out.push_str(&header);
    out.push('\n');

    for total in totals {
        let mut line = format!("{:>6}", total.year);
        for category in &categories {
            line.push_str(&format!(" {:>14}", total.category_amount(category) as i64));
        }
        line.push_str(&format!(" {:>14}", total.total as i64));
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_distribution(distribution: &GrowthDistribution) -> String {
    let mut out = format!("{:>12} {:>6} {:>12}\n", "growth", "count", "probability");
    for entry in distribution.entries() {
        let _ = writeln!(
            out,
            "{:>12.6} {:>6} {:>12.4}",
            entry.ratio, entry.count, entry.probability
        );
    }
    out
}

pub fn render_forecast(report: &ForecastReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    let year = report
        .forecast_year
        .map(|year| year.to_string())
        .unwrap_or_else(|| "next year".to_string());

    let _ = writeln!(out, "Monte Carlo forecast for {}", year);
    let _ = writeln!(out, "  simulations      : {}", summary.sample_count);
    let _ = writeln!(out, "  last known total : {}", summary.baseline);
    let _ = writeln!(out, "  mean prediction  : {}", summary.mean);
    let _ = writeln!(out, "  min prediction   : {}", summary.min);
    let _ = writeln!(out, "  max prediction   : {}", summary.max);
    out
}

pub fn render_forecast_json(report: &ForecastReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
