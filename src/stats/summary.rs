//! Summary Statistics Module
//! Descriptive statistics for each selected metric over the filtered rows.

use crate::data::FilteredTable;
use crate::DashboardResult;
use statrs::statistics::Statistics;

/// Statistics for one metric series. Null cells are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub metric: String,
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for SeriesSummary {
    fn default() -> Self {
        Self {
            metric: String::new(),
            count: 0,
            total: f64::NAN,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl SeriesSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Summarize one series; an all-null series yields `count == 0` and NaN statistics.
    pub fn summarize(metric: &str, values: &[Option<f64>]) -> SeriesSummary {
        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let n = present.len();
        if n == 0 {
            return SeriesSummary {
                metric: metric.to_string(),
                ..Default::default()
            };
        }

        let mut sorted = present.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let std = if n > 1 { present.iter().std_dev() } else { 0.0 };

        SeriesSummary {
            metric: metric.to_string(),
            count: n,
            total: present.iter().sum(),
            mean: present.iter().mean(),
            median: Self::percentile(&sorted, 50.0),
            std,
            min: Statistics::min(present.iter()),
            max: Statistics::max(present.iter()),
        }
    }

    /// One summary per selected metric, in selection order.
    pub fn summarize_filtered(filtered: &FilteredTable) -> DashboardResult<Vec<SeriesSummary>> {
        filtered
            .metrics()
            .iter()
            .map(|metric| -> DashboardResult<SeriesSummary> {
                Ok(Self::summarize(metric, &filtered.metric_values(metric)?))
            })
            .collect()
    }

    /// Percentile with linear interpolation between closest ranks.
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// `cargo test -- --show-output tests_summary`
#[cfg(test)]
mod tests_summary {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn summarizes_present_values_only() {
        let summary =
            SummaryCalculator::summarize("furto", &[Some(1.0), None, Some(2.0), Some(3.0), Some(4.0)]);

        assert_eq!(summary.metric, "furto");
        assert_eq!(summary.count, 4);
        assert_close(summary.total, 10.0);
        assert_close(summary.mean, 2.5);
        assert_close(summary.median, 2.5);
        assert_close(summary.min, 1.0);
        assert_close(summary.max, 4.0);
        // sample standard deviation of 1..=4
        assert_close(summary.std, (5.0f64 / 3.0).sqrt());
    }

    #[test]
    fn single_value_has_zero_spread() {
        let summary = SummaryCalculator::summarize("roubo", &[Some(7.5)]);
        assert_eq!(summary.count, 1);
        assert_close(summary.median, 7.5);
        assert_close(summary.std, 0.0);
    }

    #[test]
    fn all_null_series_is_empty() {
        let summary = SummaryCalculator::summarize("sem_dados", &[None, None]);
        assert!(summary.is_empty());
        assert!(summary.mean.is_nan());
    }
}
