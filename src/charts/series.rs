//! Chart Series Module
//! Tidy, UI-free description of the trend chart, or the decision not to draw one.

use crate::data::FilteredTable;
use crate::DashboardResult;
use chrono::{Datelike, NaiveDate};

/// One metric series keyed by period. `None` values are gaps in the line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub metric: String,
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

/// Everything the chart collaborator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub series: Vec<ChartSeries>,
}

/// Outcome of binding a filtered table to the chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Nothing to plot: show a warning instead of a chart.
    NoData,
    Chart(ChartData),
}

impl Presentation {
    pub fn from_filtered(filtered: &FilteredTable) -> DashboardResult<Self> {
        if !filtered.has_renderable_data() {
            return Ok(Presentation::NoData);
        }

        let periods = filtered.periods()?;
        let mut series = Vec::with_capacity(filtered.metrics().len());

        for metric in filtered.metrics() {
            let values = filtered.metric_values(metric)?;
            // Rows without a period cannot be placed on the time axis.
            let points = periods
                .iter()
                .zip(values)
                .filter_map(|(period, value)| period.map(|p| (p, value)))
                .collect();

            series.push(ChartSeries {
                metric: metric.clone(),
                points,
            });
        }

        // Values only on rows without a period leave nothing to plot.
        if !series.iter().any(ChartSeries::has_points) {
            return Ok(Presentation::NoData);
        }

        let (start, end) = filtered.year_range();
        Ok(Presentation::Chart(ChartData {
            title: format!("Crime trend from {start} to {end}"),
            series,
        }))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Presentation::NoData)
    }
}

impl ChartSeries {
    /// True when at least one value can be placed on the chart.
    pub fn has_points(&self) -> bool {
        self.points.iter().any(|(_, value)| value.is_some())
    }

    /// Contiguous runs of non-null points as `[month_index, value]` pairs.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for (period, value) in &self.points {
            match value {
                Some(v) => current.push([month_index(*period), *v]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        segments
    }
}

/// Months since year 0, so consecutive months are one unit apart on the x axis.
pub fn month_index(period: NaiveDate) -> f64 {
    f64::from(period.year()) * 12.0 + f64::from(period.month0())
}

/// `%b/%Y` label for a whole month index; empty between months.
pub fn month_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        return String::new();
    }

    let index = rounded as i64;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) + 1;

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month as u32, 1))
        .map(|date| date.format("%b/%Y").to_string())
        .unwrap_or_default()
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//
