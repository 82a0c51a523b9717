//! Cell Cleaning Module
//! Total parsers applied to every raw text cell. A cell that cannot be parsed
//! becomes null; nothing in here fails on bad data, only on polars errors.

use crate::DashboardResult;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch; polars dates count from the latter.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Trim whitespace and remove double quotes from a raw text cell.
pub fn clean_text(cell: &str) -> String {
    cell.replace('"', "").trim().to_string()
}

/// Parse an integer cell.
///
/// Integral decimals such as `"2019.0"` are accepted; anything else is `None`.
pub fn parse_integer(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i32>() {
        return Some(value);
    }

    let value = text.parse::<f64>().ok()?;
    let in_range = value >= i32::MIN as f64 && value <= i32::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// Parse a month cell, rejecting values outside `1..=12`.
pub fn parse_month(text: &str) -> Option<i32> {
    parse_integer(text).filter(|month| (1..=12).contains(month))
}

/// Normalize and parse a numeric cell.
///
/// When the text carries a comma it is read as the decimal separator and
/// every `.` as a thousands separator (`"1.234,56"` → `1234.56`). Then all
/// characters other than digits, `.` and `-` are dropped (`"R$ 45"` → `45`).
pub fn clean_number(text: &str) -> Option<f64> {
    let normalized = if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    };

    let digits: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// First day of the month, or `None` if either part is missing or invalid.
pub fn period_of(year: Option<i32>, month: Option<i32>) -> Option<NaiveDate> {
    let month = u32::try_from(month?).ok()?;
    NaiveDate::from_ymd_opt(year?, month, 1)
}

/// Polars `Date` physical value (days since 1970-01-01).
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(EPOCH_DAYS_FROM_CE)?)
}

/// Read a column as cleaned text, whatever its current dtype.
fn text_cells(column: &Column) -> DashboardResult<Vec<Option<String>>> {
    let as_text = column.cast(&DataType::String)?;
    let cells = as_text
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|cell| cell.map(clean_text))
        .collect();
    Ok(cells)
}

pub fn clean_year_column(column: &Column) -> DashboardResult<Vec<Option<i32>>> {
    Ok(text_cells(column)?
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_integer))
        .collect())
}

pub fn clean_month_column(column: &Column) -> DashboardResult<Vec<Option<i32>>> {
    Ok(text_cells(column)?
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_month))
        .collect())
}

/// Coerce one metric column to `Float64`, keeping its name.
///
/// Columns that are already numeric are cast directly, so an already
/// cleaned table goes through unchanged.
pub fn clean_metric_column(column: &Column) -> DashboardResult<Column> {
    if matches!(
        column.dtype(),
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    ) {
        return Ok(column.cast(&DataType::Float64)?);
    }

    let values: Vec<Option<f64>> = text_cells(column)?
        .iter()
        .map(|cell| cell.as_deref().and_then(clean_number))
        .collect();

    Ok(Column::new(column.name().clone(), values))
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// `cargo test -- --show-output tests_cleaner`
#[cfg(test)]
mod tests_cleaner {
    use super::*;

    #[test]
    fn clean_number_handles_locale_and_artifacts() {
        assert_eq!(clean_number("1.234,56"), Some(1234.56));
        assert_eq!(clean_number("R$ 45"), Some(45.0));
        assert_eq!(clean_number("--"), None);
        assert_eq!(clean_number(""), None);
        assert_eq!(clean_number("12,5"), Some(12.5));
        assert_eq!(clean_number("-3,0"), Some(-3.0));
        assert_eq!(clean_number(" 7 casos "), Some(7.0));
        assert_eq!(clean_number("-"), None);
        assert_eq!(clean_number("abc"), None);
    }

    #[test]
    fn clean_number_is_idempotent() {
        for raw in ["1.234,56", "R$ 45", "0,1", "-10,0", "78.90", "3", "500,"] {
            let once = clean_number(raw).unwrap();
            let twice = clean_number(&once.to_string());
            assert_eq!(twice, Some(once), "re-cleaning {raw:?}");
        }
    }

    #[test]
    fn clean_text_strips_quotes_and_whitespace() {
        assert_eq!(clean_text("  \"12\" "), "12");
        assert_eq!(clean_text("\"Capital\""), "Capital");
        assert_eq!(clean_text("plain"), "plain");
    }

    #[test]
    fn parse_integer_is_total() {
        assert_eq!(parse_integer("2019"), Some(2019));
        assert_eq!(parse_integer(" 2019 "), Some(2019));
        assert_eq!(parse_integer("2019.0"), Some(2019));
        assert_eq!(parse_integer("2019.5"), None);
        assert_eq!(parse_integer("13a"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("NaN"), None);
    }

    #[test]
    fn parse_month_rejects_out_of_range() {
        assert_eq!(parse_month("1"), Some(1));
        assert_eq!(parse_month("12"), Some(12));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("13"), None);
    }

    #[test]
    fn period_requires_both_parts() {
        assert_eq!(
            period_of(Some(2019), Some(3)),
            NaiveDate::from_ymd_opt(2019, 3, 1)
        );
        assert_eq!(period_of(None, Some(3)), None);
        assert_eq!(period_of(Some(2019), None), None);
        assert_eq!(period_of(Some(2019), Some(13)), None);
    }

    #[test]
    fn epoch_days_match_polars_dates() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(days_since_epoch(epoch), 0);

        let date = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        assert_eq!(days_since_epoch(date), 18293);
        assert_eq!(date_from_days(18293), Some(date));
    }

    #[test]
    fn metric_column_keeps_name_and_nulls() -> DashboardResult<()> {
        let raw = Column::new("roubo".into(), &[Some("1,5"), Some("x"), None]);
        let cleaned = clean_metric_column(&raw)?;

        assert_eq!(cleaned.name().as_str(), "roubo");
        let values: Vec<Option<f64>> = cleaned.as_materialized_series().f64()?.into_iter().collect();
        assert_eq!(values, vec![Some(1.5), None, None]);
        Ok(())
    }
}
