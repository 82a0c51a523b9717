//! CSV Data Loader Module
//! Reads the semicolon-delimited crime file as text and memoizes the cleaned table.

use crate::data::CleanTable;
use crate::{DashboardError, DashboardResult};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Delimiter of the crime statistics export.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Reader settings shared by every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Read the file with every column as text.
pub fn read_raw_table(path: &Path, options: &LoadOptions) -> DashboardResult<DataFrame> {
    if !path.is_file() {
        return Err(DashboardError::FileNotFound(path.to_path_buf()));
    }

    tracing::debug!(
        "Reading CSV '{}' with delimiter '{}'",
        path.display(),
        options.delimiter as char
    );

    // A zero-row inference window reads every column as String.
    let df = LazyCsvReader::new(path)
        .with_separator(options.delimiter)
        .with_has_header(true)
        .with_quote_char(Some(b'"'))
        .with_infer_schema_length(Some(0))
        .finish()?
        .collect()?;

    Ok(df)
}

/// Read and clean one file. Cell-level problems never fail the load.
pub fn load_table(path: &Path, options: &LoadOptions) -> DashboardResult<CleanTable> {
    let raw = read_raw_table(path, options)?;
    let table = CleanTable::from_raw(&raw)?;

    let report = table.report()?;
    tracing::info!("Loaded '{}': {report}", path.display());
    if report.rows_without_period > 0 {
        tracing::warn!(
            "{} rows have no valid year/month and are left out of range filters",
            report.rows_without_period
        );
    }

    Ok(table)
}

/// Memoized loader owned by the application.
///
/// Each path is read once; later calls hand out the same `Arc` without
/// touching the file again. Entries are never invalidated.
#[derive(Debug, Default)]
pub struct TableCache {
    options: LoadOptions,
    tables: HashMap<PathBuf, Arc<CleanTable>>,
}

impl TableCache {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            tables: HashMap::new(),
        }
    }

    pub fn get_or_load(&mut self, path: &Path) -> DashboardResult<Arc<CleanTable>> {
        if let Some(table) = self.tables.get(path) {
            tracing::debug!("Cache hit for '{}'", path.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_table(path, &self.options)?);
        self.tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// `cargo test -- --show-output tests_loader`
#[cfg(test)]
mod tests_loader {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_every_column_as_text() {
        let file = write_csv("ano;mes;furto\n2019;1;\"1.234,5\"\n2019;2;7\n");
        let raw = read_raw_table(file.path(), &LoadOptions::default()).unwrap();

        assert_eq!(raw.height(), 2);
        for column in raw.get_columns() {
            assert_eq!(column.dtype(), &DataType::String);
        }
    }

    #[test]
    fn cache_returns_the_same_table() {
        let file = write_csv("ano;mes;furto\n2019;1;10\n2020;1;12\n");
        let path = file.path().to_path_buf();
        let mut cache = TableCache::default();

        let first = cache.get_or_load(&path).unwrap();

        // The second call must not read the file again.
        file.close().unwrap();
        let second = cache.get_or_load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut cache = TableCache::default();
        let result = cache.get_or_load(Path::new("/definitely/not/here.csv"));

        assert!(matches!(result, Err(DashboardError::FileNotFound(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let file = write_csv("year;mes;furto\n2019;1;10\n");
        let result = load_table(file.path(), &LoadOptions::default());

        assert!(matches!(result, Err(DashboardError::MissingColumn(name)) if name == "ano"));
    }

    #[test]
    fn honours_configured_delimiter() {
        let file = write_csv("ano,mes,furto\n2019,3,4\n");
        let options = LoadOptions { delimiter: b',' };
        let table = load_table(file.path(), &options).unwrap();

        assert_eq!(table.metrics(), ["furto"]);
        assert_eq!(table.metric_values("furto").unwrap(), vec![Some(4.0)]);
    }
}
