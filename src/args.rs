//! Command-line interface definitions and argument parsing

use crate::data::{LoadOptions, DEFAULT_DELIMITER};
use crate::{DashboardError, DashboardResult};
use clap::Parser;
use std::path::PathBuf;

/// Interactive viewer for monthly crime statistics (semicolon-delimited CSV).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Path to the crime statistics file. If omitted, pick one from the window.
    #[arg(value_name = "FILE_PATH")]
    pub path: Option<PathBuf>,

    /// CSV delimiter character
    #[arg(short, long, default_value_t = (DEFAULT_DELIMITER as char).to_string())]
    pub delimiter: String,
}

impl Arguments {
    pub fn build() -> Self {
        Self::parse()
    }

    /// Validate the reader settings; the delimiter must be a single ASCII character.
    pub fn load_options(&self) -> DashboardResult<LoadOptions> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(LoadOptions { delimiter: *byte }),
            _ => Err(DashboardError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let args = Arguments::try_parse_from(["crime_dashboard"]).unwrap();
        assert_eq!(args.path, None);
        assert_eq!(args.load_options().unwrap(), LoadOptions::default());
    }

    #[test]
    fn test_delimiter_validation() {
        let args = Arguments::try_parse_from(["crime_dashboard", "-d", ",", "data.csv"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("data.csv")));
        assert_eq!(args.load_options().unwrap().delimiter, b',');

        let args = Arguments::try_parse_from(["crime_dashboard", "--delimiter", ";;"]).unwrap();
        assert!(matches!(
            args.load_options(),
            Err(DashboardError::InvalidDelimiter(_))
        ));

        let args = Arguments::try_parse_from(["crime_dashboard", "-d", "§"]).unwrap();
        assert!(args.load_options().is_err());
    }
}
